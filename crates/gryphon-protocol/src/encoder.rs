//! Turns domain-level response messages into ordered wire frames.
//!
//! One encode call produces the complete frame sequence for one response:
//! a lone frame for success statuses, the response frame plus a terminator
//! frame for non-success statuses, and a substituted serialization-error
//! response plus terminator when the message itself cannot be serialized.
//! When the response belongs to a stateful session, every serialization runs
//! on that session's dedicated thread so frames for one session always hit
//! the wire in submission order.

use std::sync::Arc;

use gryphon_common::metrics::ErrorMeter;
use gryphon_common::{Error, Result};
use tracing::{trace, warn};

use crate::frame::WireFrame;
use crate::response::{ResponseMessage, ResponseStatusCode};
use crate::serializer::MessageSerializer;
use crate::session::SessionHandle;

/// Per-call context supplied by the transport layer.
///
/// The serializer and wire mode are fixed per connection at handshake time;
/// the session is present only for requests bound to a stateful session.
#[derive(Clone)]
pub struct EncodeContext {
    /// Codec negotiated for this connection
    pub serializer: Arc<dyn MessageSerializer>,
    /// True for binary-mode connections, false for text mode
    pub binary: bool,
    /// The session this response is attributed to, if any
    pub session: Option<SessionHandle>,
}

impl EncodeContext {
    pub fn new(serializer: Arc<dyn MessageSerializer>, binary: bool) -> Self {
        EncodeContext {
            serializer,
            binary,
            session: None,
        }
    }

    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }
}

/// Stateless, reentrant encoder for outbound responses.
///
/// Holds nothing but the injected error meter; safe to share across
/// connections and invoke concurrently for unrelated responses.
pub struct ResponseFrameEncoder {
    errors: Arc<dyn ErrorMeter>,
}

impl ResponseFrameEncoder {
    pub fn new(errors: Arc<dyn ErrorMeter>) -> Self {
        ResponseFrameEncoder { errors }
    }

    /// Encode `message` into the ordered frame list to write out.
    ///
    /// Success statuses yield exactly one frame. Non-success statuses yield
    /// the message frame followed by a terminator frame for the same request
    /// id, and mark the error meter. A message that cannot be serialized is
    /// replaced by a [`ResponseStatusCode::ServerErrorSerialization`]
    /// response plus terminator so the client still sees a well-formed end
    /// of stream. `Err` is returned only when that fallback cannot be
    /// serialized either; the caller must treat it as a fatal write failure.
    pub fn encode(&self, message: &ResponseMessage, ctx: &EncodeContext) -> Result<Vec<WireFrame>> {
        match self.encode_message(message, ctx) {
            Ok(frames) => Ok(frames),
            Err(cause) => self.encode_fallback(message, ctx, cause),
        }
    }

    fn encode_message(
        &self,
        message: &ResponseMessage,
        ctx: &EncodeContext,
    ) -> Result<Vec<WireFrame>> {
        let frame = self.serialize(message, ctx)?;
        if message.status.is_success() {
            trace!(request_id = %message.request_id, "encoded response");
            return Ok(vec![frame]);
        }

        // clients tolerate multiple partial frames per request, so an error
        // needs an explicit end-of-stream marker after it
        let terminator = ResponseMessage::terminator(message.request_id);
        let terminator_frame = self.serialize(&terminator, ctx)?;
        self.errors.mark();
        trace!(
            request_id = %message.request_id,
            status = ?message.status,
            "encoded non-success response with terminator"
        );
        Ok(vec![frame, terminator_frame])
    }

    fn encode_fallback(
        &self,
        original: &ResponseMessage,
        ctx: &EncodeContext,
        cause: Error,
    ) -> Result<Vec<WireFrame>> {
        self.errors.mark();
        warn!(
            request_id = %original.request_id,
            result = ?original.result,
            error = %cause,
            "response could not be serialized, substituting a serialization error"
        );

        let substitute = ResponseMessage::build(original.request_id)
            .status(ResponseStatusCode::ServerErrorSerialization)
            .status_message(format!(
                "Error during serialization: {}",
                cause.root_cause()
            ))
            .create();
        let frame = self.serialize(&substitute, ctx)?;
        let terminator = ResponseMessage::terminator(original.request_id);
        let terminator_frame = self.serialize(&terminator, ctx)?;
        Ok(vec![frame, terminator_frame])
    }

    /// One serialization unit: inline, or on the session's thread when the
    /// response is attributed to a session.
    fn serialize(&self, message: &ResponseMessage, ctx: &EncodeContext) -> Result<WireFrame> {
        match &ctx.session {
            None => Self::run_serializer(ctx.serializer.as_ref(), message, ctx.binary),
            Some(session) => {
                let serializer = Arc::clone(&ctx.serializer);
                let message = message.clone();
                let binary = ctx.binary;
                session.submit(move || Self::run_serializer(serializer.as_ref(), &message, binary))?
            }
        }
    }

    fn run_serializer(
        serializer: &dyn MessageSerializer,
        message: &ResponseMessage,
        binary: bool,
    ) -> Result<WireFrame> {
        if binary {
            Ok(WireFrame::Binary(serializer.serialize_binary(message)?))
        } else {
            Ok(WireFrame::Text(serializer.serialize_text(message)?))
        }
    }
}

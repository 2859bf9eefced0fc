//! Response messages and status codes for the Gryphon query protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Status code carried by every response message.
///
/// Codes are partitioned into a success class (everything below 300,
/// including the stream-ending [`SuccessTerminator`](Self::SuccessTerminator)
/// sentinel) and a non-success class. Upstream components produce an open
/// set of non-success codes; anything this crate does not know by name is
/// preserved as [`Other`](Self::Other) and classified by its numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum ResponseStatusCode {
    /// The request completed and the response carries a result
    Success,
    /// The request completed but produced no result
    NoContent,
    /// One chunk of a streamed result; more frames follow
    PartialContent,
    /// Sentinel that ends a response stream; carries no result
    SuccessTerminator,
    /// The request was not authorized
    Unauthorized,
    /// The server requires authentication before evaluating the request
    Authenticate,
    /// The request could not be parsed
    MalformedRequest,
    /// The request arguments were invalid
    InvalidRequestArguments,
    /// A general server-side failure
    ServerError,
    /// The query could not be evaluated
    ServerErrorEvaluation,
    /// The query timed out server-side
    ServerErrorTimeout,
    /// The response could not be serialized; produced only by the
    /// frame encoder's fallback path
    ServerErrorSerialization,
    /// A code this crate does not know by name, passed through verbatim
    Other(u16),
}

impl ResponseStatusCode {
    /// The numeric wire code.
    pub const fn code(&self) -> u16 {
        match self {
            ResponseStatusCode::Success => 200,
            ResponseStatusCode::NoContent => 204,
            ResponseStatusCode::PartialContent => 206,
            ResponseStatusCode::SuccessTerminator => 299,
            ResponseStatusCode::Unauthorized => 401,
            ResponseStatusCode::Authenticate => 407,
            ResponseStatusCode::MalformedRequest => 498,
            ResponseStatusCode::InvalidRequestArguments => 499,
            ResponseStatusCode::ServerError => 500,
            ResponseStatusCode::ServerErrorEvaluation => 597,
            ResponseStatusCode::ServerErrorTimeout => 598,
            ResponseStatusCode::ServerErrorSerialization => 599,
            ResponseStatusCode::Other(code) => *code,
        }
    }

    /// Whether this code belongs to the success class.
    ///
    /// Non-success responses are followed by a terminator frame on the wire;
    /// success responses stand alone.
    pub const fn is_success(&self) -> bool {
        self.code() < 300
    }
}

impl From<u16> for ResponseStatusCode {
    fn from(code: u16) -> Self {
        match code {
            200 => ResponseStatusCode::Success,
            204 => ResponseStatusCode::NoContent,
            206 => ResponseStatusCode::PartialContent,
            299 => ResponseStatusCode::SuccessTerminator,
            401 => ResponseStatusCode::Unauthorized,
            407 => ResponseStatusCode::Authenticate,
            498 => ResponseStatusCode::MalformedRequest,
            499 => ResponseStatusCode::InvalidRequestArguments,
            500 => ResponseStatusCode::ServerError,
            597 => ResponseStatusCode::ServerErrorEvaluation,
            598 => ResponseStatusCode::ServerErrorTimeout,
            599 => ResponseStatusCode::ServerErrorSerialization,
            other => ResponseStatusCode::Other(other),
        }
    }
}

impl From<ResponseStatusCode> for u16 {
    fn from(status: ResponseStatusCode) -> Self {
        status.code()
    }
}

/// One response on its way to a client. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Id of the request this response answers
    pub request_id: Uuid,
    /// Status classification for this response
    pub status: ResponseStatusCode,
    /// Optional human-readable elaboration of the status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// The result payload; opaque to the encoding layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl ResponseMessage {
    /// Start building a response for `request_id`. The status defaults to
    /// [`ResponseStatusCode::Success`].
    pub fn build(request_id: Uuid) -> ResponseMessageBuilder {
        ResponseMessageBuilder {
            request_id,
            status: ResponseStatusCode::Success,
            status_message: None,
            result: None,
        }
    }

    /// The sentinel message that ends the frame sequence for `request_id`.
    /// Carries no result and no status message.
    pub fn terminator(request_id: Uuid) -> Self {
        ResponseMessage {
            request_id,
            status: ResponseStatusCode::SuccessTerminator,
            status_message: None,
            result: None,
        }
    }
}

/// Builder for [`ResponseMessage`].
#[derive(Debug)]
pub struct ResponseMessageBuilder {
    request_id: Uuid,
    status: ResponseStatusCode,
    status_message: Option<String>,
    result: Option<Value>,
}

impl ResponseMessageBuilder {
    pub fn status(mut self, status: ResponseStatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    pub fn result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    pub fn create(self) -> ResponseMessage {
        ResponseMessage {
            request_id: self.request_id,
            status: self.status,
            status_message: self.status_message,
            result: self.result,
        }
    }
}

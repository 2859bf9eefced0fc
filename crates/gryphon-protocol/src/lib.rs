//! Response frame encoding for the Gryphon query protocol.
//!
//! The server answers a query with a stream of [`ResponseMessage`]s. This
//! crate turns each of them into the ordered [`WireFrame`]s the transport
//! writes out, serializing on a session's dedicated thread when the request
//! belongs to a stateful session and substituting a well-formed error
//! sequence when serialization fails.

pub mod encoder;
pub mod frame;
pub mod response;
pub mod serializer;
pub mod session;

pub use encoder::{EncodeContext, ResponseFrameEncoder};
pub use frame::WireFrame;
pub use response::{ResponseMessage, ResponseStatusCode};
pub use serializer::{JsonSerializer, MessageSerializer};
pub use session::{SessionHandle, SessionId, SessionWorker};

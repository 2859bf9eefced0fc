//! Message serialization contract and the built-in JSON codec.

use bytes::Bytes;
use gryphon_common::Result;

use crate::response::ResponseMessage;

/// Encodes response messages for the wire.
///
/// Implementations must be safe to invoke from any thread, including a
/// session's dedicated worker thread, and may fail on either mode.
pub trait MessageSerializer: Send + Sync {
    /// Encode `message` for a binary-mode connection.
    fn serialize_binary(&self, message: &ResponseMessage) -> Result<Bytes>;

    /// Encode `message` for a text-mode connection.
    fn serialize_text(&self, message: &ResponseMessage) -> Result<String>;
}

/// JSON codec: text mode emits the canonical JSON document, binary mode its
/// UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl MessageSerializer for JsonSerializer {
    fn serialize_binary(&self, message: &ResponseMessage) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(message)?))
    }

    fn serialize_text(&self, message: &ResponseMessage) -> Result<String> {
        Ok(serde_json::to_string(message)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseStatusCode;
    use serde_json::json;
    use uuid::Uuid;

    fn create_test_message() -> ResponseMessage {
        ResponseMessage::build(Uuid::new_v4())
            .result(json!({"vertices": [1, 2, 3]}))
            .create()
    }

    #[test]
    fn test_text_output_round_trips() {
        let message = create_test_message();
        let serializer = JsonSerializer::new();

        let text = serializer.serialize_text(&message).unwrap();
        let decoded: ResponseMessage = serde_json::from_str(&text).unwrap();

        assert_eq!(decoded, message);
    }

    #[test]
    fn test_binary_output_is_utf8_of_text_output() {
        let message = create_test_message();
        let serializer = JsonSerializer::new();

        let text = serializer.serialize_text(&message).unwrap();
        let binary = serializer.serialize_binary(&message).unwrap();

        assert_eq!(binary, Bytes::from(text.into_bytes()));
    }

    #[test]
    fn test_terminator_omits_absent_fields() {
        let terminator = ResponseMessage::terminator(Uuid::new_v4());
        let text = JsonSerializer::new().serialize_text(&terminator).unwrap();

        assert!(text.contains("299"));
        assert!(!text.contains("status_message"));
        assert!(!text.contains("result"));
        assert_eq!(
            serde_json::from_str::<ResponseMessage>(&text).unwrap().status,
            ResponseStatusCode::SuccessTerminator
        );
    }
}

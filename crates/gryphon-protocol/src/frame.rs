//! Application-level wire frames.
//!
//! A frame is one unit handed to the transport for delivery. The negotiated
//! wire mode decides the representation: binary connections carry serialized
//! bytes, text connections carry a serialized string. Framing below the
//! application layer (length prefixes, masking, transport chunking) is the
//! transport's concern, not this crate's.

use bytes::Bytes;

/// One application-level unit handed to the transport for delivery.
///
/// Frames are final at this layer; there is no intra-frame continuation.
/// Emission order is significant and the caller must write frames to the
/// transport in the order the encoder produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFrame {
    /// Frame for a binary-mode connection
    Binary(Bytes),
    /// Frame for a text-mode connection
    Text(String),
}

impl WireFrame {
    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        match self {
            WireFrame::Binary(bytes) => bytes.len(),
            WireFrame::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The payload as raw bytes, regardless of mode.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            WireFrame::Binary(bytes) => bytes,
            WireFrame::Text(text) => text.as_bytes(),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, WireFrame::Binary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_length_and_bytes() {
        let binary = WireFrame::Binary(Bytes::from_static(b"abc"));
        let text = WireFrame::Text("abcd".to_string());
        assert_eq!(binary.len(), 3);
        assert_eq!(text.len(), 4);
        assert_eq!(binary.as_bytes(), b"abc");
        assert_eq!(text.as_bytes(), b"abcd");
        assert!(binary.is_binary());
        assert!(!text.is_binary());
    }
}

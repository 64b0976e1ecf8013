//! Reassembles JSON requests from an unframed byte stream.

use serde_json::Value;

#[derive(Debug)]
pub enum Frame {
    Incomplete,
    Complete(Value),
    Invalid(serde_json::Error),
}

#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Frame {
        self.buf.extend_from_slice(chunk);

        match serde_json::from_slice::<Value>(&self.buf) {
            Ok(value) => {
                self.buf.clear();
                Frame::Complete(value)
            }
            Err(e) if e.is_eof() => Frame::Incomplete,
            Err(e) => {
                // Clearing here keeps one bad message from wedging the connection.
                self.buf.clear();
                Frame::Invalid(e)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_is_complete() {
        let mut buffer = FrameBuffer::new();
        match buffer.push(br#"{"type":"weather"}"#) {
            Frame::Complete(value) => assert_eq!(value["type"], "weather"),
            other => panic!("expected complete frame, got {:?}", other),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_split_chunk_waits_for_rest() {
        let mut buffer = FrameBuffer::new();
        assert!(matches!(buffer.push(br#"{"typ"#), Frame::Incomplete));
        assert_eq!(buffer.len(), 5);

        match buffer.push(br#"e":"weather"}"#) {
            Frame::Complete(value) => assert_eq!(value["type"], "weather"),
            other => panic!("expected complete frame, got {:?}", other),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_split_multibyte_character() {
        let message = r#"{"type":"weather","params":{"city":"北京"}}"#.as_bytes();
        let cut = message.iter().position(|b| *b >= 0x80).unwrap() + 1;

        let mut buffer = FrameBuffer::new();
        assert!(matches!(buffer.push(&message[..cut]), Frame::Incomplete));
        match buffer.push(&message[cut..]) {
            Frame::Complete(value) => assert_eq!(value["params"]["city"], "北京"),
            other => panic!("expected complete frame, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let message = br#"{"type":"countdown"}"#;
        let mut buffer = FrameBuffer::new();
        let (last, head) = message.split_last().unwrap();
        for byte in head {
            assert!(matches!(buffer.push(&[*byte]), Frame::Incomplete));
        }
        assert!(matches!(buffer.push(&[*last]), Frame::Complete(_)));
    }

    #[test]
    fn test_whitespace_is_incomplete_and_trailing_newline_is_accepted() {
        let mut buffer = FrameBuffer::new();
        assert!(matches!(buffer.push(b""), Frame::Incomplete));
        assert!(matches!(buffer.push(b"  \n"), Frame::Incomplete));
        assert!(matches!(buffer.push(b"{\"type\":\"timetable\"}\n"), Frame::Complete(_)));
    }

    #[test]
    fn test_malformed_is_invalid_and_clears() {
        let mut buffer = FrameBuffer::new();
        assert!(matches!(buffer.push(b"{\"type\" 1}"), Frame::Invalid(_)));
        assert!(buffer.is_empty());

        assert!(matches!(buffer.push(br#"{"type":"weather"}"#), Frame::Complete(_)));
    }

    #[test]
    fn test_back_to_back_values_are_invalid() {
        let mut buffer = FrameBuffer::new();
        assert!(matches!(
            buffer.push(br#"{"type":"weather"}{"type":"timetable"}"#),
            Frame::Invalid(_)
        ));
        assert!(buffer.is_empty());
    }
}

//! Tests for the pending weight input buffer

#[cfg(test)]
mod tests {
    use photomosaic::session::weight_buffer::WeightBuffer;

    // Tests typed characters accumulate until taken
    // Verified by clearing the buffer on every push
    #[test]
    fn test_push_and_take() {
        let mut buffer = WeightBuffer::default();
        assert!(buffer.is_empty());

        for c in "4 8 12".chars() {
            buffer.push(c);
        }

        assert_eq!(buffer.text(), "4 8 12");
        assert_eq!(buffer.take(), "4 8 12");
        assert!(buffer.is_empty());
        assert_eq!(buffer.text(), "");
    }

    // Tests writes past the capacity wrap onto the oldest slots
    // Verified by growing the buffer without bound
    #[test]
    fn test_wraps_at_capacity() {
        let mut buffer = WeightBuffer::with_capacity(3);

        for c in "12345".chars() {
            buffer.push(c);
        }

        assert_eq!(buffer.text(), "453");
    }

    // Tests the default capacity holds 127 characters
    // Verified by wrapping one character early
    #[test]
    fn test_default_capacity() {
        let mut buffer = WeightBuffer::default();

        for _ in 0..127 {
            buffer.push('1');
        }
        buffer.push('2');

        let text = buffer.text();
        assert_eq!(text.len(), 127);
        assert!(text.starts_with('2'));
    }
}

//! Tests for error display and source chaining

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::error::invalid_parameter;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests I/O errors stay reachable through the error source chain
    // Verified by returning None from source
    #[test]
    fn test_signature_file_error_source() {
        let err = MosaicError::SignatureFile {
            path: PathBuf::from("/corpus/tile_index"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        assert!(err.to_string().contains("/corpus/tile_index"));
        assert!(err.source().is_some());
    }

    // Tests parameter errors name the parameter and the offending value
    // Verified by dropping the value from the message
    #[test]
    fn test_invalid_parameter_display() {
        let err = invalid_parameter("cell_pixels", &0, &"cells need at least one pixel");

        let message = err.to_string();
        assert!(message.contains("cell_pixels"));
        assert!(message.contains("'0'"));
        assert!(err.source().is_none());
    }

    // Tests rejected weight input is echoed back
    // Verified by omitting the input from the message
    #[test]
    fn test_malformed_weights_display() {
        let err = MosaicError::MalformedWeights {
            input: "1 2".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Weight input '1 2' is not three positive integers"
        );
    }

    // Tests bare I/O errors convert into file system errors
    // Verified by converting into a signature file error
    #[test]
    fn test_from_io_error() {
        let err: MosaicError = std::io::Error::other("boom").into();

        assert!(matches!(err, MosaicError::FileSystem { .. }));
    }
}

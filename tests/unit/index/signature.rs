//! Tests for signature averaging and the signature record format

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::index::signature::{SignatureRecord, average_signatures};
    use photomosaic::index::Signature;
    use photomosaic::io::image::rgb_to_luma_chroma;

    // Tests a uniform image averages to its own color in both spaces
    // Verified by storing the RGB mean in the luma/chroma slot
    #[test]
    fn test_uniform_image_signatures() {
        let image = RgbImage::from_pixel(3, 2, Rgb([200, 100, 50]));

        let signatures = average_signatures(&image).expect("image has pixels");

        assert_eq!(signatures.rgb, Signature::new(200, 100, 50));
        assert_eq!(
            signatures.luma_chroma,
            Signature(rgb_to_luma_chroma([200, 100, 50]))
        );
    }

    // Tests averages truncate rather than round
    // Verified by rounding the channel means
    #[test]
    fn test_average_truncates() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0, 0, 0]));
        image.put_pixel(1, 0, Rgb([1, 1, 1]));

        let signatures = average_signatures(&image).expect("image has pixels");

        assert_eq!(signatures.rgb, Signature::new(0, 0, 0));
        assert_eq!(signatures.luma_chroma, Signature::new(0, 128, 128));
    }

    // Tests images without pixels have no signature
    // Verified by dividing by a zero pixel count
    #[test]
    fn test_empty_image_has_no_signature() {
        assert!(average_signatures(&RgbImage::new(0, 5)).is_none());
    }

    // Tests a record line parses into identifier and both signatures
    // Verified by swapping the RGB and luma/chroma fields
    #[test]
    fn test_record_parse() {
        let record = SignatureRecord::parse("cat.jpg ff 80 00 a5 3c b2").expect("valid record");

        assert_eq!(record.identifier, "cat.jpg");
        assert_eq!(record.signatures.rgb, Signature::new(0xff, 0x80, 0x00));
        assert_eq!(record.signatures.luma_chroma, Signature::new(0xa5, 0x3c, 0xb2));
    }

    // Tests records are written as two lowercase hex digits per byte
    // Verified by writing decimal bytes
    #[test]
    fn test_record_display_pads_hex() {
        let record = SignatureRecord::parse("a.png 1 2 3 A B C").expect("single digits parse");

        assert_eq!(record.to_string(), "a.png 01 02 03 0a 0b 0c");
        assert_eq!(SignatureRecord::parse(&record.to_string()), Ok(record));
    }

    // Tests malformed record lines are rejected
    // Verified by accepting lines with missing or extra fields
    #[test]
    fn test_record_parse_rejects_malformed() {
        for line in [
            "",
            "only_identifier",
            "a.png 00 00 00 00 00",
            "a.png 00 00 00 00 00 00 00",
            "a.png 00 00 zz 00 00 00",
            "a.png 100 00 00 00 00 00",
        ] {
            assert!(
                SignatureRecord::parse(line).is_err(),
                "'{line}' should be rejected"
            );
        }
    }
}

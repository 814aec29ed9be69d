//! Averaged color descriptors and the signature file record format
//!
//! Each corpus image is summarised by two three-byte averages: the raw RGB mean
//! and the mean of the same pixels in luma/chroma space (Y, Cb, Cr). Matching
//! only ever compares luma/chroma signatures; the RGB one is kept for
//! provenance and as a flat fallback rendering.

use crate::io::image::rgb_to_luma_chroma;
use image::RgbImage;
use std::fmt;

/// Three-channel averaged color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 3]);

impl Signature {
    /// Build a signature from its three channels
    pub const fn new(first: u8, second: u8, third: u8) -> Self {
        Self([first, second, third])
    }

    /// Channel values in storage order
    pub const fn channels(self) -> [u8; 3] {
        self.0
    }
}

/// Both averages of one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSignatures {
    /// Mean of the raw RGB channels
    pub rgb: Signature,
    /// Mean of the luma/chroma channels (Y, Cb, Cr)
    pub luma_chroma: Signature,
}

/// Average an image in RGB and luma/chroma space
///
/// Sums are accumulated per channel and divided by the pixel count with
/// truncation. Returns `None` for an image without pixels.
pub fn average_signatures(image: &RgbImage) -> Option<ImageSignatures> {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return None;
    }

    let mut rgb_sum = [0u64; 3];
    let mut ycc_sum = [0u64; 3];

    for pixel in image.pixels() {
        let ycc = rgb_to_luma_chroma(pixel.0);
        for (acc, value) in rgb_sum.iter_mut().zip(pixel.0) {
            *acc += u64::from(value);
        }
        for (acc, value) in ycc_sum.iter_mut().zip(ycc) {
            *acc += u64::from(value);
        }
    }

    Some(ImageSignatures {
        rgb: Signature(rgb_sum.map(|sum| (sum / pixel_count) as u8)),
        luma_chroma: Signature(ycc_sum.map(|sum| (sum / pixel_count) as u8)),
    })
}

/// One line of the corpus signature file
///
/// Layout: `<identifier> <r> <g> <b> <y> <cb> <cr>` with every byte written as
/// two lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRecord {
    /// Corpus-relative file name
    pub identifier: String,
    /// Both averages of the image
    pub signatures: ImageSignatures,
}

impl SignatureRecord {
    /// Parse a record line (without its trailing newline)
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the line does not hold an
    /// identifier followed by exactly six hex bytes
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let mut fields = line.split_whitespace();
        let identifier = fields
            .next()
            .ok_or_else(|| "missing identifier".to_string())?
            .to_string();

        let mut bytes = [0u8; 6];
        for (slot, byte) in bytes.iter_mut().enumerate() {
            let field = fields
                .next()
                .ok_or_else(|| format!("expected 6 color bytes, found {slot}"))?;
            *byte = parse_hex_byte(field)?;
        }

        if fields.next().is_some() {
            return Err("trailing fields after color bytes".to_string());
        }

        let [r, g, b, y, cb, cr] = bytes;
        Ok(Self {
            identifier,
            signatures: ImageSignatures {
                rgb: Signature::new(r, g, b),
                luma_chroma: Signature::new(y, cb, cr),
            },
        })
    }
}

fn parse_hex_byte(field: &str) -> std::result::Result<u8, String> {
    if field.is_empty() || field.len() > 2 {
        return Err(format!("'{field}' is not a two digit hex byte"));
    }
    u8::from_str_radix(field, 16).map_err(|e| format!("'{field}': {e}"))
}

impl fmt::Display for SignatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.signatures.rgb.channels();
        let [y, cb, cr] = self.signatures.luma_chroma.channels();
        write!(
            f,
            "{} {r:02x} {g:02x} {b:02x} {y:02x} {cb:02x} {cr:02x}",
            self.identifier
        )
    }
}

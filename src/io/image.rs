//! Image collaborator: decoding, saving, color conversion and box-filter resampling

use crate::io::error::{MosaicError, Result, file_system_error};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Decode an image file into 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Encode an RGB image, format chosen by extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    image.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Convert one RGB pixel to (Y, Cb, Cr), full-range BT.601
pub fn rgb_to_luma_chroma([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let y = 0.114f64.mul_add(b, 0.299f64.mul_add(r, 0.587 * g));
    let cb = (b - y).mul_add(0.564, 128.0);
    let cr = (r - y).mul_add(0.713, 128.0);
    [y, cb, cr].map(|channel| channel.round().clamp(0.0, 255.0) as u8)
}

/// Convert a whole image to luma/chroma, channels stored as (Y, Cb, Cr)
pub fn to_luma_chroma(image: &RgbImage) -> RgbImage {
    let mut converted = image.clone();
    for pixel in converted.pixels_mut() {
        pixel.0 = rgb_to_luma_chroma(pixel.0);
    }
    converted
}

/// Mean color of the `width` x `height` block whose top-left corner is `(x0, y0)`
///
/// Pixels outside the image are ignored.
fn block_mean(image: &RgbImage, x0: u32, y0: u32, width: u32, height: u32) -> Rgb<u8> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for y in y0..y0.saturating_add(height) {
        for x in x0..x0.saturating_add(width) {
            if let Some(pixel) = image.get_pixel_checked(x, y) {
                for (acc, value) in sum.iter_mut().zip(pixel.0) {
                    *acc += u64::from(value);
                }
                count += 1;
            }
        }
    }

    Rgb(sum.map(|channel| (channel / count.max(1)) as u8))
}

/// Reduce an image by averaging `factor` x `factor` blocks
///
/// Output is `width / factor` x `height / factor`; partial blocks at the right
/// and bottom edges are dropped. A factor of zero is treated as one.
pub fn box_average(image: &RgbImage, factor: u32) -> RgbImage {
    let factor = factor.max(1);
    let width = image.width() / factor;
    let height = image.height() / factor;

    RgbImage::from_fn(width, height, |x, y| {
        block_mean(image, x * factor, y * factor, factor, factor)
    })
}

/// Reshape an image to exactly `width` x `height`
///
/// Sources at least as large as the target are reduced by averaging blocks of
/// `src_width / width` x `src_height / height` pixels. Smaller sources are
/// upscaled by nearest-neighbor sampling.
pub fn reshape_by_box_average(source: &RgbImage, width: u32, height: u32) -> RgbImage {
    if width == 0 || height == 0 {
        return RgbImage::new(width, height);
    }
    if source.width() < width || source.height() < height {
        return imageops::resize(source, width, height, FilterType::Nearest);
    }

    let block_width = source.width() / width;
    let block_height = source.height() / height;

    RgbImage::from_fn(width, height, |x, y| {
        block_mean(
            source,
            x * block_width,
            y * block_height,
            block_width,
            block_height,
        )
    })
}

/// Uniformly colored tile
pub fn solid_tile(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Copy `source` into `destination` with its top-left corner at `(x, y)`
///
/// Parts falling outside the destination are clipped.
pub fn blit(destination: &mut RgbImage, source: &RgbImage, x: u32, y: u32) {
    imageops::replace(destination, source, i64::from(x), i64::from(y));
}

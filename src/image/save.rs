//! Image saving utilities.

use std::path::Path;

use image::{imageops::FilterType, ImageBuffer, Rgb};

use crate::error::{Error, Result};

use super::ImageTensor;

/// Save a tensor as an image file.
///
/// The tensor is:
/// 1. Denormalized from [-1, 1] to [0, 255]
/// 2. Resized to the original dimensions if provided
/// 3. Saved to the specified path (format inferred from extension)
///
/// # Arguments
///
/// * `tensor` - NHWC tensor with values in [-1, 1]
/// * `path` - Output file path
/// * `original_dims` - Optional original dimensions to resize to
/// * `quality` - JPEG quality (1-100), ignored for other formats
///
/// # Errors
///
/// Returns an error if the image cannot be saved.
pub fn save_image<P: AsRef<Path>>(
    tensor: &ImageTensor,
    path: P,
    original_dims: Option<(u32, u32)>,
    quality: u8,
) -> Result<()> {
    let path = path.as_ref();

    let img = tensor_to_image(tensor);

    // Resize back to original dimensions if specified
    let final_img = if let Some((width, height)) = original_dims {
        image::DynamicImage::ImageRgb8(img).resize_exact(width, height, FilterType::Lanczos3)
    } else {
        image::DynamicImage::ImageRgb8(img)
    };

    // Determine format and save
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => {
            let mut output = std::fs::File::create(path)?;
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
            final_img
                .write_with_encoder(encoder)
                .map_err(|source| Error::ImageSave {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        _ => {
            final_img.save(path).map_err(|source| Error::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

/// Collapse the batch dimension and convert a normalized NHWC tensor to an
/// RGB image.
#[allow(clippy::cast_possible_truncation)]
fn tensor_to_image(tensor: &ImageTensor) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let (_, height, width, _) = tensor.dim();

    let mut img = ImageBuffer::new(width as u32, height as u32);

    for y in 0..height {
        for x in 0..width {
            // Denormalize from [-1, 1] to [0, 255]
            let r = denormalize(tensor[[0, y, x, 0]]);
            let g = denormalize(tensor[[0, y, x, 1]]);
            let b = denormalize(tensor[[0, y, x, 2]]);

            img.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
        }
    }

    img
}

/// Denormalize a value from [-1, 1] to [0, 255] with clamping.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn denormalize(value: f32) -> u8 {
    // Rounded, then clamped to [0, 255]: out-of-range values clip, never wrap
    let scaled = ((value + 1.0) * 127.5).round();
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use ndarray::Array4;

    #[test]
    fn test_denormalize() {
        assert_eq!(denormalize(-1.0), 0);
        assert_eq!(denormalize(0.0), 128);
        assert_eq!(denormalize(1.0), 255);
    }

    #[test]
    fn test_denormalize_clamp() {
        assert_eq!(denormalize(-2.0), 0);
        assert_eq!(denormalize(2.0), 255);
    }

    #[test]
    fn test_normalization_round_trip() {
        // Encoding x/127.5 - 1 then decoding recovers every byte value
        for x in 0u16..=255 {
            let normalized = (f32::from(x) / 127.5) - 1.0;
            assert_eq!(denormalize(normalized), x as u8);
        }
    }

    #[test]
    fn test_tensor_to_image_collapses_batch() {
        let tensor = Array4::<f32>::from_elem((1, 16, 16, 3), -1.0);
        let img = tensor_to_image(&tensor);

        assert_eq!(img.dimensions(), (16, 16));
        // -1.0 everywhere denormalizes to 0
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_saved_output_matches_original_dims() {
        let tensor = Array4::<f32>::zeros((1, 256, 256, 3));
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.png");

        save_image(&tensor, &path, Some((512, 384)), 95).expect("save");

        let reloaded = image::open(&path).expect("reload");
        assert_eq!(reloaded.width(), 512);
        assert_eq!(reloaded.height(), 384);
        assert_eq!(reloaded.color().channel_count(), 3);
    }
}

//! Image loading utilities.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ndarray::Array4;

use crate::error::{Error, Result};

use super::{ImageTensor, MODEL_IMAGE_SIZE, RGB_CHANNELS};

/// Load an image from disk and convert to a normalized tensor.
///
/// The image is:
/// 1. Loaded from the specified path
/// 2. Converted to RGB if necessary
/// 3. Resized to 256x256 (the generator's training resolution)
/// 4. Normalized to [-1, 1] range
/// 5. Returned as NHWC tensor (1, 256, 256, 3)
///
/// The original dimensions are returned alongside so postprocessing can
/// restore the input's resolution.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(ImageTensor, (u32, u32))> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let original_dims = img.dimensions();

    let tensor = image_to_tensor(&img);

    Ok((tensor, original_dims))
}

/// Convert a `DynamicImage` to a normalized NHWC tensor.
#[allow(clippy::cast_possible_truncation)]
fn image_to_tensor(img: &DynamicImage) -> ImageTensor {
    // Triangle filtering with support scaled to the shrink ratio averages over
    // the source footprint, matching the area resampling used at training time.
    let resized = img.resize_exact(MODEL_IMAGE_SIZE, MODEL_IMAGE_SIZE, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let (width, height) = (MODEL_IMAGE_SIZE as usize, MODEL_IMAGE_SIZE as usize);

    // Create tensor in NHWC format
    let mut tensor = Array4::<f32>::zeros((1, height, width, RGB_CHANNELS));

    for y in 0..height {
        for x in 0..width {
            // Safe: x and y are bounded by MODEL_IMAGE_SIZE (256) which fits in u32
            let pixel = rgb.get_pixel(x as u32, y as u32);
            // Normalize from [0, 255] to [-1, 1]
            tensor[[0, y, x, 0]] = (f32::from(pixel[0]) / 127.5) - 1.0;
            tensor[[0, y, x, 1]] = (f32::from(pixel[1]) / 127.5) - 1.0;
            tensor[[0, y, x, 2]] = (f32::from(pixel[2]) / 127.5) - 1.0;
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_shape() {
        // Any input resolution lands on the model's fixed square input
        let img = DynamicImage::new_rgb8(512, 384);
        let tensor = image_to_tensor(&img);

        assert_eq!(tensor.shape(), &[1, 256, 256, 3]);
    }

    #[test]
    fn test_normalization_range() {
        let img = DynamicImage::new_rgb8(100, 100);
        let tensor = image_to_tensor(&img);

        let min = tensor.iter().copied().fold(f32::INFINITY, f32::min);
        let max = tensor.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        // Black image should be all -1.0
        assert!((min - (-1.0)).abs() < 0.01);
        assert!((max - (-1.0)).abs() < 0.01);
    }

    #[test]
    fn test_normalization_extremes() {
        let mut img = image::RgbImage::new(8, 8);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([255, 0, 255]);
        }
        let tensor = image_to_tensor(&DynamicImage::ImageRgb8(img));

        assert!((tensor[[0, 4, 4, 0]] - 1.0).abs() < 0.01);
        assert!((tensor[[0, 4, 4, 1]] - (-1.0)).abs() < 0.01);
        assert!((tensor[[0, 4, 4, 2]] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_image("definitely/not/a/real/file.png").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}

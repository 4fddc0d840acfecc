//! Image loading, processing, and saving utilities.

mod load;
mod save;

pub use load::load_image;
pub use save::save_image;

use ndarray::Array4;

/// Image tensor in NHWC format (batch, height, width, channels).
/// Values are normalized to [-1, 1] range, matching the generator's training
/// normalization.
pub type ImageTensor = Array4<f32>;

/// Input resolution the generator was trained on.
pub const MODEL_IMAGE_SIZE: u32 = 256;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;

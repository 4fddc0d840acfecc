//! # deblur
//!
//! Single-image motion deblurring using a pretrained GAN generator exported
//! to ONNX.
//!
//! The pipeline is strictly linear: decode the input image, resize and
//! normalize it to the generator's training distribution, run one forward
//! pass, denormalize the output, resize back to the original resolution, and
//! write the result. The generator graph uses a custom reflection-padding
//! operator, so the artifact can only be deserialized with the custom object
//! table resolved.
//!
//! ## Example
//!
//! ```no_run
//! use deblur::{Config, Pipeline};
//!
//! # fn main() -> deblur::Result<()> {
//! let config = Config::default();
//! let mut pipeline = Pipeline::new(config)?;
//!
//! pipeline.process("blurred.png", "restored.png")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod model;
pub mod ops;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{Config, Pipeline};

//! Single-image deblurring pipeline.

mod run;

pub use run::{Config, Pipeline};

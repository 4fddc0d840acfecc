//! The linear load -> preprocess -> infer -> postprocess -> save sequence.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::image;
use crate::model::{self, CustomObjects, Generator};

/// Configuration for the deblurring pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Generator artifact path. Defaults to `deblur_generator.onnx` next to
    /// the executable.
    pub model_path: Option<PathBuf>,

    /// Output JPEG quality (1-100).
    pub output_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            output_quality: 95,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.output_quality) {
            return Err(Error::InvalidParameter {
                name: "output_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}

/// Main pipeline for restoring motion-blurred images.
pub struct Pipeline {
    config: Config,
    generator: Generator,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    ///
    /// Loads the generator artifact with the custom object table resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the model cannot
    /// be loaded.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing pipeline with config: {config:?}");

        let model_path = match &config.model_path {
            Some(path) => path.clone(),
            None => model::locate()?,
        };

        let objects = CustomObjects::for_generator();
        let generator = Generator::load(&model_path, &objects)?;

        tracing::info!("Model loaded successfully");

        Ok(Self { config, generator })
    }

    /// Deblur a single image.
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input image
    /// * `output_path` - Path to save the restored image
    ///
    /// # Errors
    ///
    /// Returns an error if processing fails.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        tracing::info!("Processing image: {}", input_path.display());

        let (image_tensor, original_dims) = image::load_image(input_path)?;

        tracing::info!("Running inference...");
        let output_tensor = self.generator.infer(&image_tensor)?;

        tracing::info!("Saving output to: {}", output_path.display());
        image::save_image(
            &output_tensor,
            output_path,
            Some(original_dims),
            self.config.output_quality,
        )?;

        tracing::info!("Processing complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_quality_is_rejected() {
        let config = Config {
            output_quality: 0,
            ..Config::default()
        };

        assert!(matches!(
            config.validate().unwrap_err(),
            Error::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_out_of_range_quality_is_rejected() {
        let config = Config {
            output_quality: 101,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}

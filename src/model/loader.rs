//! Generator loading and the forward pass.

use std::path::{Path, PathBuf};

use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use crate::error::{Error, Result};
use crate::image::ImageTensor;
use crate::model::objects::{CustomObjects, REQUIRED_CUSTOM_OBJECTS};

/// Filename of the generator artifact, expected next to the executable.
pub const MODEL_FILENAME: &str = "deblur_generator.onnx";

/// Resolve the default artifact path, relative to the running executable.
///
/// # Errors
///
/// Returns an error if the executable's own path cannot be determined.
pub fn locate() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok(dir.join(MODEL_FILENAME))
}

/// The pretrained deblurring generator: an immutable graph plus weights,
/// loaded once per invocation.
#[derive(Debug)]
pub struct Generator {
    session: Session,
}

impl Generator {
    /// Deserialize the generator, resolving custom references against the
    /// given object table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is incomplete, the artifact is missing,
    /// or the runtime rejects the graph.
    pub fn load(path: &Path, objects: &CustomObjects) -> Result<Self> {
        objects.validate(REQUIRED_CUSTOM_OBJECTS)?;

        tracing::info!("Loading model from: {}", path.display());
        tracing::info!("Model file exists: {}", path.exists());

        if !path.exists() {
            return Err(Error::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let model_load = |source| Error::ModelLoad {
            path: path.to_path_buf(),
            source,
        };

        let session = Session::builder()
            .map_err(model_load)?
            .with_operators(objects.operator_domain().map_err(model_load)?)
            .map_err(model_load)?
            .commit_from_file(path)
            .map_err(model_load)?;

        Ok(Self { session })
    }

    /// Run a forward pass on a preprocessed NHWC tensor.
    ///
    /// The exported graph is inference-only, so repeated runs on the same
    /// input are deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails or the output is not a 4-D
    /// tensor.
    pub fn infer(&mut self, input: &ImageTensor) -> Result<ImageTensor> {
        let input_value =
            Tensor::from_array(input.clone()).map_err(|source| Error::Inference { source })?;

        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(|source| Error::Inference { source })?;

        let output = outputs
            .values()
            .next()
            .ok_or_else(|| Error::ShapeMismatch {
                expected: "deblurred image output".to_string(),
                actual: "no output".to_string(),
            })?;

        extract_array4(&output)
    }
}

/// Extract a 4D array from an ONNX value.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn extract_array4(value: &ort::value::ValueRef<'_>) -> Result<Array4<f32>> {
    let (shape_info, data) = value
        .try_extract_tensor::<f32>()
        .map_err(|source| Error::Inference { source })?;

    let dims: Vec<usize> = shape_info.iter().map(|&x| x as usize).collect();

    if dims.len() != 4 {
        return Err(Error::ShapeMismatch {
            expected: "4D tensor".to_string(),
            actual: format!("{}D tensor", dims.len()),
        });
    }

    Array4::from_shape_vec((dims[0], dims[1], dims[2], dims[3]), data.to_vec()).map_err(|_| {
        Error::ShapeMismatch {
            expected: format!("{dims:?}"),
            actual: "reshape failed".to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_points_next_to_executable() {
        let path = locate().expect("locate");

        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(MODEL_FILENAME));
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let objects = CustomObjects::for_generator();
        let err =
            Generator::load(Path::new("no/such/generator.onnx"), &objects).unwrap_err();

        assert!(matches!(err, Error::ModelNotFound { .. }));
    }

    #[test]
    fn test_incomplete_table_fails_before_touching_disk() {
        let objects = CustomObjects::new();
        let err =
            Generator::load(Path::new("no/such/generator.onnx"), &objects).unwrap_err();

        assert!(matches!(err, Error::MissingCustomObject { .. }));
    }
}

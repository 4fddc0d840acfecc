//! Reflection padding for 4-D image tensors.
//!
//! The generator graph contains `ReflectionPadding2D` nodes, so the operation
//! has to be registered with the runtime before the artifact can be
//! deserialized. The padding itself is also exposed as a plain function on
//! `ndarray` tensors.


use ndarray::{Array4, ArrayView4};
use ort::operator::io::{OperatorInput, OperatorOutput};
use ort::operator::kernel::{Kernel, KernelAttributes, KernelContext};
use ort::operator::Operator;
use ort::tensor::TensorElementType;

use crate::error::{Error, Result};

/// Pads an NHWC tensor along height and width by reflecting interior values
/// about the edge. The edge sample itself is not repeated (TF `REFLECT`
/// mode), and batch and channel dimensions are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionPad2d {
    w_pad: usize,
    h_pad: usize,
}

impl Default for ReflectionPad2d {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl ReflectionPad2d {
    /// Create a padding operation with the given width/height amounts.
    #[must_use]
    pub const fn new(w_pad: usize, h_pad: usize) -> Self {
        Self { w_pad, h_pad }
    }

    /// Output-shape transform: height and width each grow by twice the
    /// respective padding amount.
    #[must_use]
    pub const fn output_shape(&self, input: [usize; 4]) -> [usize; 4] {
        let [batch, height, width, channels] = input;
        [
            batch,
            height + 2 * self.h_pad,
            width + 2 * self.w_pad,
            channels,
        ]
    }

    /// Apply reflection padding to an NHWC tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if a padding amount is not strictly smaller than the
    /// corresponding spatial extent (reflection has nothing to mirror then).
    pub fn pad(&self, input: ArrayView4<'_, f32>) -> Result<Array4<f32>> {
        let (batch, height, width, channels) = input.dim();

        if self.h_pad >= height || self.w_pad >= width {
            return Err(Error::InvalidParameter {
                name: "padding".to_string(),
                reason: format!(
                    "({}, {}) must be smaller than the {}x{} input",
                    self.w_pad, self.h_pad, width, height
                ),
            });
        }

        let [_, out_height, out_width, _] =
            self.output_shape([batch, height, width, channels]);
        let mut padded = Array4::<f32>::zeros((batch, out_height, out_width, channels));

        for b in 0..batch {
            for y in 0..out_height {
                let src_y = reflect(y, self.h_pad, height);
                for x in 0..out_width {
                    let src_x = reflect(x, self.w_pad, width);
                    for c in 0..channels {
                        padded[[b, y, x, c]] = input[[b, src_y, src_x, c]];
                    }
                }
            }
        }

        Ok(padded)
    }
}

/// Map a padded index back to the source index it mirrors.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn reflect(index: usize, pad: usize, len: usize) -> usize {
    let shifted = index as isize - pad as isize;
    let len = len as isize;

    let mirrored = if shifted < 0 {
        -shifted
    } else if shifted >= len {
        2 * len - 2 - shifted
    } else {
        shifted
    };

    mirrored as usize
}

impl Operator for ReflectionPad2d {
    fn name(&self) -> &str {
        "ReflectionPadding2D"
    }

    fn inputs(&self) -> Vec<OperatorInput> {
        vec![OperatorInput::required(TensorElementType::Float32)]
    }

    fn outputs(&self) -> Vec<OperatorOutput> {
        vec![OperatorOutput::required(TensorElementType::Float32)]
    }

    fn create_kernel(&self, _attributes: &KernelAttributes) -> ort::Result<Box<dyn Kernel>> {
        Ok(Box::new(ReflectionPad2dKernel { op: *self }))
    }
}

struct ReflectionPad2dKernel {
    op: ReflectionPad2d,
}

impl Kernel for ReflectionPad2dKernel {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn compute(&mut self, ctx: &KernelContext) -> ort::Result<()> {
        let input = ctx
            .input(0)?
            .ok_or_else(|| ort::Error::new("ReflectionPadding2D expects one input"))?;
        let (shape, data) = input.try_extract_tensor::<f32>()?;

        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        if dims.len() != 4 {
            return Err(ort::Error::new(format!(
                "ReflectionPadding2D expects a 4D tensor, got {}D",
                dims.len()
            )));
        }

        let view = ArrayView4::from_shape((dims[0], dims[1], dims[2], dims[3]), data)
            .map_err(|err| ort::Error::new(err.to_string()))?;
        let padded = self
            .op
            .pad(view)
            .map_err(|err| ort::Error::new(err.to_string()))?;

        let out_dims: Vec<i64> = self
            .op
            .output_shape([dims[0], dims[1], dims[2], dims[3]])
            .iter()
            .map(|&d| d as i64)
            .collect();
        let mut output = ctx
            .output(0, out_dims)?
            .ok_or_else(|| ort::Error::new("ReflectionPadding2D output unavailable"))?;
        let (_, out_data) = output.try_extract_tensor_mut::<f32>()?;

        // Freshly built arrays are in standard layout, so logical order is
        // memory order.
        for (dst, src) in out_data.iter_mut().zip(padded.iter()) {
            *dst = *src;
        }

        Ok(())
    }
}

//! Training-time loss stand-ins.
//!
//! The serialized generator artifact carries references to the losses it was
//! compiled with. These definitions exist so those names resolve when the
//! custom object table is validated; none of them run during inference.

use ndarray::ArrayView4;

/// Signature shared by all loss stand-ins: mean reduction over a pair of
/// batch tensors.
pub type LossFn = fn(ArrayView4<f32>, ArrayView4<f32>) -> f32;

/// Mean squared difference over VGG feature space during training; plain
/// mean squared difference here.
pub fn perceptual_loss(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> f32 {
    (&y_pred - &y_true).mapv(|d| d * d).mean().unwrap_or(0.0)
}

/// Mean of the elementwise product.
pub fn wasserstein_loss(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> f32 {
    (&y_true * &y_pred).mean().unwrap_or(0.0)
}

/// Mean absolute difference.
pub fn edge_loss(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> f32 {
    (&y_pred - &y_true).mapv(f32::abs).mean().unwrap_or(0.0)
}

/// Mean squared difference.
pub fn generator_loss(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> f32 {
    (&y_pred - &y_true).mapv(|d| d * d).mean().unwrap_or(0.0)
}

/// Mean of the elementwise product.
pub fn discriminator_loss(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> f32 {
    (&y_true * &y_pred).mean().unwrap_or(0.0)
}

/// Mean squared difference.
pub fn gradient_penalty(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> f32 {
    (&y_pred - &y_true).mapv(|d| d * d).mean().unwrap_or(0.0)
}

/// Elementwise stand-in for the graph's `Lambda` nodes.
pub fn custom_lambda(x: f32) -> f32 {
    x / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_squared_losses_zero_for_identical_inputs() {
        let a = Array4::<f32>::from_elem((1, 2, 2, 3), 0.5);

        assert_eq!(perceptual_loss(a.view(), a.view()), 0.0);
        assert_eq!(generator_loss(a.view(), a.view()), 0.0);
        assert_eq!(gradient_penalty(a.view(), a.view()), 0.0);
        assert_eq!(edge_loss(a.view(), a.view()), 0.0);
    }

    #[test]
    fn test_product_losses_are_mean_products() {
        let ones = Array4::<f32>::from_elem((1, 2, 2, 1), 1.0);
        let twos = Array4::<f32>::from_elem((1, 2, 2, 1), 2.0);

        assert!((wasserstein_loss(ones.view(), twos.view()) - 2.0).abs() < f32::EPSILON);
        assert!((discriminator_loss(ones.view(), twos.view()) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_edge_loss_is_mean_absolute_difference() {
        let zeros = Array4::<f32>::zeros((1, 2, 2, 1));
        let mixed = ndarray::array![[[[1.0_f32], [-1.0]], [[3.0], [-3.0]]]];

        assert!((edge_loss(zeros.view(), mixed.view()) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_custom_lambda_halves() {
        assert_eq!(custom_lambda(4.0), 2.0);
        assert_eq!(custom_lambda(-1.0), -0.5);
    }
}

use crate::traits::LossFunction;
use ndarray::{Array1, ArrayView1};

/// Squared error loss summed over the output components
///
/// L = Σ (y_true - y_pred)², with gradient dL/dy_pred = -2 (y_true - y_pred).
///
/// # Example
///
/// ```rust
/// use rustylstm::neural_network::loss_function::*;
/// use rustylstm::traits::LossFunction;
/// use ndarray::array;
///
/// let loss_fn = SquaredError::new();
/// let y_true = array![1.0, 2.0];
/// let y_pred = array![1.5, 1.0];
///
/// let loss = loss_fn.compute_loss(y_true.view(), y_pred.view());
/// assert!((loss - 1.25).abs() < 1e-12);
///
/// let grad = loss_fn.compute_grad(y_true.view(), y_pred.view());
/// assert_eq!(grad, array![1.0, -2.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredError;

impl SquaredError {
    pub fn new() -> Self {
        Self
    }
}

impl LossFunction for SquaredError {
    fn compute_loss(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> f64 {
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, y)| (t - y) * (t - y))
            .sum()
    }

    fn compute_grad(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Array1<f64> {
        // -2 (t - y)
        (&y_pred - &y_true) * 2.0
    }
}

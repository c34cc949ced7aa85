use ndarray::{Array1, ArrayView1};

/// Defines the interface for loss functions used in training.
///
/// Implementations compute a scalar loss and its gradient with respect to the
/// prediction, for a single target/prediction pair.
pub trait LossFunction {
    /// Computes the loss between true and predicted values.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Ground truth vector
    /// - `y_pred` - Predicted vector with the same length
    ///
    /// # Returns
    ///
    /// The scalar loss value
    fn compute_loss(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> f64;

    /// Computes the gradient of the loss with respect to the predictions.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Ground truth vector
    /// - `y_pred` - Predicted vector with the same length
    ///
    /// # Returns
    ///
    /// Vector containing dL/dy_pred
    fn compute_grad(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Array1<f64>;
}

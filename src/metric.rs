use crate::error::ModelError;
use ndarray::Data;
use ndarray::prelude::*;

fn check_lengths(predictions: usize, targets: usize) -> Result<(), ModelError> {
    if predictions != targets {
        return Err(ModelError::ShapeMismatch(format!(
            "Input arrays must have the same length. Predicted: {}, Actual: {}",
            predictions, targets
        )));
    }
    Ok(())
}

/// Calculates the Mean Squared Error between predicted and actual values.
///
/// # Parameters
///
/// - `y_true` - Ground-truth values for each sample
/// - `y_pred` - Predicted values for each sample
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rustylstm::metric::mean_squared_error;
///
/// let actual = array![3.0, -0.5, 2.0, 7.0];
/// let predicted = array![2.5, 0.0, 2.1, 7.8];
/// let mse = mean_squared_error(&actual, &predicted).unwrap();
/// // (0.25 + 0.25 + 0.01 + 0.64) / 4 = 0.2875
/// assert!((mse - 0.2875).abs() < 1e-10);
/// ```
///
/// # Returns
///
/// - `f64` - Mean squared error (0.0 when the input arrays are empty)
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the two arrays have different lengths
pub fn mean_squared_error<S1, S2>(
    y_true: &ArrayBase<S1, Ix1>,
    y_pred: &ArrayBase<S2, Ix1>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_lengths(y_pred.len(), y_true.len())?;

    let n = y_true.len();
    if n == 0 {
        return Ok(0.0);
    }

    let sum_squared_diff = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(0.0, |acc, (&actual, &pred)| {
            let error = actual - pred;
            acc + error * error
        });

    Ok(sum_squared_diff / n as f64)
}

/// Calculates the Root Mean Squared Error (RMSE) between predicted and actual values.
///
/// # Examples
/// ```rust
/// use rustylstm::metric::root_mean_squared_error;
/// use ndarray::array;
///
/// let predictions = array![2.0, 3.0, 4.0];
/// let targets = array![1.0, 2.0, 3.0];
/// let rmse = root_mean_squared_error(&predictions, &targets).unwrap();
/// assert!((rmse - 1.0).abs() < 1e-6);
/// ```
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the two arrays have different lengths
pub fn root_mean_squared_error<S1, S2>(
    predictions: &ArrayBase<S1, Ix1>,
    targets: &ArrayBase<S2, Ix1>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    mean_squared_error(targets, predictions).map(f64::sqrt)
}

/// Calculates the Mean Absolute Error (MAE) between predicted and actual values.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rustylstm::metric::mean_absolute_error;
///
/// let predictions = array![2.0, 3.0, 4.0];
/// let targets = array![1.0, 2.0, 3.0];
/// let mae = mean_absolute_error(&predictions, &targets).unwrap();
/// assert!((mae - 1.0).abs() < 1e-6);
/// ```
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the two arrays have different lengths
pub fn mean_absolute_error<S1, S2>(
    predictions: &ArrayBase<S1, Ix1>,
    targets: &ArrayBase<S2, Ix1>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_lengths(predictions.len(), targets.len())?;

    if predictions.is_empty() {
        return Ok(0.0);
    }

    let sum_absolute_errors = predictions
        .iter()
        .zip(targets.iter())
        .fold(0.0, |acc, (&pred, &target)| acc + (pred - target).abs());

    Ok(sum_absolute_errors / predictions.len() as f64)
}

/// Binary confusion matrix with TP/FP/TN/FN counts.
///
/// Built incrementally with `record` or from known counts with `from_counts`.
///
/// # Example
/// ```rust
/// use rustylstm::metric::ConfusionMatrix;
///
/// let mut cm = ConfusionMatrix::default();
/// cm.record(true, true);
/// cm.record(true, false);
/// cm.record(false, false);
///
/// let (tp, fp, tn, fn_) = cm.get_counts();
/// assert_eq!((tp, fp, tn, fn_), (1, 1, 1, 0));
/// println!("{}", cm.summary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    tp: usize,
    fp: usize,
    tn: usize,
    fn_: usize,
}

impl ConfusionMatrix {
    /// Create a confusion matrix from explicit counts.
    pub fn from_counts(tp: usize, fp: usize, tn: usize, fn_: usize) -> Self {
        Self { tp, fp, tn, fn_ }
    }

    /// Tally one outcome.
    ///
    /// # Parameters
    ///
    /// - `predicted_positive` - Whether the prediction was the positive class
    /// - `actual_positive` - Whether the realized outcome was the positive class
    pub fn record(&mut self, predicted_positive: bool, actual_positive: bool) {
        match (predicted_positive, actual_positive) {
            (true, true) => self.tp += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    /// Get the components of the confusion matrix.
    ///
    /// # Returns
    ///
    /// - `(usize, usize, usize, usize)` - Tuple of (tp, fp, tn, fn) counts
    pub fn get_counts(&self) -> (usize, usize, usize, usize) {
        (self.tp, self.fp, self.tn, self.fn_)
    }

    /// Total number of recorded outcomes
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN).
    ///
    /// # Returns
    ///
    /// - `f64` - Accuracy in the range \[0.0, 1.0\] (returns 0.0 when there are no predictions)
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.tp + self.tn) as f64 / total as f64
    }

    /// Calculate error rate: (FP + FN) / (TP + TN + FP + FN).
    pub fn error_rate(&self) -> f64 {
        1.0 - self.accuracy()
    }

    /// Calculate precision: TP / (TP + FP).
    ///
    /// # Returns
    ///
    /// - `f64` - Precision in the range \[0.0, 1.0\] (returns 0.0 when there are no positive predictions)
    pub fn precision(&self) -> f64 {
        if self.tp + self.fp == 0 {
            return 0.0;
        }
        self.tp as f64 / (self.tp + self.fp) as f64
    }

    /// Calculate recall (sensitivity): TP / (TP + FN).
    ///
    /// # Returns
    ///
    /// - `f64` - Recall in the range \[0.0, 1.0\] (returns 1.0 when there are no actual positives)
    pub fn recall(&self) -> f64 {
        if self.tp + self.fn_ == 0 {
            return 1.0;
        }
        self.tp as f64 / (self.tp + self.fn_) as f64
    }

    /// Calculate specificity: TN / (TN + FP).
    ///
    /// # Returns
    ///
    /// - `f64` - Specificity in the range \[0.0, 1.0\] (returns 1.0 when there are no actual negatives)
    pub fn specificity(&self) -> f64 {
        if self.tn + self.fp == 0 {
            return 1.0;
        }
        self.tn as f64 / (self.tn + self.fp) as f64
    }

    /// Calculate F1 score: 2 * (Precision * Recall) / (Precision + Recall).
    ///
    /// # Returns
    ///
    /// - `f64` - F1 score in the range \[0.0, 1.0\] (returns 0.0 when both precision and recall are 0.0)
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();

        if precision + recall == 0.0 {
            return 0.0;
        }

        2.0 * (precision * recall) / (precision + recall)
    }

    /// Generate a formatted summary of the confusion matrix and derived metrics.
    pub fn summary(&self) -> String {
        format!(
            "Confusion Matrix:\n\
        |                 | Predicted Up | Predicted Not Up |\n\
        |-----------------|--------------|------------------|\n\
        | Actual Up       | TP: {}       | FN: {}           |\n\
        | Actual Not Up   | FP: {}       | TN: {}           |\n\
        \n\
        Performance Metrics:\n\
        - Accuracy: {:.4}\n\
        - Error Rate: {:.4}\n\
        - Precision: {:.4}\n\
        - Recall: {:.4}\n\
        - Specificity: {:.4}\n\
        - F1 Score: {:.4}",
            self.tp,
            self.fn_,
            self.fp,
            self.tn,
            self.accuracy(),
            self.error_rate(),
            self.precision(),
            self.recall(),
            self.specificity(),
            self.f1_score()
        )
    }
}

use super::*;
use rayon::prelude::*;

/// Number of gradient components above which clipping runs on the rayon pool
const PARALLEL_CLIP_THRESHOLD: usize = 65536;

/// Stochastic Gradient Descent (SGD) optimizer with elementwise gradient clipping.
///
/// Every gradient component is first clamped to `[-clip_value, clip_value]`, then each
/// parameter is updated as `param -= learning_rate * grad`.
///
/// # Fields
///
/// * `learning_rate` - Step size for parameter updates
/// * `clip_value` - Elementwise bound applied to gradients before the update
///
/// # Example
///
/// ```rust
/// use rustylstm::neural_network::*;
/// use ndarray::array;
///
/// let mut cell = LSTMCell::with_config(1, 2, 1, CellConfig::default().with_random_state(7)).unwrap();
/// let optimizer = SGD::new(0.01, 5.0).unwrap();
///
/// cell.step(array![0.3].view()).unwrap();
/// let mut gradients = cell.compute_gradients(array![0.4].view()).unwrap();
/// optimizer.update(cell.parameters_mut(), &mut gradients).unwrap();
/// assert!(gradients.max_abs() <= 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SGD {
    learning_rate: f64,
    clip_value: f64,
}

impl SGD {
    /// Creates a new SGD optimizer.
    ///
    /// # Parameters
    ///
    /// * `learning_rate` - Step size for parameter updates
    /// * `clip_value` - Elementwise gradient bound
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If either value is not positive and finite
    pub fn new(learning_rate: f64, clip_value: f64) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_positive_finite(clip_value, "clip_value")?;
        Ok(Self {
            learning_rate,
            clip_value,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn clip_value(&self) -> f64 {
        self.clip_value
    }

    /// Clamps every gradient component to `[-threshold, threshold]` in place.
    ///
    /// Components already inside the range are left unchanged.
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If `threshold` is not positive and finite
    pub fn clip(gradients: &mut LSTMGradients, threshold: f64) -> Result<(), ModelError> {
        validate_positive_finite(threshold, "clip threshold")?;

        if gradients.len() >= PARALLEL_CLIP_THRESHOLD {
            let mut components: Vec<&mut f64> = gradients.values_mut().collect();
            components
                .par_iter_mut()
                .for_each(|g| **g = (**g).clamp(-threshold, threshold));
        } else {
            gradients
                .values_mut()
                .for_each(|g| *g = (*g).clamp(-threshold, threshold));
        }
        Ok(())
    }

    /// Applies `param -= learning_rate * grad` to every parameter tensor.
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the gradient set does not match the parameters
    pub fn apply(
        &self,
        parameters: &mut LSTMParameters,
        gradients: &LSTMGradients,
    ) -> Result<(), ModelError> {
        gradients.validate_shapes(
            parameters.input_size(),
            parameters.hidden_size(),
            parameters.output_size(),
        )?;
        parameters.descend(gradients, self.learning_rate);
        Ok(())
    }

    /// Clips `gradients` with `clip_value`, then applies them
    pub fn update(
        &self,
        parameters: &mut LSTMParameters,
        gradients: &mut LSTMGradients,
    ) -> Result<(), ModelError> {
        Self::clip(gradients, self.clip_value)?;
        self.apply(parameters, gradients)
    }
}

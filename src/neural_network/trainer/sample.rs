use super::*;

/// One supervised training example
///
/// # Fields
///
/// - `input` - Feature vector fed to the cell
/// - `target` - Expected output vector
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Array1<f64>,
    pub target: Array1<f64>,
}

impl Sample {
    /// Creates a sample, rejecting empty or non-finite vectors
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If either vector is empty or contains NaN/Inf
    pub fn new(input: Array1<f64>, target: Array1<f64>) -> Result<Self, ModelError> {
        for (vector, name) in [(&input, "input"), (&target, "target")] {
            if vector.is_empty() {
                return Err(ModelError::InvalidInput(format!("sample {} is empty", name)));
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::InvalidInput(format!(
                    "sample {} contains NaN or infinite values",
                    name
                )));
            }
        }
        Ok(Self { input, target })
    }

    /// Value the sample's direction is measured against: input component `column`, the
    /// previous observation when the features start with it. `None` if `column` is out of
    /// range.
    pub fn reference_value(&self, column: usize) -> Option<f64> {
        self.input.get(column).copied()
    }

    pub(super) fn check_values(&self, index: usize) -> Result<(), ModelError> {
        for (vector, name) in [(&self.input, "input"), (&self.target, "target")] {
            if let Some(position) = vector.iter().position(|v| !v.is_finite()) {
                return Err(ModelError::InvalidInput(format!(
                    "sample {} {} contains a non-finite value at index {}",
                    index, name, position
                )));
            }
        }
        Ok(())
    }

    pub(super) fn check_sizes(
        &self,
        index: usize,
        input_size: usize,
        output_size: usize,
    ) -> Result<(), ModelError> {
        if self.input.len() != input_size || self.target.len() != output_size {
            return Err(ModelError::ShapeMismatch(format!(
                "sample {} has input/target lengths {}/{}, expected {}/{}",
                index,
                self.input.len(),
                self.target.len(),
                input_size,
                output_size
            )));
        }
        Ok(())
    }
}

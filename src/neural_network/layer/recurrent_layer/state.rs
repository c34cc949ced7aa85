use super::*;

/// Hidden and memory (cell) state of an LSTM cell.
///
/// Both vectors have length `units` and start at zero for every new sequence. A forward
/// pass either commits a fully finite new state or leaves the previous one untouched.
///
/// # Fields
///
/// - `hidden` - Externally visible summary h_t, fed to the output head and the next step
/// - `cell` - Long-lived memory accumulator C_t
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecurrentState {
    hidden: Array1<f64>,
    cell: Array1<f64>,
}

impl RecurrentState {
    /// Creates a zero-initialized state for a cell with `units` hidden units
    pub fn zeros(units: usize) -> Self {
        Self {
            hidden: Array1::zeros(units),
            cell: Array1::zeros(units),
        }
    }

    /// Builds a state from explicit hidden and memory vectors.
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the two vectors differ in length
    /// - `ModelError::InvalidInput` - If either vector contains NaN/Inf
    pub fn from_vectors(hidden: Array1<f64>, cell: Array1<f64>) -> Result<Self, ModelError> {
        validate_vector_length(cell.view(), hidden.len(), "cell state")?;
        validate_finite_input(hidden.view(), "hidden state")?;
        validate_finite_input(cell.view(), "cell state")?;
        Ok(Self { hidden, cell })
    }

    pub fn hidden(&self) -> &Array1<f64> {
        &self.hidden
    }

    pub fn cell(&self) -> &Array1<f64> {
        &self.cell
    }

    pub fn units(&self) -> usize {
        self.hidden.len()
    }

    /// Zeroes both vectors in place, used between independent sequences
    pub fn reset(&mut self) {
        self.hidden.fill(0.0);
        self.cell.fill(0.0);
    }

    pub fn is_finite(&self) -> bool {
        self.hidden.iter().chain(self.cell.iter()).all(|v| v.is_finite())
    }

    pub(crate) fn validate_units(&self, units: usize) -> Result<(), ModelError> {
        validate_vector_length(self.hidden.view(), units, "hidden state")?;
        validate_vector_length(self.cell.view(), units, "cell state")
    }

    /// Replaces the state with values already checked to be finite
    pub(crate) fn commit(&mut self, hidden: Array1<f64>, cell: Array1<f64>) {
        self.hidden = hidden;
        self.cell = cell;
    }
}

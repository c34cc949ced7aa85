use super::*;

/// Leading bytes identifying a model artifact
pub const ARTIFACT_MAGIC: [u8; 4] = *b"LSTM";
/// Layout version written into every artifact
pub const ARTIFACT_VERSION: u32 = 1;

/// Serializable representation of a complete LSTM cell, in artifact order.
///
/// # Fields
///
/// - `magic` - Always `ARTIFACT_MAGIC`
/// - `version` - Layout version, `ARTIFACT_VERSION`
/// - `input_size` - Configured input size
/// - `hidden_size` - Configured hidden size
/// - `output_size` - Configured output size
/// - `input` - Weights for the input gate
/// - `forget` - Weights for the forget gate
/// - `cell` - Weights for the cell (candidate) gate
/// - `output` - Weights for the output gate
/// - `output_weight` - Output head matrix (output × hidden) stored as row vectors
/// - `output_bias` - Output head bias
/// - `bounds` - Normalization bounds the model was trained with, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLSTMWeight {
    pub magic: [u8; 4],
    pub version: u32,
    pub input_size: u64,
    pub hidden_size: u64,
    pub output_size: u64,
    pub input: SerializableGateWeight,
    pub forget: SerializableGateWeight,
    pub cell: SerializableGateWeight,
    pub output: SerializableGateWeight,
    pub output_weight: Vec<Vec<f64>>,
    pub output_bias: Vec<f64>,
    pub bounds: Option<NormalizationBounds>,
}

impl SerializableLSTMWeight {
    pub fn from_cell(cell: &LSTMCell, bounds: Option<&NormalizationBounds>) -> Self {
        let parameters = cell.parameters();
        Self {
            magic: ARTIFACT_MAGIC,
            version: ARTIFACT_VERSION,
            input_size: cell.input_size() as u64,
            hidden_size: cell.hidden_size() as u64,
            output_size: cell.output_size() as u64,
            input: SerializableGateWeight::from_gate(parameters.input_gate()),
            forget: SerializableGateWeight::from_gate(parameters.forget_gate()),
            cell: SerializableGateWeight::from_gate(parameters.cell_gate()),
            output: SerializableGateWeight::from_gate(parameters.output_gate()),
            output_weight: array2_to_vec2(parameters.output_weight()),
            output_bias: parameters.output_bias().to_vec(),
            bounds: bounds.cloned(),
        }
    }

    pub fn has_valid_header(&self) -> bool {
        self.magic == ARTIFACT_MAGIC && self.version == ARTIFACT_VERSION
    }

    /// Checks the stored sizes against the expected ones
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If any stored size differs
    pub fn check_sizes(
        &self,
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
    ) -> Result<(), ModelError> {
        let stored = (self.input_size, self.hidden_size, self.output_size);
        let expected = (input_size as u64, hidden_size as u64, output_size as u64);
        if stored != expected {
            return Err(ModelError::ShapeMismatch(format!(
                "artifact was saved with (input, hidden, output) = {:?}, expected {:?}",
                stored, expected
            )));
        }
        Ok(())
    }

    /// Rebuilds the parameter set and checks every tensor against `(input, hidden, output)`
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If any tensor disagrees with the expected sizes
    pub fn to_parameters(
        &self,
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
    ) -> Result<LSTMParameters, ModelError> {
        self.check_sizes(input_size, hidden_size, output_size)?;

        let output_weight = vec2_to_array2(&self.output_weight, "output_weight")?;
        let output_bias = Array1::from_vec(self.output_bias.clone());
        let parameters = LSTMParameters::new(
            self.input.to_gate("input_gate")?,
            self.forget.to_gate("forget_gate")?,
            self.cell.to_gate("cell_gate")?,
            self.output.to_gate("output_gate")?,
            output_weight,
            output_bias,
        )?;
        parameters.validate_shapes(input_size, hidden_size, output_size)?;
        Ok(parameters)
    }
}

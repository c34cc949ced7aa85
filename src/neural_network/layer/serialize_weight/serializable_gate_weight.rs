use super::*;

/// Serializable representation of a single gate's weights.
///
/// # Fields
///
/// - `kernel` - Input-side matrix (units × input_dim) stored as row vectors
/// - `recurrent_kernel` - Recurrent matrix (units × units) stored as row vectors
/// - `bias` - Bias vector with length units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableGateWeight {
    pub kernel: Vec<Vec<f64>>,
    pub recurrent_kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

impl SerializableGateWeight {
    pub fn from_gate(gate: &Gate) -> Self {
        Self {
            kernel: array2_to_vec2(gate.kernel()),
            recurrent_kernel: array2_to_vec2(gate.recurrent_kernel()),
            bias: gate.bias().to_vec(),
        }
    }

    /// Rebuilds the gate
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the stored tensors are ragged or inconsistent
    pub fn to_gate(&self, name: &str) -> Result<Gate, ModelError> {
        let kernel = vec2_to_array2(&self.kernel, &format!("{}.kernel", name))?;
        let recurrent_kernel =
            vec2_to_array2(&self.recurrent_kernel, &format!("{}.recurrent_kernel", name))?;
        let bias = Array1::from_vec(self.bias.clone());
        Gate::from_arrays(kernel, recurrent_kernel, bias).map_err(|e| match e {
            ModelError::InvalidInput(msg) => {
                ModelError::ShapeMismatch(format!("{}: {}", name, msg))
            }
            other => other,
        })
    }
}

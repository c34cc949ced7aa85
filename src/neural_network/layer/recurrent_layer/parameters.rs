use super::*;

/// Bias value every gate and the output head start from
pub const BIAS_INIT_VALUE: f64 = 0.01;

/// Complete trainable parameter set of an LSTM cell.
///
/// # Fields
///
/// - `input_gate` - Gate controlling what new information is written to memory
/// - `forget_gate` - Gate controlling what is kept from the previous memory
/// - `cell_gate` - Candidate gate proposing new memory values
/// - `output_gate` - Gate controlling what part of the memory becomes the hidden state
/// - `output_weight` - Linear output head weights, shape (output_size, hidden_size)
/// - `output_bias` - Linear output head bias, length output_size
#[derive(Debug, Clone, PartialEq)]
pub struct LSTMParameters {
    pub(crate) input_gate: Gate,
    pub(crate) forget_gate: Gate,
    pub(crate) cell_gate: Gate,
    pub(crate) output_gate: Gate,
    pub(crate) output_weight: Array2<f64>,
    pub(crate) output_bias: Array1<f64>,
}

impl LSTMParameters {
    /// Draws a fresh parameter set with variance-scaled Gaussian weights and constant biases
    pub(crate) fn random<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        validate_cell_dimensions(input_size, hidden_size, output_size)?;

        Ok(Self {
            input_gate: Gate::new(input_size, hidden_size, BIAS_INIT_VALUE, rng)?,
            forget_gate: Gate::new(input_size, hidden_size, BIAS_INIT_VALUE, rng)?,
            cell_gate: Gate::new(input_size, hidden_size, BIAS_INIT_VALUE, rng)?,
            output_gate: Gate::new(input_size, hidden_size, BIAS_INIT_VALUE, rng)?,
            output_weight: gate::gaussian_matrix(
                output_size,
                hidden_size,
                hidden_size + output_size,
                rng,
            )?,
            output_bias: Array1::from_elem(output_size, BIAS_INIT_VALUE),
        })
    }

    /// Builds a parameter set from explicit tensors.
    ///
    /// The sizes are inferred from the input gate and every other tensor is checked
    /// against them.
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If any tensor disagrees with the inferred sizes
    pub fn new(
        input_gate: Gate,
        forget_gate: Gate,
        cell_gate: Gate,
        output_gate: Gate,
        output_weight: Array2<f64>,
        output_bias: Array1<f64>,
    ) -> Result<Self, ModelError> {
        let parameters = Self {
            input_gate,
            forget_gate,
            cell_gate,
            output_gate,
            output_weight,
            output_bias,
        };
        parameters.validate_shapes(
            parameters.input_size(),
            parameters.hidden_size(),
            parameters.output_size(),
        )?;
        Ok(parameters)
    }

    /// Checks every tensor against `(input_size, hidden_size, output_size)`
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - Names the first tensor with a wrong shape
    pub fn validate_shapes(
        &self,
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
    ) -> Result<(), ModelError> {
        self.input_gate
            .validate_shape(input_size, hidden_size, "input_gate")?;
        self.forget_gate
            .validate_shape(input_size, hidden_size, "forget_gate")?;
        self.cell_gate
            .validate_shape(input_size, hidden_size, "cell_gate")?;
        self.output_gate
            .validate_shape(input_size, hidden_size, "output_gate")?;
        validate_matrix_shape(&self.output_weight, output_size, hidden_size, "output_weight")?;
        validate_vector_length(self.output_bias.view(), output_size, "output_bias")
    }

    pub fn input_gate(&self) -> &Gate {
        &self.input_gate
    }

    pub fn forget_gate(&self) -> &Gate {
        &self.forget_gate
    }

    pub fn cell_gate(&self) -> &Gate {
        &self.cell_gate
    }

    pub fn output_gate(&self) -> &Gate {
        &self.output_gate
    }

    pub fn output_weight(&self) -> &Array2<f64> {
        &self.output_weight
    }

    pub fn output_bias(&self) -> &Array1<f64> {
        &self.output_bias
    }

    pub fn input_size(&self) -> usize {
        self.input_gate.input_dim()
    }

    pub fn hidden_size(&self) -> usize {
        self.input_gate.units()
    }

    pub fn output_size(&self) -> usize {
        self.output_bias.len()
    }

    /// Number of trainable scalars
    pub fn param_count(&self) -> usize {
        let (input, hidden, output) = (self.input_size(), self.hidden_size(), self.output_size());
        4 * (input * hidden + hidden * hidden + hidden) + output * hidden + output
    }

    /// Iterates over every parameter: the four gates (input, forget, cell, output), each as
    /// kernel, recurrent kernel, bias; then the output weight and output bias
    pub fn values(&self) -> impl Iterator<Item = &f64> {
        self.input_gate
            .values()
            .chain(self.forget_gate.values())
            .chain(self.cell_gate.values())
            .chain(self.output_gate.values())
            .chain(self.output_weight.iter())
            .chain(self.output_bias.iter())
    }

    /// Mutable counterpart of `values`; shapes cannot be changed through it
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.input_gate
            .values_mut()
            .chain(self.forget_gate.values_mut())
            .chain(self.cell_gate.values_mut())
            .chain(self.output_gate.values_mut())
            .chain(self.output_weight.iter_mut())
            .chain(self.output_bias.iter_mut())
    }

    /// Applies `param -= lr * grad` to every tensor pair
    pub(crate) fn descend(&mut self, gradients: &LSTMGradients, lr: f64) {
        self.input_gate.descend(&gradients.input_gate, lr);
        self.forget_gate.descend(&gradients.forget_gate, lr);
        self.cell_gate.descend(&gradients.cell_gate, lr);
        self.output_gate.descend(&gradients.output_gate, lr);
        self.output_weight.scaled_add(-lr, &gradients.output_weight);
        self.output_bias.scaled_add(-lr, &gradients.output_bias);
    }
}

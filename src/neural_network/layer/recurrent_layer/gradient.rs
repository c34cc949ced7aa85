use super::*;

/// Gradients for one gate, mirroring `Gate` in shape.
///
/// # Fields
///
/// - `kernel` - Gradient of the input-side weights, shape (units, input_dim)
/// - `recurrent_kernel` - Gradient of the recurrent weights, shape (units, units)
/// - `bias` - Gradient of the bias, length units
#[derive(Debug, Clone, PartialEq)]
pub struct GateGradient {
    pub kernel: Array2<f64>,
    pub recurrent_kernel: Array2<f64>,
    pub bias: Array1<f64>,
}

impl GateGradient {
    pub fn zeros(input_dim: usize, units: usize) -> Self {
        Self {
            kernel: Array2::zeros((units, input_dim)),
            recurrent_kernel: Array2::zeros((units, units)),
            bias: Array1::zeros(units),
        }
    }

    /// Builds the gradient of a gate from its error signal.
    ///
    /// Weight gradients are outer products of `delta` with the vector each weight
    /// multiplied in the forward pass; the bias gradient is `delta` itself.
    pub(crate) fn from_delta(
        delta: &Array1<f64>,
        x: ArrayView1<f64>,
        h_prev: ArrayView1<f64>,
    ) -> Self {
        Self {
            kernel: outer(delta, x),
            recurrent_kernel: outer(delta, h_prev),
            bias: delta.clone(),
        }
    }

    fn values(&self) -> impl Iterator<Item = &f64> {
        self.kernel
            .iter()
            .chain(self.recurrent_kernel.iter())
            .chain(self.bias.iter())
    }

    fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.kernel
            .iter_mut()
            .chain(self.recurrent_kernel.iter_mut())
            .chain(self.bias.iter_mut())
    }

    fn accumulate(&mut self, other: &GateGradient) {
        self.kernel += &other.kernel;
        self.recurrent_kernel += &other.recurrent_kernel;
        self.bias += &other.bias;
    }
}

/// Gradient tensor set for the whole cell.
///
/// Created fresh by every backward pass and consumed by the optimizer; never persisted.
///
/// # Fields
///
/// - `input_gate` - Gradients of the input gate
/// - `forget_gate` - Gradients of the forget gate
/// - `cell_gate` - Gradients of the candidate gate
/// - `output_gate` - Gradients of the output gate
/// - `output_weight` - Gradient of the output head weights, shape (output, units)
/// - `output_bias` - Gradient of the output head bias, length output
#[derive(Debug, Clone, PartialEq)]
pub struct LSTMGradients {
    pub input_gate: GateGradient,
    pub forget_gate: GateGradient,
    pub cell_gate: GateGradient,
    pub output_gate: GateGradient,
    pub output_weight: Array2<f64>,
    pub output_bias: Array1<f64>,
}

impl LSTMGradients {
    pub fn zeros(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self {
            input_gate: GateGradient::zeros(input_size, hidden_size),
            forget_gate: GateGradient::zeros(input_size, hidden_size),
            cell_gate: GateGradient::zeros(input_size, hidden_size),
            output_gate: GateGradient::zeros(input_size, hidden_size),
            output_weight: Array2::zeros((output_size, hidden_size)),
            output_bias: Array1::zeros(output_size),
        }
    }

    /// Iterates over every gradient component in the same order as
    /// `LSTMParameters::values`
    pub fn values(&self) -> impl Iterator<Item = &f64> {
        self.input_gate
            .values()
            .chain(self.forget_gate.values())
            .chain(self.cell_gate.values())
            .chain(self.output_gate.values())
            .chain(self.output_weight.iter())
            .chain(self.output_bias.iter())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.input_gate
            .values_mut()
            .chain(self.forget_gate.values_mut())
            .chain(self.cell_gate.values_mut())
            .chain(self.output_gate.values_mut())
            .chain(self.output_weight.iter_mut())
            .chain(self.output_bias.iter_mut())
    }

    /// Adds another gradient set elementwise, used to sum a mini-batch
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the two sets belong to differently sized cells
    pub fn accumulate(&mut self, other: &LSTMGradients) -> Result<(), ModelError> {
        if self.output_weight.dim() != other.output_weight.dim()
            || self.input_gate.kernel.dim() != other.input_gate.kernel.dim()
        {
            return Err(ModelError::ShapeMismatch(format!(
                "cannot accumulate gradients of shape {:?}/{:?} into {:?}/{:?}",
                other.input_gate.kernel.dim(),
                other.output_weight.dim(),
                self.input_gate.kernel.dim(),
                self.output_weight.dim()
            )));
        }

        self.input_gate.accumulate(&other.input_gate);
        self.forget_gate.accumulate(&other.forget_gate);
        self.cell_gate.accumulate(&other.cell_gate);
        self.output_gate.accumulate(&other.output_gate);
        self.output_weight += &other.output_weight;
        self.output_bias += &other.output_bias;
        Ok(())
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
        let gates = [
            (&self.input_gate, "input_gate"),
            (&self.forget_gate, "forget_gate"),
            (&self.cell_gate, "cell_gate"),
            (&self.output_gate, "output_gate"),
        ];
        for (gate, name) in gates {
            validate_matrix_shape(&gate.kernel, hidden_size, input_size, &format!("{}.kernel gradient", name))?;
            validate_matrix_shape(
                &gate.recurrent_kernel,
                hidden_size,
                hidden_size,
                &format!("{}.recurrent_kernel gradient", name),
            )?;
            validate_vector_length(gate.bias.view(), hidden_size, &format!("{}.bias gradient", name))?;
        }
        validate_matrix_shape(&self.output_weight, output_size, hidden_size, "output_weight gradient")?;
        validate_vector_length(self.output_bias.view(), output_size, "output_bias gradient")
    }

    /// Multiplies every component by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.values_mut().for_each(|g| *g *= factor);
    }

    /// Largest absolute component, 0.0 for an all-zero set
    pub fn max_abs(&self) -> f64 {
        self.values().fold(0.0, |acc, g| acc.max(g.abs()))
    }

    /// Total number of gradient components
    pub fn len(&self) -> usize {
        self.values().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outer product `a ⊗ b` with shape (a.len(), b.len())
pub(crate) fn outer(a: &Array1<f64>, b: ArrayView1<f64>) -> Array2<f64> {
    let column = a.view().insert_axis(Axis(1));
    let row = b.insert_axis(Axis(0));
    column.dot(&row)
}

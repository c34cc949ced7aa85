use super::*;

/// Weights of a single LSTM gate.
///
/// # Fields
///
/// - `kernel` - Input-side weight matrix with shape (units, input_dim)
/// - `recurrent_kernel` - Recurrent weight matrix with shape (units, units)
/// - `bias` - Bias vector with length units
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub(crate) kernel: Array2<f64>,
    pub(crate) recurrent_kernel: Array2<f64>,
    pub(crate) bias: Array1<f64>,
}

impl Gate {
    /// Creates a gate with randomly initialized weights.
    ///
    /// Both kernels use a variance-scaled Gaussian draw with
    /// `stddev = sqrt(2 / (fan_in + fan_out))`; the bias is a constant.
    ///
    /// # Parameters
    ///
    /// - `input_dim` - Dimensionality of the input features
    /// - `units` - Number of units (neurons) in this gate
    /// - `bias_init_value` - Initial value for every bias entry
    /// - `rng` - Random number generator used for the weight draw
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If `input_dim` or `units` is 0
    pub fn new<R: Rng + ?Sized>(
        input_dim: usize,
        units: usize,
        bias_init_value: f64,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_dimension_greater_than_zero(units, "units")?;

        let kernel = gaussian_matrix(units, input_dim, input_dim + units, rng)?;
        let recurrent_kernel = gaussian_matrix(units, units, units + units, rng)?;
        let bias = Array1::from_elem(units, bias_init_value);

        Ok(Self {
            kernel,
            recurrent_kernel,
            bias,
        })
    }

    /// Builds a gate from explicit tensors.
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the recurrent kernel is not square with `units`
    ///   rows, or if the kernel or bias disagree with it
    pub fn from_arrays(
        kernel: Array2<f64>,
        recurrent_kernel: Array2<f64>,
        bias: Array1<f64>,
    ) -> Result<Self, ModelError> {
        let units = bias.len();
        validate_dimension_greater_than_zero(units, "units")?;
        validate_matrix_shape(&recurrent_kernel, units, units, "recurrent_kernel")?;
        validate_matrix_shape(&kernel, units, kernel.ncols(), "kernel")?;
        validate_dimension_greater_than_zero(kernel.ncols(), "input_dim")?;

        Ok(Self {
            kernel,
            recurrent_kernel,
            bias,
        })
    }

    /// Input-side weight matrix, shape (units, input_dim)
    pub fn kernel(&self) -> &Array2<f64> {
        &self.kernel
    }

    /// Recurrent weight matrix, shape (units, units)
    pub fn recurrent_kernel(&self) -> &Array2<f64> {
        &self.recurrent_kernel
    }

    /// Bias vector, length units
    pub fn bias(&self) -> &Array1<f64> {
        &self.bias
    }

    pub fn input_dim(&self) -> usize {
        self.kernel.ncols()
    }

    pub fn units(&self) -> usize {
        self.bias.len()
    }

    /// Checks that the gate matches the configured sizes
    pub(crate) fn validate_shape(
        &self,
        input_dim: usize,
        units: usize,
        name: &str,
    ) -> Result<(), ModelError> {
        validate_matrix_shape(&self.kernel, units, input_dim, &format!("{}.kernel", name))?;
        validate_matrix_shape(
            &self.recurrent_kernel,
            units,
            units,
            &format!("{}.recurrent_kernel", name),
        )?;
        validate_vector_length(self.bias.view(), units, &format!("{}.bias", name))
    }

    /// Iterates over kernel, recurrent kernel and bias values in that order
    pub(crate) fn values(&self) -> impl Iterator<Item = &f64> {
        self.kernel
            .iter()
            .chain(self.recurrent_kernel.iter())
            .chain(self.bias.iter())
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.kernel
            .iter_mut()
            .chain(self.recurrent_kernel.iter_mut())
            .chain(self.bias.iter_mut())
    }

    /// Applies `param -= lr * grad` to every tensor of this gate
    pub(crate) fn descend(&mut self, gradient: &GateGradient, lr: f64) {
        self.kernel.scaled_add(-lr, &gradient.kernel);
        self.recurrent_kernel
            .scaled_add(-lr, &gradient.recurrent_kernel);
        self.bias.scaled_add(-lr, &gradient.bias);
    }
}

/// Draws a (rows, cols) matrix from N(0, sqrt(2 / fan_sum))
pub(crate) fn gaussian_matrix<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    fan_sum: usize,
    rng: &mut R,
) -> Result<Array2<f64>, ModelError> {
    let std_dev = (2.0 / fan_sum as f64).sqrt();
    let normal = Normal::new(0.0, std_dev).map_err(|e| {
        ModelError::InvalidInput(format!("invalid initialization std_dev {}: {}", std_dev, e))
    })?;
    Ok(Array2::from_shape_simple_fn((rows, cols), || {
        normal.sample(&mut *rng)
    }))
}

/// Computes gate pre-activation: kernel @ x + recurrent_kernel @ h_prev + bias
///
/// # Parameters
///
/// - `gate` - Gate parameters used for the computation
/// - `x` - Input at the current time step with length input_dim
/// - `h_prev` - Previous hidden state with length units
///
/// # Returns
///
/// - `Array1<f64>` - Pre-activation gate values with length units
#[inline]
pub fn compute_gate_value(gate: &Gate, x: ArrayView1<f64>, h_prev: ArrayView1<f64>) -> Array1<f64> {
    gate.kernel.dot(&x) + gate.recurrent_kernel.dot(&h_prev) + &gate.bias
}

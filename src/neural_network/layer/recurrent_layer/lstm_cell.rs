use super::*;
use crate::neural_network::loss_function::SquaredError;
use crate::neural_network::optimizer::SGD;
use crate::traits::LossFunction;

/// Default elementwise gradient clipping bound
pub const DEFAULT_CLIP_VALUE: f64 = 5.0;

/// Configuration of the activations and training guards of an `LSTMCell`
///
/// # Fields
///
/// - `gate_activation` - Activation of the input, forget and output gates; must be bounded
/// - `candidate_activation` - Activation of the candidate (cell) gate
/// - `cell_activation` - Activation applied to the memory state before the output gate
/// - `output_activation` - Activation of the linear output head
/// - `clip_value` - Elementwise gradient bound used by `LSTMCell::backward`
/// - `random_state` - Seed for weight initialization, `None` draws a random seed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellConfig {
    pub gate_activation: Activation,
    pub candidate_activation: Activation,
    pub cell_activation: Activation,
    pub output_activation: Activation,
    pub clip_value: f64,
    pub random_state: Option<u64>,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            gate_activation: Activation::Sigmoid,
            candidate_activation: Activation::Tanh,
            cell_activation: Activation::Tanh,
            output_activation: Activation::Identity,
            clip_value: DEFAULT_CLIP_VALUE,
            random_state: None,
        }
    }
}

impl CellConfig {
    /// Leaky-rectifier variant: candidate, memory and output use `LeakyReLU` while the
    /// gates stay sigmoid
    pub fn leaky() -> Self {
        Self {
            candidate_activation: Activation::LeakyReLU,
            cell_activation: Activation::LeakyReLU,
            output_activation: Activation::LeakyReLU,
            ..Self::default()
        }
    }

    /// Returns the same configuration with a fixed initialization seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If the gate activation is unbounded or `clip_value`
    ///   is not positive and finite
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_gate_activation(self.gate_activation)?;
        if !(self.clip_value > 0.0 && self.clip_value.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "clip_value must be positive and finite, got {}",
                self.clip_value
            )));
        }
        Ok(())
    }
}

/// Activations captured by the most recent forward pass, consumed by the next backward pass
///
/// # Fields
///
/// - `input` - Input vector x_t
/// - `hidden_prev` - Hidden state h_{t-1} the step started from
/// - `cell_prev` - Memory state C_{t-1} the step started from
/// - `input_gate` - Activated input gate i_t
/// - `forget_gate` - Activated forget gate f_t
/// - `cell_gate` - Activated candidate gate g_t
/// - `output_gate` - Activated output gate o_t
/// - `cell` - New memory state C_t
/// - `cell_activated` - Activated memory state
/// - `hidden` - New hidden state h_t
/// - `output` - Output of the linear head
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardCache {
    pub input: Array1<f64>,
    pub hidden_prev: Array1<f64>,
    pub cell_prev: Array1<f64>,
    pub input_gate: Array1<f64>,
    pub forget_gate: Array1<f64>,
    pub cell_gate: Array1<f64>,
    pub output_gate: Array1<f64>,
    pub cell: Array1<f64>,
    pub cell_activated: Array1<f64>,
    pub hidden: Array1<f64>,
    pub output: Array1<f64>,
}

/// Single Long Short-Term Memory cell with a linear output head
///
/// The cell owns its parameters and a running `RecurrentState`. For every time step:
///
/// 1. i_t = σ(W_i · x_t + U_i · h_{t-1} + b_i)  (Input gate)
/// 2. f_t = σ(W_f · x_t + U_f · h_{t-1} + b_f)  (Forget gate)
/// 3. g_t = φ(W_g · x_t + U_g · h_{t-1} + b_g)  (Candidate gate)
/// 4. o_t = σ(W_o · x_t + U_o · h_{t-1} + b_o)  (Output gate)
/// 5. C_t = f_t ⊙ C_{t-1} + i_t ⊙ g_t  (Memory update)
/// 6. h_t = o_t ⊙ ψ(C_t)  (Hidden state update)
/// 7. y_t = ω(W_y · h_t + b_y)  (Output head)
///
/// σ, φ, ψ and ω are taken from `CellConfig`. Training is single-step truncated
/// backpropagation: gradients stop at h_{t-1} and C_{t-1}.
///
/// # Example
/// ```rust
/// use rustylstm::neural_network::*;
/// use ndarray::array;
///
/// let mut cell = LSTMCell::with_config(1, 8, 1, CellConfig::default().with_random_state(42)).unwrap();
///
/// // One training step on the running state
/// let loss = cell.backward(array![0.5].view(), array![0.6].view(), 0.01).unwrap();
/// assert!(loss.is_finite());
///
/// // Inference continues from the same running state
/// let prediction = cell.step(array![0.6].view()).unwrap();
/// assert_eq!(prediction.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LSTMCell {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    parameters: LSTMParameters,
    state: RecurrentState,
    cache: Option<ForwardCache>,
    config: CellConfig,
}

impl LSTMCell {
    /// Creates a new cell with the default configuration and random weights
    ///
    /// # Parameters
    ///
    /// - `input_size` - Length of every input feature vector
    /// - `hidden_size` - Number of LSTM units
    /// - `output_size` - Length of every output/target vector
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If any size is 0
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Result<Self, ModelError> {
        Self::with_config(input_size, hidden_size, output_size, CellConfig::default())
    }

    /// Creates a new cell with an explicit configuration
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If any size is 0 or the configuration is invalid
    pub fn with_config(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        config: CellConfig,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        let mut rng = match config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().next_u64()),
        };
        let parameters = LSTMParameters::random(input_size, hidden_size, output_size, &mut rng)?;

        Ok(Self {
            input_size,
            hidden_size,
            output_size,
            parameters,
            state: RecurrentState::zeros(hidden_size),
            cache: None,
            config,
        })
    }

    /// Creates a cell around an existing parameter set
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the parameter tensors are inconsistent
    /// - `ModelError::InvalidInput` - If the configuration is invalid
    pub fn from_parameters(parameters: LSTMParameters, config: CellConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let (input_size, hidden_size, output_size) = (
            parameters.input_size(),
            parameters.hidden_size(),
            parameters.output_size(),
        );
        validate_cell_dimensions(input_size, hidden_size, output_size)?;
        parameters.validate_shapes(input_size, hidden_size, output_size)?;

        Ok(Self {
            input_size,
            hidden_size,
            output_size,
            parameters,
            state: RecurrentState::zeros(hidden_size),
            cache: None,
            config,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    pub fn parameters(&self) -> &LSTMParameters {
        &self.parameters
    }

    /// Mutable access to the parameter values; tensor shapes stay fixed
    pub fn parameters_mut(&mut self) -> &mut LSTMParameters {
        &mut self.parameters
    }

    /// The running state owned by the cell
    pub fn state(&self) -> &RecurrentState {
        &self.state
    }

    /// Replaces the running state
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If the state does not have `hidden_size` units
    pub fn set_state(&mut self, state: RecurrentState) -> Result<(), ModelError> {
        state.validate_units(self.hidden_size)?;
        self.state = state;
        Ok(())
    }

    /// Zeroes the running hidden and memory state, used between independent sequences
    pub fn reset_state(&mut self) {
        self.state.reset();
    }

    /// Returns a zero state sized for this cell, for callers that own their state
    pub fn zero_state(&self) -> RecurrentState {
        RecurrentState::zeros(self.hidden_size)
    }

    /// Activations of the most recent forward pass, if not yet consumed
    pub fn cache(&self) -> Option<&ForwardCache> {
        self.cache.as_ref()
    }

    /// Computes one forward step without touching `state` or the cache
    fn forward_pass(
        &self,
        input: ArrayView1<f64>,
        state: &RecurrentState,
    ) -> Result<ForwardCache, ModelError> {
        validate_vector_length(input, self.input_size, "input")?;
        state.validate_units(self.hidden_size)?;
        validate_finite_input(input, "input")?;

        let params = &self.parameters;
        let h_prev = state.hidden().view();

        let use_parallel =
            self.hidden_size * (self.input_size + self.hidden_size) >= GATE_PARALLEL_THRESHOLD;

        let (i_raw, f_raw, g_raw, o_raw) = if use_parallel {
            let ((i_raw, f_raw), (g_raw, o_raw)) = rayon::join(
                || {
                    rayon::join(
                        || compute_gate_value(&params.input_gate, input, h_prev),
                        || compute_gate_value(&params.forget_gate, input, h_prev),
                    )
                },
                || {
                    rayon::join(
                        || compute_gate_value(&params.cell_gate, input, h_prev),
                        || compute_gate_value(&params.output_gate, input, h_prev),
                    )
                },
            );
            (i_raw, f_raw, g_raw, o_raw)
        } else {
            (
                compute_gate_value(&params.input_gate, input, h_prev),
                compute_gate_value(&params.forget_gate, input, h_prev),
                compute_gate_value(&params.cell_gate, input, h_prev),
                compute_gate_value(&params.output_gate, input, h_prev),
            )
        };

        let config = &self.config;
        let input_gate = config.gate_activation.apply_activation(&i_raw);
        check_divergence(&input_gate, "input gate")?;
        let forget_gate = config.gate_activation.apply_activation(&f_raw);
        check_divergence(&forget_gate, "forget gate")?;
        let cell_gate = config.candidate_activation.apply_activation(&g_raw);
        check_divergence(&cell_gate, "cell gate")?;
        let output_gate = config.gate_activation.apply_activation(&o_raw);
        check_divergence(&output_gate, "output gate")?;

        // C_t = f_t * C_{t-1} + i_t * g_t
        let cell = &forget_gate * state.cell() + &input_gate * &cell_gate;
        check_divergence(&cell, "cell state")?;

        // h_t = o_t * ψ(C_t)
        let cell_activated = config.cell_activation.apply_activation(&cell);
        let hidden = &output_gate * &cell_activated;
        check_divergence(&hidden, "hidden state")?;

        let output_raw = params.output_weight.dot(&hidden) + &params.output_bias;
        let output = config.output_activation.apply_activation(&output_raw);
        check_divergence(&output, "output")?;

        Ok(ForwardCache {
            input: input.to_owned(),
            hidden_prev: state.hidden().clone(),
            cell_prev: state.cell().clone(),
            input_gate,
            forget_gate,
            cell_gate,
            output_gate,
            cell,
            cell_activated,
            hidden,
            output,
        })
    }

    /// Runs one forward step on a caller-owned state and caches the activations
    ///
    /// # Parameters
    ///
    /// - `input` - Feature vector with length `input_size`
    /// - `state` - Hidden/memory state, updated in place on success
    ///
    /// # Returns
    ///
    /// - `Array1<f64>` - Output vector with length `output_size`
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `input` or `state` have the wrong length
    /// - `ModelError::InvalidInput` - If `input` contains NaN/Inf
    /// - `ModelError::NumericDivergence` - If a gate, the new state or the output is not finite
    ///
    /// On error `state` is left untouched and no cache is kept.
    pub fn forward(
        &mut self,
        input: ArrayView1<f64>,
        state: &mut RecurrentState,
    ) -> Result<Array1<f64>, ModelError> {
        self.cache = None;
        let cache = self.forward_pass(input, state)?;
        state.commit(cache.hidden.clone(), cache.cell.clone());
        let output = cache.output.clone();
        self.cache = Some(cache);
        Ok(output)
    }

    /// Runs one forward step on the running state owned by the cell
    pub fn step(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>, ModelError> {
        let mut state = std::mem::take(&mut self.state);
        let result = self.forward(input, &mut state);
        self.state = state;
        result
    }

    /// Runs one forward step for inference only
    ///
    /// Parameters and the activation cache are not touched, so this can be used by
    /// read-only diagnostics. `state` is advanced on success.
    pub fn predict(
        &self,
        input: ArrayView1<f64>,
        state: &mut RecurrentState,
    ) -> Result<Array1<f64>, ModelError> {
        let cache = self.forward_pass(input, state)?;
        state.commit(cache.hidden, cache.cell);
        Ok(cache.output)
    }

    /// Computes the gradients of the squared error between `target` and the output of the
    /// most recent forward pass
    ///
    /// The cached activations are consumed; calling this twice without a forward pass in
    /// between fails.
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `target` does not have length `output_size`
    /// - `ModelError::InvalidInput` - If `target` contains NaN/Inf
    /// - `ModelError::ProcessingError` - If no forward pass has been run since the last call
    /// - `ModelError::NumericDivergence` - If a gradient component is not finite
    pub fn compute_gradients(&mut self, target: ArrayView1<f64>) -> Result<LSTMGradients, ModelError> {
        validate_vector_length(target, self.output_size, "target")?;
        validate_finite_input(target, "target")?;
        let cache = self.cache.take().ok_or_else(|| {
            ModelError::ProcessingError(
                "backward pass requires a forward pass since the last backward pass".to_string(),
            )
        })?;

        let config = &self.config;
        let params = &self.parameters;

        // dL/dy = -2 (t - y), then through the output activation
        let output_delta = SquaredError::new().compute_grad(target, cache.output.view())
            * &config.output_activation.activation_derivative(&cache.output);
        let hidden_delta = params.output_weight.t().dot(&output_delta);

        // Through h_t = o_t * ψ(C_t)
        let output_gate_delta = &hidden_delta
            * &cache.cell_activated
            * &config.gate_activation.activation_derivative(&cache.output_gate);
        let cell_delta = &hidden_delta
            * &cache.output_gate
            * &config.cell_activation.activation_derivative(&cache.cell_activated);

        // Through C_t = f_t * C_{t-1} + i_t * g_t
        let input_gate_delta = &cell_delta
            * &cache.cell_gate
            * &config.gate_activation.activation_derivative(&cache.input_gate);
        let forget_gate_delta = &cell_delta
            * &cache.cell_prev
            * &config.gate_activation.activation_derivative(&cache.forget_gate);
        let cell_gate_delta = &cell_delta
            * &cache.input_gate
            * &config.candidate_activation.activation_derivative(&cache.cell_gate);

        let x = cache.input.view();
        let h_prev = cache.hidden_prev.view();
        let gradients = LSTMGradients {
            input_gate: GateGradient::from_delta(&input_gate_delta, x, h_prev),
            forget_gate: GateGradient::from_delta(&forget_gate_delta, x, h_prev),
            cell_gate: GateGradient::from_delta(&cell_gate_delta, x, h_prev),
            output_gate: GateGradient::from_delta(&output_gate_delta, x, h_prev),
            output_weight: gradient::outer(&output_delta, cache.hidden.view()),
            output_bias: output_delta,
        };

        if gradients.values().any(|g| !g.is_finite()) {
            return Err(ModelError::NumericDivergence(
                "non-finite gradient computed in backward pass".to_string(),
            ));
        }

        Ok(gradients)
    }

    /// Training entry point: one forward step on the running state, backward pass,
    /// gradient clipping with `clip_value` and an SGD update
    ///
    /// # Parameters
    ///
    /// - `input` - Feature vector with length `input_size`
    /// - `target` - Target vector with length `output_size`
    /// - `learning_rate` - SGD step size
    ///
    /// # Returns
    ///
    /// - `f64` - Squared error of the prediction made before the update
    ///
    /// # Errors
    ///
    /// Any error of `forward` or `compute_gradients`, plus `ModelError::InvalidInput` for a
    /// non-positive or non-finite learning rate. Parameters are untouched on error.
    pub fn backward(
        &mut self,
        input: ArrayView1<f64>,
        target: ArrayView1<f64>,
        learning_rate: f64,
    ) -> Result<f64, ModelError> {
        let optimizer = SGD::new(learning_rate, self.config.clip_value)?;
        validate_vector_length(target, self.output_size, "target")?;
        validate_finite_input(target, "target")?;

        let output = self.step(input)?;
        let loss = SquaredError::new().compute_loss(target, output.view());
        let mut gradients = self.compute_gradients(target)?;
        optimizer.update(&mut self.parameters, &mut gradients)?;
        Ok(loss)
    }
}

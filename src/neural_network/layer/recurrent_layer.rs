use super::*;

/// Threshold for computing the four gate pre-activations in parallel.
/// When units * (input_dim + units) < this value, gates are computed sequentially.
const GATE_PARALLEL_THRESHOLD: usize = 4096;

/// Gate structure holding the weights of one LSTM gate
pub mod gate;
/// Gradient tensor set mirroring the LSTM parameters
pub mod gradient;
/// Input validation functions for the recurrent cell
mod input_validation_function;
/// The single LSTM cell: parameters, running state, forward and backward passes
pub mod lstm_cell;
/// The full trainable parameter set of the LSTM cell
pub mod parameters;
/// Hidden and memory state carried across time steps
pub mod state;

pub use gate::{Gate, compute_gate_value};
pub use gradient::{GateGradient, LSTMGradients};
pub use lstm_cell::{CellConfig, DEFAULT_CLIP_VALUE, ForwardCache, LSTMCell};
pub use parameters::{BIAS_INIT_VALUE, LSTMParameters};
pub use state::RecurrentState;

use input_validation_function::*;

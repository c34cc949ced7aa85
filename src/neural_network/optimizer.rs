/// Stochastic gradient descent with elementwise gradient clipping
pub mod sgd;

mod input_validation_function;

pub use sgd::*;

use crate::error::ModelError;
use crate::neural_network::layer::{LSTMGradients, LSTMParameters};
use input_validation_function::*;

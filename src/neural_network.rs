/// Module that contains the activation functions of the LSTM cell
pub mod activation;
/// Module that contains directional evaluation and multi-step forecasting
pub mod evaluation;
/// Module that contains the LSTM cell, its parameters and their persistence
pub mod layer;
/// Module that contains the training loss
pub mod loss_function;
/// Module that contains the gradient descent optimizer
pub mod optimizer;
/// Module that contains the epoch loop, its configuration and history
pub mod trainer;

pub use activation::*;
pub use evaluation::*;
pub use layer::*;
pub use loss_function::*;
pub use optimizer::*;
pub use trainer::*;

pub use crate::traits::LossFunction;

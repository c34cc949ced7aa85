/// Summed squared error loss used by the LSTM backward pass
pub mod squared_error;

pub use squared_error::*;

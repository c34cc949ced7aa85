/// Prelude module for evaluation metrics.
pub mod metric_prelude;
/// Prelude module for the LSTM cell, its training and evaluation.
pub mod neural_network_prelude;
/// Prelude module for data preparation helpers.
pub mod utility_prelude;

pub use crate::error::{IoError, ModelError};
pub use metric_prelude::*;
pub use neural_network_prelude::*;
pub use utility_prelude::*;

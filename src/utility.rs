use crate::error::ModelError;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix2};
use serde::{Deserialize, Serialize};

/// This module provides per-column min-max scaling whose bounds can be stored alongside
/// a trained model
pub mod normalize;

/// This module provides order-preserving splits of time series data into training and test
/// sets, and conversion of table rows into training samples
pub mod train_test_split;

pub use normalize::*;
pub use train_test_split::*;

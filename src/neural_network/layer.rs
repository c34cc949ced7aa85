use crate::error::{IoError, ModelError};
use crate::neural_network::activation::Activation;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Recurrent layer implementations (the LSTM cell and its state)
pub mod recurrent_layer;
/// Binary persistence of the LSTM parameter set
pub mod serialize_weight;

pub use recurrent_layer::*;
pub use serialize_weight::*;

//! A single-cell LSTM time-series predictor.
//!
//! The crate provides one Long Short-Term Memory cell with a linear output head, trained
//! online with single-step truncated backpropagation and clipped stochastic gradient
//! descent, together with the pieces needed around it: a binary model artifact, an epoch
//! loop with early stopping, directional (up/flat/down) evaluation and min-max scaling of
//! the input series.
//!
//! # Example
//! ```rust
//! use rustylstm::prelude::*;
//! use ndarray::array;
//!
//! let series = array![0.20, 0.22, 0.25, 0.24, 0.27, 0.30, 0.29, 0.31, 0.33, 0.35];
//! let samples = samples_from_series(series.view()).unwrap();
//! let (train, validation) = samples.split_at(7);
//!
//! let mut cell = LSTMCell::with_config(1, 8, 1, CellConfig::default().with_random_state(7)).unwrap();
//! let trainer = Trainer::new(TrainingConfig {
//!     learning_rate: 0.05,
//!     epochs: 10,
//!     ..TrainingConfig::default()
//! }).unwrap();
//! let history = trainer.fit_with_validation(&mut cell, train, validation).unwrap();
//! assert!(history.len() <= 10);
//!
//! let mut state = cell.state().clone();
//! let outlook = forecast(&cell, &mut state, array![0.35].view(), 3, 0.0).unwrap();
//! assert_eq!(outlook.len(), 3);
//! ```

/// Error types shared by every module of the crate
pub mod error;

/// Regression metrics and the binary confusion matrix used for directional evaluation.
///
/// # Regression Metrics
/// - **mean_squared_error**: Average of squared differences between predicted and actual values
/// - **root_mean_squared_error**: Square root of MSE, in the units of the data
/// - **mean_absolute_error**: Average magnitude of prediction errors
///
/// # Classification
/// - **ConfusionMatrix**: TP/FP/TN/FN counts with accuracy, precision, recall,
///   specificity, F1 score and a formatted summary
pub mod metric;

/// The LSTM cell and everything needed to train, persist and evaluate it.
///
/// # Core Components
///
/// - **LSTMCell**: parameters, running state, forward pass and single-step backward pass
/// - **SGD**: elementwise gradient clipping followed by a plain gradient step
/// - **save_to_path / load_from_path / load_or_new**: binary model artifact
/// - **Trainer**: ordered epoch loop with mini-batches, validation and early stopping
/// - **predict_direction / confusion_matrix / forecast**: directional evaluation
///
/// # Examples
/// ```rust
/// use rustylstm::neural_network::*;
/// use ndarray::array;
///
/// let mut cell = LSTMCell::new(1, 16, 1).unwrap();
/// let mut state = cell.zero_state();
///
/// let output = cell.forward(array![0.5].view(), &mut state).unwrap();
/// let gradients = cell.compute_gradients(array![0.55].view()).unwrap();
/// assert_eq!(output.len(), 1);
/// assert_eq!(gradients.len(), cell.parameters().param_count());
/// ```
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types of this crate.
///
/// # Examples
/// ```rust
/// use rustylstm::prelude::*;
///
/// let cell = LSTMCell::new(1, 4, 1).unwrap();
/// assert_eq!(cell.hidden_size(), 4);
/// ```
pub mod prelude;

/// Traits shared across modules
pub mod traits;

/// Data preparation: min-max scaling with persistable bounds, chronological splitting and
/// sample construction.
///
/// # Examples
/// ```rust
/// use rustylstm::utility::*;
/// use ndarray::array;
///
/// let data = array![[10.0, 11.0], [11.0, 12.0], [12.0, 11.5], [11.5, 12.5]];
/// let bounds = NormalizationBounds::fit(&data).unwrap();
/// let scaled = bounds.normalize(&data).unwrap();
///
/// let (train, test) = chronological_split(&scaled, 0.5).unwrap();
/// let samples = samples_from_rows(&train).unwrap();
/// assert_eq!(samples.len(), 2);
/// assert_eq!(test.nrows(), 2);
/// ```
pub mod utility;

pub use error::*;

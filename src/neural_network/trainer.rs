use crate::error::{IoError, ModelError};
use crate::neural_network::evaluation::{Direction, clamp_prediction};
use crate::neural_network::layer::{DEFAULT_CLIP_VALUE, LSTMCell, LSTMGradients, RecurrentState};
use crate::neural_network::loss_function::SquaredError;
use crate::neural_network::optimizer::SGD;
use crate::traits::LossFunction;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, error, info};

/// Training example type
pub mod sample;
/// Hyperparameters of a training run
pub mod training_config;
/// Per-epoch metrics returned by the trainer
pub mod training_history;

pub use sample::*;
pub use training_config::*;
pub use training_history::*;

/// Loss and directional accuracy of a cell on held-out samples
///
/// # Fields
///
/// - `loss` - Mean per-sample squared error
/// - `direction_accuracy` - Share of samples whose predicted direction matched the realized one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationReport {
    pub loss: f64,
    pub direction_accuracy: f64,
}

/// Epoch loop around `LSTMCell`.
///
/// Samples are visited in the given order and never shuffled. Each mini-batch runs forward
/// and backward for all of its samples on the running state, averages the gradients, then
/// applies one clipped SGD update, so no gradient is computed from partially updated
/// parameters. A `NumericDivergence` aborts the run.
///
/// # Example
/// ```rust
/// use rustylstm::neural_network::*;
/// use rustylstm::utility::samples_from_series;
/// use ndarray::array;
///
/// let series = array![0.10, 0.12, 0.15, 0.13, 0.16, 0.18, 0.17, 0.20];
/// let samples = samples_from_series(series.view()).unwrap();
///
/// let mut cell = LSTMCell::with_config(1, 4, 1, CellConfig::default().with_random_state(42)).unwrap();
/// let trainer = Trainer::new(TrainingConfig {
///     learning_rate: 0.05,
///     epochs: 5,
///     ..TrainingConfig::default()
/// }).unwrap();
///
/// let history = trainer.fit(&mut cell, &samples).unwrap();
/// assert_eq!(history.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    optimizer: SGD,
}

impl Trainer {
    /// Creates a trainer
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If the configuration is invalid
    pub fn new(config: TrainingConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let optimizer = SGD::new(config.learning_rate, config.clip_value)?;
        Ok(Self { config, optimizer })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains `cell` on `samples`, monitoring the training loss for early stopping
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If `samples` is empty or a sample holds NaN/Inf
    /// - `ModelError::ShapeMismatch` - If a sample does not match the cell's sizes
    /// - `ModelError::NumericDivergence` - If training diverges
    pub fn fit(
        &self,
        cell: &mut LSTMCell,
        samples: &[Sample],
    ) -> Result<TrainingHistory, ModelError> {
        self.run(cell, samples, None)
    }

    /// Trains `cell` on `train`, evaluating on `validation` after every epoch and monitoring
    /// the validation loss for early stopping
    ///
    /// # Errors
    ///
    /// Same as `fit`, applied to both sample sets.
    pub fn fit_with_validation(
        &self,
        cell: &mut LSTMCell,
        train: &[Sample],
        validation: &[Sample],
    ) -> Result<TrainingHistory, ModelError> {
        check_samples(cell, validation, "validation")?;
        self.check_reference_column(cell)?;
        self.run(cell, train, Some(validation))
    }

    /// Evaluates `cell` on `samples` starting from `state`, without changing the cell
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If `samples` is empty, a sample holds NaN/Inf, or
    ///   `reference_column` is not an input column
    /// - `ModelError::ShapeMismatch` - If a sample does not match the cell's sizes
    /// - Any error of `LSTMCell::predict`
    pub fn evaluate(
        &self,
        cell: &LSTMCell,
        state: &mut RecurrentState,
        samples: &[Sample],
    ) -> Result<ValidationReport, ModelError> {
        check_samples(cell, samples, "evaluation")?;
        self.check_reference_column(cell)?;

        let loss_fn = SquaredError::new();
        let threshold = self.config.direction_threshold;
        let mut total_loss = 0.0;
        let mut correct = 0usize;

        for sample in samples {
            let output = cell.predict(sample.input.view(), state)?;
            total_loss += loss_fn.compute_loss(sample.target.view(), output.view());

            let last_value = sample
                .reference_value(self.config.reference_column)
                .ok_or_else(|| {
                    ModelError::ShapeMismatch(format!(
                        "reference_column {} is out of range for input size {}",
                        self.config.reference_column,
                        sample.input.len()
                    ))
                })?;
            let predicted = clamp_prediction(output[0], last_value);
            if Direction::classify(predicted, last_value, threshold)
                == Direction::classify(sample.target[0], last_value, threshold)
            {
                correct += 1;
            }
        }

        let n = samples.len() as f64;
        Ok(ValidationReport {
            loss: total_loss / n,
            direction_accuracy: correct as f64 / n,
        })
    }

    fn check_reference_column(&self, cell: &LSTMCell) -> Result<(), ModelError> {
        if self.config.reference_column >= cell.input_size() {
            return Err(ModelError::InvalidInput(format!(
                "reference_column {} must be less than the input size {}",
                self.config.reference_column,
                cell.input_size()
            )));
        }
        Ok(())
    }

    fn run(
        &self,
        cell: &mut LSTMCell,
        samples: &[Sample],
        validation: Option<&[Sample]>,
    ) -> Result<TrainingHistory, ModelError> {
        check_samples(cell, samples, "training")?;

        let config = &self.config;
        let progress_bar = if config.show_progress {
            let progress_bar = ProgressBar::new(config.epochs as u64);
            progress_bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Loss: {msg}")
                    .map_err(|e| {
                        ModelError::ProcessingError(format!("invalid progress bar template: {}", e))
                    })?
                    .progress_chars("█▓░"),
            );
            progress_bar
        } else {
            ProgressBar::hidden()
        };

        info!(
            samples = samples.len(),
            epochs = config.epochs,
            batch_size = config.batch_size,
            learning_rate = config.learning_rate,
            "training started"
        );

        let mut history = TrainingHistory::new();
        let mut best_loss = f64::INFINITY;
        let mut epochs_without_improvement = 0usize;

        for epoch in 0..config.epochs {
            if config.reset_state_each_epoch {
                cell.reset_state();
            }

            let train_loss = match self.train_epoch(cell, samples) {
                Ok(loss) => loss,
                Err(e) => {
                    error!(epoch, error = %e, "training aborted");
                    progress_bar.abandon_with_message("Training aborted");
                    return Err(e);
                }
            };

            let report = match validation {
                Some(validation) => {
                    let mut state = cell.state().clone();
                    Some(self.evaluate(cell, &mut state, validation)?)
                }
                None => None,
            };

            let record = EpochRecord {
                epoch,
                train_loss,
                validation_loss: report.map(|r| r.loss),
                validation_accuracy: report.map(|r| r.direction_accuracy),
            };
            debug!(
                epoch,
                train_loss,
                validation_loss = ?record.validation_loss,
                validation_accuracy = ?record.validation_accuracy,
                "epoch finished"
            );
            progress_bar.set_message(format!("{:.6}", record.monitored_loss()));
            progress_bar.inc(1);

            let monitored = record.monitored_loss();
            history.push(record);

            if monitored < best_loss - config.min_delta {
                best_loss = monitored;
                epochs_without_improvement = 0;
            } else {
                epochs_without_improvement += 1;
            }

            if let Some(patience) = config.patience {
                if epochs_without_improvement >= patience {
                    info!(epoch, best_loss, patience, "early stopping");
                    history.mark_stopped_early();
                    break;
                }
            }
        }

        progress_bar.finish_with_message("Training completed");
        info!(
            epochs = history.len(),
            final_loss = ?history.last().map(|r| r.train_loss),
            "training completed"
        );

        Ok(history)
    }

    /// One pass over `samples`; returns the mean per-sample loss
    fn train_epoch(&self, cell: &mut LSTMCell, samples: &[Sample]) -> Result<f64, ModelError> {
        let loss_fn = SquaredError::new();
        let mut total_loss = 0.0;

        for batch in samples.chunks(self.config.batch_size) {
            let mut batch_gradients =
                LSTMGradients::zeros(cell.input_size(), cell.hidden_size(), cell.output_size());

            for sample in batch {
                let output = cell.step(sample.input.view())?;
                total_loss += loss_fn.compute_loss(sample.target.view(), output.view());
                let gradients = cell.compute_gradients(sample.target.view())?;
                batch_gradients.accumulate(&gradients)?;
            }

            batch_gradients.scale(1.0 / batch.len() as f64);
            self.optimizer
                .update(cell.parameters_mut(), &mut batch_gradients)?;
        }

        Ok(total_loss / samples.len() as f64)
    }
}

fn check_samples(cell: &LSTMCell, samples: &[Sample], name: &str) -> Result<(), ModelError> {
    if samples.is_empty() {
        return Err(ModelError::InvalidInput(format!(
            "{} samples must not be empty",
            name
        )));
    }
    samples
        .iter()
        .enumerate()
        .try_for_each(|(index, sample)| {
            sample.check_sizes(index, cell.input_size(), cell.output_size())?;
            sample.check_values(index)
        })
}

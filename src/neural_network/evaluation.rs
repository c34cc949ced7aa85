use crate::error::ModelError;
use crate::metric::ConfusionMatrix;
use crate::neural_network::layer::{LSTMCell, RecurrentState};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Largest relative move a single prediction may make away from the last observed value
pub const MAX_RELATIVE_CHANGE: f64 = 0.10;

/// Direction of the next value relative to the last observed one
///
/// # Variants
///
/// - `Up` - Above `last_value + threshold`
/// - `Flat` - Within `last_value ± threshold`
/// - `Down` - Below `last_value - threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Flat,
    Down,
}

impl Direction {
    /// Classifies `value` relative to `last_value` with a symmetric dead band of `threshold`
    pub fn classify(value: f64, last_value: f64, threshold: f64) -> Self {
        if value > last_value + threshold {
            Direction::Up
        } else if value < last_value - threshold {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

/// A single clamped prediction and its direction.
///
/// # Fields
///
/// - `raw_prediction` - Output unit 0 of the cell before clamping
/// - `prediction` - Prediction clamped into `last_value * (1 ± MAX_RELATIVE_CHANGE)`
/// - `last_value` - Reference value the direction is measured against
/// - `direction` - Classification of `prediction`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalPrediction {
    pub raw_prediction: f64,
    pub prediction: f64,
    pub last_value: f64,
    pub direction: Direction,
}

impl DirectionalPrediction {
    /// `prediction - last_value`
    pub fn change(&self) -> f64 {
        self.prediction - self.last_value
    }
}

/// One labelled step for directional evaluation.
///
/// # Fields
///
/// - `input` - Feature vector fed to the cell
/// - `last_value` - Last observed value before the step
/// - `next_value` - Realized value after the step
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSample {
    pub input: Array1<f64>,
    pub last_value: f64,
    pub next_value: f64,
}

impl DirectionSample {
    pub fn new(input: Array1<f64>, last_value: f64, next_value: f64) -> Self {
        Self {
            input,
            last_value,
            next_value,
        }
    }
}

/// Clamps `prediction` into the band `last_value * (1 ± MAX_RELATIVE_CHANGE)`
pub fn clamp_prediction(prediction: f64, last_value: f64) -> f64 {
    let a = last_value * (1.0 - MAX_RELATIVE_CHANGE);
    let b = last_value * (1.0 + MAX_RELATIVE_CHANGE);
    prediction.clamp(a.min(b), a.max(b))
}

fn validate_reference(last_value: f64, threshold: f64) -> Result<(), ModelError> {
    if !last_value.is_finite() {
        return Err(ModelError::InvalidInput(format!(
            "last_value must be finite, got {}",
            last_value
        )));
    }
    if !(threshold >= 0.0 && threshold.is_finite()) {
        return Err(ModelError::InvalidInput(format!(
            "threshold must be non-negative and finite, got {}",
            threshold
        )));
    }
    Ok(())
}

fn first_output(output: &Array1<f64>) -> Result<f64, ModelError> {
    output.first().copied().ok_or_else(|| {
        ModelError::ShapeMismatch("cell produced an empty output vector".to_string())
    })
}

/// Runs the cell on `input` and classifies the clamped prediction against `last_value`.
///
/// Only `state` is advanced; parameters and the activation cache are not touched.
///
/// # Parameters
///
/// - `cell` - Trained cell
/// - `state` - State to run from, advanced by one step on success
/// - `input` - Feature vector with length `input_size`
/// - `last_value` - Last observed value
/// - `threshold` - Width of the `Flat` band on either side of `last_value`
///
/// # Errors
///
/// - `ModelError::InvalidInput` - If `last_value` is not finite or `threshold` is negative
///   or not finite, plus any error of `LSTMCell::predict`
///
/// # Example
/// ```rust
/// use rustylstm::neural_network::*;
/// use ndarray::array;
///
/// let cell = LSTMCell::with_config(1, 4, 1, CellConfig::default().with_random_state(1)).unwrap();
/// let mut state = cell.zero_state();
///
/// let result = predict_direction(&cell, &mut state, array![100.0].view(), 100.0, 0.5).unwrap();
/// assert!(result.prediction >= 90.0 && result.prediction <= 110.0);
/// ```
pub fn predict_direction(
    cell: &LSTMCell,
    state: &mut RecurrentState,
    input: ArrayView1<f64>,
    last_value: f64,
    threshold: f64,
) -> Result<DirectionalPrediction, ModelError> {
    validate_reference(last_value, threshold)?;

    let output = cell.predict(input, state)?;
    let raw_prediction = first_output(&output)?;
    let prediction = clamp_prediction(raw_prediction, last_value);

    Ok(DirectionalPrediction {
        raw_prediction,
        prediction,
        last_value,
        direction: Direction::classify(prediction, last_value, threshold),
    })
}

/// Tallies predicted versus realized direction over `samples`, with `Up` as the positive
/// class.
///
/// Samples are evaluated in order from `state`, which is advanced through all of them.
///
/// # Errors
///
/// Any error of `predict_direction`; `ModelError::InvalidInput` if a sample's `next_value`
/// is not finite.
pub fn confusion_matrix(
    cell: &LSTMCell,
    state: &mut RecurrentState,
    samples: &[DirectionSample],
    threshold: f64,
) -> Result<ConfusionMatrix, ModelError> {
    let mut matrix = ConfusionMatrix::default();

    for (index, sample) in samples.iter().enumerate() {
        if !sample.next_value.is_finite() {
            return Err(ModelError::InvalidInput(format!(
                "sample {} has a non-finite next_value",
                index
            )));
        }
        let predicted = predict_direction(
            cell,
            state,
            sample.input.view(),
            sample.last_value,
            threshold,
        )?;
        let realized = Direction::classify(sample.next_value, sample.last_value, threshold);
        matrix.record(predicted.direction == Direction::Up, realized == Direction::Up);
    }

    Ok(matrix)
}

/// Multi-step rollout: each clamped prediction is fed back as the next input.
///
/// The reference value of every step is component 0 of the input fed into that step.
///
/// # Parameters
///
/// - `cell` - Trained cell whose input and output sizes are equal
/// - `state` - State to start from, advanced by `steps` on success
/// - `input` - Most recent observation
/// - `steps` - Number of steps to predict
/// - `threshold` - Width of the `Flat` band
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the cell's input and output sizes differ
/// - Any error of `predict_direction`
pub fn forecast(
    cell: &LSTMCell,
    state: &mut RecurrentState,
    input: ArrayView1<f64>,
    steps: usize,
    threshold: f64,
) -> Result<Vec<DirectionalPrediction>, ModelError> {
    if cell.input_size() != cell.output_size() {
        return Err(ModelError::ShapeMismatch(format!(
            "forecast feeds outputs back as inputs, but input_size {} != output_size {}",
            cell.input_size(),
            cell.output_size()
        )));
    }

    let mut current = input.to_owned();
    let mut predictions = Vec::with_capacity(steps);

    for _ in 0..steps {
        let last_value = first_output(&current)?;
        validate_reference(last_value, threshold)?;

        let mut output = cell.predict(current.view(), state)?;
        let raw_prediction = first_output(&output)?;
        let prediction = clamp_prediction(raw_prediction, last_value);
        output[0] = prediction;

        predictions.push(DirectionalPrediction {
            raw_prediction,
            prediction,
            last_value,
            direction: Direction::classify(prediction, last_value, threshold),
        });
        current = output;
    }

    Ok(predictions)
}

use super::*;
use crate::utility::NormalizationBounds;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

mod helper_function;
/// Serializable form of a single gate
pub mod serializable_gate_weight;
/// Serializable form of the whole cell, in artifact order
pub mod serializable_lstm_weight;

use helper_function::*;
pub use serializable_gate_weight::*;
pub use serializable_lstm_weight::*;

/// A model restored from an artifact.
///
/// # Fields
///
/// - `cell` - Cell with the stored parameters and a zero running state
/// - `bounds` - Normalization bounds stored with the model, if any
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub cell: LSTMCell,
    pub bounds: Option<NormalizationBounds>,
}

/// Writes the cell's parameters (and optional normalization bounds) to a binary artifact.
///
/// Only parameter tensors are stored; the running state and the activation cache are not.
/// Floating point values are written exactly, so a save/load round trip is bit-identical.
///
/// # Parameters
///
/// - `cell` - Cell to persist
/// - `path` - Destination file, created or overwritten
/// - `bounds` - Normalization bounds to store with the model
///
/// # Errors
///
/// - `IoError::StdIoError` - If the file cannot be created or flushed
/// - `IoError::BincodeError` - If encoding fails
///
/// # Example
/// ```rust
/// use rustylstm::neural_network::*;
///
/// let cell = LSTMCell::with_config(1, 4, 1, CellConfig::default().with_random_state(3)).unwrap();
/// let dir = std::env::temp_dir().join("rustylstm_doc_save.bin");
/// save_to_path(&cell, &dir, None).unwrap();
///
/// let loaded = load_from_path(&dir, 1, 4, 1, CellConfig::default()).unwrap().unwrap();
/// assert_eq!(loaded.cell.parameters(), cell.parameters());
/// # std::fs::remove_file(&dir).ok();
/// ```
pub fn save_to_path(
    cell: &LSTMCell,
    path: impl AsRef<Path>,
    bounds: Option<&NormalizationBounds>,
) -> Result<(), IoError> {
    let path = path.as_ref();
    let serializable = SerializableLSTMWeight::from_cell(cell, bounds);

    let file = File::create(path).map_err(IoError::StdIoError)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &serializable).map_err(IoError::BincodeError)?;
    writer.flush().map_err(IoError::StdIoError)?;

    info!(
        path = %path.display(),
        input_size = cell.input_size(),
        hidden_size = cell.hidden_size(),
        output_size = cell.output_size(),
        "model saved"
    );
    Ok(())
}

/// Restores a cell from an artifact written by `save_to_path`.
///
/// # Parameters
///
/// - `path` - Artifact file
/// - `input_size` - Expected input size
/// - `hidden_size` - Expected hidden size
/// - `output_size` - Expected output size
/// - `config` - Activation configuration for the restored cell
///
/// # Returns
///
/// - `Ok(Some(LoadedModel))` - The artifact matched the expected sizes
/// - `Ok(None)` - The file is missing, unreadable, or not a recognizable artifact
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the artifact is valid but its sizes or tensor shapes
///   disagree with the expected ones
/// - `ModelError::InvalidInput` - If `config` is invalid
pub fn load_from_path(
    path: impl AsRef<Path>,
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    config: CellConfig,
) -> Result<Option<LoadedModel>, ModelError> {
    let path = path.as_ref();

    let reader = match IoError::load_in_buf_reader(path) {
        Ok(reader) => reader,
        Err(e) => {
            info!(path = %path.display(), error = %e, "no readable model artifact");
            return Ok(None);
        }
    };

    let serializable: SerializableLSTMWeight = match bincode::deserialize_from(reader) {
        Ok(serializable) => serializable,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "model artifact could not be decoded");
            return Ok(None);
        }
    };

    if !serializable.has_valid_header() {
        warn!(
            path = %path.display(),
            version = serializable.version,
            "unrecognized model artifact header"
        );
        return Ok(None);
    }

    let parameters = serializable.to_parameters(input_size, hidden_size, output_size)?;
    let cell = LSTMCell::from_parameters(parameters, config)?;
    info!(path = %path.display(), "model loaded");

    Ok(Some(LoadedModel {
        cell,
        bounds: serializable.bounds,
    }))
}

/// Loads a model from `path`, falling back to a freshly initialized cell when no usable
/// artifact exists.
///
/// Size mismatches are not papered over: they are returned as errors.
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the artifact exists but has different sizes
/// - `ModelError::InvalidInput` - If a size is 0 or `config` is invalid
pub fn load_or_new(
    path: impl AsRef<Path>,
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    config: CellConfig,
) -> Result<LoadedModel, ModelError> {
    let path = path.as_ref();
    match load_from_path(path, input_size, hidden_size, output_size, config)? {
        Some(model) => Ok(model),
        None => {
            info!(path = %path.display(), "creating a new model");
            Ok(LoadedModel {
                cell: LSTMCell::with_config(input_size, hidden_size, output_size, config)?,
                bounds: None,
            })
        }
    }
}

use super::*;

/// Hyperparameters of a training run.
///
/// Missing fields fall back to their defaults when read from JSON.
///
/// # Fields
///
/// - `learning_rate` - SGD step size
/// - `epochs` - Maximum number of passes over the training samples
/// - `batch_size` - Samples whose gradients are averaged into one update
/// - `clip_value` - Elementwise gradient bound
/// - `patience` - Stop after this many epochs without improvement, `None` disables early stopping
/// - `min_delta` - Smallest loss decrease that counts as an improvement
/// - `reset_state_each_epoch` - Zero the running state at the start of every epoch
/// - `direction_threshold` - Flat band used for validation directional accuracy
/// - `reference_column` - Input column holding the last observed value for directional accuracy
/// - `show_progress` - Draw a progress bar over the epochs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub batch_size: usize,
    pub clip_value: f64,
    pub patience: Option<usize>,
    pub min_delta: f64,
    pub reset_state_each_epoch: bool,
    pub direction_threshold: f64,
    pub reference_column: usize,
    pub show_progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            epochs: 1000,
            batch_size: 1,
            clip_value: DEFAULT_CLIP_VALUE,
            patience: None,
            min_delta: 0.0,
            reset_state_each_epoch: true,
            direction_threshold: 0.0,
            reference_column: 0,
            show_progress: false,
        }
    }
}

impl TrainingConfig {
    /// Reads a configuration from a JSON file
    ///
    /// # Example
    /// ```rust
    /// use rustylstm::neural_network::TrainingConfig;
    ///
    /// let path = std::env::temp_dir().join("rustylstm_doc_config.json");
    /// std::fs::write(&path, r#"{ "learning_rate": 0.01, "epochs": 20 }"#).unwrap();
    ///
    /// let config = TrainingConfig::load_from_path(&path).unwrap();
    /// assert_eq!(config.epochs, 20);
    /// assert_eq!(config.batch_size, 1);
    /// # std::fs::remove_file(&path).ok();
    /// ```
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let reader = IoError::load_in_buf_reader(path)?;
        from_reader(reader).map_err(IoError::JsonError)
    }

    /// Writes the configuration as pretty-printed JSON
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let file = File::create(path).map_err(IoError::StdIoError)?;
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, self).map_err(IoError::JsonError)?;
        writer.flush().map_err(IoError::StdIoError)
    }

    /// Validates every field
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - Names the first invalid field
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.epochs == 0 {
            return Err(ModelError::InvalidInput(
                "epochs must be greater than 0".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ModelError::InvalidInput(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        if self.patience == Some(0) {
            return Err(ModelError::InvalidInput(
                "patience must be greater than 0 when set".to_string(),
            ));
        }
        if !(self.min_delta >= 0.0 && self.min_delta.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "min_delta must be non-negative and finite, got {}",
                self.min_delta
            )));
        }
        if !(self.direction_threshold >= 0.0 && self.direction_threshold.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "direction_threshold must be non-negative and finite, got {}",
                self.direction_threshold
            )));
        }
        SGD::new(self.learning_rate, self.clip_value).map(|_| ())
    }
}

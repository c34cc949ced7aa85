use super::*;

/// Metrics of one completed epoch
///
/// # Fields
///
/// - `epoch` - Zero-based epoch index
/// - `train_loss` - Mean per-sample squared error over the epoch
/// - `validation_loss` - Mean per-sample squared error on the validation samples
/// - `validation_accuracy` - Share of validation samples whose predicted direction matched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub epoch: usize,
    pub train_loss: f64,
    pub validation_loss: Option<f64>,
    pub validation_accuracy: Option<f64>,
}

impl EpochRecord {
    /// Loss used for early stopping: validation loss when available
    pub fn monitored_loss(&self) -> f64 {
        self.validation_loss.unwrap_or(self.train_loss)
    }
}

/// Per-epoch metrics of a training run, returned by `Trainer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    records: Vec<EpochRecord>,
    stopped_early: bool,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EpochRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the run ended before the configured number of epochs
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    pub(super) fn mark_stopped_early(&mut self) {
        self.stopped_early = true;
    }

    pub fn train_losses(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.train_loss).collect()
    }

    pub fn validation_losses(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.validation_loss).collect()
    }

    pub fn validation_accuracies(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.validation_accuracy)
            .collect()
    }

    pub fn last(&self) -> Option<&EpochRecord> {
        self.records.last()
    }

    /// Epoch with the lowest monitored loss
    pub fn best(&self) -> Option<&EpochRecord> {
        self.records
            .iter()
            .min_by(|a, b| a.monitored_loss().total_cmp(&b.monitored_loss()))
    }
}

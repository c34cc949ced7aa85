pub use crate::neural_network::activation::Activation;
pub use crate::neural_network::evaluation::{
    Direction, DirectionSample, DirectionalPrediction, confusion_matrix, forecast,
    predict_direction,
};
pub use crate::neural_network::layer::recurrent_layer::*;
pub use crate::neural_network::layer::serialize_weight::{
    LoadedModel, load_from_path, load_or_new, save_to_path,
};
pub use crate::neural_network::loss_function::*;
pub use crate::neural_network::optimizer::*;
pub use crate::neural_network::trainer::{
    EpochRecord, Sample, Trainer, TrainingConfig, TrainingHistory, ValidationReport,
};
pub use crate::traits::LossFunction;

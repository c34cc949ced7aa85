pub use crate::utility::normalize::NormalizationBounds;
pub use crate::utility::train_test_split::{
    chronological_split, samples_from_rows, samples_from_series,
};

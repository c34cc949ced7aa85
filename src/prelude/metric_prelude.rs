pub use crate::metric::{
    ConfusionMatrix, mean_absolute_error, mean_squared_error, root_mean_squared_error,
};

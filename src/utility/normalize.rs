use super::*;

/// Normalized value used for a column whose minimum equals its maximum
pub const CONSTANT_COLUMN_VALUE: f64 = 0.5;

/// Per-column min-max bounds used to scale features into `[0, 1]`
///
/// Bounds are fitted once on training data and persisted with the model so that
/// predictions can be mapped back to the original scale.
///
/// # Fields
///
/// - `min` - Minimum of every column
/// - `max` - Maximum of every column
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rustylstm::utility::NormalizationBounds;
///
/// let data = array![[10.0, 1.0], [20.0, 1.0], [15.0, 1.0]];
/// let bounds = NormalizationBounds::fit(&data).unwrap();
///
/// let scaled = bounds.normalize(&data).unwrap();
/// assert_eq!(scaled[[1, 0]], 1.0);
/// assert_eq!(scaled[[0, 1]], 0.5); // constant column
///
/// let price = bounds.denormalize_value(0, 0.5).unwrap();
/// assert_eq!(price, 15.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationBounds {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl NormalizationBounds {
    /// Computes the minimum and maximum of every column
    ///
    /// # Parameters
    ///
    /// - `data` - Matrix with shape (n_samples, n_features)
    ///
    /// # Errors
    ///
    /// - `ModelError::InvalidInput` - If `data` has no rows or columns, or contains NaN/Inf
    pub fn fit<S>(data: &ArrayBase<S, Ix2>) -> Result<Self, ModelError>
    where
        S: Data<Elem = f64>,
    {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(ModelError::InvalidInput(
                "Cannot fit normalization bounds on empty data".to_string(),
            ));
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::InvalidInput(
                "Input contains NaN or infinite values".to_string(),
            ));
        }

        let (min, max) = data
            .axis_iter(Axis(1))
            .map(|column| {
                column.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                    (lo.min(x), hi.max(x))
                })
            })
            .unzip();

        Ok(Self { min, max })
    }

    /// Builds bounds from explicit per-column values
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `min` and `max` differ in length
    /// - `ModelError::InvalidInput` - If they are empty, non-finite, or `min > max` somewhere
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self, ModelError> {
        if min.len() != max.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "min has {} columns but max has {}",
                min.len(),
                max.len()
            )));
        }
        if min.is_empty() {
            return Err(ModelError::InvalidInput(
                "normalization bounds need at least one column".to_string(),
            ));
        }
        if let Some(column) = min
            .iter()
            .zip(max.iter())
            .position(|(lo, hi)| !lo.is_finite() || !hi.is_finite() || lo > hi)
        {
            return Err(ModelError::InvalidInput(format!(
                "invalid bounds for column {}: min {}, max {}",
                column, min[column], max[column]
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    /// Scales a single value of `column` into `[0, 1]`, clamping values outside the bounds
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `column` is out of range
    pub fn normalize_value(&self, column: usize, value: f64) -> Result<f64, ModelError> {
        let (lo, hi) = self.column_bounds(column)?;
        let range = hi - lo;
        if range == 0.0 {
            return Ok(CONSTANT_COLUMN_VALUE);
        }
        Ok(((value - lo) / range).clamp(0.0, 1.0))
    }

    /// Maps a normalized value of `column` back to the original scale
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `column` is out of range
    pub fn denormalize_value(&self, column: usize, value: f64) -> Result<f64, ModelError> {
        let (lo, hi) = self.column_bounds(column)?;
        Ok(lo + value * (hi - lo))
    }

    /// Scales every column of `data` into `[0, 1]`
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `data` does not have `n_features` columns
    /// - `ModelError::InvalidInput` - If `data` contains NaN/Inf
    pub fn normalize<S>(&self, data: &ArrayBase<S, Ix2>) -> Result<Array2<f64>, ModelError>
    where
        S: Data<Elem = f64>,
    {
        self.check_columns(data.ncols())?;
        if data.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::InvalidInput(
                "Input contains NaN or infinite values".to_string(),
            ));
        }

        let mut result = data.to_owned();
        for (j, mut column) in result.axis_iter_mut(Axis(1)).enumerate() {
            let (lo, hi) = (self.min[j], self.max[j]);
            let range = hi - lo;
            if range == 0.0 {
                column.fill(CONSTANT_COLUMN_VALUE);
            } else {
                column.mapv_inplace(|x| ((x - lo) / range).clamp(0.0, 1.0));
            }
        }
        Ok(result)
    }

    /// Maps every column of `data` back to the original scale
    ///
    /// # Errors
    ///
    /// - `ModelError::ShapeMismatch` - If `data` does not have `n_features` columns
    pub fn denormalize<S>(&self, data: &ArrayBase<S, Ix2>) -> Result<Array2<f64>, ModelError>
    where
        S: Data<Elem = f64>,
    {
        self.check_columns(data.ncols())?;
        let mut result = data.to_owned();
        for (j, mut column) in result.axis_iter_mut(Axis(1)).enumerate() {
            let (lo, hi) = (self.min[j], self.max[j]);
            column.mapv_inplace(|x| lo + x * (hi - lo));
        }
        Ok(result)
    }

    fn column_bounds(&self, column: usize) -> Result<(f64, f64), ModelError> {
        match (self.min.get(column), self.max.get(column)) {
            (Some(&lo), Some(&hi)) => Ok((lo, hi)),
            _ => Err(ModelError::ShapeMismatch(format!(
                "column {} out of range for bounds with {} columns",
                column,
                self.n_features()
            ))),
        }
    }

    fn check_columns(&self, ncols: usize) -> Result<(), ModelError> {
        if ncols != self.n_features() {
            return Err(ModelError::ShapeMismatch(format!(
                "data has {} columns but bounds were fitted on {}",
                ncols,
                self.n_features()
            )));
        }
        Ok(())
    }
}

use super::*;
use crate::neural_network::Sample;

/// Splits a time-ordered table into a training and a test part without shuffling
///
/// The first `floor(n_rows * train_ratio)` rows form the training part, the rest the test
/// part, so every test row lies after every training row.
///
/// # Parameters
///
/// - `data` - Matrix with shape (n_rows, n_columns), rows in time order
/// - `train_ratio` - Share of rows used for training, in `(0, 1)`
///
/// # Returns
///
/// - `(Array2<f64>, Array2<f64>)` - `(train, test)`
///
/// # Errors
///
/// - `ModelError::InvalidInput` - If `data` is empty, `train_ratio` is outside `(0, 1)`, or
///   either part would have no rows
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rustylstm::utility::chronological_split;
///
/// let data = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
/// let (train, test) = chronological_split(&data, 0.6).unwrap();
/// assert_eq!(train.nrows(), 3);
/// assert_eq!(test, array![[4.0], [5.0]]);
/// ```
pub fn chronological_split<S>(
    data: &ArrayBase<S, Ix2>,
    train_ratio: f64,
) -> Result<(Array2<f64>, Array2<f64>), ModelError>
where
    S: Data<Elem = f64>,
{
    if data.nrows() == 0 {
        return Err(ModelError::InvalidInput(
            "Cannot split empty dataset".to_string(),
        ));
    }
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(ModelError::InvalidInput(format!(
            "train_ratio must be between 0 and 1 (exclusive), got {}",
            train_ratio
        )));
    }

    let split_index = (data.nrows() as f64 * train_ratio).floor() as usize;
    if split_index == 0 || split_index == data.nrows() {
        return Err(ModelError::InvalidInput(format!(
            "train_ratio {} leaves an empty part when splitting {} rows",
            train_ratio,
            data.nrows()
        )));
    }
    let (train, test) = data.view().split_at(Axis(0), split_index);
    Ok((train.to_owned(), test.to_owned()))
}

/// Converts table rows into training samples, using the last column as the single target
/// and the remaining columns as input features
///
/// Directional validation in `Trainer` measures against input column
/// `TrainingConfig::reference_column` (0 by default). When the feature columns are not
/// ordered with the previous value first, set that field accordingly.
///
/// # Errors
///
/// - `ModelError::InvalidInput` - If the table has fewer than two columns
pub fn samples_from_rows<S>(data: &ArrayBase<S, Ix2>) -> Result<Vec<Sample>, ModelError>
where
    S: Data<Elem = f64>,
{
    let n_columns = data.ncols();
    if n_columns < 2 {
        return Err(ModelError::InvalidInput(format!(
            "rows need at least one feature column and one target column, got {} columns",
            n_columns
        )));
    }

    data.axis_iter(Axis(0))
        .map(|row| {
            let input = row.slice(ndarray::s![..n_columns - 1]).to_owned();
            let target = Array1::from_elem(1, row[n_columns - 1]);
            Sample::new(input, target)
        })
        .collect()
}

/// Builds one-step-ahead samples from a single series: input `[series[t]]`, target
/// `[series[t + 1]]`
///
/// # Errors
///
/// - `ModelError::InvalidInput` - If the series has fewer than two values or contains NaN/Inf
pub fn samples_from_series(series: ArrayView1<f64>) -> Result<Vec<Sample>, ModelError> {
    if series.len() < 2 {
        return Err(ModelError::InvalidInput(format!(
            "a series needs at least two values to form a sample, got {}",
            series.len()
        )));
    }

    series
        .windows(2)
        .into_iter()
        .map(|pair| Sample::new(Array1::from_elem(1, pair[0]), Array1::from_elem(1, pair[1])))
        .collect()
}

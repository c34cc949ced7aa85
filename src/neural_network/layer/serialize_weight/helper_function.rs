use super::*;

pub(super) fn array2_to_vec2(array: &Array2<f64>) -> Vec<Vec<f64>> {
    array.outer_iter().map(|row| row.to_vec()).collect()
}

/// Rebuilds a matrix from row vectors, rejecting ragged input
pub(super) fn vec2_to_array2(vec: &[Vec<f64>], name: &str) -> Result<Array2<f64>, ModelError> {
    let rows = vec.len();
    let cols = vec.first().map_or(0, |row| row.len());
    if let Some(row) = vec.iter().position(|row| row.len() != cols) {
        return Err(ModelError::ShapeMismatch(format!(
            "{}: row {} has {} columns, expected {}",
            name,
            row,
            vec[row].len(),
            cols
        )));
    }
    let flat: Vec<f64> = vec.iter().flat_map(|row| row.iter().copied()).collect();
    Array2::from_shape_vec((rows, cols), flat)
        .map_err(|e| ModelError::ShapeMismatch(format!("{}: {}", name, e)))
}

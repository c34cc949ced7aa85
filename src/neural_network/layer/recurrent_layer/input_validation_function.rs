use super::*;

/// Validates that a dimension value is greater than 0
///
/// # Parameters
///
/// - `value` - The dimension value to validate
/// - `name` - The name of the dimension for error messages
///
/// # Returns
///
/// * `Ok(())` if validation passes
/// * `Err(ModelError::InvalidInput)` if validation fails
pub(super) fn validate_dimension_greater_than_zero(
    value: usize,
    name: &str,
) -> Result<(), ModelError> {
    if value == 0 {
        return Err(ModelError::InvalidInput(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(())
}

/// Validates the three sizes a cell is constructed with
pub(super) fn validate_cell_dimensions(
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
) -> Result<(), ModelError> {
    validate_dimension_greater_than_zero(input_size, "input_size")?;
    validate_dimension_greater_than_zero(hidden_size, "hidden_size")?;
    validate_dimension_greater_than_zero(output_size, "output_size")?;
    Ok(())
}

/// Validates that a vector has the expected length
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If `vector.len() != expected`
pub(super) fn validate_vector_length(
    vector: ArrayView1<f64>,
    expected: usize,
    name: &str,
) -> Result<(), ModelError> {
    if vector.len() != expected {
        return Err(ModelError::ShapeMismatch(format!(
            "{} has length {}, expected {}",
            name,
            vector.len(),
            expected
        )));
    }
    Ok(())
}

/// Validates that a 2D tensor has the expected shape
///
/// # Errors
///
/// - `ModelError::ShapeMismatch` - If the shape differs from `(rows, cols)`
pub(super) fn validate_matrix_shape(
    matrix: &Array2<f64>,
    rows: usize,
    cols: usize,
    name: &str,
) -> Result<(), ModelError> {
    if matrix.dim() != (rows, cols) {
        return Err(ModelError::ShapeMismatch(format!(
            "{} has shape {:?}, expected ({}, {})",
            name,
            matrix.dim(),
            rows,
            cols
        )));
    }
    Ok(())
}

/// Scans a caller-supplied vector and rejects the first NaN/Inf entry
///
/// # Errors
///
/// - `ModelError::InvalidInput` - Reports the index of the first non-finite value
pub(super) fn validate_finite_input(vector: ArrayView1<f64>, name: &str) -> Result<(), ModelError> {
    if let Some((index, value)) = vector.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::InvalidInput(format!(
            "{} value {} encountered in {} at index {}",
            if value.is_nan() { "NaN" } else { "infinite" },
            value,
            name,
            index
        )));
    }
    Ok(())
}

/// Scans an internally computed vector and reports divergence
///
/// # Errors
///
/// - `ModelError::NumericDivergence` - If any value is NaN or infinite
pub(super) fn check_divergence(vector: &Array1<f64>, name: &str) -> Result<(), ModelError> {
    if let Some(index) = vector.iter().position(|v| !v.is_finite()) {
        return Err(ModelError::NumericDivergence(format!(
            "non-finite value {} in {} at index {}",
            vector[index], name, index
        )));
    }
    Ok(())
}

/// Validates that an activation used for a gating vector is bounded to \[0, 1\]
///
/// # Errors
///
/// - `ModelError::InvalidInput` - If the activation is unbounded
pub(super) fn validate_gate_activation(activation: Activation) -> Result<(), ModelError> {
    if !activation.is_bounded() {
        return Err(ModelError::InvalidInput(format!(
            "gate activation must be bounded to [0, 1], got {:?}",
            activation
        )));
    }
    Ok(())
}

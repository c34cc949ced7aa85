use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Error types that can occur during model operations
///
/// # Variants
///
/// - `InvalidInput` - A caller-supplied vector contains NaN/Inf, or a configuration value is out of range
/// - `ShapeMismatch` - Tensor or vector dimensions disagree with the configured `(input, hidden, output)` sizes
/// - `NumericDivergence` - NaN/Inf was produced internally during the forward pass
/// - `ProcessingError` - The operation was called out of order (e.g. backward without a preceding forward)
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidInput(String),
    ShapeMismatch(String),
    NumericDivergence(String),
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ModelError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            ModelError::NumericDivergence(msg) => write!(f, "Numeric divergence: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

/// Input/Output error types that can occur during model serialization and file operations
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations (reading, writing, file access)
/// - `BincodeError` - Wraps errors from encoding/decoding the binary model artifact
/// - `JsonError` - Wraps JSON errors when reading or writing configuration files
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    BincodeError(bincode::Error),
    JsonError(serde_json::Error),
}

impl IoError {
    pub fn load_in_buf_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, IoError> {
        let file = File::open(path).map_err(IoError::StdIoError)?;
        Ok(BufReader::new(file))
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::BincodeError(e) => write!(f, "Bincode error: {}", e),
            IoError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for IoError {}

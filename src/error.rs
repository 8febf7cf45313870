//! Error types.
//!
//! - `EngineError` is the typed taxonomy raised by the forecasting engine.
//! - `AppError` is the CLI-facing wrapper: a message plus a process exit code.

/// Failures raised by the forecasting engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Required columns are missing after header normalization.
    #[error("CSV must contain Company, Manufacturer, Model, Year, and Sales columns (missing: {})", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The file is not tabular, or `Year`/`Sales` cannot be coerced to numbers.
    #[error("Error processing file: {0}")]
    DataType(String),

    /// The table is too small for the requested computation.
    #[error("Insufficient data: {rows} row(s), at least {needed} required")]
    InsufficientData { rows: usize, needed: usize },
}

impl EngineError {
    pub fn data_type(message: impl Into<String>) -> Self {
        Self::DataType(message.into())
    }

    /// Process exit code used when this error reaches the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::Schema { .. } => 2,
            EngineError::InsufficientData { .. } => 3,
            EngineError::DataType(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

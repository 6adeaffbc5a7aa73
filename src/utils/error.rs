use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Catalog item not found: {id}")]
    NotFound { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Code image generation failed for {id}: {message}")]
    CodeImageError { id: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Storage,
    MissingAsset,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PrintError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PrintError::ApiError(_) | PrintError::HttpStatus { .. } => ErrorCategory::Network,
            PrintError::NotFound { .. } => ErrorCategory::NotFound,
            PrintError::IoError(_) | PrintError::CsvError(_) => ErrorCategory::Storage,
            PrintError::CodeImageError { .. } => ErrorCategory::MissingAsset,
            PrintError::ConfigError { .. }
            | PrintError::ConfigValidationError { .. }
            | PrintError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PrintError::SerializationError(_) | PrintError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::MissingAsset | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the catalog API is reachable and retry",
            ErrorCategory::Configuration => "Review the command-line flags or the TOML config file",
            ErrorCategory::Data => "Inspect the catalog records returned by the API",
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
            ErrorCategory::MissingAsset => "Re-run code generation for the affected items",
            ErrorCategory::NotFound => "Reload the catalog; the item may already be deleted",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PrintError::ApiError(_) | PrintError::HttpStatus { .. } => {
                format!("Could not talk to the catalog API ({})", self)
            }
            PrintError::NotFound { id } => format!("Item {} no longer exists in the catalog", id),
            PrintError::IoError(e) => format!("Could not read or write a file: {}", e),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrintError>;

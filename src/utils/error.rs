use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Upstream returned {status} for {url}")]
    UpstreamStatusError { url: String, status: u16 },

    #[error("Tool not found")]
    NotFound,
}

impl DirectoryError {
    /// Short message suitable for printing to a terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::UpstreamStatusError { .. } => {
                format!("Could not reach the directory API: {}", self)
            }
            DirectoryError::CsvError(_) => format!("The tool data file is malformed: {}", self),
            DirectoryError::IoError(e) => format!("File system error: {}", e),
            DirectoryError::ConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => self.to_string(),
            _ => format!("Unexpected error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::UpstreamStatusError { .. } => {
                "Check that the directory server is running and --api-url points at its API prefix"
            }
            DirectoryError::CsvError(_) => {
                "Make sure the first row holds the field names and every row has the same number of columns"
            }
            DirectoryError::IoError(_) => "Check that the path exists and is readable",
            DirectoryError::ConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => {
                "Fix the value in the TOML file or override it on the command line"
            }
            _ => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

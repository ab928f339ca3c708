use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("{var} is not set in the environment or the .env file")]
    MissingCredential { var: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read .env file: {0}")]
    EnvFileError(#[from] dotenvy::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Built through [`AcquireError::http`] so the request URL never reaches the message.
    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),

    #[error("Roboflow API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Version {version} not found in project {project}")]
    UnknownVersion { project: String, version: u32 },

    #[error("No '{format}' export available for {version}")]
    ExportUnavailable { version: String, format: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Archive error: {message}")]
    ArchiveError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Remote,
    Filesystem,
}

impl AcquireError {
    /// Wraps a transport error with its URL removed; request URLs carry the API key.
    pub fn http(error: reqwest::Error) -> Self {
        AcquireError::HttpError(error.without_url())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AcquireError::MissingCredential { .. }
            | AcquireError::ConfigError { .. }
            | AcquireError::InvalidConfigValueError { .. }
            | AcquireError::EnvFileError(_)
            | AcquireError::UrlError(_) => ErrorCategory::Configuration,
            AcquireError::HttpError(_)
            | AcquireError::ApiError { .. }
            | AcquireError::UnknownVersion { .. }
            | AcquireError::ExportUnavailable { .. }
            | AcquireError::SerializationError(_) => ErrorCategory::Remote,
            AcquireError::ZipError(_)
            | AcquireError::ArchiveError { .. }
            | AcquireError::IoError(_) => ErrorCategory::Filesystem,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AcquireError::MissingCredential { var } => format!(
                "Create a .env file in the repository root containing '{}=<your key>', or export it in your shell",
                var
            ),
            AcquireError::ConfigError { .. }
            | AcquireError::InvalidConfigValueError { .. }
            | AcquireError::UrlError(_) => "Check the values in your .env file".to_string(),
            AcquireError::EnvFileError(_) => {
                "Make sure .env contains one KEY=value entry per line".to_string()
            }
            AcquireError::ApiError { status: 401, .. } | AcquireError::ApiError { status: 403, .. } => {
                "Verify that your Roboflow API key is valid".to_string()
            }
            AcquireError::HttpError(_) | AcquireError::ApiError { .. } => {
                "Check your network connection and try again".to_string()
            }
            AcquireError::UnknownVersion { .. } | AcquireError::ExportUnavailable { .. } => {
                "Check that the dataset version exists and has been exported on Roboflow".to_string()
            }
            AcquireError::SerializationError(_) => {
                "The Roboflow API returned an unexpected response".to_string()
            }
            AcquireError::ZipError(_) | AcquireError::ArchiveError { .. } => {
                "The downloaded archive is corrupt; run the command again with --overwrite".to_string()
            }
            AcquireError::IoError(_) => {
                "Check that the data directory is writable and has free space".to_string()
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Remote | ErrorCategory::Filesystem => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AcquireError>;

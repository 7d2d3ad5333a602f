use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
    #[error("Failed to parse analysis result '{0}': {1}")]
    AnalysisParse(String, #[source] serde_json::Error),
    #[error("I/O error while {0}: {1}")]
    IO(String, #[source] std::io::Error),
    #[error("Application error: {0}")]
    Generic(String),
}

/// Transport-level failures talking to a Gerrit server.
#[derive(Debug, Error)]
pub enum GerritError {
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Authentication failed (HTTP {status_code})")]
    AuthenticationError { status_code: u16 },

    #[error("Server error {status_code}: {body}")]
    ServerError { status_code: u16, body: String },

    #[error("Response data parsing failed: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    TimeoutError,
}

impl GerritError {
    /// Maps a reqwest failure, keeping timeouts distinct from other network errors.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GerritError::TimeoutError
        } else {
            GerritError::NetworkError(err)
        }
    }
}

/// Everything that can abort a publish attempt.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid format for {parameter}: '{value}' is not a non-negative integer")]
    InvalidFormat { parameter: String, value: String },

    #[error("REST API is disabled for Gerrit server '{server}'")]
    RestApiDisabled { server: String },

    #[error("Issue {issue_seq} has no attribute '{attribute}'")]
    MissingAttribute { issue_seq: String, attribute: String },

    #[error("No rule information '{field}' for issue code '{issue_code}'")]
    MissingRuleInfo { issue_code: String, field: String },

    #[error("Severity '{0}' has no localized equivalent")]
    InvalidSeverity(String),

    #[error("No message template '{id}' for locale '{locale}'")]
    MissingTemplate { id: String, locale: String },

    #[error("Gerrit API error: {0}")]
    RemoteApiError(#[from] GerritError),

    #[error("Unable to post review: {0}")]
    ReviewRejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to write to path '{0}': {1}")]
    FileWrite(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Required configuration field '{0}' is missing or invalid")]
    FieldMissing(String),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IO("I/O operation failed".to_string(), err)
    }
}

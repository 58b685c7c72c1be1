use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status error: {0}")]
    HttpStatus(String),

    #[error("Platform API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Push error: {0}")]
    Push(String),
}

impl Error {
    pub fn invalid_configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::StatusCode> for Error {
    fn from(status: reqwest::StatusCode) -> Self {
        Error::HttpStatus(format!("HTTP status: {status}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

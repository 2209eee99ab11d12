use thiserror::Error;

pub type CreatorResult<T> = Result<T, CreatorError>;

#[derive(Error, Debug)]
pub enum CreatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for CreatorError {
    fn from(err: config::ConfigError) -> Self {
        CreatorError::Config(err.to_string())
    }
}

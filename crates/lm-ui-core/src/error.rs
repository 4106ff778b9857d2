use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("widget call failed: {0}")]
    Widget(String),
    #[error("confirm callback failed: {0}")]
    Callback(String),
    #[error("invalid ui config: {0}")]
    Config(String),
    #[error("form submit failed: {0}")]
    Submit(String),
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UiError>;

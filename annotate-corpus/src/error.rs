use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tagger request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tagger failed on {text:?}: {reason}")]
    Tagger { text: String, reason: String },

    #[error("Invalid config: {0}")]
    Config(String),
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GlossaError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown prompt style: {0}")]
    UnknownPromptStyle(String),
}

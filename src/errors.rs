use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    /// The provider call did not complete (network, auth, rate limiting, non-2xx status).
    #[error("{0}")]
    Transport(String),
    /// The provider answered but the payload does not match the four-field schema.
    #[error("Failed to parse output")]
    SchemaParse,
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        TranslationError::Transport(err.to_string())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("translation session already settled")]
    AlreadySettled,
}

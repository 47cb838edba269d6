use std::error::Error as StdError;

use thiserror::Error;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
///
/// Kept separate from `anyhow` so library consumers aren't forced to adopt `anyhow` in their
/// own public APIs. Internals attach context with `anyhow` and convert at the boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("input file not found: {}", .0.display())]
    InputNotFound(std::path::PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_context_chain_is_preserved() {
        let err = anyhow::anyhow!("root cause").context("outer");
        let err: Error = err.into();
        assert_eq!(err.to_string(), "outer: root cause");
    }

    #[test]
    fn input_not_found_names_the_path() {
        let err = Error::InputNotFound("talk.mp4".into());
        assert_eq!(err.to_string(), "input file not found: talk.mp4");
    }
}

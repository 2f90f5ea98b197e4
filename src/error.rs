use std::fmt;

use thiserror::Error;

/// Optional host capabilities the controllers probe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    MediaSession,
    PositionState,
    Fullscreen,
    PictureInPicture,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::MediaSession => "media session",
            Capability::PositionState => "media session position state",
            Capability::Fullscreen => "fullscreen",
            Capability::PictureInPicture => "picture-in-picture",
        };
        f.write_str(name)
    }
}

/// Every failure the controllers can observe. None of these are fatal: callers
/// log them where they happen and keep the remaining features running.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("{0} is not supported by this browser")]
    Unsupported(Capability),

    #[error("{operation} was rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    #[error("page element `{0}` was not found")]
    MissingElement(String),

    #[error("invalid player settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl ControlError {
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }
}

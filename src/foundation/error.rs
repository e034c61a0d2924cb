use std::fmt;

pub type SlideFxResult<T> = Result<T, SlideFxError>;

/// Why a transition request was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionRejection {
    /// The carousel has no slides.
    Empty,
    /// Requested index is not in `[0, len)`.
    OutOfRange,
    /// Another transition has not completed yet.
    InFlight,
    /// The requested slide is already the current one.
    AlreadyCurrent,
}

impl fmt::Display for TransitionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "carousel has no slides",
            Self::OutOfRange => "index out of range",
            Self::InFlight => "a transition is already in flight",
            Self::AlreadyCurrent => "slide is already current",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SlideFxError {
    #[error("disabled effect '{kind}' reached the factory")]
    DisabledEffect { kind: String },

    #[error("unsupported effect kind '{0}'")]
    UnsupportedKind(String),

    #[error("invalid transition target {requested} (slides: {len}): {reason}")]
    InvalidTransitionTarget {
        requested: usize,
        len: usize,
        reason: TransitionRejection,
    },

    #[error("resource load error for '{path}': {message}")]
    ResourceLoad { path: String, message: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideFxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn resource_load(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn transition(requested: usize, len: usize, reason: TransitionRejection) -> Self {
        Self::InvalidTransitionTarget {
            requested,
            len,
            reason,
        }
    }

    /// Errors that only degrade visuals and are reported through logging.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ResourceLoad { .. } | Self::InvalidTransitionTarget { .. }
        )
    }
}

impl From<serde_json::Error> for SlideFxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

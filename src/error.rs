//! Error taxonomy for chorekit commands.

/// Result type alias using the chorekit Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or running a command.
///
/// `Validation` and `UnknownAction` are raised while building a job, before
/// anything on disk changes. `ExternalTool`, `Fetch` and `Io` happen during
/// execution, after some side effects may already have occurred.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed arguments, missing inputs, or illegal combinations.
    #[error("{0}")]
    Validation(String),

    /// An action token whose name is not a known action.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// An external process (ffmpeg) failed.
    #[error(transparent)]
    ExternalTool(#[from] chorekit_av::Error),

    /// A download did not complete.
    #[error("download of {url} failed: {message}")]
    Fetch { url: String, message: String },

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a fetch error.
    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::UnknownAction("blur=3".into()).to_string(),
            "unknown action 'blur=3'"
        );
        assert_eq!(Error::validation("bad").to_string(), "bad");
        assert_eq!(
            Error::fetch("http://x/a.mp4", "HTTP 404").to_string(),
            "download of http://x/a.mp4 failed: HTTP 404"
        );
    }

    #[test]
    fn test_tool_errors_stay_transparent() {
        let err = Error::from(chorekit_av::Error::tool_failed("ffmpeg", "boom"));
        assert_eq!(err.to_string(), "tool execution failed: ffmpeg: boom");
    }
}

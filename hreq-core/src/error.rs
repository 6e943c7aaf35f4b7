use std::path::PathBuf;

/// Everything that can end an invocation. Each message starts with the
/// name of the step that failed.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("-url is required")]
    Usage,

    #[error("read data-file: {}: {source}", .path.display())]
    ReadDataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("new request: {0}")]
    Construct(String),

    #[error("request failed: {kind}: {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("read body: {0}")]
    ReadBody(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Redirect,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connection error",
            TransportErrorKind::Redirect => "redirect error",
            TransportErrorKind::Other => "transport error",
        };
        write!(f, "{}", s)
    }
}

impl Error {
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Error::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Process exit code: 2 for usage errors, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage => 2,
            _ => 1,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Transport {
                kind: TransportErrorKind::Timeout,
                ..
            }
        )
    }
}

use std::io;
use std::time::Duration;

/// Error a page's `setup` hook may signal.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum HistoryError {
    /// `go` was handed a page without a url.
    MissingUrl,
    Setup {
        url: String,
        source: SetupError,
    },
    SetupTimeout {
        url: String,
        after: Duration,
    },
    Io(io::Error),
    Config(String),
}

impl HistoryError {
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            HistoryError::Setup { .. } | HistoryError::SetupTimeout { .. }
        )
    }
}

impl From<io::Error> for HistoryError {
    fn from(err: io::Error) -> Self {
        HistoryError::Io(err)
    }
}

impl From<toml::de::Error> for HistoryError {
    fn from(err: toml::de::Error) -> Self {
        HistoryError::Config(format!("TOML: {}", err))
    }
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::MissingUrl => write!(f, "Missing required `url` property"),
            HistoryError::Setup { url, source } => {
                write!(f, "Setup of '{}' failed: {}", url, source)
            }
            HistoryError::SetupTimeout { url, after } => {
                write!(f, "Setup of '{}' timed out after {:?}", url, after)
            }
            HistoryError::Io(err) => write!(f, "IO Error: {}", err),
            HistoryError::Config(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Setup { source, .. } => Some(source.as_ref()),
            HistoryError::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;

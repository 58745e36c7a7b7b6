/// Centralized error types for method-lineage using thiserror
///
/// Repository access failures are fatal to a request; parse failures are not
/// represented here at all because an unparseable revision degrades locally
/// to "method absent" in that revision.
use thiserror::Error;

/// Main error type for the lineage engine
#[derive(Error, Debug)]
pub enum LineageError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is empty or unreadable at the tip revision: {0}")]
    EmptyTipFile(String),

    #[error("History walk was cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

/// Errors raised against the backing git repository
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Git repository not found at: {0}")]
    NotARepository(String),

    #[error("Failed to open git repository: {0}")]
    OpenFailed(String),

    #[error("File not found in working tree: {0}")]
    FileNotFound(String),

    #[error("Failed to read '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Invalid commit id '{commit}': {reason}")]
    InvalidCommit { commit: String, reason: String },

    #[error("Failed to walk commit history for '{path}': {reason}")]
    HistoryWalkFailed { path: String, reason: String },

    #[error("Failed to diff commits {old}..{new}: {reason}")]
    DiffFailed {
        old: String,
        new: String,
        reason: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl From<anyhow::Error> for LineageError {
    fn from(err: anyhow::Error) -> Self {
        LineageError::Other(format!("{:#}", err))
    }
}

impl LineageError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        LineageError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LineageError::Repo(RepoError::NotARepository("/tmp/x".to_string()));
        assert_eq!(
            err.to_string(),
            "Repository error: Git repository not found at: /tmp/x"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LineageError = io_err.into();
        assert!(matches!(err, LineageError::Io(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: LineageError = anyhow::anyhow!("test error").into();
        assert!(matches!(err, LineageError::Other(_)));
    }

    #[test]
    fn test_repo_error_chain() {
        let err: LineageError = RepoError::ReadFailed {
            path: "src/Main.java".to_string(),
            reason: "odb missing".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Repository error: Failed to read 'src/Main.java': odb missing"
        );
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            key: "thresholds.body_similarity".to_string(),
            reason: "must be between 0.0 and 1.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'thresholds.body_similarity': must be between 0.0 and 1.0"
        );
    }
}

//! Loader error types.

use std::path::PathBuf;

/// Errors that stop a data file from being read at all.
///
/// Individual bad rows are logged and skipped rather than reported here.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Header row unreadable
    #[error("failed to read CSV header in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl LoadError {
    /// The file the error concerns.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Csv { path, .. } => path,
        }
    }

    /// Whether the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LoadError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::Io {
            path: PathBuf::from("data/routes.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "failed to open data/routes.txt: no such file");
        assert!(err.is_not_found());
        assert_eq!(err.path(), std::path::Path::new("data/routes.txt"));

        let err = LoadError::Io {
            path: PathBuf::from("x"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_not_found());
    }
}

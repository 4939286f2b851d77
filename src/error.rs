use std::path::PathBuf;

use crate::i18n::ValidationReport;

/// Errors raised while configuring or running route generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The canonical page tree is absent. Generation cannot proceed.
    #[error("routes directory not found at '{}'", .0.display())]
    MissingRoutesDir(PathBuf),

    #[error(
        "working directory '{}' must not be inside routes directory '{}'",
        working_dir.display(),
        routes_dir.display()
    )]
    NestedWorkingTree {
        working_dir: PathBuf,
        routes_dir: PathBuf,
    },

    #[error("unknown route mode '{0}' (expected 'dev' or 'build')")]
    UnknownMode(String),

    #[error("invalid locale registry: {0}")]
    InvalidRegistry(String),

    #[error("invalid translation table: {}", .0.errors.join("; "))]
    InvalidTranslationTable(ValidationReport),

    #[error("invalid message catalogs: {}", .0.errors.join("; "))]
    InvalidMessages(ValidationReport),

    #[error("failed to parse translations at '{}'", path.display())]
    TranslationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed translation table")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_routes_dir_display() {
        let err = Error::MissingRoutesDir(PathBuf::from("src/routes"));
        assert_eq!(err.to_string(), "routes directory not found at 'src/routes'");
    }

    #[test]
    fn test_invalid_table_display_joins_errors() {
        let report = ValidationReport {
            errors: vec!["first".to_string(), "second".to_string()],
            warnings: vec!["ignored".to_string()],
        };
        let err = Error::InvalidTranslationTable(report);
        assert_eq!(err.to_string(), "invalid translation table: first; second");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io(
            "pages",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("pages"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

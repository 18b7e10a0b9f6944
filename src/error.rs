use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostshiftError {
    #[error("cannot read source '{}': {}", .path.display(), .source)]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("destination '{}' already exists", .0.display())]
    DestinationConflict(PathBuf),

    #[error("cannot write destination '{}': {}", .path.display(), .source)]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid post file name '{0}' (expected <YYYY-MM-DD>-<slug>.<ext>)")]
    InvalidFileName(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{failed} of {attempted} posts failed to migrate")]
    ItemsFailed { failed: usize, attempted: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PostshiftError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceUnreadable { .. } => "source_unreadable",
            Self::DestinationConflict(_) => "destination_conflict",
            Self::DestinationUnwritable { .. } => "destination_unwritable",
            Self::InvalidFileName(_) => "invalid_file_name",
            Self::InvalidConfig(_) => "invalid_config",
            Self::ItemsFailed { .. } => "items_failed",
            Self::Json(_) => "json_error",
        }
    }

    pub(crate) fn source_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn destination_unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DestinationUnwritable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PostshiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_snake_case() {
        let conflict = PostshiftError::DestinationConflict(PathBuf::from("out/hello"));
        assert_eq!(conflict.code(), "destination_conflict");
        assert_eq!(conflict.to_string(), "destination 'out/hello' already exists");

        let unreadable = PostshiftError::source_unreadable(
            "posts",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(unreadable.code(), "source_unreadable");
        assert!(unreadable.to_string().contains("posts"));
    }
}

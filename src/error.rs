use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuError {
    #[error("ERROR with arguments: cannot both summarize and show all entries")]
    ConflictingFlags,

    #[error("failed to get full path: \"{path}\": {reason}")]
    PathResolution { path: String, reason: String },

    #[error("memory allocation failed for absolute path of \"{path}\"")]
    Allocation { path: String },

    #[error("failed to get handle for pattern: \"{path}\": {source}")]
    Enumeration {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to get next results: \"{path}\": {source}")]
    EnumerationAdvance {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("entry name is not valid Unicode: \"{path}\": {name}")]
    InvalidName { path: String, name: String },

    #[error("failed to get file attributes: \"{path}\": {source}")]
    Attributes {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to get size of file: \"{path}\": {source}")]
    Metadata {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl DuError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConflictingFlags
                | Self::PathResolution { .. }
                | Self::Allocation { .. }
                | Self::Output(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(DuError::ConflictingFlags.is_fatal());
        assert!(DuError::Allocation { path: "x".into() }.is_fatal());

        let err = DuError::Metadata {
            path: "a.txt".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!err.is_fatal());

        let err = DuError::Enumeration {
            path: "dir".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_message_names_path() {
        let err = DuError::Attributes {
            path: "C:\\missing".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("\"C:\\missing\""));
    }
}

//! Content pipeline errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the content loader
///
/// Absence is not an error: a missing content directory yields an empty
/// listing and a missing post file yields `None`.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Filesystem access failed for a reason other than absence
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A front-matter block was present but is not valid YAML
    #[error("malformed front-matter in {path:?}")]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

use std::path::PathBuf;

use baras_report_types::TabId;

use crate::config::ConfigError;

/// Errors raised while rendering a results page.
///
/// A missing *optional* module is not an error: the registry returns `None`
/// and the page renders a placeholder. A lazily loaded view that fails is not
/// an error either; it lives in its slot and renders as an isolated
/// affordance.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The selected id is neither a built-in tab nor contributed by a module
    #[error("tab '{tab}' is neither a built-in nor a contributed tab")]
    TabNotFound { tab: TabId },

    /// A module the page relies on is missing from the session
    #[error("required module '{capability}' is not registered for this session")]
    RequiredModuleAbsent { capability: &'static str },

    #[error("module '{capability}' is already registered for this session")]
    DuplicateModule { capability: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read report snapshot {path:?}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse report snapshot {path:?}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid report snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

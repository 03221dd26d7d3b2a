pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod page;
pub mod registry;
pub mod resolver;
pub mod results;
pub mod retry;
pub mod snapshot;
pub mod state;
pub mod views;

// Re-exports for convenience
pub use config::{ConfigError, load_config};
pub use context::SessionContext;
pub use error::ReportError;
pub use loader::{LazyViewLoader, LazyViewSlot, LoadError, SlotStatus, ViewFetcher};
pub use page::{PageRequest, ResultsPage};
pub use registry::{Capability, ModuleRegistry};
pub use results::{AnalysisSession, GenerateOptions, ResultSet, TabDescriptor};
pub use retry::RetryPolicy;
pub use snapshot::{ReportSnapshot, SnapshotSession};
pub use views::{ReportView, ResidentViews, SharedView, ViewKey};

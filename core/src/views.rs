//! View implementations the results page delegates to.
//!
//! Timeline and changelog are resident. Events and the resource widget are
//! heavy and go through the [`LazyViewLoader`](crate::loader::LazyViewLoader).

use std::fmt;
use std::sync::Arc;

use baras_report_types::{ChangelogEntry, Content};

use crate::context::SessionContext;

pub trait ReportView: Send + Sync {
    fn render(&self, ctx: &SessionContext<'_>) -> Content;
}

pub type SharedView = Arc<dyn ReportView>;

/// Views that are only loaded when first shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    Events,
    /// Resource tracking widget shown on the statistics tab for the gated role
    Mana,
}

impl ViewKey {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Mana => "mana",
        }
    }

    pub fn all() -> &'static [ViewKey] {
        &[Self::Events, Self::Mana]
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Views that are always in memory
#[derive(Clone)]
pub struct ResidentViews {
    pub timeline: SharedView,
    pub changelog: SharedView,
}

/// A view whose output does not depend on the context
pub struct StaticView {
    content: Content,
}

impl StaticView {
    pub fn new(content: Content) -> Self {
        Self { content }
    }

    pub fn shared(content: Content) -> SharedView {
        Arc::new(Self::new(content))
    }
}

impl ReportView for StaticView {
    fn render(&self, _ctx: &SessionContext<'_>) -> Content {
        self.content.clone()
    }
}

/// Newest entries first
pub struct ChangelogView {
    entries: Vec<ChangelogEntry>,
}

impl ChangelogView {
    pub fn new(mut entries: Vec<ChangelogEntry>) -> Self {
        // ISO dates sort lexicographically
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Self { entries }
    }
}

impl ReportView for ChangelogView {
    fn render(&self, _ctx: &SessionContext<'_>) -> Content {
        Content::Changelog {
            entries: self.entries.clone(),
        }
    }
}

//! Tab resolution
//!
//! Built-in tabs always win: their ids are resolved without looking at the
//! contributed tabs at all. Anything else is looked up in the result set's
//! contributed tabs in order, first match wins.

use baras_report_types::{CoreTab, TabId, TabLink};
use hashbrown::HashSet;

use crate::error::ReportError;
use crate::results::{ResultSet, TabDescriptor};

/// Where the active tab's content comes from
#[derive(Debug, Clone, Copy)]
pub enum ResolvedTab<'a> {
    Core(CoreTab),
    Contributed(&'a TabDescriptor),
}

impl ResolvedTab<'_> {
    pub fn id(&self) -> TabId {
        match self {
            Self::Core(tab) => TabId::from(*tab),
            Self::Contributed(descriptor) => descriptor.id.clone(),
        }
    }
}

/// What to do when the selected id matches nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Surface the inconsistency as an error
    Strict,
    /// Log it and show the default tab
    #[default]
    FallbackToDefault,
}

impl ResolutionPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::FallbackToDefault
        }
    }
}

/// The tab to show when navigation state has none
pub fn selected_or_default(selected: Option<&TabId>) -> TabId {
    selected
        .cloned()
        .unwrap_or_else(|| TabId::from(CoreTab::default()))
}

pub fn resolve<'a>(
    selected: &TabId,
    results: &'a ResultSet,
) -> Result<ResolvedTab<'a>, ReportError> {
    if let Some(tab) = selected.core_tab() {
        return Ok(ResolvedTab::Core(tab));
    }
    results
        .find_tab(selected)
        .map(ResolvedTab::Contributed)
        .ok_or_else(|| ReportError::TabNotFound {
            tab: selected.clone(),
        })
}

pub fn resolve_with_policy<'a>(
    selected: &TabId,
    results: &'a ResultSet,
    policy: ResolutionPolicy,
) -> Result<ResolvedTab<'a>, ReportError> {
    match resolve(selected, results) {
        Err(ReportError::TabNotFound { tab }) if policy == ResolutionPolicy::FallbackToDefault => {
            tracing::warn!(
                tab = %tab,
                contributed = results.tabs.len(),
                "Selected tab not found, showing default tab"
            );
            Ok(ResolvedTab::Core(CoreTab::default()))
        }
        other => other,
    }
}

/// Header navigation: built-ins first, then contributed tabs in result set
/// order. Contributed tabs that could never be selected are left out.
pub fn navigation_tabs(results: &ResultSet, active: &TabId, url_prefix: &str) -> Vec<TabLink> {
    let prefix = url_prefix.trim_end_matches('/');
    let link = |id: TabId, label: &str| TabLink {
        url: format!("{}/{}", prefix, id),
        active: &id == active,
        label: label.to_string(),
        id,
    };

    let mut seen = HashSet::new();
    let core = CoreTab::all().iter().map(|tab| link(TabId::from(*tab), tab.label()));
    let contributed = results
        .tabs
        .iter()
        .filter(|tab| !tab.id.is_core() && seen.insert(tab.id.as_str()))
        .map(|tab| link(tab.id.clone(), &tab.label));

    core.chain(contributed).collect()
}

//! Tab identifiers for the results page.
//!
//! A tab id is an opaque string. The built-in tabs are enumerated by
//! [`CoreTab`]; any other id belongs to a tab contributed by an analysis
//! module and only exists for sessions where that module is loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a selectable results tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built-in tab this id names, if any
    pub fn core_tab(&self) -> Option<CoreTab> {
        CoreTab::from_id(&self.0)
    }

    pub fn is_core(&self) -> bool {
        self.core_tab().is_some()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TabId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<CoreTab> for TabId {
    fn from(tab: CoreTab) -> Self {
        Self(tab.id().to_string())
    }
}

/// Tabs whose content is fixed and independent of the analysis session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreTab {
    #[default]
    Overview,
    Statistics,
    Timeline,
    Character,
    Events,
    About,
}

impl CoreTab {
    /// Identifier used in navigation state and URLs
    pub fn id(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Statistics => "statistics",
            Self::Timeline => "timeline",
            Self::Character => "character",
            Self::Events => "events",
            Self::About => "about",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Statistics => "Statistics",
            Self::Timeline => "Timeline",
            Self::Character => "Character",
            Self::Events => "Events",
            Self::About => "About",
        }
    }

    /// Navigation order
    pub fn all() -> &'static [CoreTab] {
        &[
            Self::Overview,
            Self::Statistics,
            Self::Timeline,
            Self::Character,
            Self::Events,
            Self::About,
        ]
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "overview" => Some(Self::Overview),
            "statistics" => Some(Self::Statistics),
            "timeline" => Some(Self::Timeline),
            "character" => Some(Self::Character),
            "events" => Some(Self::Events),
            "about" => Some(Self::About),
            _ => None,
        }
    }
}

/// One entry of the header's tab navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabLink {
    pub id: TabId,
    pub label: String,
    pub url: String,
    pub active: bool,
}

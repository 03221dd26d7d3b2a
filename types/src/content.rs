//! Renderable content tree.
//!
//! The results page never draws anything itself. It produces a [`Content`]
//! tree that the hosting UI walks and turns into widgets, which keeps every
//! render pass a pure function of the session state.

use serde::{Deserialize, Serialize};

use crate::tabs::TabLink;

// ─────────────────────────────────────────────────────────────────────────────
// Content Tree
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    /// Root of a rendered results page
    Page {
        css_class: String,
        children: Vec<Content>,
    },
    Header(Box<Header>),
    Container {
        children: Vec<Content>,
    },
    Panel {
        title: String,
        subtitle: Option<String>,
        body: Vec<Content>,
    },
    SectionTitle {
        text: String,
    },
    Text {
        text: String,
    },
    Link {
        label: String,
        url: String,
    },
    Alert {
        level: AlertLevel,
        body: Vec<Content>,
    },
    Suggestions {
        issues: Vec<Suggestion>,
    },
    Statistics {
        items: Vec<Statistic>,
    },
    CastEfficiency {
        groups: Vec<CastEfficiencyGroup>,
    },
    /// Output of a view implementation, tagged with the view's name
    View {
        view: String,
        body: Box<Content>,
    },
    /// A lazily loaded view that has not resolved yet
    Loading {
        view: String,
    },
    /// A lazily loaded view that exhausted its retry budget
    LoadFailed {
        view: String,
        attempts: u32,
        message: String,
    },
    Ad {
        format: String,
    },
    About(Box<AboutContent>),
    Changelog {
        entries: Vec<ChangelogEntry>,
    },
    #[default]
    Empty,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn container(children: Vec<Content>) -> Self {
        Self::Container { children }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn section_title(text: impl Into<String>) -> Self {
        Self::SectionTitle { text: text.into() }
    }

    /// Direct children of this node, in render order
    pub fn children(&self) -> &[Content] {
        match self {
            Self::Page { children, .. } | Self::Container { children } => children,
            Self::Panel { body, .. } | Self::Alert { body, .. } => body,
            Self::View { body, .. } => std::slice::from_ref(body.as_ref()),
            _ => &[],
        }
    }

    /// Depth-first search for the first node matching `pred`
    pub fn find(&self, pred: &dyn Fn(&Content) -> bool) -> Option<&Content> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(pred))
    }

    pub fn contains(&self, pred: &dyn Fn(&Content) -> bool) -> bool {
        self.find(pred).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
}

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub fight_name: String,
    pub boss_name: Option<String>,
    pub duration: String,
    pub kill: bool,
    pub combatant_name: String,
    pub spec_name: String,
    /// Role label of the selected combatant, e.g. "Healer"
    pub role: String,
    pub player_icon: Option<String>,
    pub tabs: Vec<TabLink>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Suggestions & Statistics
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Major,
    Average,
    Minor,
}

/// An issue raised by an analysis module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub importance: Importance,
    pub text: String,
    #[serde(default)]
    pub actual: Option<String>,
    #[serde(default)]
    pub recommended: Option<String>,
}

impl Suggestion {
    /// Order for display: major first, module order kept within an importance
    pub fn sort_for_display(issues: &mut [Suggestion]) {
        issues.sort_by_key(|s| s.importance);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Lower positions render first
    #[serde(default)]
    pub position: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Cast Efficiency
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCategory {
    pub key: String,
    pub label: String,
}

/// Raw per-ability cast efficiency as reported by the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastEfficiencyRow {
    pub ability_id: u64,
    pub name: String,
    pub category: String,
    pub casts: u32,
    pub max_casts: u32,
    /// 0..=1 share of possible casts used
    pub efficiency: f64,
    #[serde(default)]
    pub recommended_efficiency: Option<f64>,
    #[serde(default)]
    pub cooldown_ms: Option<u64>,
}

/// A formatted cast efficiency line, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastEfficiencyLine {
    pub ability_id: u64,
    pub name: String,
    pub casts: String,
    pub cooldown: Option<String>,
    pub efficiency: String,
    pub below_recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastEfficiencyGroup {
    pub category: SpellCategory,
    pub lines: Vec<CastEfficiencyLine>,
}

// ─────────────────────────────────────────────────────────────────────────────
// About
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutContent {
    pub spec_name: String,
    pub maintainers: Vec<String>,
    pub patch_compatibility: Option<String>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub date: String,
    pub text: String,
    #[serde(default)]
    pub contributors: Vec<String>,
}

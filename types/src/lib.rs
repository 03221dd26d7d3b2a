//! Shared data types for the BARAS report viewer.
//!
//! Kept free of runtime dependencies so hosts (web, desktop, CLI) can
//! deserialize rendered pages without pulling in the analysis stack.

pub mod combatant;
pub mod config;
pub mod content;
pub mod formatting;
pub mod tabs;

pub use combatant::{BossInfo, CharacterProfile, Combatant, FightInfo, Role, Spec};
pub use config::{AboutConfig, ContributeLinks, ReportConfig, ViewLoadingConfig};
pub use content::{
    AboutContent, AlertLevel, CastEfficiencyGroup, CastEfficiencyLine, CastEfficiencyRow,
    ChangelogEntry, Content, Header, Importance, SpellCategory, Statistic, Suggestion,
};
pub use tabs::{CoreTab, TabId, TabLink};

//! Capabilities the results page knows how to compose.

use baras_report_types::{CastEfficiencyRow, Combatant, Content, SpellCategory};

use super::Capability;
use crate::context::SessionContext;

// ─────────────────────────────────────────────────────────────────────────────
// Module Shapes
// ─────────────────────────────────────────────────────────────────────────────

/// Players in the log and the one the report is about
pub trait CombatantRoster: Send + Sync {
    fn selected(&self) -> &Combatant;
    fn all(&self) -> &[Combatant];
}

pub trait ChecklistModule: Send + Sync {
    fn render(&self, ctx: &SessionContext<'_>) -> Content;
}

pub trait CharacterPanel: Send + Sync {
    fn render(&self, ctx: &SessionContext<'_>) -> Content;
}

pub trait EncounterPanelModule: Send + Sync {
    fn render(&self, ctx: &SessionContext<'_>) -> Content;
}

pub trait CastEfficiencySource: Send + Sync {
    fn cast_efficiency(&self) -> Vec<CastEfficiencyRow>;
}

/// Spell categories, in the order the cast efficiency table groups them
pub trait AbilityCatalog: Send + Sync {
    fn spell_categories(&self) -> Vec<SpellCategory>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Capability Markers
// ─────────────────────────────────────────────────────────────────────────────

pub struct Combatants;

impl Capability for Combatants {
    type Module = dyn CombatantRoster;
    const NAME: &'static str = "Combatants";
}

pub struct Checklist;

impl Capability for Checklist {
    type Module = dyn ChecklistModule;
    const NAME: &'static str = "Checklist";
}

pub struct CharacterTab;

impl Capability for CharacterTab {
    type Module = dyn CharacterPanel;
    const NAME: &'static str = "CharacterTab";
}

pub struct EncounterPanel;

impl Capability for EncounterPanel {
    type Module = dyn EncounterPanelModule;
    const NAME: &'static str = "EncounterPanel";
}

pub struct CastEfficiency;

impl Capability for CastEfficiency {
    type Module = dyn CastEfficiencySource;
    const NAME: &'static str = "CastEfficiency";
}

pub struct Abilities;

impl Capability for Abilities {
    type Module = dyn AbilityCatalog;
    const NAME: &'static str = "Abilities";
}

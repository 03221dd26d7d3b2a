use baras_report_types::{BossInfo, CharacterProfile, Combatant, FightInfo, ReportConfig};

use crate::registry::ModuleRegistry;

/// Read-only data every renderer of one render pass receives.
///
/// Built once by the results page and passed down by reference; nothing
/// below the page mutates it.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext<'a> {
    pub config: &'a ReportConfig,
    pub selected_combatant: &'a Combatant,
    pub fight: &'a FightInfo,
    pub boss: Option<&'a BossInfo>,
    pub premium: bool,
    pub character_profile: Option<&'a CharacterProfile>,
    pub modules: &'a ModuleRegistry,
}

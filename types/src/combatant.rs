//! Fight and player metadata shown on the results page.

use serde::{Deserialize, Serialize};

/// Combat role of a spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Healer,
    #[default]
    Dps,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tank => "Tank",
            Self::Healer => "Healer",
            Self::Dps => "DPS",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub class_name: String,
    pub spec_name: String,
    pub role: Role,
}

impl Spec {
    /// "Holy Paladin" style label
    pub fn display_name(&self) -> String {
        match (self.spec_name.is_empty(), self.class_name.is_empty()) {
            (true, _) => self.class_name.clone(),
            (false, true) => self.spec_name.clone(),
            (false, false) => format!("{} {}", self.spec_name, self.class_name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: u64,
    pub name: String,
    pub spec: Spec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightInfo {
    pub id: u32,
    pub name: String,
    /// Encounter id of the boss, 0 for trash
    #[serde(default)]
    pub boss_id: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    #[serde(default)]
    pub kill: bool,
}

impl FightInfo {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossInfo {
    pub id: u32,
    pub name: String,
    /// Advisory shown above the results when analysis of this boss is unreliable
    #[serde(default)]
    pub results_warning: Option<String>,
}

/// Armory profile used for the player portrait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub region: String,
    pub thumbnail: String,
}

impl CharacterProfile {
    pub fn portrait_url(&self) -> Option<String> {
        if self.thumbnail.is_empty() || self.region.is_empty() {
            return None;
        }
        Some(format!(
            "https://render-{}.worldofwarcraft.com/character/{}",
            self.region.to_lowercase(),
            self.thumbnail
        ))
    }
}

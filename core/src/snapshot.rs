//! Report snapshots
//!
//! A snapshot is the finished output of an analysis run serialized to JSON:
//! fight metadata, combatants, statistics, issues and whatever module
//! sections the class analyzer produced. [`SnapshotSession`] replays one as
//! an [`AnalysisSession`] so a results page can be rendered offline.
//!
//! Module sections that are missing from the snapshot are simply not
//! registered, exactly like an analyzer that does not implement them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use baras_report_types::{
    BossInfo, CastEfficiencyRow, ChangelogEntry, Combatant, Content, FightInfo, SpellCategory,
    Statistic, Suggestion, TabId,
};
use serde::{Deserialize, Serialize};

use crate::context::SessionContext;
use crate::error::ReportError;
use crate::loader::{FetchFuture, ViewFetcher};
use crate::registry::{
    Abilities, AbilityCatalog, CastEfficiency, CastEfficiencySource, CharacterPanel, CharacterTab,
    Checklist, ChecklistModule, CombatantRoster, Combatants, EncounterPanel, EncounterPanelModule,
    ModuleRegistry,
};
use crate::results::{AnalysisSession, GenerateOptions, ResultSet, TabDescriptor};
use crate::views::{ChangelogView, ResidentViews, SharedView, StaticView, ViewKey};

/// View name of the resident timeline inside `ReportSnapshot::views`
pub const TIMELINE_VIEW: &str = "timeline";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub fight: FightInfo,
    #[serde(default)]
    pub boss: Option<BossInfo>,
    pub combatants: Vec<Combatant>,
    /// Id of the combatant the report is about
    pub selected_combatant: u64,

    #[serde(default)]
    pub statistics: Vec<Statistic>,
    /// Statistics recomputed with boss downtime excluded, if the analyzer produced any
    #[serde(default)]
    pub downtime_adjusted_statistics: Option<Vec<Statistic>>,
    #[serde(default)]
    pub issues: Vec<Suggestion>,

    // ─── Module sections (absent = module not implemented) ───
    #[serde(default)]
    pub checklist: Option<Content>,
    #[serde(default)]
    pub character_panel: Option<Content>,
    #[serde(default)]
    pub encounter_panel: Option<Content>,
    #[serde(default)]
    pub cast_efficiency: Option<Vec<CastEfficiencyRow>>,
    #[serde(default)]
    pub spell_categories: Option<Vec<SpellCategory>>,

    /// Tabs contributed by analysis modules
    #[serde(default)]
    pub tabs: Vec<SnapshotTab>,
    /// Pre-rendered view bodies keyed by view name ("timeline", "events", "mana")
    #[serde(default)]
    pub views: BTreeMap<String, Content>,
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTab {
    pub id: TabId,
    pub label: String,
    pub content: Content,
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot Modules
// ─────────────────────────────────────────────────────────────────────────────

struct SnapshotRoster {
    combatants: Vec<Combatant>,
    selected: usize,
}

impl CombatantRoster for SnapshotRoster {
    fn selected(&self) -> &Combatant {
        &self.combatants[self.selected]
    }

    fn all(&self) -> &[Combatant] {
        &self.combatants
    }
}

/// Pre-rendered panel content
struct StaticPanel(Content);

impl ChecklistModule for StaticPanel {
    fn render(&self, _ctx: &SessionContext<'_>) -> Content {
        self.0.clone()
    }
}

impl CharacterPanel for StaticPanel {
    fn render(&self, _ctx: &SessionContext<'_>) -> Content {
        self.0.clone()
    }
}

impl EncounterPanelModule for StaticPanel {
    fn render(&self, _ctx: &SessionContext<'_>) -> Content {
        self.0.clone()
    }
}

struct SnapshotCastEfficiency(Vec<CastEfficiencyRow>);

impl CastEfficiencySource for SnapshotCastEfficiency {
    fn cast_efficiency(&self) -> Vec<CastEfficiencyRow> {
        self.0.clone()
    }
}

struct SnapshotAbilities(Vec<SpellCategory>);

impl AbilityCatalog for SnapshotAbilities {
    fn spell_categories(&self) -> Vec<SpellCategory> {
        self.0.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

pub struct SnapshotSession {
    snapshot: ReportSnapshot,
    modules: ModuleRegistry,
}

impl SnapshotSession {
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = fs::read_to_string(path).map_err(|e| ReportError::SnapshotIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let snapshot: ReportSnapshot =
            serde_json::from_str(&contents).map_err(|e| ReportError::SnapshotParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: ReportSnapshot) -> Result<Self, ReportError> {
        let selected = snapshot
            .combatants
            .iter()
            .position(|c| c.id == snapshot.selected_combatant)
            .ok_or_else(|| ReportError::InvalidSnapshot {
                reason: format!(
                    "selected combatant {} is not among the {} combatants",
                    snapshot.selected_combatant,
                    snapshot.combatants.len()
                ),
            })?;

        let mut modules = ModuleRegistry::new();
        modules.insert::<Combatants>(Arc::new(SnapshotRoster {
            combatants: snapshot.combatants.clone(),
            selected,
        }))?;
        if let Some(content) = &snapshot.checklist {
            modules.insert::<Checklist>(Arc::new(StaticPanel(content.clone())))?;
        }
        if let Some(content) = &snapshot.character_panel {
            modules.insert::<CharacterTab>(Arc::new(StaticPanel(content.clone())))?;
        }
        if let Some(content) = &snapshot.encounter_panel {
            modules.insert::<EncounterPanel>(Arc::new(StaticPanel(content.clone())))?;
        }
        if let Some(rows) = &snapshot.cast_efficiency {
            modules.insert::<CastEfficiency>(Arc::new(SnapshotCastEfficiency(rows.clone())))?;
        }
        if let Some(categories) = &snapshot.spell_categories {
            modules.insert::<Abilities>(Arc::new(SnapshotAbilities(categories.clone())))?;
        }

        tracing::debug!(
            fight = snapshot.fight.id,
            modules = ?modules.capability_names(),
            tabs = snapshot.tabs.len(),
            "Loaded report snapshot"
        );
        Ok(Self { snapshot, modules })
    }

    pub fn snapshot(&self) -> &ReportSnapshot {
        &self.snapshot
    }

    /// Timeline from the snapshot's views, changelog from its entries
    pub fn resident_views(&self) -> ResidentViews {
        let timeline = self
            .snapshot
            .views
            .get(TIMELINE_VIEW)
            .cloned()
            .unwrap_or_else(|| Content::text("No timeline was recorded for this fight."));
        ResidentViews {
            timeline: StaticView::shared(timeline),
            changelog: Arc::new(ChangelogView::new(self.snapshot.changelog.clone())),
        }
    }

    /// Fetcher serving lazily loaded views from the snapshot after `delay`
    pub fn view_fetcher(&self, delay: Duration) -> SnapshotViewFetcher {
        SnapshotViewFetcher {
            views: Arc::new(self.snapshot.views.clone()),
            delay,
        }
    }

    fn statistics(&self, adjust_for_downtime: bool) -> Vec<Statistic> {
        let source = match (&self.snapshot.downtime_adjusted_statistics, adjust_for_downtime) {
            (Some(adjusted), true) => adjusted,
            _ => &self.snapshot.statistics,
        };
        let mut items = source.clone();
        items.sort_by_key(|s| s.position);
        items
    }
}

impl AnalysisSession for SnapshotSession {
    fn generate_results(&self, options: &GenerateOptions) -> ResultSet {
        tracing::trace!(
            locale = %options.locale,
            adjust_for_downtime = options.adjust_for_downtime,
            "Generating results from snapshot"
        );
        ResultSet {
            tabs: self
                .snapshot
                .tabs
                .iter()
                .map(|tab| {
                    TabDescriptor::fixed(tab.id.clone(), tab.label.clone(), tab.content.clone())
                })
                .collect(),
            statistics: Content::Statistics {
                items: self.statistics(options.adjust_for_downtime),
            },
            issues: self.snapshot.issues.clone(),
        }
    }

    fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    fn fight(&self) -> &FightInfo {
        &self.snapshot.fight
    }

    fn boss(&self) -> Option<&BossInfo> {
        self.snapshot.boss.as_ref()
    }
}

/// Serves lazily loaded views out of a snapshot's `views` map
#[derive(Clone)]
pub struct SnapshotViewFetcher {
    views: Arc<BTreeMap<String, Content>>,
    delay: Duration,
}

impl ViewFetcher<ViewKey, SharedView> for SnapshotViewFetcher {
    fn fetch(&self, key: &ViewKey) -> FetchFuture<SharedView> {
        let views = Arc::clone(&self.views);
        let delay = self.delay;
        let key = *key;
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            views
                .get(key.name())
                .cloned()
                .map(StaticView::shared)
                .ok_or_else(|| format!("view '{}' is not bundled with this snapshot", key))
        })
    }
}

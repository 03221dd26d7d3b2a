//! Per-tab content of a render pass.

use baras_report_types::formatting::{format_cooldown, format_fight_duration, format_ratio_pct};
use baras_report_types::{
    AboutContent, AlertLevel, CastEfficiencyGroup, CastEfficiencyLine, CastEfficiencyRow,
    ContributeLinks, Content, CoreTab, Header, Suggestion, TabId,
};

use crate::context::SessionContext;
use crate::error::ReportError;
use crate::loader::{LazyViewLoader, SlotStatus};
use crate::registry::{Abilities, CastEfficiency, CharacterTab, Checklist, EncounterPanel};
use crate::resolver::{ResolvedTab, navigation_tabs};
use crate::results::ResultSet;
use crate::views::{ResidentViews, SharedView, ViewKey};

const CHECKLIST_SUBTITLE: &str =
    "A quick overview of the important parts to see what you did well and what has room for improvement.";

pub(super) struct RenderPass<'a> {
    pub ctx: &'a SessionContext<'a>,
    pub results: &'a ResultSet,
    pub views: &'a LazyViewLoader<ViewKey, SharedView>,
    pub resident: &'a ResidentViews,
}

impl RenderPass<'_> {
    pub fn header(&self, active: &TabId, url_prefix: &str) -> Content {
        let ctx = self.ctx;
        Content::Header(Box::new(Header {
            fight_name: ctx.fight.name.clone(),
            boss_name: ctx.boss.map(|boss| boss.name.clone()),
            duration: format_fight_duration(ctx.fight.duration_ms()),
            kill: ctx.fight.kill,
            combatant_name: ctx.selected_combatant.name.clone(),
            spec_name: ctx.selected_combatant.spec.display_name(),
            role: ctx.selected_combatant.spec.role.label().to_string(),
            player_icon: ctx.character_profile.and_then(|p| p.portrait_url()),
            tabs: navigation_tabs(self.results, active, url_prefix),
        }))
    }

    /// Fight-specific advisory shown above the content
    pub fn results_warning(&self) -> Option<Content> {
        let warning = self.ctx.boss?.results_warning.as_ref()?;
        Some(Content::Alert {
            level: AlertLevel::Warning,
            body: vec![Content::text(warning.clone())],
        })
    }

    pub fn content(&self, resolved: ResolvedTab<'_>) -> Result<Content, ReportError> {
        let content = match resolved {
            ResolvedTab::Core(CoreTab::Overview) => self.overview(),
            ResolvedTab::Core(CoreTab::Statistics) => self.statistics()?,
            ResolvedTab::Core(CoreTab::Timeline) => Content::View {
                view: CoreTab::Timeline.id().to_string(),
                body: Box::new(self.resident.timeline.render(self.ctx)),
            },
            ResolvedTab::Core(CoreTab::Events) => {
                Content::container(vec![self.lazy_view(ViewKey::Events)])
            }
            ResolvedTab::Core(CoreTab::Character) => self.character()?,
            ResolvedTab::Core(CoreTab::About) => self.about(),
            ResolvedTab::Contributed(tab) => Content::container(vec![tab.render(self.ctx)]),
        };
        Ok(content)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Built-in Tabs
    // ─────────────────────────────────────────────────────────────────────────

    fn overview(&self) -> Content {
        let checklist = match self.ctx.modules.optional::<Checklist>() {
            Some(checklist) => checklist.render(self.ctx),
            None => missing_checklist(&self.ctx.config.contribute),
        };

        let mut issues = self.results.issues.clone();
        Suggestion::sort_for_display(&mut issues);

        Content::container(vec![
            Content::Panel {
                title: "Checklist".to_string(),
                subtitle: Some(CHECKLIST_SUBTITLE.to_string()),
                body: vec![checklist],
            },
            Content::Suggestions { issues },
        ])
    }

    fn statistics(&self) -> Result<Content, ReportError> {
        let mut children = vec![self.results.statistics.clone()];
        if self.ctx.selected_combatant.spec.role == self.ctx.config.gated_widget_role {
            children.push(self.lazy_view(ViewKey::Mana));
        }
        children.push(Content::section_title("Abilities"));
        children.push(self.cast_efficiency()?);
        Ok(Content::container(children))
    }

    fn cast_efficiency(&self) -> Result<Content, ReportError> {
        let abilities = self.ctx.modules.require::<Abilities>()?;
        let efficiency = self.ctx.modules.require::<CastEfficiency>()?;

        let european = self.ctx.config.european_number_format;
        let rows = efficiency.cast_efficiency();
        let categories = abilities.spell_categories();

        let uncategorized = rows
            .iter()
            .filter(|row| !categories.iter().any(|c| c.key == row.category))
            .count();
        if uncategorized > 0 {
            tracing::debug!(
                uncategorized,
                "Abilities without a known spell category are not shown"
            );
        }

        let groups = categories
            .into_iter()
            .filter_map(|category| {
                let lines: Vec<_> = rows
                    .iter()
                    .filter(|row| row.category == category.key)
                    .map(|row| efficiency_line(row, european))
                    .collect();
                (!lines.is_empty()).then_some(CastEfficiencyGroup { category, lines })
            })
            .collect();

        Ok(Content::CastEfficiency { groups })
    }

    fn character(&self) -> Result<Content, ReportError> {
        let character = self.ctx.modules.require::<CharacterTab>()?;
        let encounter = self.ctx.modules.require::<EncounterPanel>()?;
        Ok(Content::container(vec![
            character.render(self.ctx),
            encounter.render(self.ctx),
        ]))
    }

    fn about(&self) -> Content {
        let about = &self.ctx.config.about;
        let spec_name = if about.spec_name.is_empty() {
            self.ctx.selected_combatant.spec.display_name()
        } else {
            about.spec_name.clone()
        };

        Content::container(vec![
            Content::About(Box::new(AboutContent {
                spec_name,
                maintainers: about.maintainers.clone(),
                patch_compatibility: about.patch_compatibility.clone(),
                description: about.description.clone(),
            })),
            self.resident.changelog.render(self.ctx),
        ])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lazy Views
    // ─────────────────────────────────────────────────────────────────────────

    /// Current state of a lazily loaded view; never waits for it
    fn lazy_view(&self, key: ViewKey) -> Content {
        let slot = self.views.load(&key);
        match slot.status {
            SlotStatus::Pending => Content::Loading {
                view: key.name().to_string(),
            },
            SlotStatus::Ready(view) => Content::View {
                view: key.name().to_string(),
                body: Box::new(view.render(self.ctx)),
            },
            SlotStatus::Failed(err) => Content::LoadFailed {
                view: key.name().to_string(),
                attempts: err.attempts,
                message: err.message,
            },
        }
    }
}

fn missing_checklist(links: &ContributeLinks) -> Content {
    Content::Alert {
        level: AlertLevel::Danger,
        body: vec![
            Content::text(
                "The checklist for this spec is not yet available. We could use your help to add this. See",
            ),
            Content::link("GitHub", links.github_url.clone()),
            Content::text("or join us on"),
            Content::link("Discord", links.discord_url.clone()),
            Content::text("if you're interested in contributing this."),
        ],
    }
}

fn efficiency_line(row: &CastEfficiencyRow, european: bool) -> CastEfficiencyLine {
    CastEfficiencyLine {
        ability_id: row.ability_id,
        name: row.name.clone(),
        casts: format!("{}/{}", row.casts, row.max_casts),
        cooldown: row.cooldown_ms.map(|ms| format_cooldown(ms, european)),
        efficiency: format_ratio_pct(row.efficiency, european),
        below_recommended: row
            .recommended_efficiency
            .is_some_and(|recommended| row.efficiency < recommended),
    }
}

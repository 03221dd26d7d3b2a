//! Results page
//!
//! One [`ResultsPage`] exists per report view. Every call to
//! [`ResultsPage::render`] is a complete, synchronous render pass:
//!
//! 1. Snapshot a fresh `ResultSet` from the session
//! 2. Build the header (fight summary, tab navigation)
//! 3. Surface the boss's results warning, if any
//! 4. Resolve the selected tab and render its content
//! 5. Append the ad placeholder for non-premium users
//!
//! Lazily loaded views never block a pass; they render as placeholders
//! until their slot settles, at which point the page's revision moves and
//! the host renders again. A page built outside a tokio runtime (and not
//! given one with [`ResultsPage::with_runtime`]) renders those views as
//! failed instead.

mod sections;

#[cfg(test)]
mod page_tests;

use std::sync::Arc;

use baras_report_types::{CharacterProfile, Content, ReportConfig, TabId};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::context::SessionContext;
use crate::error::ReportError;
use crate::loader::{LazyViewLoader, ViewFetcher};
use crate::registry::Combatants;
use crate::resolver::{ResolutionPolicy, resolve_with_policy, selected_or_default};
use crate::results::{AnalysisSession, GenerateOptions};
use crate::retry::RetryPolicy;
use crate::state::ReportState;
use crate::views::{ResidentViews, SharedView, ViewKey};

use sections::RenderPass;

/// Ad format requested for non-premium users
pub const AD_FORMAT: &str = "leaderboard";

/// Navigation and user inputs for one render pass
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// From navigation state; `None` shows the default tab
    pub selected_tab: Option<TabId>,
    pub premium: bool,
    pub character_profile: Option<CharacterProfile>,
    /// Tab links in the header are `{prefix}/{tab id}`
    pub tab_url_prefix: String,
}

impl PageRequest {
    pub fn tab(tab: impl Into<TabId>) -> Self {
        Self {
            selected_tab: Some(tab.into()),
            ..Default::default()
        }
    }

    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }
}

pub struct ResultsPage<S> {
    session: Arc<S>,
    config: ReportConfig,
    state: ReportState,
    views: LazyViewLoader<ViewKey, SharedView>,
    resident: ResidentViews,
}

impl<S: AnalysisSession> ResultsPage<S> {
    pub fn new(
        session: Arc<S>,
        config: ReportConfig,
        fetcher: impl ViewFetcher<ViewKey, SharedView>,
        resident: ResidentViews,
    ) -> Self {
        let state = ReportState::new();
        let views = LazyViewLoader::new(
            fetcher,
            RetryPolicy::from(&config.view_loading),
            state.revision().clone(),
        );
        Self {
            session,
            config,
            state,
            views,
            resident,
        }
    }

    /// Fetch lazily loaded views on `runtime`, for hosts that render from
    /// their own thread
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.views = self.views.with_runtime(runtime);
        self
    }

    /// Run one render pass. May be called from any thread.
    pub fn render(&self, request: &PageRequest) -> Result<Content, ReportError> {
        let results = self.session.generate_results(&GenerateOptions {
            locale: self.config.locale.clone(),
            adjust_for_downtime: self.state.adjust_for_downtime(),
        });
        for id in results.duplicate_tab_ids() {
            tracing::warn!(
                tab = %id,
                "Contributed tab id is shadowed by an earlier tab and can never be selected"
            );
        }

        let modules = self.session.modules();
        let roster = modules.require::<Combatants>()?;
        let ctx = SessionContext {
            config: &self.config,
            selected_combatant: roster.selected(),
            fight: self.session.fight(),
            boss: self.session.boss(),
            premium: request.premium,
            character_profile: request.character_profile.as_ref(),
            modules,
        };

        let selected = selected_or_default(request.selected_tab.as_ref());
        let policy = ResolutionPolicy::from_strict(self.config.strict_tab_resolution);
        let resolved = resolve_with_policy(&selected, &results, policy)?;

        let pass = RenderPass {
            ctx: &ctx,
            results: &results,
            views: &self.views,
            resident: &self.resident,
        };

        let mut children = vec![pass.header(&resolved.id(), &request.tab_url_prefix)];
        if let Some(warning) = pass.results_warning() {
            children.push(warning);
        }
        children.push(pass.content(resolved)?);
        if !request.premium {
            children.push(Content::Ad {
                format: AD_FORMAT.to_string(),
            });
        }

        Ok(Content::Page {
            css_class: format!("results boss-{}", ctx.fight.boss_id),
            children,
        })
    }

    /// Toggle downtime adjustment; the page's revision moves if it changed
    pub fn set_adjust_for_downtime(&self, enabled: bool) -> bool {
        self.state.set_adjust_for_downtime(enabled)
    }

    pub fn adjust_for_downtime(&self) -> bool {
        self.state.adjust_for_downtime()
    }

    /// Changes whenever a render pass would produce different output
    pub fn revision(&self) -> watch::Receiver<u64> {
        self.state.revision().subscribe()
    }

    pub fn views(&self) -> &LazyViewLoader<ViewKey, SharedView> {
        &self.views
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<S> {
        &self.session
    }
}

//! Per-render snapshot of what the analysis produced
//!
//! A [`ResultSet`] is generated fresh for every render pass and dropped when
//! the pass ends. Tab render closures may capture data from the snapshot
//! they came from, so descriptors are never cached across passes.

use std::fmt;
use std::sync::Arc;

use baras_report_types::{BossInfo, Content, FightInfo, Suggestion, TabId};
use hashbrown::HashSet;

use crate::context::SessionContext;
use crate::error::ReportError;
use crate::registry::{Capability, ModuleRegistry};

pub type RenderFn = Arc<dyn Fn(&SessionContext<'_>) -> Content + Send + Sync>;

/// A selectable tab and the procedure that renders it
#[derive(Clone)]
pub struct TabDescriptor {
    pub id: TabId,
    pub label: String,
    render: RenderFn,
}

impl TabDescriptor {
    pub fn new(
        id: impl Into<TabId>,
        label: impl Into<String>,
        render: impl Fn(&SessionContext<'_>) -> Content + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            render: Arc::new(render),
        }
    }

    /// A tab that always renders the same content
    pub fn fixed(id: impl Into<TabId>, label: impl Into<String>, content: Content) -> Self {
        Self::new(id, label, move |_| content.clone())
    }

    pub fn render(&self, ctx: &SessionContext<'_>) -> Content {
        (self.render)(ctx)
    }
}

impl fmt::Debug for TabDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Options passed to the analysis engine when generating results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub locale: String,
    /// Exclude boss downtime from active-time based statistics
    pub adjust_for_downtime: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// Contributed tabs, in lookup order
    pub tabs: Vec<TabDescriptor>,
    pub statistics: Content,
    pub issues: Vec<Suggestion>,
}

impl ResultSet {
    /// First contributed tab with this id
    pub fn find_tab(&self, id: &TabId) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    /// Contributed ids that can never be selected: repeats of an earlier
    /// contributed id, and ids shadowed by a built-in tab.
    pub fn duplicate_tab_ids(&self) -> Vec<TabId> {
        let mut seen = HashSet::new();
        self.tabs
            .iter()
            .filter(|tab| tab.id.is_core() || !seen.insert(tab.id.as_str()))
            .map(|tab| tab.id.clone())
            .collect()
    }
}

/// A completed analysis of one fight for one player
pub trait AnalysisSession: Send + Sync {
    /// Produce a fresh result snapshot. Must be cheap and idempotent for
    /// identical options on an unchanged session.
    fn generate_results(&self, options: &GenerateOptions) -> ResultSet;

    fn modules(&self) -> &ModuleRegistry;

    fn fight(&self) -> &FightInfo;

    fn boss(&self) -> Option<&BossInfo>;

    fn get_module<C: Capability>(
        &self,
        required: bool,
    ) -> Result<Option<Arc<C::Module>>, ReportError>
    where
        Self: Sized,
    {
        self.modules().get::<C>(required)
    }
}

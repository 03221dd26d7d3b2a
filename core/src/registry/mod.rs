//! Typed module registry
//!
//! An analysis session registers at most one module per capability. The
//! results page looks modules up by capability marker type rather than by
//! concrete module type, so any class analyzer can fill a slot with its own
//! implementation of the capability trait.
//!
//! ```text
//!   Capability marker        Module shape (trait object)
//!   ─────────────────        ───────────────────────────
//!   Combatants          ──▶  dyn CombatantRoster
//!   Checklist           ──▶  dyn ChecklistModule
//!   CastEfficiency      ──▶  dyn CastEfficiencySource
//!   ...
//! ```

mod capabilities;

pub use capabilities::{
    Abilities, AbilityCatalog, CastEfficiency, CastEfficiencySource, CharacterPanel, CharacterTab,
    Checklist, ChecklistModule, CombatantRoster, Combatants, EncounterPanel, EncounterPanelModule,
};

use std::any::{Any, TypeId};
use std::sync::Arc;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::error::ReportError;

/// A slot in the module registry.
///
/// Implemented by zero-sized marker types; `Module` is the trait object a
/// session registers for that slot.
pub trait Capability: 'static {
    type Module: ?Sized + Send + Sync + 'static;

    /// Name used in errors and logs
    const NAME: &'static str;
}

/// Zero-or-one module instance per capability for one analysis session.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    order: Vec<&'static str>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the module for a capability.
    ///
    /// A second registration for the same capability is rejected; a session
    /// has at most one live instance per capability.
    pub fn insert<C: Capability>(&mut self, module: Arc<C::Module>) -> Result<(), ReportError> {
        match self.modules.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => Err(ReportError::DuplicateModule {
                capability: C::NAME,
            }),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(module));
                self.order.push(C::NAME);
                Ok(())
            }
        }
    }

    /// Look up a capability the current analyzer may not implement
    pub fn optional<C: Capability>(&self) -> Option<Arc<C::Module>> {
        self.modules
            .get(&TypeId::of::<C>())
            .and_then(|module| module.downcast_ref::<Arc<C::Module>>())
            .cloned()
    }

    /// Look up a capability the session guarantees. Absence is a broken
    /// invariant between the page and the analysis engine.
    pub fn require<C: Capability>(&self) -> Result<Arc<C::Module>, ReportError> {
        self.optional::<C>()
            .ok_or(ReportError::RequiredModuleAbsent {
                capability: C::NAME,
            })
    }

    /// `require` or `optional`, chosen at runtime
    pub fn get<C: Capability>(
        &self,
        required: bool,
    ) -> Result<Option<Arc<C::Module>>, ReportError> {
        if required {
            self.require::<C>().map(Some)
        } else {
            Ok(self.optional::<C>())
        }
    }

    pub fn contains<C: Capability>(&self) -> bool {
        self.modules.contains_key(&TypeId::of::<C>())
    }

    /// Names of the registered capabilities, in registration order
    pub fn capability_names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("capabilities", &self.order)
            .finish()
    }
}

//! Component registry and lifecycle manager.
//!
//! Owns every loaded overlay state together with its bound presentation
//! context, as two index-aligned sequences: `states[i]` always pairs with
//! `contexts[i]`. Raw slot indices never leave this module's crate-internal
//! API; callers look up and reload by state type.
//!
//! Registration is explicit: instead of scanning loaded types at runtime,
//! hosts register one [`StateFactory`] per concrete state type, and `load`
//! builds one instance of each in registration order.
//!
//! Single-threaded by design: the registry lives on the host's loop thread
//! and all mutation happens between ticks, so there is no internal locking.

use std::any::{self, TypeId};
use std::collections::HashMap;

use crate::error::{Error, Result};

use super::context::PresentationContext;
use super::state::OverlayState;

// =============================================================================
// Factories
// =============================================================================

/// An explicit registration record: how to build one concrete state type.
pub struct StateFactory {
    type_id: TypeId,
    type_name: &'static str,
    build: Box<dyn Fn() -> Result<Box<dyn OverlayState>>>,
}

impl StateFactory {
    /// A factory with a fallible parameterless constructor.
    ///
    /// A constructor failure during `load` is fatal for the whole load:
    /// a missing state would break the slot-alignment invariant.
    pub fn new<T, F>(build: F) -> Self
    where
        T: OverlayState,
        F: Fn() -> Result<T> + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            build: Box::new(move || build().map(|state| Box::new(state) as Box<dyn OverlayState>)),
        }
    }

    /// A factory for a state type with an infallible default constructor.
    pub fn of<T>() -> Self
    where
        T: OverlayState + Default,
    {
        Self::new(|| Ok(T::default()))
    }

    /// The concrete type name this factory builds.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for StateFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateFactory")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// The owner of all loaded overlay states and their contexts.
#[derive(Default)]
pub struct OverlayRegistry {
    factories: Vec<StateFactory>,
    states: Vec<Box<dyn OverlayState>>,
    contexts: Vec<PresentationContext>,
    slots: HashMap<TypeId, usize>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. Loud failure on a duplicate state type.
    pub fn register(&mut self, factory: StateFactory) -> Result<()> {
        if self.factories.iter().any(|f| f.type_id == factory.type_id) {
            return Err(Error::already_registered(factory.type_name));
        }
        self.factories.push(factory);
        Ok(())
    }

    /// Convenience for `register(StateFactory::of::<T>())`.
    pub fn register_state<T>(&mut self) -> Result<()>
    where
        T: OverlayState + Default,
    {
        self.register(StateFactory::of::<T>())
    }

    /// Build one state and one freshly bound context per registered factory,
    /// in registration order.
    ///
    /// Replaces any previously held instances. Any constructor failure
    /// aborts the load and leaves the registry empty; a partially loaded
    /// registry is never observable.
    pub fn load(&mut self) -> Result<()> {
        self.states.clear();
        self.contexts.clear();
        self.slots.clear();

        let mut states: Vec<Box<dyn OverlayState>> = Vec::with_capacity(self.factories.len());
        let mut contexts = Vec::with_capacity(self.factories.len());
        let mut slots = HashMap::with_capacity(self.factories.len());

        for factory in &self.factories {
            let state = (factory.build)()
                .map_err(|e| Error::construct(factory.type_name, e.to_string()))?;
            slots.insert(factory.type_id, states.len());
            states.push(state);
            contexts.push(PresentationContext::new(factory.type_id, factory.type_name));
        }

        self.states = states;
        self.contexts = contexts;
        self.slots = slots;
        log::debug!("loaded {} overlay states", self.states.len());
        Ok(())
    }

    /// Invoke every state's teardown hook in slot order, then release states
    /// and contexts together. Factories persist, so `load` can be called
    /// again afterwards.
    pub fn unload(&mut self) {
        for state in &mut self.states {
            state.unload();
        }
        self.states.clear();
        self.contexts.clear();
        self.slots.clear();
        log::debug!("unloaded all overlay states");
    }

    /// Look up the loaded instance of state type `T`.
    pub fn get<T: OverlayState>(&self) -> Result<&T> {
        let slot = self.slot_of::<T>()?;
        self.states[slot]
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| Error::not_registered(any::type_name::<T>()))
    }

    /// Look up the loaded instance of state type `T`, mutably.
    pub fn get_mut<T: OverlayState>(&mut self) -> Result<&mut T> {
        let slot = self.slot_of::<T>()?;
        self.states[slot]
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| Error::not_registered(any::type_name::<T>()))
    }

    /// The context bound to the loaded instance of state type `T`.
    pub fn context_of<T: OverlayState>(&self) -> Result<&PresentationContext> {
        let slot = self.slot_of::<T>()?;
        Ok(&self.contexts[slot])
    }

    /// Replace the loaded instance of `T` with a brand-new one built through
    /// the original factory, together with a brand-new bound context. Every
    /// other slot is untouched.
    ///
    /// The old instance's `unload` hook is intentionally NOT invoked here:
    /// reload is a wholesale replacement, and states holding external
    /// handles should release them in `Drop`. Reloading a type that was
    /// never loaded is a caller error and fails with `NotRegistered`.
    pub fn reload<T: OverlayState>(&mut self) -> Result<()> {
        let type_id = TypeId::of::<T>();
        let slot = self.slot_of::<T>()?;
        let factory = self
            .factories
            .iter()
            .find(|f| f.type_id == type_id)
            .ok_or_else(|| Error::not_registered(any::type_name::<T>()))?;

        // Build before overwriting so a failed reload mutates nothing.
        let state =
            (factory.build)().map_err(|e| Error::construct(factory.type_name, e.to_string()))?;

        self.contexts[slot] = PresentationContext::new(type_id, factory.type_name);
        self.states[slot] = state;
        log::debug!("reloaded overlay state `{}`", factory.type_name);
        Ok(())
    }

    /// Number of loaded states.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.states.len(), self.contexts.len());
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn slot_of<T: OverlayState>(&self) -> Result<usize> {
        self.slots
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| Error::not_registered(any::type_name::<T>()))
    }

    /// Loaded states in slot order, for stage assembly.
    pub(crate) fn states(&self) -> impl Iterator<Item = &dyn OverlayState> {
        self.states.iter().map(|state| state.as_ref())
    }

    /// The (state, context) pair at `slot`, for the tick driver.
    pub(crate) fn pair_mut(
        &mut self,
        slot: usize,
    ) -> Option<(&mut dyn OverlayState, &mut PresentationContext)> {
        if slot >= self.states.len() {
            return None;
        }
        let state = self.states[slot].as_mut();
        let context = &mut self.contexts[slot];
        Some((state, context))
    }
}

// =============================================================================
// Tests
// =============================================================================

//! The pluggable overlay state contract.
//!
//! An `OverlayState` is one independent unit of updatable, drawable overlay
//! behavior: a panel, a toggle strip, a browser. The registry instantiates
//! one of each registered type, binds it to a [`PresentationContext`], and
//! exposes it to the host as a named render stage.
//!
//! [`PresentationContext`]: super::context::PresentationContext

use std::any::Any;
use std::time::Duration;

use crate::pipeline::StageDescriptor;
use crate::renderer::Surface;
use crate::types::ScalePolicy;

/// One registered, drawable, updatable overlay behavior.
///
/// Implementations must be constructible through a [`StateFactory`]
/// (usually `Default`) so the registry can recreate them on reload.
///
/// [`StateFactory`]: super::registry::StateFactory
pub trait OverlayState: Any {
    /// Display name, used in stage names and logs.
    fn name(&self) -> &'static str;

    /// Visibility predicate, queried every tick. An invisible state is
    /// neither updated nor drawn that tick.
    fn visible(&self) -> bool;

    /// Which scaling policy the host should apply while this stage renders.
    fn scale_policy(&self) -> ScalePolicy {
        ScalePolicy::Ui
    }

    /// Where this state's stage should be inserted into the host's current
    /// stage list. Out-of-range values are clamped; the default appends.
    fn insertion_index(&self, stages: &[StageDescriptor]) -> usize {
        stages.len()
    }

    /// Per-tick update step with host-supplied timing.
    fn update(&mut self, dt: Duration);

    /// Draw onto the host-supplied surface.
    fn draw(&mut self, surface: &mut Surface);

    /// Teardown hook, invoked by `OverlayRegistry::unload` (but not by
    /// `reload`; see the registry docs).
    fn unload(&mut self) {}

    /// Downcast seam for typed lookup.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast seam for typed lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

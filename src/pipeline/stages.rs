//! Render-stage assembly and the per-tick driver.
//!
//! The host keeps an ordered list of [`StageDescriptor`]s: its own stages
//! plus one overlay stage per loaded state, spliced in at the index each
//! state nominates for itself. Every tick the host calls [`tick`] with
//! host-supplied timing and its drawing surface; visible overlay stages
//! advance their context clock, update, and draw, in list order.
//!
//! A panicking stage is caught at the per-stage boundary, logged, and
//! skipped for that tick, so one broken panel cannot halt the host render
//! cycle.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use crate::config::OverlayConfig;
use crate::engine::OverlayRegistry;
use crate::renderer::Surface;
use crate::types::ScalePolicy;

// =============================================================================
// Stage Descriptors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StageKind {
    /// A stage the host drives itself; the overlay driver skips it.
    Host,
    /// An overlay stage backed by the registry slot.
    Overlay { slot: usize },
}

/// One entry in the host's ordered render-stage list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDescriptor {
    name: String,
    scale: ScalePolicy,
    kind: StageKind,
}

impl StageDescriptor {
    /// A host-owned stage. The overlay driver never touches it; it exists
    /// so overlay states can nominate positions relative to it.
    pub fn host(name: impl Into<String>, scale: ScalePolicy) -> Self {
        Self {
            name: name.into(),
            scale,
            kind: StageKind::Host,
        }
    }

    pub(crate) fn overlay(name: String, scale: ScalePolicy, slot: usize) -> Self {
        Self {
            name,
            scale,
            kind: StageKind::Overlay { slot },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scale(&self) -> ScalePolicy {
        self.scale
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self.kind, StageKind::Overlay { .. })
    }

    pub(crate) fn kind(&self) -> StageKind {
        self.kind
    }
}

// =============================================================================
// Stage Assembly
// =============================================================================

/// Splice one named overlay stage per loaded state into `stages`.
///
/// States are visited in slot order; each nominates its own insertion index
/// against the list as built so far (clamped to the current length), and
/// declares the scale policy stamped onto its descriptor.
pub fn splice_stages(
    registry: &OverlayRegistry,
    config: &OverlayConfig,
    stages: &mut Vec<StageDescriptor>,
) {
    for (slot, state) in registry.states().enumerate() {
        let at = state.insertion_index(stages).min(stages.len());
        let name = format!("{}{}", config.stage_prefix, state.name());
        stages.insert(at, StageDescriptor::overlay(name, state.scale_policy(), slot));
    }
}

// =============================================================================
// Tick Driver
// =============================================================================

/// Drive one host tick over the stage list.
///
/// For each overlay stage, in list order: query the state's visibility
/// predicate; if visible, advance the bound context's clock, run the
/// state's update step, then draw onto `surface`. Invisible stages are
/// skipped entirely (no partial update).
///
/// With `config.guard_panics` set, each stage runs under a panic guard:
/// a panic is logged and that stage is skipped for this tick only.
pub fn tick(
    registry: &mut OverlayRegistry,
    config: &OverlayConfig,
    stages: &[StageDescriptor],
    dt: Duration,
    surface: &mut Surface,
) {
    for stage in stages {
        let StageKind::Overlay { slot } = stage.kind() else {
            continue;
        };
        let Some((state, context)) = registry.pair_mut(slot) else {
            // Stage plan outlived an unload; rebuild it via splice_stages.
            log::debug!("stage `{}` refers to a released slot, skipping", stage.name());
            continue;
        };

        let step = AssertUnwindSafe(|| {
            if !state.visible() {
                if config.log_hidden_stages {
                    log::trace!("stage `{}` hidden this tick", stage.name());
                }
                return;
            }
            context.advance(dt);
            state.update(dt);
            state.draw(surface);
        });

        if config.guard_panics {
            if let Err(payload) = catch_unwind(step) {
                log::warn!(
                    "stage `{}` panicked: {}; skipped for this tick",
                    stage.name(),
                    panic_message(payload)
                );
            }
        } else {
            let AssertUnwindSafe(mut step) = step;
            step();
        }
    }
}

/// Extract a human-readable message from a panic payload.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    use crate::engine::{OverlayState, StateFactory};

    use super::*;

    /// Stub with externally controlled visibility and call counters.
    struct Counting {
        label: &'static str,
        visible: Rc<StdCell<bool>>,
        updates: Rc<StdCell<usize>>,
        draws: Rc<StdCell<usize>>,
    }

    #[derive(Clone)]
    struct CountingHandles {
        visible: Rc<StdCell<bool>>,
        updates: Rc<StdCell<usize>>,
        draws: Rc<StdCell<usize>>,
    }

    impl CountingHandles {
        fn new(visible: bool) -> Self {
            Self {
                visible: Rc::new(StdCell::new(visible)),
                updates: Rc::new(StdCell::new(0)),
                draws: Rc::new(StdCell::new(0)),
            }
        }
    }

    impl Counting {
        fn factory(label: &'static str, handles: &CountingHandles) -> StateFactory {
            let handles = handles.clone();
            StateFactory::new(move || {
                Ok(Counting {
                    label,
                    visible: handles.visible.clone(),
                    updates: handles.updates.clone(),
                    draws: handles.draws.clone(),
                })
            })
        }
    }

    impl OverlayState for Counting {
        fn name(&self) -> &'static str {
            self.label
        }
        fn visible(&self) -> bool {
            self.visible.get()
        }
        fn update(&mut self, _dt: Duration) {
            self.updates.set(self.updates.get() + 1);
        }
        fn draw(&mut self, _surface: &mut Surface) {
            self.draws.set(self.draws.get() + 1);
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// Stub that nominates the front of the stage list.
    #[derive(Default)]
    struct Leading;

    impl OverlayState for Leading {
        fn name(&self) -> &'static str {
            "front"
        }
        fn visible(&self) -> bool {
            true
        }
        fn insertion_index(&self, _stages: &[StageDescriptor]) -> usize {
            0
        }
        fn update(&mut self, _dt: Duration) {}
        fn draw(&mut self, _surface: &mut Surface) {}
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct Panicking;

    impl OverlayState for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }
        fn visible(&self) -> bool {
            panic!("visibility predicate misbehaved")
        }
        fn update(&mut self, _dt: Duration) {}
        fn draw(&mut self, _surface: &mut Surface) {}
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_splice_appends_and_prefixes() {
        let handles = CountingHandles::new(true);
        let mut registry = OverlayRegistry::new();
        registry
            .register(Counting::factory("alpha", &handles))
            .unwrap();
        registry.load().unwrap();

        let mut stages = vec![StageDescriptor::host("host: world", ScalePolicy::World)];
        splice_stages(&registry, &OverlayConfig::default(), &mut stages);

        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].name(), "overlay: alpha");
        assert_eq!(stages[1].scale(), ScalePolicy::Ui);
        assert!(stages[1].is_overlay());
        assert!(!stages[0].is_overlay());
    }

    #[test]
    fn test_splice_honors_nominated_index() {
        let back = CountingHandles::new(true);
        let mut registry = OverlayRegistry::new();
        registry
            .register(Counting::factory("back", &back))
            .unwrap();
        registry.register_state::<Leading>().unwrap();
        registry.load().unwrap();

        let mut stages = vec![StageDescriptor::host("host: world", ScalePolicy::World)];
        splice_stages(&registry, &OverlayConfig::default(), &mut stages);

        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["overlay: front", "host: world", "overlay: back"]);
    }

    #[test]
    fn test_visibility_gates_update_and_draw() {
        let handles = CountingHandles::new(false);
        let mut registry = OverlayRegistry::new();
        registry
            .register(Counting::factory("gated", &handles))
            .unwrap();
        registry.load().unwrap();

        let config = OverlayConfig::default();
        let mut stages = Vec::new();
        splice_stages(&registry, &config, &mut stages);
        let mut surface = Surface::new(10, 10);
        let dt = Duration::from_millis(16);

        // Invisible: neither updated nor drawn, clock untouched.
        tick(&mut registry, &config, &stages, dt, &mut surface);
        tick(&mut registry, &config, &stages, dt, &mut surface);
        assert_eq!(handles.updates.get(), 0);
        assert_eq!(handles.draws.get(), 0);
        assert_eq!(registry.context_of::<Counting>().unwrap().ticks(), 0);

        // Visible: all three advance together.
        handles.visible.set(true);
        tick(&mut registry, &config, &stages, dt, &mut surface);
        assert_eq!(handles.updates.get(), 1);
        assert_eq!(handles.draws.get(), 1);
        assert_eq!(registry.context_of::<Counting>().unwrap().ticks(), 1);
    }

    #[test]
    fn test_panicking_stage_does_not_halt_the_tick() {
        let handles = CountingHandles::new(true);
        let mut registry = OverlayRegistry::new();
        registry.register_state::<Panicking>().unwrap();
        registry
            .register(Counting::factory("survivor", &handles))
            .unwrap();
        registry.load().unwrap();

        let config = OverlayConfig::default();
        let mut stages = Vec::new();
        splice_stages(&registry, &config, &mut stages);
        let mut surface = Surface::new(10, 10);

        tick(
            &mut registry,
            &config,
            &stages,
            Duration::from_millis(16),
            &mut surface,
        );

        // The stage after the panicking one still ran.
        assert_eq!(handles.updates.get(), 1);
        assert_eq!(handles.draws.get(), 1);
    }

    #[test]
    fn test_unguarded_tick_runs_stages() {
        let handles = CountingHandles::new(true);
        let mut registry = OverlayRegistry::new();
        registry
            .register(Counting::factory("direct", &handles))
            .unwrap();
        registry.load().unwrap();

        let config = OverlayConfig {
            guard_panics: false,
            ..OverlayConfig::default()
        };
        let mut stages = Vec::new();
        splice_stages(&registry, &config, &mut stages);
        let mut surface = Surface::new(10, 10);

        tick(
            &mut registry,
            &config,
            &stages,
            Duration::from_millis(16),
            &mut surface,
        );
        assert_eq!(handles.updates.get(), 1);
        assert_eq!(handles.draws.get(), 1);
    }

    #[test]
    fn test_stale_stage_plan_is_skipped() {
        let handles = CountingHandles::new(true);
        let mut registry = OverlayRegistry::new();
        registry
            .register(Counting::factory("stale", &handles))
            .unwrap();
        registry.load().unwrap();

        let config = OverlayConfig::default();
        let mut stages = Vec::new();
        splice_stages(&registry, &config, &mut stages);

        registry.unload();

        let mut surface = Surface::new(10, 10);
        tick(
            &mut registry,
            &config,
            &stages,
            Duration::from_millis(16),
            &mut surface,
        );
        assert_eq!(handles.updates.get(), 0);
        assert_eq!(handles.draws.get(), 0);
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(Box::new("static str")), "static str");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42u32)), "non-string panic payload");
    }
}

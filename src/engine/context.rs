//! Presentation context: per-state timing and interaction wrapper.
//!
//! Every loaded overlay state gets exactly one context, created alongside it
//! and bound at creation. The binding never changes; reload replaces the
//! pair wholesale rather than relinking.

use std::any::TypeId;
use std::time::Duration;

/// The per-state clock and binding record.
///
/// `advance` is called by the tick driver only while the bound state is
/// visible, so `elapsed` measures visible time, not wall time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationContext {
    bound: TypeId,
    bound_name: &'static str,
    elapsed: Duration,
    last_dt: Duration,
    ticks: u64,
}

impl PresentationContext {
    /// Create a context bound to the state type identified by `bound`.
    pub(crate) fn new(bound: TypeId, bound_name: &'static str) -> Self {
        Self {
            bound,
            bound_name,
            elapsed: Duration::ZERO,
            last_dt: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Advance the internal clock by one host tick.
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        self.last_dt = dt;
        self.ticks += 1;
    }

    /// Type identity of the bound state.
    pub fn bound_type(&self) -> TypeId {
        self.bound
    }

    /// Type name of the bound state.
    pub fn bound_name(&self) -> &'static str {
        self.bound_name
    }

    /// Total visible time accumulated.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Timing of the most recent tick.
    pub fn last_dt(&self) -> Duration {
        self.last_dt
    }

    /// Number of ticks this context has seen.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

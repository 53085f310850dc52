//! Overlay state registry and lifecycle.
//!
//! - [`state`] - the `OverlayState` capability contract
//! - [`context`] - the per-state `PresentationContext`
//! - [`registry`] - `OverlayRegistry`: load / unload / lookup / reload

pub mod context;
pub mod registry;
pub mod state;

pub use context::PresentationContext;
pub use registry::{OverlayRegistry, StateFactory};
pub use state::OverlayState;

//! # overlay-tui
//!
//! Pluggable developer-overlay panels for terminal render loops.
//!
//! A host application that owns its own draw loop registers overlay panels
//! with an [`OverlayRegistry`]; the registry builds one instance of each,
//! binds it to a [`PresentationContext`], and splices named render stages
//! into the host's ordered stage list. Each tick the host drives the list:
//! visible panels advance their clock, update, and draw onto the host's
//! [`Surface`].
//!
//! ## Architecture
//!
//! ```text
//! register factories → load → splice_stages → (per tick) tick → render
//! ```
//!
//! Registration is explicit rather than reflective: one [`StateFactory`]
//! per concrete panel type, checked at compile time. The registry owns two
//! index-aligned sequences (states and contexts); lookup and reload go by
//! panel type, never by raw index.
//!
//! Everything is single-threaded and cooperative, driven entirely by the
//! host's update/draw cycle.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Color, Style, Cell, Rect, ScalePolicy)
//! - [`engine`] - The `OverlayState` contract, contexts, and the registry
//! - [`pipeline`] - Stage splicing and the guarded tick driver
//! - [`renderer`] - Surface grid and crossterm diff output
//! - [`panels`] - Built-in panels (toggle strip, filterable browser)
//! - [`config`] - Host-facing configuration
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use overlay_tui::{
//!     OverlayConfig, OverlayRegistry, ScalePolicy, StageDescriptor, Surface,
//!     panels::{Toggle, ToggleStrip},
//!     pipeline::{splice_stages, tick},
//! };
//!
//! let mut registry = OverlayRegistry::new();
//! registry.register_state::<ToggleStrip>()?;
//! registry.load()?;
//!
//! // Panels are looked up by type, never by index.
//! let strip = registry.get_mut::<ToggleStrip>()?;
//! strip.push(Toggle::new("magnet", 'M', "pull items to the cursor").with_alt("void magnet"));
//!
//! // Splice overlay stages into the host's stage list.
//! let mut stages = vec![StageDescriptor::host("host: world", ScalePolicy::World)];
//! let config = OverlayConfig::default();
//! splice_stages(&registry, &config, &mut stages);
//!
//! // Host loop: one tick, then hand the surface to the renderer.
//! let mut surface = Surface::new(80, 24);
//! tick(&mut registry, &config, &stages, Duration::from_millis(16), &mut surface);
//! # Ok::<(), overlay_tui::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod panels;
pub mod pipeline;
pub mod renderer;
pub mod types;

pub use types::*;

pub use config::OverlayConfig;
pub use engine::{OverlayRegistry, OverlayState, PresentationContext, StateFactory};
pub use error::{Error, Result};
pub use panels::{Browser, Entry, Filter, Toggle, ToggleStrip};
pub use pipeline::{StageDescriptor, splice_stages, tick};
pub use renderer::{Surface, TerminalRenderer};

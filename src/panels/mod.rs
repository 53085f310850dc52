//! Built-in overlay panels.
//!
//! - [`toggles`] - a strip of two-mode gameplay-debug toggles
//! - [`browser`] - a filterable browsing list

pub mod browser;
pub mod toggles;

pub use browser::{Browser, Entry, Filter};
pub use toggles::{Toggle, ToggleStrip};

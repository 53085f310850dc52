//! Drawing surface and terminal output.
//!
//! - [`buffer`] - Surface: the cell grid overlay states draw onto
//! - [`terminal`] - crossterm backend with diff rendering

pub mod buffer;
pub mod terminal;

pub use buffer::Surface;
pub use terminal::TerminalRenderer;

//! Stage assembly and the host-driven tick loop.

pub mod stages;

pub use stages::{StageDescriptor, splice_stages, tick};

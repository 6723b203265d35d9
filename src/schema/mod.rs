//! Schema module - Design, pattern and configuration types for the optimizer.

mod config;
mod design;
mod evolution;
mod pattern;

pub use config::*;
pub use design::*;
pub use evolution::*;
pub use pattern::*;

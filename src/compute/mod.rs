//! Compute module - Pattern generation and evolutionary optimization.

pub mod evolution;
mod patterns;

pub use patterns::*;

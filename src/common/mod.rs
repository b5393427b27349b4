//! Common types, traits, and error definitions for rust_behavior_planning
//!
//! This module provides the foundational building blocks shared by
//! the behavior planning cost functions and the demo binaries.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;

//! # stagekv testkit
//!
//! Test utilities for stagekv.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A reference model for differential testing
//! - Overlay fixtures and the documented usage scenarios
//! - A byte-driven fuzz harness
//!
//! ## Usage
//!
//! ```rust
//! use stagekv_testkit::prelude::*;
//!
//! for (name, ops) in documented_scenarios() {
//!     assert!(check_sequence(&ops).is_ok(), "{name}");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use model::*;

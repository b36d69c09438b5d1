//! # stagekv core
//!
//! A transactional key-value overlay.
//!
//! This crate provides:
//! - [`Overlay`], a map whose writes and deletes are staged until an
//!   atomic [`commit`](Overlay::commit) or discarded by
//!   [`reset`](Overlay::reset)
//! - Operation counters ([`OverlayStats`])
//! - Construction-time [`Config`]
//!
//! The overlay is single-threaded and in-memory. Callers sharing one
//! across threads must wrap it in their own lock.
//!
//! ## Example
//!
//! ```rust
//! use stagekv_core::{Overlay, OverlayError};
//!
//! let mut overlay = Overlay::new();
//! overlay.set("key1", "a");
//! overlay.delete("key1");
//! overlay.commit();
//!
//! assert_eq!(overlay.get("key1"), Err(OverlayError::NotFound));
//! assert_eq!(overlay.size(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod overlay;
mod pending;
mod stats;

pub use config::Config;
pub use error::{OverlayError, OverlayResult};
pub use overlay::Overlay;
pub use pending::PendingChange;
pub use stats::{OverlayStats, StatsSnapshot};

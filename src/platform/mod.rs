//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger and panic hook installation
//! - Run seeds from wall-clock time
//! - Storage (LocalStorage on web, a JSON file natively)

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{init_logging, time_seed};
#[cfg(target_arch = "wasm32")]
pub use web::{init_logging, time_seed};

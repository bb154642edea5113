//! Apollonian-style sphere packing in barycentric weight space.
//!
//! Main components:
//! - [`sphere`] — the sphere value type and its render placement.
//! - [`coords`] — barycentric <-> Cartesian conversions.
//! - [`packing`] — tangent-sphere step and the recursive expansion.
//! - [`gasket_set`] — the result container, with optional value dedup.
//! - [`config`] — depth floor, budget and dedup settings.
//! - [`error`] — error type for projection and seed validation.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod coords;
pub mod error;
pub mod gasket_set;
pub mod packing;
pub mod sphere;
pub mod types;

pub use config::{Config, DedupMode};
pub use error::{GasketError, Result};
pub use gasket_set::GasketSet;
pub use sphere::{Placement, Sphere};

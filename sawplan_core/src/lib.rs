#![forbid(unsafe_code)]

//! Core cut planning for sawing round logs into dimensional lumber.
//!
//! This crate provides:
//! - Domain types (board profiles, cant dimensions, placements, yields)
//! - Board catalog management
//! - Cant geometry resolution, including oversized-log flattening
//! - Shelf packing of boards inside the cant
//! - Board-feet yield calculation
//! - CSV/JSON export of a finished plan

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod geometry;
pub mod packer;
pub mod yields;
pub mod planner;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::BoardCatalog;
pub use config::MillConfig;
pub use geometry::resolve_cant;
pub use packer::pack_shelves;
pub use yields::summarize;
pub use planner::{plan_cut, CutRequest, MillPlan};

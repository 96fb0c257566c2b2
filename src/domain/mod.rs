//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - regions and the five-way region selector (`Region`, `RegionFilter`)
//! - raw and derived sales rows (`RawSalesRecord`, `SalesRecord`)
//! - aggregate points (`DailyPoint`) and fixed configuration constants

pub mod types;

pub use types::*;

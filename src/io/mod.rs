//! Input/output helpers.
//!
//! - raw extract ingest + validation (`ingest`)
//! - combined CSV writer (`export`)
//! - combined CSV loader for the dashboard (`dataset`)
//! - chart/dashboard JSON read/write (`chart`)

pub mod chart;
pub mod dataset;
pub mod export;
pub mod ingest;

pub use chart::*;
pub use dataset::*;
pub use export::*;
pub use ingest::*;

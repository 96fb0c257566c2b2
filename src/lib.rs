//! `morsel-sales` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - ingest, aggregation and chart building are testable without spawning processes
//! - the dashboard description can be rendered by more than one front end
//!   (ASCII plot, JSON export, terminal dashboard)

pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;

//! Runtime settings.
//!
//! Precedence: CLI flags > environment (including a `.env` file) > defaults.
//! The environment half is resolved through a lookup function so it can be
//! exercised in tests without touching the process environment.

use std::path::PathBuf;

use crate::domain::{DEFAULT_COMBINED_CSV, DEFAULT_SOURCES, TARGET_PRODUCT};

const ENV_SOURCES: &str = "SALES_SOURCES";
const ENV_COMBINED_CSV: &str = "SALES_COMBINED_CSV";
const ENV_PRODUCT: &str = "SALES_PRODUCT";
const ENV_LOG: &str = "SALES_LOG";
const ENV_LOG_DIR: &str = "SALES_LOG_DIR";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_LOG_DIR: &str = "logs";

/// Environment-derived defaults shared by every subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sources: Vec<PathBuf>,
    pub combined_csv: PathBuf,
    pub product: String,
    pub log_filter: String,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Load `.env` (if any) and resolve settings from the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let sources = get(ENV_SOURCES)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCES.iter().map(PathBuf::from).collect());

        let log_filter = get(ENV_LOG)
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            sources,
            combined_csv: get(ENV_COMBINED_CSV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COMBINED_CSV)),
            product: get(ENV_PRODUCT).unwrap_or_else(|| TARGET_PRODUCT.to_string()),
            log_filter,
            log_dir: get(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.sources.len(), 3);
        assert_eq!(s.sources[0], PathBuf::from("data/daily_sales_data_0.csv"));
        assert_eq!(s.combined_csv, PathBuf::from("output.csv"));
        assert_eq!(s.product, "pink morsel");
        assert_eq!(s.log_filter, "info");
        assert_eq!(s.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let s = settings(&[
            ("SALES_SOURCES", "a.csv, b.csv,,"),
            ("SALES_COMBINED_CSV", "out/combined.csv"),
            ("SALES_PRODUCT", "Red Morsel"),
            ("RUST_LOG", "debug"),
        ]);
        assert_eq!(s.sources, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(s.combined_csv, PathBuf::from("out/combined.csv"));
        assert_eq!(s.product, "Red Morsel");
        assert_eq!(s.log_filter, "debug");
    }

    #[test]
    fn sales_log_wins_over_rust_log() {
        let s = settings(&[("RUST_LOG", "debug"), ("SALES_LOG", "warn")]);
        assert_eq!(s.log_filter, "warn");
    }

    #[test]
    fn blank_values_are_ignored() {
        let s = settings(&[("SALES_SOURCES", " , "), ("SALES_PRODUCT", "  ")]);
        assert_eq!(s.sources.len(), 3);
        assert_eq!(s.product, "pink morsel");
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use weekplan_core::SearchLimits;

use crate::state::config_path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Stop the search after this many state expansions.
    pub max_expansions: usize,
    /// Wall-clock budget for one search, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_budget_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Characters per day column in the week grid.
    pub column_width: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            max_expansions: 200_000,
            time_budget_ms: Some(2_000),
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { column_width: 12 }
    }
}

impl SearchSection {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            time_budget: self.time_budget_ms.map(Duration::from_millis),
        }
    }
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(home: &Path) -> Result<()> {
    let p = config_path(home);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(home, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "[search]\nmax_expansions = 50\n").unwrap();

        let cfg = load_config(tmp.path()).unwrap();
        assert_eq!(cfg.search.max_expansions, 50);
        assert_eq!(cfg.search.time_budget_ms, Some(2_000));
        assert_eq!(cfg.display.column_width, 12);
        assert_eq!(cfg.search.limits().max_expansions, 50);
        assert_eq!(cfg.search.limits().time_budget, Some(Duration::from_secs(2)));
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.search.time_budget_ms = Some(500);
        cfg.display.column_width = 8;
        save_config(tmp.path(), &cfg).unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "[search\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }
}

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "WEEKPLAN_HOME";

/// Resolve the data directory: explicit override, then `$WEEKPLAN_HOME`,
/// then `$HOME/.weekplan`.
pub fn weekplan_home(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set (or pass --home)")?;
    Ok(PathBuf::from(home).join(".weekplan"))
}

pub fn ensure_weekplan_home(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = weekplan_home(override_dir)?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn tasks_path(home: &Path) -> PathBuf {
    home.join("tasks.json")
}

pub fn completed_path(home: &Path) -> PathBuf {
    home.join("completed.json")
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_and_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("plan");
        let home = ensure_weekplan_home(Some(&dir)).unwrap();
        assert_eq!(home, dir);
        assert!(dir.is_dir());
        assert_eq!(tasks_path(&home), dir.join("tasks.json"));
        assert_eq!(config_path(&home), dir.join("config.toml"));
    }
}

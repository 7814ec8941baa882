use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use zakaat_store::RecordStore;

/// Default data directory: `~/.zakaat`
pub fn zakaat_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set (pass --data-dir)")?;
    Ok(PathBuf::from(home).join(".zakaat"))
}

/// Pick the data directory (`--data-dir` wins) and make sure it exists.
pub fn ensure_home(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => zakaat_home()?,
    };
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn open_store(home: &Path) -> Result<RecordStore> {
    RecordStore::open(home).with_context(|| format!("open data store in {}", home.display()))
}

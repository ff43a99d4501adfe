use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Data directory: `$SPENDLENS_HOME`, else `~/.spendlens`.
pub fn spendlens_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("SPENDLENS_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendlens"))
}

pub fn ensure_spendlens_home() -> Result<PathBuf> {
    let dir = spendlens_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_spendlens_home()?.join("ledger.json"))
}

pub fn default_upload_dir() -> Result<PathBuf> {
    Ok(spendlens_home()?.join("uploads"))
}

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_upload_dir, ensure_spendlens_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub user: UserSection,
    #[serde(default)]
    pub budget: BudgetSection,
    #[serde(default)]
    pub import: ImportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSection {
    /// Ledger owner when `--user` is not given
    pub name: String,
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            name: std::env::var("USER").unwrap_or_else(|_| "default".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetSection {
    /// 0 means no limit
    pub monthly_limit: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportSection {
    /// Where imported statements are copied (default: ~/.spendlens/uploads)
    pub upload_dir: Option<PathBuf>,
}

impl Config {
    pub fn upload_dir(&self) -> Result<PathBuf> {
        match &self.import.upload_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_upload_dir(),
        }
    }

    pub fn set_monthly_limit(&mut self, limit: f64) -> Result<()> {
        if !limit.is_finite() || limit < 0.0 {
            bail!("Monthly limit must be a non-negative number (got {limit})");
        }
        self.budget.monthly_limit = limit;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    save_config_to(cfg, &config_path()?)
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

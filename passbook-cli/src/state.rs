use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn passbook_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".passbook"))
}

pub fn ensure_passbook_home() -> Result<PathBuf> {
    let dir = passbook_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(passbook_home()?.join("config.toml"))
}

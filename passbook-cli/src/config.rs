use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{config_path, ensure_passbook_home};

pub const DEFAULT_PASSWORD_ENV: &str = "PASSBOOK_PDF_PASSWORD";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportSection,
    pub pdf: PdfSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Payee -> category CSV applied when `--categories` is not given
    pub category_map: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSection {
    /// Environment variable holding the statement password
    pub password_env: String,
}

impl Default for PdfSection {
    fn default() -> Self {
        Self {
            password_env: DEFAULT_PASSWORD_ENV.to_string(),
        }
    }
}

impl PdfSection {
    pub fn password_from_env(&self) -> Option<String> {
        std::env::var(&self.password_env).ok().filter(|p| !p.is_empty())
    }
}

/// Load from `path`, or the default location; a missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

pub fn init_config() -> Result<()> {
    ensure_passbook_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    fs::write(&p, render_config(&Config::default())?)
        .with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}

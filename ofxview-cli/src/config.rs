use anyhow::{Context, Result};
use ofxview_report::default_locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::state::{config_path, ensure_ofxview_home};

/// Environment override for `[display] locale`.
pub const LOCALE_ENV: &str = "OFXVIEW_LOCALE";

const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySection,
    pub input: InputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// BCP-47 tag such as `pt-BR`; derived from `LANG` when unset
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Statements above this size are rejected before parsing
    pub max_file_bytes: u64,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl Config {
    /// `OFXVIEW_LOCALE`, then the config file, then `LANG`, then `pt-BR`.
    pub fn locale(&self) -> String {
        self.locale_from(
            std::env::var(LOCALE_ENV).ok().as_deref(),
            std::env::var("LANG").ok().as_deref(),
        )
    }

    fn locale_from(&self, override_env: Option<&str>, lang_env: Option<&str>) -> String {
        override_env
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(self.display.locale.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| default_locale(lang_env))
    }
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
    ensure_ofxview_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

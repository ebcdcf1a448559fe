use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$HOME/.ofxview`, where the config file lives.
pub fn ofxview_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ofxview"))
}

pub fn ensure_ofxview_home() -> Result<PathBuf> {
    let dir = ofxview_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ofxview_home()?.join("config.toml"))
}

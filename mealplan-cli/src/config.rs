use anyhow::{Context, Result};
use mealplan_core::{ProteinPreference, UserProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_mealplan_home, read_text};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub planner: PlannerSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Protein source preference for the advisory note (plant, animal, mixed).
    #[serde(default)]
    pub protein_pref: ProteinPreference,
    /// Optional JSON recipe catalog replacing the built-in one.
    pub catalog: Option<PathBuf>,
    /// Directory for `mealplan export` (default: current directory).
    pub export_dir: Option<PathBuf>,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_mealplan_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = read_text(p)?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
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

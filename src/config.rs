use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "yakusu.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAi,
    pub output: Output,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAi {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub copy_to_clipboard: bool,
    /// Which payload lands on the clipboard when copying is on.
    pub copy: CopyTarget,
    /// Gates success notifications only; failures are always reported.
    pub notifications: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CopyTarget {
    Translation,
    Feedback,
}

impl Default for Config {
    fn default() -> Self {
        Self { openai: OpenAi::default(), output: Output::default() }
    }
}

impl Default for OpenAi {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self { copy_to_clipboard: true, copy: CopyTarget::Translation, notifications: true }
    }
}

impl Config {
    /// `None` when nothing should be copied.
    pub fn copy_target(&self) -> Option<CopyTarget> {
        self.output.copy_to_clipboard.then_some(self.output.copy)
    }

    /// Environment key first, then the file. Empty counts as missing.
    pub fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.openai.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| anyhow!("OPENAI_API_KEY not set and no key in config"))
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&PathBuf::from(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Reading config file {:?}", path))?;
    let cfg: Config = toml::from_str(&contents)
        .with_context(|| format!("Parsing config file {:?}", path))?;
    Ok(cfg)
}

pub fn api_key_from_env() -> Option<String> {
    env::var("OPENAI_API_KEY").ok()
}

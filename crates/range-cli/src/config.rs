//! Stored settings, kept in `config.toml` under the user config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono_tz::Tz;
use range_engine::{parse_duration, validate_separator, Duration};
use serde::{Deserialize, Serialize};

use crate::cli::ConfigKey;

const CONFIG_DIR_NAME: &str = "logsene";
const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_ENV: &str = "LOGSENE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Separator between the two halves of a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_separator: Option<String>,
    /// IANA zone for wall-clock datetimes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Window searched when no time expression is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_window: Option<String>,
}

impl Config {
    /// Load from `path`; a missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::RangeSeparator => self.range_separator.as_deref(),
            ConfigKey::Timezone => self.timezone.as_deref(),
            ConfigKey::DefaultWindow => self.default_window.as_deref(),
        }
    }

    /// Validate `value` for `key` and store it.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::RangeSeparator => {
                validate_separator(value)?;
                self.range_separator = Some(value.to_string());
            }
            ConfigKey::Timezone => {
                parse_timezone(value)?;
                self.timezone = Some(value.to_string());
            }
            ConfigKey::DefaultWindow => {
                let window = parse_window(value)?;
                self.default_window = Some(window.to_string());
            }
        }
        Ok(())
    }

    /// The configured default window, if any.
    pub fn default_window(&self) -> Result<Option<Duration>> {
        self.default_window.as_deref().map(parse_window).transpose()
    }
}

/// Config path: `--config`, then `LOGSENE_CONFIG`, then the user config dir.
pub fn resolve_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| anyhow!("could not determine the user config directory; pass --config"))
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow!("unknown timezone '{name}': expected an IANA name such as Europe/Berlin"))
}

fn parse_window(value: &str) -> Result<Duration> {
    let window = parse_duration(value)?;
    if window.is_zero() {
        bail!("default window must be longer than zero");
    }
    Ok(window)
}

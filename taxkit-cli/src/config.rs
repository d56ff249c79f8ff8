use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taxkit_core::time::{DEFAULT_TIMEZONE, parse_timezone};
use taxkit_ecount::{EcountConfig, PartialEcountConfig};

use crate::state::{ensure_taxkit_home, taxkit_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSection,
    pub ecount: PartialEcountConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA name; every "now" is read in this zone.
    pub timezone: String,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.general.timezone)
    }

    /// Credentials from the environment, falling back to `[ecount]`.
    pub fn ecount(&self) -> Result<EcountConfig> {
        Ok(self.ecount.clone().with_env().resolve()?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(taxkit_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_taxkit_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

/// Write the default config unless one exists. Returns the path and whether
/// it was created.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let p = config_path()?;
    if p.exists() {
        return Ok((p, false));
    }
    Ok((save_config(&Config::default())?, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.general.timezone, "Asia/Seoul");
        assert_eq!(cfg.ecount, PartialEcountConfig::default());
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::Asia::Seoul);
    }

    #[test]
    fn test_partial_ecount_section() {
        let cfg = parse_config(
            r#"
[general]
timezone = "Asia/Tokyo"

[ecount]
com_code = "TESTCOM"
zone = "Q"
"#,
        )
        .unwrap();
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::Asia::Tokyo);
        assert_eq!(cfg.ecount.com_code.as_deref(), Some("TESTCOM"));
        assert!(cfg.ecount.user_id.is_none());
    }

    #[test]
    fn test_default_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(s.contains("timezone = \"Asia/Seoul\""));
        let back = parse_config(&s).unwrap();
        assert_eq!(back.general.timezone, "Asia/Seoul");
    }

    #[test]
    fn test_bad_timezone() {
        let cfg = parse_config("[general]\ntimezone = \"Mars/Base\"\n").unwrap();
        assert!(cfg.timezone().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = load_config_from(Path::new("/nonexistent/taxkit/config.toml")).unwrap();
        assert_eq!(cfg.general.timezone, "Asia/Seoul");
    }
}

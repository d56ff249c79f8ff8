//! Ecount credentials: environment variables over the config file.

use serde::{Deserialize, Serialize};

use crate::error::EcountError;

pub const ENV_COM_CODE: &str = "ECOUNT_COM_CODE";
pub const ENV_USER_ID: &str = "ECOUNT_USER_ID";
pub const ENV_API_CERT_KEY: &str = "ECOUNT_API_CERT_KEY";
pub const ENV_ZONE: &str = "ECOUNT_ZONE";

/// Resolved credentials for one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcountConfig {
    pub com_code: String,
    pub user_id: String,
    pub api_cert_key: String,
    /// Server zone letter, e.g. `"Q"`; selects `sboapi{zone}.ecount.com`.
    pub zone: String,
    /// Replaces `https://sboapi{zone}.ecount.com` when set.
    pub base_url: Option<String>,
}

impl EcountConfig {
    /// API root for `zone`.
    pub fn base_url_for(&self, zone: &str) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://sboapi{zone}.ecount.com"),
        }
    }
}

/// The `[ecount]` section of the config file; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialEcountConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub com_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_cert_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PartialEcountConfig {
    /// Overlay values from `lookup` (normally the process environment).
    pub fn with_env_lookup(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            com_code: non_empty(lookup(ENV_COM_CODE)).or(self.com_code),
            user_id: non_empty(lookup(ENV_USER_ID)).or(self.user_id),
            api_cert_key: non_empty(lookup(ENV_API_CERT_KEY)).or(self.api_cert_key),
            zone: non_empty(lookup(ENV_ZONE)).or(self.zone),
            base_url: self.base_url,
        }
    }

    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Fails when any credential is still missing or blank.
    pub fn resolve(self) -> Result<EcountConfig, EcountError> {
        match (
            non_empty(self.com_code),
            non_empty(self.user_id),
            non_empty(self.api_cert_key),
            non_empty(self.zone),
        ) {
            (Some(com_code), Some(user_id), Some(api_cert_key), Some(zone)) => Ok(EcountConfig {
                com_code,
                user_id,
                api_cert_key,
                zone,
                base_url: non_empty(self.base_url),
            }),
            _ => Err(EcountError::MissingConfig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_only() {
        let cfg = PartialEcountConfig::default()
            .with_env_lookup(env(&[
                (ENV_COM_CODE, "TESTCOM"),
                (ENV_USER_ID, "testuser"),
                (ENV_API_CERT_KEY, "testapikey123"),
                (ENV_ZONE, "Q"),
            ]))
            .resolve()
            .unwrap();
        assert_eq!(cfg.com_code, "TESTCOM");
        assert_eq!(cfg.base_url_for(&cfg.zone), "https://sboapiQ.ecount.com");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = PartialEcountConfig {
            com_code: Some("FILECOM".into()),
            user_id: Some("fileuser".into()),
            api_cert_key: Some("filekey".into()),
            zone: Some("A".into()),
            base_url: None,
        };
        let cfg = file
            .with_env_lookup(env(&[(ENV_ZONE, "Z"), (ENV_USER_ID, "")]))
            .resolve()
            .unwrap();
        assert_eq!(cfg.zone, "Z");
        assert_eq!(cfg.com_code, "FILECOM");
        // blank env values do not shadow the file
        assert_eq!(cfg.user_id, "fileuser");
    }

    #[test]
    fn test_missing_field() {
        let err = PartialEcountConfig::default()
            .with_env_lookup(env(&[
                (ENV_USER_ID, "testuser"),
                (ENV_API_CERT_KEY, "testapikey123"),
                (ENV_ZONE, "Q"),
            ]))
            .resolve()
            .unwrap_err();
        assert!(err.to_string().starts_with("Missing required environment variables"));
    }

    #[test]
    fn test_base_url_override() {
        let cfg = PartialEcountConfig {
            com_code: Some("C".into()),
            user_id: Some("U".into()),
            api_cert_key: Some("K".into()),
            zone: Some("Q".into()),
            base_url: Some("http://localhost:8080/".into()),
        }
        .resolve()
        .unwrap();
        assert_eq!(cfg.base_url_for("Z"), "http://localhost:8080");
    }
}

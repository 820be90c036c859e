//! Environment-driven configuration
//!
//! The harness reads exactly two variables. Resolution happens once, before
//! any HTTP client exists, and produces an immutable [`Config`].

use std::fmt;

use reqwest::Url;

use super::{Error, Result};

/// Variable holding the root address of the service under test
pub const BASE_URL_VAR: &str = "E2E_URL";

/// Variable holding an optional bearer token
pub const TOKEN_VAR: &str = "API_TOKEN";

const BASE_URL_HINT: &str = "the base URL of the app (e.g. http://localhost:1337)";

/// Resolved harness configuration
#[derive(Clone)]
pub struct Config {
    /// Root address every request is sent to
    pub base_url: Url,
    /// Bearer token attached to every request when present
    pub auth_token: Option<String>,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn resolve() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let raw_url = non_empty(BASE_URL_VAR).ok_or(Error::MissingEnv {
            name: BASE_URL_VAR,
            hint: BASE_URL_HINT,
        })?;

        let base_url = Url::parse(raw_url.trim()).map_err(|e| Error::InvalidEnv {
            name: BASE_URL_VAR,
            value: raw_url.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidEnv {
                name: BASE_URL_VAR,
                value: raw_url,
                reason: "not a base URL".to_string(),
            });
        }

        Ok(Self {
            base_url,
            auth_token: non_empty(TOKEN_VAR),
        })
    }

    /// Base address as the user wrote it, without a trailing slash
    pub fn target(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_base_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv { name: "E2E_URL", .. }));
        assert!(err.to_string().contains("E2E_URL"));
    }

    #[test]
    fn test_empty_base_url_is_missing() {
        let err = Config::from_lookup(lookup(&[("E2E_URL", "  ")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv { .. }));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Config::from_lookup(lookup(&[("E2E_URL", "localhost 1337")])).unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { name: "E2E_URL", .. }));
    }

    #[test]
    fn test_token_optional() {
        let config = Config::from_lookup(lookup(&[("E2E_URL", "http://localhost:1337")])).unwrap();
        assert_eq!(config.target(), "http://localhost:1337");
        assert!(config.auth_token.is_none());

        let config = Config::from_lookup(lookup(&[
            ("E2E_URL", "http://localhost:1337"),
            ("API_TOKEN", ""),
        ]))
        .unwrap();
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_token_present() {
        let config = Config::from_lookup(lookup(&[
            ("E2E_URL", "https://api.example.com/"),
            ("API_TOKEN", "s3cret"),
        ]))
        .unwrap();
        assert_eq!(config.auth_token.as_deref(), Some("s3cret"));
        assert_eq!(config.target(), "https://api.example.com");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup(&[
            ("E2E_URL", "http://localhost:1337"),
            ("API_TOKEN", "s3cret"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}

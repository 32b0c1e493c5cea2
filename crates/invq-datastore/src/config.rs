//! Datastore connection settings.

use std::env;

use crate::error::{DatastoreError, Result};

/// Environment variable holding the datastore base URL.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the service role key.
pub const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Where the datastore lives and how to authenticate against it.
#[derive(Clone, PartialEq, Eq)]
pub struct DatastoreConfig {
    url: String,
    service_role_key: String,
}

impl DatastoreConfig {
    /// Trailing `/` characters are removed from `url`.
    pub fn new(url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`. Empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(DatastoreError::MissingEnv(name))
        };

        Ok(Self::new(require(URL_VAR)?, require(KEY_VAR)?))
    }

    /// Base URL without trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn service_role_key(&self) -> &str {
        &self.service_role_key
    }
}

// Keeps the key out of logs
impl std::fmt::Debug for DatastoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = DatastoreConfig::from_lookup(lookup(&[
            (URL_VAR, "https://db.example.com//"),
            (KEY_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.url(), "https://db.example.com");
        assert_eq!(config.service_role_key(), "secret");
    }

    #[test]
    fn test_missing_variable_is_named() {
        let err = DatastoreConfig::from_lookup(lookup(&[(URL_VAR, "https://db.example.com")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "SUPABASE_SERVICE_ROLE_KEY must be set");

        let err = DatastoreConfig::from_lookup(lookup(&[(URL_VAR, "  "), (KEY_VAR, "secret")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "SUPABASE_URL must be set");
    }

    #[test]
    fn test_debug_hides_key() {
        let config = DatastoreConfig::new("https://db.example.com", "secret");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}

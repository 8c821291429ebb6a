//! Client configuration and multi-tenancy addressing

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

const ENV_BASE_URL: &str = "MERIDIAN_FHIR_BASE_URL";
const ENV_OAUTH_CLIENT_ID: &str = "MERIDIAN_OAUTH_CLIENT_ID";
const ENV_TOKEN: &str = "MERIDIAN_TOKEN";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`FhirClient`](crate::FhirClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the FHIR server, without a trailing slash
    pub base_url: String,

    /// OAuth client id, used by the surrounding auth flow
    pub oauth_client_id: Option<String>,

    /// Bearer token attached to every request when present
    pub token: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            oauth_client_id: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `MERIDIAN_FHIR_BASE_URL` is required; `MERIDIAN_OAUTH_CLIENT_ID` and
    /// `MERIDIAN_TOKEN` are optional.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(ENV_BASE_URL)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_BASE_URL)))?;

        let mut config = Self::new(base_url);
        config.oauth_client_id = env::var(ENV_OAUTH_CLIENT_ID).ok();
        config.token = env::var(ENV_TOKEN).ok();
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Tenant/project pair selecting a backend data partition.
///
/// Derived from hostnames of the form `tenant_project.domain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub tenant: String,
    pub project: String,
}

impl Partition {
    /// Parse the partition out of a hostname's first label.
    pub fn from_hostname(hostname: &str) -> Result<Self> {
        let label = hostname
            .split('.')
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::Config(format!("Invalid hostname: '{}'", hostname)))?;

        match label.split_once('_') {
            Some((tenant, project)) if !tenant.is_empty() && !project.is_empty() => Ok(Self {
                tenant: tenant.to_string(),
                project: project.to_string(),
            }),
            _ => Err(Error::Config(format!(
                "Hostname '{}' does not carry a tenant_project label",
                hostname
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_from_hostname() {
        let partition = Partition::from_hostname("acme_staging.meridian.example").unwrap();
        assert_eq!(
            partition,
            Partition {
                tenant: "acme".to_string(),
                project: "staging".to_string(),
            }
        );
    }

    #[test]
    fn partition_rejects_plain_hostnames() {
        assert!(Partition::from_hostname("meridian.example").is_err());
        assert!(Partition::from_hostname("_project.example").is_err());
        assert!(Partition::from_hostname("tenant_.example").is_err());
        assert!(Partition::from_hostname("").is_err());
    }

    #[test]
    fn config_strips_trailing_slash() {
        let config = ClientConfig::new("https://fhir.example/r4/");
        assert_eq!(config.base_url, "https://fhir.example/r4");
    }
}

//! Environment settings for the Coffee Shop client.
//!
//! One immutable record per deployment target. Records come either from the
//! built-in [`Target`] table or from a YAML/JSON file, with deploy-time
//! overrides taken from environment variables.

pub mod active;
mod auth0;
mod error;
mod target;

pub use auth0::Auth0Config;
pub use error::EnvironmentError;
pub use target::{TARGET_ENV_VAR, Target};

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::{debug, warn};
use url::{Host, Url};

/// Variable overriding `apiServerUrl` at load time.
pub const API_SERVER_URL_ENV_VAR: &str = "API_SERVER_URL";

/// Environment settings record.
///
/// Serialized shape:
/// `{ production, apiServerUrl, auth0: { url, audience, clientId, callbackURL } }`.
/// Fields are only readable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    /// Deployment mode flag.
    production: bool,
    /// Base URL of the backend API.
    #[serde(rename = "apiServerUrl")]
    api_server_url: String,
    /// Identity-provider settings.
    auth0: Auth0Config,
}

impl Environment {
    pub(crate) fn new(production: bool, api_server_url: &str, auth0: Auth0Config) -> Self {
        Self {
            production,
            api_server_url: api_server_url.to_string(),
            auth0,
        }
    }

    pub fn production(&self) -> bool {
        self.production
    }

    pub fn api_server_url(&self) -> &str {
        &self.api_server_url
    }

    pub fn auth0(&self) -> &Auth0Config {
        &self.auth0
    }

    /// Load an environment file.
    ///
    /// Parses the file as JSON when it has a `.json` extension and as YAML
    /// otherwise, then applies overrides from `API_SERVER_URL` and `AUTH0_*`
    /// process variables and validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvironmentError> {
        Self::load_with(path, |key| env::var(key).ok())
    }

    /// Same as [`Environment::load`], reading overrides through `lookup`.
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self, EnvironmentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut environment: Environment = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        environment.apply_overrides(lookup);
        environment.validate()?;

        debug!(path = %path.display(), json = is_json, "environment file loaded");
        Ok(environment)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, EnvironmentError> {
        let environment: Environment = serde_yaml::from_str(yaml)?;
        environment.validate()?;
        Ok(environment)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, EnvironmentError> {
        let environment: Environment = serde_json::from_str(json)?;
        environment.validate()?;
        Ok(environment)
    }

    pub fn to_json(&self) -> Result<String, EnvironmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, EnvironmentError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Replace values from deploy-time variables. Empty values are skipped.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_SERVER_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_server_url = url;
        }

        self.auth0.apply_overrides(&lookup);
    }

    /// Validate the record.
    fn validate(&self) -> Result<(), EnvironmentError> {
        let fields = [
            ("apiServerUrl", self.api_server_url()),
            ("auth0.url", self.auth0.url()),
            ("auth0.audience", self.auth0.audience()),
            ("auth0.clientId", self.auth0.client_id()),
            ("auth0.callbackURL", self.auth0.callback_url()),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(EnvironmentError::Validation(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        let api_server_url = parse_http_url("apiServerUrl", self.api_server_url())?;
        parse_http_url("auth0.callbackURL", self.auth0.callback_url())?;

        // Allowed, but almost always a copy-paste from the development file.
        if self.production && is_loopback(&api_server_url) {
            warn!(
                api_server_url = %self.api_server_url,
                "production environment points at a loopback api server"
            );
        }

        Ok(())
    }
}

/// Parse `value` as an absolute http(s) url with a host.
fn parse_http_url(name: &str, value: &str) -> Result<Url, EnvironmentError> {
    let url = Url::parse(value).map_err(|e| {
        EnvironmentError::Validation(format!("{} is not a valid url ({}): {}", name, e, value))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(EnvironmentError::Validation(format!(
            "{} must use http or https, got {}",
            name, value
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(EnvironmentError::Validation(format!(
            "{} has no host: {}",
            name, value
        )));
    }

    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

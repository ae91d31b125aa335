//! Identity-provider settings.

use serde::{Deserialize, Serialize};

/// Auth0 settings used by the client to start the login redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Auth0Config {
    /// Tenant domain prefix.
    url: String,
    /// API identifier tokens are issued for.
    audience: String,
    /// Public client id assigned to the app.
    #[serde(rename = "clientId")]
    client_id: String,
    /// Where Auth0 redirects after login.
    #[serde(rename = "callbackURL")]
    callback_url: String,
}

impl Auth0Config {
    pub(crate) fn new(url: &str, audience: &str, client_id: &str, callback_url: &str) -> Self {
        Self {
            url: url.to_string(),
            audience: audience.to_string(),
            client_id: client_id.to_string(),
            callback_url: callback_url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Replace fields from `AUTH0_*` variables. Only reachable while loading.
    pub(super) fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut String); 4] = [
            ("AUTH0_URL", &mut self.url),
            ("AUTH0_AUDIENCE", &mut self.audience),
            ("AUTH0_CLIENT_ID", &mut self.client_id),
            ("AUTH0_CALLBACK_URL", &mut self.callback_url),
        ];

        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
    }
}

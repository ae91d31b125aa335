//! Deployment targets and their built-in environment records.

use std::{env, fmt, str::FromStr};

use super::{Auth0Config, Environment, EnvironmentError};

/// Variable consulted by [`Target::from_env`].
pub const TARGET_ENV_VAR: &str = "APP_ENV";

const AUTH0_URL: &str = "welcom.us";
const AUTH0_AUDIENCE: &str = "coffe";
const AUTH0_CLIENT_ID: &str = "yvmIs3K2C5xklOTM4Moh3e00Sk8e8qTK";

/// Build target selecting one environment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Development,
    Production,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Development, Target::Production];

    /// Read the target from `APP_ENV`, falling back to development when unset.
    pub fn from_env() -> Result<Self, EnvironmentError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Target::from_env`], reading `APP_ENV` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvironmentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(TARGET_ENV_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Development => "development",
            Target::Production => "production",
        }
    }

    /// Built-in record for this target.
    pub fn environment(&self) -> Environment {
        match self {
            Target::Development => Environment::new(
                false,
                "http://127.0.0.1:5000",
                Auth0Config::new(
                    AUTH0_URL,
                    AUTH0_AUDIENCE,
                    AUTH0_CLIENT_ID,
                    "http://localhost:8100",
                ),
            ),
            Target::Production => Environment::new(
                true,
                "https://api.coffeeshop.example",
                Auth0Config::new(
                    AUTH0_URL,
                    AUTH0_AUDIENCE,
                    AUTH0_CLIENT_ID,
                    "https://coffeeshop.example",
                ),
            ),
        }
    }
}

impl FromStr for Target {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Target::Development),
            "production" | "prod" => Ok(Target::Production),
            other => Err(EnvironmentError::UnknownTarget(other.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

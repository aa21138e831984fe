//! Configuration management.

use std::net::SocketAddr;

use daybook_auth::AuthConfig;
use daybook_db::DbConfig;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

/// Application settings.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Server bind address.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseSettings,
    /// Authentication settings. The signing secrets carry no defaults;
    /// a missing secret fails extraction and aborts startup.
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DbConfig::default();
        Self {
            endpoint: defaults.endpoint,
            namespace: defaults.namespace,
            database: defaults.database,
            username: defaults.username,
            password: defaults.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret for access tokens. Mandatory.
    pub access_token_secret: String,
    /// HMAC secret for refresh tokens. Mandatory, and should differ
    /// from the access secret.
    pub refresh_token_secret: String,
    #[serde(default = "default_access_lifetime")]
    pub access_token_lifetime_secs: u64,
    #[serde(default = "default_refresh_lifetime")]
    pub refresh_token_lifetime_secs: u64,
}

fn default_bind_addr() -> SocketAddr {
    "127.0.0.1:3001".parse().unwrap()
}

fn default_access_lifetime() -> u64 {
    900 // 15 minutes
}

fn default_refresh_lifetime() -> u64 {
    604_800 // 7 days
}

impl Settings {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            endpoint: self.database.endpoint.clone(),
            namespace: self.database.namespace.clone(),
            database: self.database.database.clone(),
            username: self.database.username.clone(),
            password: self.database.password.clone(),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            access_token_secret: self.auth.access_token_secret.clone(),
            refresh_token_secret: self.auth.refresh_token_secret.clone(),
            access_token_lifetime_secs: self.auth.access_token_lifetime_secs,
            refresh_token_lifetime_secs: self.auth.refresh_token_lifetime_secs,
        }
    }
}

/// Load settings from `daybook.toml` and `DAYBOOK_`-prefixed
/// environment variables (e.g. `DAYBOOK_AUTH__ACCESS_TOKEN_SECRET`).
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = Figment::new()
        .merge(Toml::file("daybook.toml"))
        .merge(Env::prefixed("DAYBOOK_").split("__"))
        .extract()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn secrets_are_mandatory() {
        Jail::expect_with(|_jail| {
            let result: Result<Settings, _> = Figment::new()
                .merge(Env::prefixed("DAYBOOK_").split("__"))
                .extract();
            assert!(result.is_err(), "startup must fail without secrets");
            Ok(())
        });
    }

    #[test]
    fn settings_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("DAYBOOK_AUTH__ACCESS_TOKEN_SECRET", "s1");
            jail.set_env("DAYBOOK_AUTH__REFRESH_TOKEN_SECRET", "s2");

            let settings: Settings = Figment::new()
                .merge(Env::prefixed("DAYBOOK_").split("__"))
                .extract()?;

            assert_eq!(settings.auth.access_token_secret, "s1");
            assert_eq!(settings.auth.refresh_token_secret, "s2");
            // Lifetimes fall back to their defaults.
            assert_eq!(settings.auth.access_token_lifetime_secs, 900);
            assert_eq!(settings.auth.refresh_token_lifetime_secs, 604_800);
            Ok(())
        });
    }
}

//! Discord credentials and registration settings, read from the environment.
//!
//! `DISCORD_TOKEN` and `CLIENT_ID` are required. `DEV_GUILD_ID` is optional: when set,
//! commands are registered in that guild only, which Discord applies immediately.

use crate::errors::{Error, Result};

/// Settings needed to connect the bot to Discord.
#[derive(Clone)]
pub struct DiscordConfig {
    /// Bot authentication token
    pub token: String,
    /// Application (client) id
    pub application_id: u64,
    /// Guild used for fast command registration during development
    pub dev_guild_id: Option<u64>,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("dev_guild_id", &self.dev_guild_id)
            .finish()
    }
}

impl DiscordConfig {
    /// Loads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config {
                message: "DISCORD_TOKEN is not set".to_string(),
            })?;

        let application_id = lookup("CLIENT_ID")
            .ok_or_else(|| Error::Config {
                message: "CLIENT_ID is not set".to_string(),
            })
            .and_then(|raw| parse_id("CLIENT_ID", &raw))?;

        let dev_guild_id = lookup("DEV_GUILD_ID")
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_id("DEV_GUILD_ID", &raw))
            .transpose()?;

        Ok(Self {
            token,
            application_id,
            dev_guild_id,
        })
    }
}

fn parse_id(key: &str, raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::Config {
            message: format!("{key} must be a Discord snowflake, got '{raw}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_loads_required_values() {
        let config = DiscordConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "secret"),
            ("CLIENT_ID", "123456789012345678"),
        ]))
        .unwrap();

        assert_eq!(config.token, "secret");
        assert_eq!(config.application_id, 123_456_789_012_345_678);
        assert!(config.dev_guild_id.is_none());
    }

    #[test]
    fn test_dev_guild_is_optional_but_validated() {
        let config = DiscordConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "secret"),
            ("CLIENT_ID", "42"),
            ("DEV_GUILD_ID", "77"),
        ]))
        .unwrap();
        assert_eq!(config.dev_guild_id, Some(77));

        let result = DiscordConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "secret"),
            ("CLIENT_ID", "42"),
            ("DEV_GUILD_ID", "not-a-guild"),
        ]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_token_or_client_id() {
        let result = DiscordConfig::from_lookup(lookup_from(&[("CLIENT_ID", "42")]));
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = DiscordConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "secret")]));
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = DiscordConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "secret"),
            ("CLIENT_ID", "0"),
        ]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DiscordConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "very-secret-token"),
            ("CLIENT_ID", "42"),
        ]))
        .unwrap();

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret-token"));
    }
}

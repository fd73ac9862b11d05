//! Initial stock loading from config.toml
//!
//! The items listed in config.toml are inserted on startup when they are not in the
//! database yet. Existing rows are never touched, so restarting the bot does not
//! add the seed quantities a second time.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the seed file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Items to seed
    #[serde(default)]
    pub items: Vec<ItemSeed>,
}

/// One seeded item
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ItemSeed {
    /// Item name
    pub name: String,
    /// Starting quantity
    pub quantity: i64,
}

/// Parses a seed configuration from TOML text.
///
/// # Errors
/// Returns an error if:
/// - The TOML syntax is invalid
/// - An item name is blank
/// - A quantity is negative
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    for seed in &config.items {
        if seed.name.trim().is_empty() {
            return Err(Error::Config {
                message: "Seed item name cannot be empty".to_string(),
            });
        }
        if seed.quantity < 0 {
            return Err(Error::Config {
                message: format!(
                    "Seed item '{}' has negative quantity {}",
                    seed.name, seed.quantity
                ),
            });
        }
    }

    Ok(config)
}

/// Loads the seed configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Loads ./config.toml when it exists; a missing file means nothing to seed.
pub fn load_default_config() -> Result<Config> {
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)
    } else {
        tracing::debug!("No {DEFAULT_CONFIG_PATH} found, skipping stock seeding");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_item_config() {
        let toml_str = r#"
            [[items]]
            name = "Sword"
            quantity = 5

            [[items]]
            name = "Shield"
            quantity = 0
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[0].name, "Sword");
        assert_eq!(config.items[0].quantity, 5);
        assert_eq!(config.items[1].quantity, 0);
    }

    #[test]
    fn test_empty_file_has_no_items() {
        let config = parse_config("").unwrap();
        assert!(config.items.is_empty());
    }

    #[test]
    fn test_rejects_invalid_seeds() {
        let negative = r#"
            [[items]]
            name = "Sword"
            quantity = -1
        "#;
        assert!(matches!(parse_config(negative), Err(Error::Config { .. })));

        let blank = r#"
            [[items]]
            name = "  "
            quantity = 1
        "#;
        assert!(matches!(parse_config(blank), Err(Error::Config { .. })));

        assert!(matches!(
            parse_config("items = 3"),
            Err(Error::Config { .. })
        ));
    }
}

/// Database configuration and connection management
pub mod database;

/// Discord credentials from environment variables
pub mod discord;

/// Initial stock loading from config.toml
pub mod inventory;

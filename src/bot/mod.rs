//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the inventory: slash commands,
//! autocomplete handlers, embed builders and the framework setup.

/// Discord command implementations (inventory, general)
pub mod commands;
/// Reply and menu builders
pub mod components;
/// Poise framework setup and client lifecycle
pub mod framework;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::core::removal::PendingRemovals;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared data available to all bot commands.
///
/// Built once in `main` and handed to the framework; nothing here is global.
pub struct BotData {
    /// Database connection for all inventory operations
    pub database: DatabaseConnection,
    /// Removal flows currently waiting for user input
    pub removals: Arc<PendingRemovals>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and an
    /// empty removal registry.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            removals: PendingRemovals::new(),
        }
    }
}

pub use commands::*;
pub use framework::run_bot;

//! Unified error type for the estoque bot.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants group into the
//! failure classes the bot reports to users: validation, storage, not-found, and the
//! ambient configuration and Discord errors raised during startup.

use poise::serenity_prelude as serenity;
use thiserror::Error;

/// All errors produced by the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying storage failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Quantity argument was zero or negative
    #[error("Invalid quantity: {quantity} (must be greater than zero)")]
    InvalidQuantity {
        /// The rejected value
        quantity: i64,
    },

    /// Adding would push the stored total past `i64::MAX`
    #[error("Adding {quantity} to {name} would overflow the stored quantity")]
    QuantityOverflow {
        /// Item name
        name: String,
        /// Units the caller tried to add
        quantity: i64,
    },

    /// Item name was empty after trimming
    #[error("Item name cannot be empty")]
    InvalidItemName,

    /// Item is not (or no longer) in the inventory
    #[error("Item not found: {name}")]
    ItemNotFound {
        /// Requested item name
        name: String,
    },

    /// A removal flow was driven out of order
    #[error("Removal flow {flow_id} cannot {action} while {state}")]
    InvalidFlowState {
        /// Correlation id of the flow
        flow_id: u64,
        /// Attempted transition
        action: &'static str,
        /// Current state name
        state: &'static str,
    },

    /// Serenity/Poise framework error
    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

//! Core business logic - framework-agnostic inventory, removal flow and reply formatting.

/// Command handlers shared by the Discord layer
pub mod commands;
/// Inventory store operations
pub mod inventory;
/// Interactive removal state machine
pub mod removal;
/// Reply formatting
pub mod reply;

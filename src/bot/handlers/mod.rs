//! Discord interaction handlers
//!
//! Handlers for interactions that are not commands themselves, such as autocomplete.

/// Autocomplete handlers for item names
pub mod autocomplete;

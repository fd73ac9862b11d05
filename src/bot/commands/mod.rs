//! Discord command implementations organized by category.

/// General utility commands
pub mod general;

/// Inventory commands
pub mod inventory;

// Export commands
pub use general::*;
pub use inventory::*;

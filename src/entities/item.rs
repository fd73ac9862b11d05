//! Inventory item entity - one row per named item in the shared stock.
//!
//! The table and column names (`estoque`, `item`, `quantidade`) are kept stable so
//! existing databases created by earlier versions of the bot keep working.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "estoque")]
pub struct Model {
    /// Item name, case-sensitive and unique
    #[sea_orm(primary_key, auto_increment = false, column_name = "item")]
    pub name: String,
    /// Units currently in stock
    #[sea_orm(column_name = "quantidade")]
    pub quantity: i64,
}

/// Inventory items have no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

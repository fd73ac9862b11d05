//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and filling it with stock.

use crate::{core::inventory, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the `estoque` table initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database holding the given `(name, quantity)` rows.
///
/// Zero quantities are stored through seeding, since `upsert_add` only accepts
/// positive amounts.
pub async fn setup_with_stock(stock: &[(&str, i64)]) -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    for (name, quantity) in stock {
        if *quantity > 0 {
            inventory::upsert_add(&db, name, *quantity).await?;
        } else {
            let seed = crate::config::inventory::ItemSeed {
                name: (*name).to_string(),
                quantity: *quantity,
            };
            inventory::seed_items(&db, &[seed]).await?;
        }
    }
    Ok(db)
}

/// Current stock of `name`, or `None` if the item does not exist.
pub async fn stock_of(db: &DatabaseConnection, name: &str) -> Result<Option<i64>> {
    Ok(inventory::get_item(db, name).await?.map(|item| item.quantity))
}

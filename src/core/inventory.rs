//! Inventory business logic - the shared stock of named items.
//!
//! Every mutation is a single SQL statement so the storage engine's own atomicity is
//! enough; no locking or multi-statement transactions are involved. Rows that reach
//! zero stay in the table with quantity `0`.

use crate::{
    config::inventory::ItemSeed,
    entities::{Item, item},
    errors::{Error, Result},
};
use sea_orm::{
    QueryOrder, Set,
    prelude::*,
    sea_query::{Expr, OnConflict},
};
use tracing::{debug, instrument};

fn normalize_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidItemName);
    }
    Ok(trimmed)
}

fn validate_quantity(quantity: i64) -> Result<i64> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(quantity)
}

/// Adds `delta` units of `name`, creating the item if it does not exist yet.
///
/// Runs as one `INSERT ... ON CONFLICT(item) DO UPDATE SET quantidade = quantidade + delta`
/// and then reads the row back so callers can report the resulting stock. The update only
/// applies while `quantidade <= i64::MAX - delta`; `SQLite` would otherwise store the
/// overflowing sum as a REAL.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - `delta` is zero or negative
/// - The new total would not fit in an `i64`
/// - The database operation fails
#[instrument(skip(db))]
pub async fn upsert_add<C>(db: &C, name: &str, delta: i64) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    let name = normalize_name(name)?;
    let delta = validate_quantity(delta)?;

    let row = item::ActiveModel {
        name: Set(name.to_string()),
        quantity: Set(delta),
    };

    let affected = Item::insert(row)
        .on_conflict(
            OnConflict::column(item::Column::Name)
                .value(
                    item::Column::Quantity,
                    Expr::col((Item, item::Column::Quantity)).add(delta),
                )
                .action_and_where(
                    Expr::col((Item, item::Column::Quantity)).lte(i64::MAX - delta),
                )
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if affected == 0 {
        return Err(Error::QuantityOverflow {
            name: name.to_string(),
            quantity: delta,
        });
    }

    let updated = get_item(db, name)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            name: name.to_string(),
        })?;

    debug!(item = %updated.name, quantity = updated.quantity, "stock added");
    Ok(updated)
}

/// Removes `amount` units of `name` only if at least that many are in stock.
///
/// Returns `true` when the row was decremented and `false` when the item does not
/// exist or has fewer than `amount` units. Stock never goes negative.
///
/// # Errors
/// Returns an error if `amount` is zero or negative, or the database update fails.
#[instrument(skip(db))]
pub async fn conditional_subtract<C>(db: &C, name: &str, amount: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let name = normalize_name(name)?;
    let amount = validate_quantity(amount)?;

    let result = Item::update_many()
        .col_expr(
            item::Column::Quantity,
            Expr::col(item::Column::Quantity).sub(amount),
        )
        .filter(item::Column::Name.eq(name))
        .filter(item::Column::Quantity.gte(amount))
        .exec(db)
        .await?;

    let changed = result.rows_affected == 1;
    debug!(item = %name, amount, changed, "conditional subtract");
    Ok(changed)
}

/// Snapshot of every item, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_items<C>(db: &C) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .order_by_asc(item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up a single item by exact (case-sensitive) name.
///
/// # Errors
/// Returns an error if the name is blank or the database query fails.
pub async fn get_item<C>(db: &C, name: &str) -> Result<Option<item::Model>>
where
    C: ConnectionTrait,
{
    let name = normalize_name(name)?;
    Item::find_by_id(name.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts the seed items that are not stored yet and returns how many were added.
///
/// # Errors
/// Returns an error if the database insert fails.
pub async fn seed_items<C>(db: &C, seeds: &[ItemSeed]) -> Result<u64>
where
    C: ConnectionTrait,
{
    let rows: Vec<item::ActiveModel> = seeds
        .iter()
        .filter(|seed| !seed.name.trim().is_empty() && seed.quantity >= 0)
        .map(|seed| item::ActiveModel {
            name: Set(seed.name.trim().to_string()),
            quantity: Set(seed.quantity),
        })
        .collect();

    if rows.is_empty() {
        return Ok(0);
    }

    let inserted = Item::insert_many(rows)
        .on_conflict(OnConflict::column(item::Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    Ok(inserted)
}

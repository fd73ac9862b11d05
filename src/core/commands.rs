//! Framework-agnostic command handlers.
//!
//! Each handler maps one slash command onto the inventory and returns the [`Reply`] to
//! send. Bad input becomes a warning reply; storage failures are returned as errors so
//! the framework error hook can log them and answer with a generic failure.

use crate::{
    core::{
        inventory,
        reply::{self, Reply},
    },
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::warn;

/// `/add item quantity`
///
/// # Errors
/// Returns an error if the database operation fails.
pub async fn add<C>(db: &C, item: &str, quantity: i64) -> Result<Reply>
where
    C: ConnectionTrait,
{
    match inventory::upsert_add(db, item, quantity).await {
        Ok(model) => Ok(reply::item_added(&model, quantity)),
        Err(Error::InvalidQuantity { quantity }) => {
            warn!(item, quantity, "rejected add with invalid quantity");
            Ok(reply::invalid_quantity(quantity))
        }
        Err(Error::InvalidItemName) => {
            warn!("rejected add with empty item name");
            Ok(reply::invalid_item_name())
        }
        Err(Error::QuantityOverflow { name, quantity }) => {
            warn!(item = %name, quantity, "rejected add that would overflow the stock");
            Ok(reply::quantity_overflow(&name, quantity))
        }
        Err(e) => Err(e),
    }
}

/// `/list`
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list<C>(db: &C) -> Result<Reply>
where
    C: ConnectionTrait,
{
    let items = inventory::list_items(db).await?;
    Ok(reply::inventory_listing(&items))
}

/// `/check item`
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn check<C>(db: &C, item: &str) -> Result<Reply>
where
    C: ConnectionTrait,
{
    match inventory::get_item(db, item).await {
        Ok(Some(model)) => Ok(reply::item_found(&model)),
        Ok(None) => Ok(reply::item_not_found(item.trim())),
        Err(Error::InvalidItemName) => Ok(reply::invalid_item_name()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        removal::{self, RemovalOutcome},
        reply::Tone,
    };
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    fn query_failure() -> DbErr {
        DbErr::Query(RuntimeErr::Internal("database is locked".into()))
    }

    #[tokio::test]
    async fn test_add_twice_then_check() -> Result<()> {
        let db = setup_test_db().await?;

        add(&db, "Sword", 5).await?;
        let second = add(&db, "Sword", 3).await?;
        assert_eq!(second.tone, Tone::Success);

        let checked = check(&db, "Sword").await?;
        assert_eq!(checked.description, "**Sword** tem **8** unidades.");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_invalid_quantity_replies_without_mutation() -> Result<()> {
        let db = setup_test_db().await?;

        let reply = add(&db, "Sword", 0).await?;
        assert_eq!(reply.tone, Tone::Warning);
        assert_eq!(reply.title, "Quantidade Inválida");

        let reply = add(&db, "  ", 2).await?;
        assert_eq!(reply.title, "Nome Inválido");

        assert!(inventory::list_items(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_past_the_stock_limit_is_a_warning() -> Result<()> {
        let db = setup_with_stock(&[("Sword", i64::MAX - 1)]).await?;

        let reply = add(&db, "Sword", 2).await?;
        assert_eq!(reply.tone, Tone::Warning);
        assert!(reply.description.contains("**Sword**"));

        let checked = check(&db, "Sword").await?;
        assert!(checked.description.contains(&format!("**{}**", i64::MAX - 1)));
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_errors_reach_the_caller() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal("database is locked".into()))])
            .append_query_errors([query_failure(), query_failure()])
            .into_connection();

        assert!(matches!(add(&db, "Sword", 5).await, Err(Error::Database(_))));
        assert!(matches!(list(&db).await, Err(Error::Database(_))));
        assert!(matches!(check(&db, "Sword").await, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_empty_inventory() -> Result<()> {
        let db = setup_test_db().await?;

        let reply = list(&db).await?;
        assert_eq!(reply.title, "Estoque Vazio");
        assert!(!reply.description.contains("**"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_every_item() -> Result<()> {
        let db = setup_with_stock(&[("Sword", 8), ("Axe", 1)]).await?;

        let reply = list(&db).await?;
        assert_eq!(reply.description, "**Axe**: 1\n**Sword**: 8");
        Ok(())
    }

    #[tokio::test]
    async fn test_check_unknown_item_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let reply = check(&db, "Sword").await?;
        assert_eq!(reply.title, "Item Não Encontrado");
        assert!(!reply.description.contains('0'));
        Ok(())
    }

    #[tokio::test]
    async fn test_check_zero_stock_reports_zero() -> Result<()> {
        let db = setup_with_stock(&[("Sword", 0)]).await?;

        let reply = check(&db, "Sword").await?;
        assert_eq!(reply.title, "📦 Verificação de Item");
        assert!(reply.description.contains("**0**"));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_scenario_success() -> Result<()> {
        let db = setup_test_db().await?;
        add(&db, "Sword", 8).await?;

        let mut flow = removal::begin_removal(&db, 42, 1, 2).await?.unwrap();
        flow.select(1, "Sword")?;
        let filter = flow.reply_filter()?;
        let quantity = filter.quantity(1, 2, "3");
        let outcome = flow.resolve(&db, quantity).await?;

        let RemovalOutcome::Removed { item, quantity } = &outcome else {
            panic!("expected removal, got {outcome:?}");
        };
        let message = reply::removal_success(item, *quantity);
        assert!(message.description.contains("Sword"));
        assert!(message.description.contains("**3**"));

        let checked = check(&db, "Sword").await?;
        assert!(checked.description.contains("**5**"));
        Ok(())
    }
}

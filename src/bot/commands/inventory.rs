//! Inventory Discord commands - `add`, `remove`, `list` and `check`.
//!
//! `add`, `list` and `check` delegate to [`crate::core::commands`] and send the returned
//! reply. `remove` drives the interactive removal flow: select menu first, then a
//! numeric chat message collected for at most 30 seconds.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, components, handlers::autocomplete},
        core::{
            commands as handlers,
            removal::{self, RemovalStart},
            reply,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::debug;

    /// Adds units of an item to the inventory, creating it if needed.
    #[poise::command(slash_command)]
    pub async fn add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Nome do item"] item: String,
        #[description = "Quantidade do item"]
        #[min = 1]
        quantity: i64,
    ) -> Result<()> {
        let reply = handlers::add(&ctx.data().database, &item, quantity).await?;
        ctx.send(components::create_reply(&reply)).await?;
        Ok(())
    }

    /// Lists every item in the inventory.
    #[poise::command(slash_command)]
    pub async fn list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let reply = handlers::list(&ctx.data().database).await?;
        ctx.send(components::create_reply(&reply)).await?;
        Ok(())
    }

    /// Shows how many units of an item are in stock.
    #[poise::command(slash_command)]
    pub async fn check(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Nome do item"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
    ) -> Result<()> {
        let reply = handlers::check(&ctx.data().database, &item).await?;
        ctx.send(components::create_reply(&reply)).await?;
        Ok(())
    }

    /// Removes units of an item: pick it from a menu, then type the quantity.
    #[poise::command(slash_command)]
    pub async fn remove(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id;
        let channel_id = ctx.channel_id();

        let start = removal::start(
            &data.database,
            &data.removals,
            ctx.id(),
            user_id.get(),
            channel_id.get(),
        )
        .await?;

        let (mut flow, _pending) = match start {
            RemovalStart::Started { flow, guard } => (flow, guard),
            RemovalStart::Empty => {
                ctx.send(components::create_reply(&reply::inventory_empty()))
                    .await?;
                return Ok(());
            }
            RemovalStart::InProgress => {
                ctx.send(components::create_reply(&reply::removal_in_progress()).ephemeral(true))
                    .await?;
                return Ok(());
            }
        };

        let (offered, total) = flow.coverage();
        let handle = ctx
            .send(
                components::create_reply(&reply::removal_menu(offered, total))
                    .components(vec![components::removal_menu(&flow)]),
            )
            .await?;

        let menu_id = flow.menu_id();
        let selection = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(user_id)
            .channel_id(channel_id)
            .filter(move |interaction| interaction.data.custom_id == menu_id)
            .timeout(removal::SELECTION_TIMEOUT)
            .await;

        let Some(interaction) = selection else {
            let outcome = flow.expire();
            handle
                .edit(
                    ctx,
                    components::create_reply(&reply::removal_outcome(&outcome)).components(vec![]),
                )
                .await?;
            return Ok(());
        };

        let selected = match &interaction.data.kind {
            serenity::ComponentInteractionDataKind::StringSelect { values } => {
                values.first().cloned().unwrap_or_default()
            }
            _ => String::new(),
        };

        let item = match flow.select(user_id.get(), &selected) {
            Ok(item) => item.to_string(),
            Err(Error::ItemNotFound { name }) => {
                interaction
                    .create_response(
                        ctx.serenity_context(),
                        serenity::CreateInteractionResponse::UpdateMessage(
                            serenity::CreateInteractionResponseMessage::new()
                                .embed(components::embed(&reply::item_not_found(&name)))
                                .components(vec![]),
                        ),
                    )
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        interaction
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(components::embed(&reply::removal_prompt(
                            &item,
                            removal::REPLY_TIMEOUT.as_secs(),
                        )))
                        .components(vec![]),
                ),
            )
            .await?;

        let filter = flow.reply_filter()?;
        let message = serenity::MessageCollector::new(ctx.serenity_context())
            .author_id(user_id)
            .channel_id(channel_id)
            .filter(move |msg| {
                filter
                    .quantity(msg.author.id.get(), msg.channel_id.get(), &msg.content)
                    .is_some()
            })
            .timeout(removal::REPLY_TIMEOUT)
            .await;

        let quantity = message.as_ref().and_then(|msg| {
            filter.quantity(msg.author.id.get(), msg.channel_id.get(), &msg.content)
        });
        debug!(flow_id = flow.id(), ?quantity, "quantity reply collected");

        let outcome = flow.resolve(&data.database, quantity).await?;
        ctx.send(components::create_reply(&reply::removal_outcome(&outcome)))
            .await?;

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

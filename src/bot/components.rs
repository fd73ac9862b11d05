//! Conversion of formatted replies and removal menus into Discord builders.

use crate::core::{removal::RemovalFlow, reply::Reply};
use poise::serenity_prelude as serenity;

/// Builds the embed for a reply.
#[must_use]
pub fn embed(reply: &Reply) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&reply.title)
        .description(&reply.description)
        .color(reply.tone.color());

    if let Some(timestamp) = reply
        .timestamp
        .and_then(|ts| serenity::Timestamp::from_unix_timestamp(ts.timestamp()).ok())
    {
        embed = embed.timestamp(timestamp);
    }

    embed
}

/// Wraps a reply's embed into a poise reply.
#[must_use]
pub fn create_reply(reply: &Reply) -> poise::CreateReply {
    poise::CreateReply::default().embed(embed(reply))
}

/// Select menu listing the items a removal flow offers.
#[must_use]
pub fn removal_menu(flow: &RemovalFlow) -> serenity::CreateActionRow {
    let options: Vec<serenity::CreateSelectMenuOption> = flow
        .choices()
        .into_iter()
        .map(|choice| serenity::CreateSelectMenuOption::new(choice.label, choice.value))
        .collect();

    let menu = serenity::CreateSelectMenu::new(
        flow.menu_id(),
        serenity::CreateSelectMenuKind::String { options },
    )
    .placeholder("Escolha um item");

    serenity::CreateActionRow::SelectMenu(menu)
}

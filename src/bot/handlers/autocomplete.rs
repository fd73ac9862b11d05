//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::BotData, core::inventory, entities::item, errors::Error};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for item names currently in stock.
///
/// Matching is case-insensitive, but the suggestions keep the stored spelling so the
/// selected value matches the item exactly.
pub async fn autocomplete_item_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(items) = inventory::list_items(&ctx.data().database).await else {
        return Vec::new();
    };

    matching_names(items, partial)
}

fn matching_names(items: Vec<item::Model>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    items
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&partial_lower))
        .map(|item| item.name)
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(names: &[&str]) -> Vec<item::Model> {
        names
            .iter()
            .map(|name| item::Model {
                name: (*name).to_string(),
                quantity: 1,
            })
            .collect()
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let names = matching_names(stock(&["Sword", "Long Sword", "Shield"]), "sWo");
        assert_eq!(names, vec!["Sword".to_string(), "Long Sword".to_string()]);
    }

    #[test]
    fn test_empty_partial_matches_everything_up_to_limit() {
        let many: Vec<String> = (0..40).map(|i| format!("Item {i}")).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        assert_eq!(matching_names(stock(&refs), "").len(), MAX_SUGGESTIONS);
    }
}

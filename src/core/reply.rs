//! Reply formatting.
//!
//! Builds the title/description pairs the bot sends back. Everything here is pure:
//! the bot layer turns a [`Reply`] into a Discord embed, and tests can assert on
//! the text directly.

use crate::{core::removal::RemovalOutcome, entities::item};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Visual category of a reply; mapped to an embed colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Operation completed
    Success,
    /// Neutral information
    Info,
    /// User-correctable problem (bad input, missing item)
    Warning,
    /// Operation failed
    Error,
}

impl Tone {
    /// Embed colour for this tone.
    #[must_use]
    pub const fn color(self) -> u32 {
        match self {
            Self::Success => 0x002E_CC71,
            Self::Info => 0x0034_98DB,
            Self::Warning => 0x00F1_C40F,
            Self::Error => 0x00E7_4C3C,
        }
    }
}

/// A formatted reply: title, body, tone and optional timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Embed title
    pub title: String,
    /// Embed body
    pub description: String,
    /// Colour category
    pub tone: Tone,
    /// When set, shown as the embed timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl Reply {
    /// Creates a timestamped reply.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tone,
            timestamp: Some(Utc::now()),
        }
    }

    /// Drops the timestamp; used for prompts that are edited in place.
    #[must_use]
    pub fn untimed(mut self) -> Self {
        self.timestamp = None;
        self
    }
}

/// Confirmation after `add`, showing both the added amount and the new total.
#[must_use]
pub fn item_added(item: &item::Model, added: i64) -> Reply {
    let description = if item.quantity == added {
        format!("✅ **{}** adicionado com quantidade **{added}**.", item.name)
    } else {
        format!(
            "✅ **{added}** unidades de **{}** adicionadas. Total: **{}**.",
            item.name, item.quantity
        )
    };
    Reply::new("Item Adicionado", description, Tone::Success)
}

/// Rejected quantity argument.
#[must_use]
pub fn invalid_quantity(quantity: i64) -> Reply {
    Reply::new(
        "Quantidade Inválida",
        format!("⚠️ A quantidade deve ser um número inteiro maior que zero (recebido: **{quantity}**)."),
        Tone::Warning,
    )
}

/// The add would push the stock past what can be stored.
#[must_use]
pub fn quantity_overflow(name: &str, quantity: i64) -> Reply {
    Reply::new(
        "Quantidade Inválida",
        format!("⚠️ Não é possível adicionar **{quantity}** unidades de **{name}**: o total excede o limite do estoque."),
        Tone::Warning,
    )
}

/// Rejected item name.
#[must_use]
pub fn invalid_item_name() -> Reply {
    Reply::new(
        "Nome Inválido",
        "⚠️ O nome do item não pode ficar vazio.",
        Tone::Warning,
    )
}

/// The inventory has no rows.
#[must_use]
pub fn inventory_empty() -> Reply {
    Reply::new("Estoque Vazio", "📦 Nenhum item no estoque.", Tone::Warning)
}

/// One line per item, in the order given.
#[must_use]
pub fn inventory_listing(items: &[item::Model]) -> Reply {
    if items.is_empty() {
        return inventory_empty();
    }

    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("**{}**: {}", item.name, item.quantity))
        .collect();

    Reply::new("📦 Estoque Atual", lines.join("\n"), Tone::Success)
}

/// Quantity of a single item.
#[must_use]
pub fn item_found(item: &item::Model) -> Reply {
    Reply::new(
        "📦 Verificação de Item",
        format!("**{}** tem **{}** unidades.", item.name, item.quantity),
        Tone::Info,
    )
}

/// Lookup of an unknown item.
#[must_use]
pub fn item_not_found(name: &str) -> Reply {
    Reply::new(
        "Item Não Encontrado",
        format!("📦 O item **{name}** não existe no estoque."),
        Tone::Warning,
    )
}

/// Menu shown when a removal starts.
#[must_use]
pub fn removal_menu(offered: usize, total: usize) -> Reply {
    let mut description = "Selecione o item que deseja remover do estoque.".to_string();
    if offered < total {
        let _ = write!(description, "\nMostrando {offered} de {total} itens.");
    }
    Reply::new("🗑️ Remover Item", description, Tone::Info).untimed()
}

/// Asks for the quantity after an item was selected.
#[must_use]
pub fn removal_prompt(name: &str, seconds: u64) -> Reply {
    Reply::new(
        "🗑️ Remover Item",
        format!(
            "Quantas unidades de **{name}** deseja remover? Responda com um número neste canal em até {seconds} segundos."
        ),
        Tone::Info,
    )
    .untimed()
}

/// Stock decremented.
#[must_use]
pub fn removal_success(name: &str, quantity: i64) -> Reply {
    Reply::new(
        "Item Removido",
        format!("✅ **{quantity}** unidades de **{name}** removidas do estoque."),
        Tone::Success,
    )
}

/// Not enough stock, or the item vanished after the menu was shown.
#[must_use]
pub fn removal_insufficient(name: &str, requested: i64) -> Reply {
    Reply::new(
        "Estoque Insuficiente",
        format!(
            "❌ Não foi possível remover **{requested}** unidades de **{name}**: estoque insuficiente ou item inexistente."
        ),
        Tone::Error,
    )
}

/// Nothing arrived in time.
#[must_use]
pub fn removal_timeout() -> Reply {
    Reply::new(
        "Tempo Esgotado",
        "⏰ A operação expirou. Use `/remove` novamente.",
        Tone::Warning,
    )
}

/// Final message of a removal flow.
#[must_use]
pub fn removal_outcome(outcome: &RemovalOutcome) -> Reply {
    match outcome {
        RemovalOutcome::Removed { item, quantity } => removal_success(item, *quantity),
        RemovalOutcome::InsufficientStock { item, requested } => {
            removal_insufficient(item, *requested)
        }
        RemovalOutcome::TimedOut => removal_timeout(),
    }
}

/// The user already has a removal waiting for input.
#[must_use]
pub fn removal_in_progress() -> Reply {
    Reply::new(
        "Remoção em Andamento",
        "⚠️ Você já tem uma remoção em andamento. Conclua-a ou aguarde expirar.",
        Tone::Warning,
    )
}

/// Generic failure for storage and framework errors.
#[must_use]
pub fn failure(action: &str) -> Reply {
    Reply::new("Erro", format!("❌ Erro ao {action}."), Tone::Error)
}

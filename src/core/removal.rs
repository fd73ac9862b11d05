//! Interactive removal flow.
//!
//! `/remove` runs a small state machine per invocation:
//!
//! ```text
//! AwaitingSelection --select--> AwaitingQuantity --reply--> Resolved
//!         |                            |
//!         +--------- expire -----------+--- no reply ----> TimedOut
//! ```
//!
//! The flow is framework-agnostic: the bot layer feeds it the selected menu value and
//! the collected chat message, and the flow decides what the message means and performs
//! the conditional subtract. [`PendingRemovals`] keeps at most one active flow per user.

use crate::{
    core::inventory,
    entities::item,
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

/// How long the user has to type the quantity after selecting an item.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// How long the selection menu stays active.
pub const SELECTION_TIMEOUT: Duration = Duration::from_secs(120);

/// Discord accepts at most 25 options per select menu.
pub const MAX_MENU_OPTIONS: usize = 25;

/// Discord limit for option labels and values.
const MAX_OPTION_CHARS: usize = 100;

/// Prefix of the select menu custom id; the correlation id follows it.
pub const MENU_ID_PREFIX: &str = "estoque_remove_";

/// Where a flow currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalState {
    /// Menu shown, waiting for the user to pick an item
    AwaitingSelection,
    /// Item picked, waiting for a numeric chat reply
    AwaitingQuantity {
        /// Selected item name
        item: String,
    },
    /// Subtract attempted (successfully or not)
    Resolved,
    /// No selection or no reply arrived in time
    TimedOut,
}

impl RemovalState {
    const fn label(&self) -> &'static str {
        match self {
            Self::AwaitingSelection => "awaiting selection",
            Self::AwaitingQuantity { .. } => "awaiting quantity",
            Self::Resolved => "resolved",
            Self::TimedOut => "timed out",
        }
    }
}

/// Final result of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Stock decremented by exactly `quantity`
    Removed {
        /// Item name
        item: String,
        /// Units removed
        quantity: i64,
    },
    /// Item missing or had fewer than `requested` units; nothing changed
    InsufficientStock {
        /// Item name
        item: String,
        /// Units the user asked for
        requested: i64,
    },
    /// The wait expired; nothing changed
    TimedOut,
}

/// One option of the selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuChoice {
    /// Text shown to the user: name and current quantity
    pub label: String,
    /// Value sent back on selection: the item name
    pub value: String,
}

/// Decides whether a chat message is the numeric reply a flow waits for.
///
/// `Clone + 'static` so it can be moved into a message collector filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyFilter {
    user_id: u64,
    channel_id: u64,
}

impl ReplyFilter {
    /// Returns the quantity if the message comes from the flow's user in the flow's
    /// channel and its content is a positive integer.
    #[must_use]
    pub fn quantity(&self, author_id: u64, channel_id: u64, content: &str) -> Option<i64> {
        if author_id != self.user_id || channel_id != self.channel_id {
            return None;
        }
        parse_quantity(content)
    }
}

/// Parses a quantity reply. Only plain positive integers qualify.
#[must_use]
pub fn parse_quantity(content: &str) -> Option<i64> {
    content.trim().parse::<i64>().ok().filter(|q| *q > 0)
}

fn truncate_label(s: &str) -> String {
    if s.chars().count() <= MAX_OPTION_CHARS {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(MAX_OPTION_CHARS - 3).collect();
        format!("{truncated}...")
    }
}

/// One in-flight `/remove` invocation.
#[derive(Debug)]
pub struct RemovalFlow {
    id: u64,
    user_id: u64,
    channel_id: u64,
    items: Vec<item::Model>,
    total_items: usize,
    state: RemovalState,
}

/// How a `/remove` invocation begins.
#[derive(Debug)]
pub enum RemovalStart {
    /// The user already has a flow waiting for input; nothing was created
    InProgress,
    /// The inventory is empty; the user's slot was released again
    Empty,
    /// A new flow holding the user's slot until `guard` is dropped
    Started {
        /// The flow, awaiting selection
        flow: RemovalFlow,
        /// Per-user slot
        guard: PendingRemoval,
    },
}

/// Claims the user's removal slot, then reads the inventory and starts a flow.
///
/// The slot is claimed before the inventory is read.
///
/// # Errors
/// Returns an error if the inventory cannot be read; the slot is released.
pub async fn start<C>(
    db: &C,
    registry: &Arc<PendingRemovals>,
    flow_id: u64,
    user_id: u64,
    channel_id: u64,
) -> Result<RemovalStart>
where
    C: ConnectionTrait,
{
    let Some(guard) = registry.claim(user_id, flow_id) else {
        debug!(flow_id, user_id, "removal already in progress");
        return Ok(RemovalStart::InProgress);
    };

    match begin_removal(db, flow_id, user_id, channel_id).await? {
        Some(flow) => Ok(RemovalStart::Started { flow, guard }),
        None => Ok(RemovalStart::Empty),
    }
}

/// Reads the inventory and starts a flow, or returns `None` when there is nothing to remove.
///
/// `flow_id` is the correlation id (the invocation id); `user_id` and `channel_id`
/// scope the later quantity reply.
///
/// # Errors
/// Returns an error if the inventory cannot be read.
pub async fn begin_removal<C>(
    db: &C,
    flow_id: u64,
    user_id: u64,
    channel_id: u64,
) -> Result<Option<RemovalFlow>>
where
    C: ConnectionTrait,
{
    let items = inventory::list_items(db).await?;
    if items.is_empty() {
        debug!(flow_id, "removal requested on empty inventory");
        return Ok(None);
    }

    Ok(Some(RemovalFlow::new(flow_id, user_id, channel_id, items)))
}

impl RemovalFlow {
    /// Builds a flow over an inventory snapshot.
    #[must_use]
    pub fn new(id: u64, user_id: u64, channel_id: u64, snapshot: Vec<item::Model>) -> Self {
        let total_items = snapshot.len();
        let items: Vec<item::Model> = snapshot
            .into_iter()
            .filter(|item| item.name.chars().count() <= MAX_OPTION_CHARS)
            .take(MAX_MENU_OPTIONS)
            .collect();

        Self {
            id,
            user_id,
            channel_id,
            items,
            total_items,
            state: RemovalState::AwaitingSelection,
        }
    }

    /// Correlation id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &RemovalState {
        &self.state
    }

    /// Custom id of this flow's select menu.
    #[must_use]
    pub fn menu_id(&self) -> String {
        format!("{MENU_ID_PREFIX}{}", self.id)
    }

    /// Items offered in the menu.
    #[must_use]
    pub fn choices(&self) -> Vec<MenuChoice> {
        self.items
            .iter()
            .map(|item| MenuChoice {
                label: truncate_label(&format!("{} ({})", item.name, item.quantity)),
                value: item.name.clone(),
            })
            .collect()
    }

    /// Number of offered items and number of items in the inventory.
    #[must_use]
    pub fn coverage(&self) -> (usize, usize) {
        (self.items.len(), self.total_items)
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidFlowState {
            flow_id: self.id,
            action,
            state: self.state.label(),
        }
    }

    /// Records the user's menu selection and moves to `AwaitingQuantity`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The flow is not awaiting a selection, or the selector is not the flow's user
    /// - The selected name was not among the offered choices
    pub fn select(&mut self, user_id: u64, value: &str) -> Result<&str> {
        if self.state != RemovalState::AwaitingSelection || user_id != self.user_id {
            return Err(self.invalid("select"));
        }

        let Some(item) = self.items.iter().find(|item| item.name == value) else {
            return Err(Error::ItemNotFound {
                name: value.to_string(),
            });
        };

        debug!(flow_id = self.id, item = %item.name, "removal item selected");
        self.state = RemovalState::AwaitingQuantity {
            item: item.name.clone(),
        };
        Ok(&item.name)
    }

    /// Filter for the quantity reply, available once an item is selected.
    ///
    /// # Errors
    /// Returns an error if no item has been selected.
    pub fn reply_filter(&self) -> Result<ReplyFilter> {
        match self.state {
            RemovalState::AwaitingQuantity { .. } => Ok(ReplyFilter {
                user_id: self.user_id,
                channel_id: self.channel_id,
            }),
            _ => Err(self.invalid("filter replies")),
        }
    }

    /// Ends the flow after the selection wait or the quantity wait ran out.
    pub fn expire(&mut self) -> RemovalOutcome {
        if matches!(
            self.state,
            RemovalState::AwaitingSelection | RemovalState::AwaitingQuantity { .. }
        ) {
            self.state = RemovalState::TimedOut;
        }
        RemovalOutcome::TimedOut
    }

    /// Completes the flow with the collected reply quantity, or `None` if the wait expired.
    ///
    /// # Errors
    /// Returns an error if no item was selected, the quantity is not positive,
    /// or the database update fails.
    pub async fn resolve<C>(&mut self, db: &C, reply: Option<i64>) -> Result<RemovalOutcome>
    where
        C: ConnectionTrait,
    {
        let RemovalState::AwaitingQuantity { item } = &self.state else {
            return Err(self.invalid("resolve"));
        };
        let item = item.clone();

        let Some(quantity) = reply else {
            info!(flow_id = self.id, item = %item, "removal timed out");
            return Ok(self.expire());
        };

        let changed = inventory::conditional_subtract(db, &item, quantity).await;
        self.state = RemovalState::Resolved;

        if changed? {
            info!(flow_id = self.id, item = %item, quantity, "stock removed");
            Ok(RemovalOutcome::Removed { item, quantity })
        } else {
            info!(flow_id = self.id, item = %item, quantity, "removal rejected: insufficient stock");
            Ok(RemovalOutcome::InsufficientStock {
                item,
                requested: quantity,
            })
        }
    }
}

/// Registry of active flows, keyed by user id.
#[derive(Debug, Default)]
pub struct PendingRemovals {
    active: Mutex<HashMap<u64, u64>>,
}

impl PendingRemovals {
    /// Creates an empty shared registry.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Marks `flow_id` as the user's active flow. Returns `None` if the user already
    /// has one; the returned guard releases the mark when dropped.
    #[must_use]
    pub fn claim(self: &Arc<Self>, user_id: u64, flow_id: u64) -> Option<PendingRemoval> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.contains_key(&user_id) {
            return None;
        }
        active.insert(user_id, flow_id);

        Some(PendingRemoval {
            registry: Arc::clone(self),
            user_id,
            flow_id,
        })
    }

    /// Active flow id of a user, if any.
    #[must_use]
    pub fn active_flow(&self, user_id: u64) -> Option<u64> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .copied()
    }
}

/// Guard for a claimed per-user removal slot.
#[derive(Debug)]
pub struct PendingRemoval {
    registry: Arc<PendingRemovals>,
    user_id: u64,
    flow_id: u64,
}

impl Drop for PendingRemoval {
    fn drop(&mut self) {
        let mut active = self
            .registry
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if active.get(&self.user_id) == Some(&self.flow_id) {
            active.remove(&self.user_id);
        }
    }
}

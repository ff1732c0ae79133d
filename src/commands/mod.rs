//! Bot commands, grouped into modules loaded in a fixed order.
//!
//! Later modules may rely on commands and state registered by earlier
//! ones, so the order in [list] is part of the contract.

mod emote;
mod meta;

use crate::{BotError, Data};

/// Convenient type alias for [poise::Command].
pub type Command = poise::Command<Data, BotError>;

/// Lists all the implemented commands, in load order.
pub fn list() -> Vec<Command> {
    let mut commands = Vec::new();
    commands.extend(emote::commands());
    commands.extend(meta::commands());
    commands
}

//! Implements the `/emote` command group.
//!
//! Inspection of a server's custom emotes. Replies are prefixed with the
//! failure/success indicators injected into [crate::Data].

use itertools::Itertools;
use tracing::instrument;

use crate::error::UserError;
use crate::BotError;
use crate::Context;

/// The commands this module registers.
pub fn commands() -> Vec<super::Command> {
    vec![emote()]
}

/// Work with this server's custom emotes.
#[poise::command(
    slash_command,
    guild_only,
    subcommand_required,
    subcommands("list", "info")
)]
pub async fn emote(_ctx: Context<'_>) -> Result<(), BotError> {
    // subcommand_required means this body never runs.
    Ok(())
}

/// List the custom emotes on this server.
#[instrument(skip(ctx))]
#[poise::command(slash_command, guild_only, guild_cooldown = 2)]
async fn list(ctx: Context<'_>) -> Result<(), BotError> {
    let guild_id = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    let emojis = guild_id.emojis(ctx.http()).await?;

    let indicators = &ctx.data().emojis;
    let reply = if emojis.is_empty() {
        format!("{} This server has no custom emotes.", indicators.failure)
    } else {
        let line = emojis.iter().map(ToString::to_string).join(" ");
        format!("{} {line}", indicators.success)
    };

    ctx.say(reply).await?;
    Ok(())
}

/// Show details for one custom emote.
#[instrument(skip(ctx))]
#[poise::command(slash_command, guild_only)]
async fn info(
    ctx: Context<'_>,
    #[description = "Name of the emote"] name: String,
) -> Result<(), BotError> {
    let guild_id = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    let emojis = guild_id.emojis(ctx.http()).await?;

    let indicators = &ctx.data().emojis;
    let reply = match emojis.iter().find(|emoji| emoji.name == name) {
        Some(emoji) => format!(
            "{} {emoji} `:{}:` (id {}, animated: {})",
            indicators.success, emoji.name, emoji.id, emoji.animated
        ),
        None => format!("{} No emote named `:{name}:` here.", indicators.failure),
    };

    ctx.say(reply).await?;
    Ok(())
}

//! Implements commands about the bot itself.

use tracing::instrument;

use crate::BotError;
use crate::Context;

/// The commands this module registers.
pub fn commands() -> Vec<super::Command> {
    vec![about(), invite()]
}

/// What is this bot?
#[instrument(skip(ctx))]
#[poise::command(slash_command)]
pub async fn about(ctx: Context<'_>) -> Result<(), BotError> {
    let user_id = ctx.data().user_id;
    ctx.say(format!(
        "I'm <@{user_id}>, an emote manager. Use `/emote` to look around."
    ))
    .await?;
    Ok(())
}

/// Get a link to invite the bot to your own server.
#[instrument(skip(ctx))]
#[poise::command(slash_command)]
pub async fn invite(ctx: Context<'_>) -> Result<(), BotError> {
    // The id was decoded from the token at startup, so this works even
    // before the gateway has identified us.
    let user_id = ctx.data().user_id;
    ctx.say(format!(
        "https://discord.com/oauth2/authorize?client_id={user_id}&scope=bot+applications.commands"
    ))
    .await?;
    Ok(())
}

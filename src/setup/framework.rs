//! Setup for [poise::Framework]

use crate::commands;
use crate::data::Data;
use crate::error::BotError;
use crate::serenity;

/// Convenient type alias, only this [poise::Framework] type is used.
type Framework = poise::Framework<Data, BotError>;

/// Construct a [poise::Framework]
pub(super) fn framework(data: Data) -> Framework {
    poise::Framework::builder()
        .options(framework_options())
        .setup(|ctx, rdy, fw| framework_setup(ctx, rdy, fw, data))
        .build()
}

/// Configure options for the [Framework]
fn framework_options() -> poise::FrameworkOptions<Data, BotError> {
    poise::FrameworkOptions {
        // Add commands to the framework
        commands: commands::list(),
        // Handle framework errors
        on_error: |e| crate::log::handle_framework_error(e),
        // Log when commands start
        pre_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().qualified_name;
                let user = ctx.author();
                tracing::info!("Started '{cmd_name}' command from {user}.")
            })
        },
        // Runs only after a command resolved, so each row here is one
        // successful invocation.
        post_command: |ctx| {
            Box::pin(async move {
                let command = ctx.command().qualified_name.clone();
                tracing::info!("Finished '{command}' command from {}.", ctx.author());

                let recorded = ctx
                    .data()
                    .metrics
                    .record_invoke(ctx.guild_id(), ctx.author().id, &command)
                    .await;
                // Telemetry loss never affects the command result.
                if let Err(error) = recorded {
                    tracing::error!("Failed to record '{command}' invocation: {error}");
                }
            })
        },
        // Non-command gateway events (shard readiness bookkeeping).
        event_handler: |ctx, event, _fw, data| Box::pin(crate::events::handle(ctx, event, data)),
        ..Default::default()
    }
}

/// Construct future that runs on startup.
/// Command registration failing here aborts the whole process; the bot
/// never runs with a partial command set.
fn framework_setup<'a>(
    ctx: &'a serenity::Context,
    rdy: &'a serenity::Ready,
    fw: &'a Framework,
    data: Data,
) -> poise::BoxFuture<'a, Result<Data, BotError>> {
    Box::pin(async move {
        // Register the fixed command list on discord.
        let commands = &fw.options().commands;
        let app_commands = poise::builtins::create_application_commands(commands);
        serenity::Command::set_global_commands(&ctx.http, app_commands).await?;

        let bot_name = &rdy.user.name;
        tracing::info!("{bot_name} is ready (user id {}).", data.user_id);

        Ok(data)
    })
}

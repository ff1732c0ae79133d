//! Logging functionality and error reporting.
//! The logging library of choice is [tracing].

use itertools::Itertools;
use poise::BoxFuture;
use poise::CreateReply;
use poise::FrameworkError;
use tracing::debug;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::error::UserError;
use crate::BotError;
use crate::Config;
use crate::Context;
use crate::Data;

/// The name of this crate, used to set filter target.
const THIS_CRATE: &str = env!("CARGO_CRATE_NAME");

/// Setup format layers, tracing subscribers, and installs tracing.
/// The returned guard flushes the file writer on drop; hold it in `main`.
pub(super) fn install_tracing(config: &Config) -> Option<WorkerGuard> {
    // Uses local time.
    let timer = fmt::time::ChronoLocal::rfc_3339();
    let debug_mode = config.console_debug();

    // Set which traces are tracked.
    // By default, all INFO traces and above are shown.
    let targets = if debug_mode {
        Targets::new()
            .with_default(LevelFilter::INFO)
            .with_target(THIS_CRATE, LevelFilter::DEBUG)
    } else {
        Targets::new().with_default(LevelFilter::INFO)
    };

    // The layer that prints traces to stdout. File/line info only matters
    // when debugging.
    let console_layer = fmt::layer()
        .with_ansi(true)
        .with_file(debug_mode)
        .with_level(true)
        .with_line_number(debug_mode)
        .with_target(true)
        .with_timer(timer.clone())
        .pretty()
        .with_filter(targets.clone());

    // The layer that writes rolling log files, plus a guard for its writer.
    let (log_layer, guard) = if config.logs_enabled() {
        // Hourly files named "{THIS_CRATE}.log.{TIMESTAMP}".
        let appender =
            tracing_appender::rolling::hourly(config.log_dir(), format!("{THIS_CRATE}.log"));
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer()
            .with_ansi(false)
            .with_file(debug_mode)
            .with_level(true)
            .with_line_number(debug_mode)
            .with_target(true)
            .with_timer(timer)
            .with_writer(writer)
            .compact()
            .with_filter(targets);

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_layer)
        .init();

    guard
}

/// Defines various behaviors for how to handle errors.
/// User-caused refusals get an [ephemeral_reply]; internal errors are
/// logged at error level and the user gets a generic apology.
pub fn handle_framework_error(err: FrameworkError<'_, Data, BotError>) -> BoxFuture<'_, ()> {
    let handler = async move {
        match err {
            // ---
            // Errors that are invisible to users.
            // ---
            FrameworkError::Setup { error, .. } => error!("Error during startup: {error}"),
            FrameworkError::EventHandler { error, event, .. } => {
                // Telemetry writes land here; losing one is acceptable.
                let name = event.snake_case_name();
                error!("Error while handling '{name}' event: {error}");
            }

            // ---
            // Errors that users see but that are not bugs.
            // ---
            FrameworkError::SubcommandRequired { ctx } => {
                let subcmds = ctx
                    .command()
                    .subcommands
                    .iter()
                    .map(|sub| sub.name.as_str())
                    .join(", ");
                let user_error = UserError::MissingSubcommand { subcmds };

                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::Command {
                error: BotError::User(user_error),
                ctx,
                ..
            } => {
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::ArgumentParse { input, ctx, .. } => {
                let user_error = UserError::BadArgs { input };
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::CooldownHit {
                remaining_cooldown,
                ctx,
                ..
            } => {
                let user_error = UserError::OnCooldown {
                    remaining: remaining_cooldown,
                };
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::MissingBotPermissions {
                missing_permissions,
                ctx,
                ..
            } => {
                let user_error = UserError::MissingBotPermissions {
                    missing: missing_permissions,
                };
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::MissingUserPermissions { ctx, .. } => {
                let user_error = UserError::MissingUserPermissions;
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::NotAnOwner { ctx, .. } => {
                let user_error = UserError::NotOwner;
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }
            FrameworkError::GuildOnly { ctx, .. } => {
                let user_error = UserError::GuildOnly;
                respond(&ctx, user_error.to_string(), user_error.into(), false).await;
            }

            // ---
            // Unexpected errors. Users get a generic reply, logs get the cause.
            // ---
            FrameworkError::Command { error, ctx, .. } => {
                respond(&ctx, "Something went wrong...".to_string(), error, true).await;
            }
            FrameworkError::CommandPanic { payload, ctx, .. } => {
                let error = BotError::Panic { payload };
                respond(
                    &ctx,
                    "Something went horribly wrong...".to_string(),
                    error,
                    true,
                )
                .await;
            }

            // ---
            // Errors that should be unreachable for this bot.
            // ---
            FrameworkError::UnknownCommand { .. } => {
                error!("Prefix commands are not supported.")
            }
            FrameworkError::UnknownInteraction { interaction, .. } => {
                let name = &interaction.data.name;
                error!("Received unknown interaction: {name}")
            }
            other => error!("Unhandled framework error: {other}"),
        }
    };

    Box::pin(handler)
}

/// Logs the source error and sends the reply to the invoking user.
/// `is_error` upgrades the log from debug to error level.
async fn respond(ctx: &Context<'_>, reply: String, source: BotError, is_error: bool) {
    if is_error {
        let user = &ctx.author().name;
        let invocation = ctx.invocation_string();
        error!("{source} | {user} invoked: {invocation}");
    } else {
        debug!("{source}");
    }

    ephemeral_reply(ctx, reply).await;
}

/// Sends an ephemeral reply to the [Context] author.
async fn ephemeral_reply(ctx: &Context<'_>, content: impl Into<String>) {
    let reply = CreateReply::default().ephemeral(true).content(content);
    if let Err(e) = ctx.send(reply).await {
        error!("Failed to send ephemeral reply. {e}")
    };
}

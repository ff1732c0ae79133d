//! Error taxonomy: fatal startup errors surface from `main`, runtime
//! errors flow through [crate::log::handle_framework_error].

use std::time::Duration;

use thiserror::Error;

use crate::serenity;

/// Top-level error type carried through the [poise::Framework].
#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Serenity(#[from] serenity::Error),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Command panicked. Payload: {payload:?}")]
    Panic { payload: Option<String> },
}

/// Errors while reading or validating the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing config file! {action_msg}")]
    MissingConfig { action_msg: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unexpected filesystem error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors while decoding the bot's user id from its token.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token has no segment before the first '.'.")]
    MissingSegment,

    #[error("Token segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded token segment is not a numeric user id.")]
    NotAUserId,
}

/// Errors shown to the invoking user as an ephemeral reply.
/// These are refusals, not bugs, and are logged at debug level only.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("This command only works in a server.")]
    GuildOnly,

    #[error("Pick one of the subcommands: {subcmds}.")]
    MissingSubcommand { subcmds: String },

    #[error("Could not understand the arguments{}.", .input.as_deref().map(|i| format!(": '{i}'")).unwrap_or_default())]
    BadArgs { input: Option<String> },

    #[error("This command is on cooldown. Try again in {} seconds.", .remaining.as_secs().max(1))]
    OnCooldown { remaining: Duration },

    #[error("Only bot owners can use this command.")]
    NotOwner,

    #[error("I'm missing permissions I need for this: {missing:?}.")]
    MissingBotPermissions { missing: serenity::Permissions },

    #[error("You don't have permission to use this command.")]
    MissingUserPermissions,
}

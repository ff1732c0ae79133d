//! Wires configuration, telemetry, and the command framework into a client.

mod framework;

use crate::config::Config;
use crate::data::Data;
use crate::error::BotError;
use crate::metrics::Metrics;
use crate::serenity;
use crate::token;

/// Constructs a [serenity::Client] ready to start. Everything fallible in
/// here is a fatal startup error; the process never runs half-initialized.
pub(super) async fn client(config: Config) -> Result<serenity::Client, BotError> {
    let token = config.token()?.to_string();

    // Known before the gateway's own identify round-trip completes.
    let user_id = token::user_id_from_token(&token)?;

    let metrics = Metrics::connect(config.database_url()).await?;

    let data = Data {
        user_id,
        emojis: config.response_emojis(),
        metrics,
    };

    // Only the events this bot acts on. `members` and `presences` stay off;
    // nothing here tracks either.
    // See https://discord.com/developers/docs/topics/gateway#gateway-intents
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::GUILD_EMOJIS_AND_STICKERS;

    // Guild metadata stays cached because shard snapshots read it; messages
    // and users are never cached.
    let mut cache_settings = serenity::Settings::default();
    cache_settings.max_messages = 0;
    cache_settings.cache_users = false;

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework::framework(data))
        .cache_settings(cache_settings)
        .await?;

    Ok(client)
}

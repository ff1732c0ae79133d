//! Process bootstrap: parse shard arguments, load config, start the bot.

pub use poise::serenity_prelude as serenity;

mod commands;
mod config;
mod data;
mod error;
mod events;
mod log;
mod metrics;
mod setup;
mod shard;
mod token;

pub use config::Config;
pub use data::Data;
pub use error::BotError;

/// Convenient type alias, only this [poise::Context] type is used.
type Context<'a> = poise::Context<'a, Data, BotError>;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    // Malformed arguments never get past this point.
    let topology = match shard::ShardTopology::from_args(std::env::args()) {
        Ok(topology) => topology,
        Err(usage) => {
            eprintln!("{usage}");
            std::process::exit(1);
        }
    };

    let config = Config::read()?;

    // The guard flushes file logs on shutdown; keep it alive until exit.
    let _guard = log::install_tracing(&config);

    let mut client = setup::client(config).await?;

    match topology.range() {
        None => client.start().await?,
        Some((shards, total)) => client.start_shard_range(shards, total).await?,
    }

    Ok(())
}

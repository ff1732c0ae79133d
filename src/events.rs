//! Gateway event handlers outside the command path.

use crate::data::Data;
use crate::error::BotError;
use crate::serenity;

/// Dispatches the gateway events this bot acts on. Errors bubble up to
/// [crate::log::handle_framework_error]'s EventHandler arm, where they are
/// logged without taking the process down.
pub async fn handle(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), BotError> {
    match event {
        // Ready fires once per shard, which makes it a more dependable
        // bookkeeping point than the process-wide cache-ready signal when
        // some shards are still connecting.
        serenity::FullEvent::Ready { data_about_bot } => {
            let (shard_id, shard_total) = match &data_about_bot.shard {
                Some(shard) => (shard.id.0, shard.total),
                None => (0, 1),
            };
            shard_ready(ctx, data, shard_id, shard_total).await
        }
        _ => Ok(()),
    }
}

/// Recomputes the guild/member counts for one shard and upserts its
/// snapshot row.
async fn shard_ready(
    ctx: &serenity::Context,
    data: &Data,
    shard_id: u32,
    shard_total: u32,
) -> Result<(), BotError> {
    let mut guild_count: u32 = 0;
    let mut member_count: u64 = 0;

    for guild_id in ctx.cache.guilds() {
        if shard_of(guild_id, shard_total) != shard_id {
            continue;
        }
        guild_count += 1;
        // Member caching is off, so this is the gateway-reported count and
        // may lag. Close enough for telemetry.
        if let Some(guild) = ctx.cache.guild(guild_id) {
            member_count += guild.member_count;
        }
    }

    tracing::info!("Shard {shard_id} ready with {guild_count} guilds and {member_count} members.");

    data.metrics
        .record_shard_ready(shard_id, guild_count, member_count)
        .await?;
    Ok(())
}

/// Discord routes a guild to shard `(guild_id >> 22) % shard_total`.
fn shard_of(guild_id: serenity::GuildId, shard_total: u32) -> u32 {
    ((guild_id.get() >> 22) % u64::from(shard_total)) as u32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn guilds_route_by_snowflake_timestamp_bits() {
        // 2 << 22 routes to shard 2 of 4, and to shard 0 of 2.
        let guild = serenity::GuildId::new(2 << 22);
        assert_eq!(shard_of(guild, 4), 2);
        assert_eq!(shard_of(guild, 2), 0);
    }

    #[test]
    fn single_shard_owns_everything() {
        for id in [1u64, 2 << 22, 843_210_666_596_817_921] {
            assert_eq!(shard_of(serenity::GuildId::new(id), 1), 0);
        }
    }
}

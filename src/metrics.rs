//! Usage telemetry persisted to Postgres.
//!
//! Two tables: `invokes` is append-only, one row per resolved command;
//! `shard_info` holds the latest guild/member snapshot per shard. Both
//! writes are single statements and best-effort; callers log failures
//! instead of retrying.

use sha2::Digest;
use sha2::Sha256;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::serenity;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS invokes (
    guild_id BIGINT,
    user_id_digest BYTEA NOT NULL,
    command TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS shard_info (
    shard_id INTEGER PRIMARY KEY,
    guild_count INTEGER NOT NULL,
    member_count BIGINT NOT NULL
);
";

/// Handle to the telemetry store. Cheap to clone, lives in [crate::Data].
#[derive(Debug, Clone)]
pub struct Metrics {
    pool: PgPool,
}

impl Metrics {
    /// Connects the pool and makes sure the telemetry tables exist.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new().max_connections(4).connect(url).await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Records one resolved command invocation. The author is stored only
    /// as a one-way digest, never as the raw id.
    pub async fn record_invoke(
        &self,
        guild: Option<serenity::GuildId>,
        user: serenity::UserId,
        command: &str,
    ) -> Result<(), sqlx::Error> {
        let digest = user_id_digest(user);
        sqlx::query("INSERT INTO invokes (guild_id, user_id_digest, command) VALUES ($1, $2, $3)")
            .bind(guild.map(|guild| guild.get() as i64))
            .bind(digest.to_vec())
            .bind(command)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Upserts the snapshot for one shard. Re-running for the same shard
    /// overwrites the previous counts instead of appending a second row.
    pub async fn record_shard_ready(
        &self,
        shard_id: u32,
        guild_count: u32,
        member_count: u64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO shard_info (shard_id, guild_count, member_count)
             VALUES ($1, $2, $3)
             ON CONFLICT (shard_id) DO UPDATE SET
                 guild_count = EXCLUDED.guild_count,
                 member_count = EXCLUDED.member_count",
        )
        .bind(shard_id as i32)
        .bind(guild_count as i32)
        .bind(member_count as i64)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// SHA-256 over the big-endian bytes of the raw user id. Deterministic so
/// rows from the same user aggregate, non-reversible so the id itself is
/// never at rest.
fn user_id_digest(user: serenity::UserId) -> [u8; 32] {
    Sha256::digest(user.get().to_be_bytes()).into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let user = serenity::UserId::new(123_456_789_012_345_678);
        assert_eq!(user_id_digest(user), user_id_digest(user));
    }

    #[test]
    fn different_users_get_different_digests() {
        let a = user_id_digest(serenity::UserId::new(1));
        let b = user_id_digest(serenity::UserId::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn digest_does_not_leak_the_raw_id() {
        let user = serenity::UserId::new(843_210_666_596_817_921);
        let digest = user_id_digest(user);
        assert_eq!(digest.len(), 32);
        let raw = user.get().to_be_bytes();
        assert!(!digest.windows(raw.len()).any(|window| window == raw));
    }
}

//! Shared state handed to every command and event handler.

use crate::config::ResponseEmojis;
use crate::metrics::Metrics;
use crate::serenity;

/// Process-wide state, built once before the event loop starts and
/// read-only afterward. No locks needed.
#[derive(Debug)]
pub struct Data {
    /// The bot's own user id, decoded from the token before connecting.
    pub user_id: serenity::UserId,
    /// Failure/success indicators for command replies.
    pub emojis: ResponseEmojis,
    /// Durable usage-telemetry recorder.
    pub metrics: Metrics,
}

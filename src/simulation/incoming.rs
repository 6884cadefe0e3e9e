use std::ops::Range;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::common::ChatMessage;

/// Uniform delay in `window`; an empty window yields its start.
pub fn pick_reply_delay<R: Rng + ?Sized>(window: &Range<Duration>, rng: &mut R) -> Duration {
    if window.is_empty() {
        return window.start;
    }
    rng.gen_range(window.clone())
}

/// Whether anyone besides the local user is online.
pub fn has_other_users(presence: &[String], current_user: &str) -> bool {
    presence.iter().any(|name| name != current_user)
}

/// Builds a canned message from a random online user other than
/// `current_user`. Returns `None` when nobody else is online or there is
/// nothing to say.
pub fn compose_incoming<R: Rng + ?Sized>(
    presence: &[String],
    current_user: &str,
    phrases: &[String],
    rng: &mut R,
) -> Option<ChatMessage> {
    let senders: Vec<&String> = presence
        .iter()
        .filter(|name| name.as_str() != current_user)
        .collect();
    let sender = senders.choose(rng)?;
    let phrase = phrases.choose(rng)?;
    Some(ChatMessage::new(sender.as_str(), phrase.as_str()))
}

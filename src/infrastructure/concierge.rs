use crate::domain::concierge::{GREETING, pick_response};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// The chat widget's responder: picks a canned reply after a short delay.
pub struct Concierge {
    rng: StdRng,
    delay: Duration,
}

impl Concierge {
    pub fn new(rng: StdRng, delay: Duration) -> Self {
        Self { rng, delay }
    }

    pub fn seeded(seed: u64, delay: Duration) -> Self {
        Self::new(StdRng::seed_from_u64(seed), delay)
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Replies to `message`. Blank messages get no reply.
    pub async fn reply(&mut self, message: &str) -> Option<&'static str> {
        if message.trim().is_empty() {
            return None;
        }
        let seed: u64 = self.rng.r#gen();
        tokio::time::sleep(self.delay).await;
        let reply = pick_response(seed);
        tracing::debug!(%message, reply, "Concierge replied");
        Some(reply)
    }
}

impl Default for Concierge {
    fn default() -> Self {
        Self::new(StdRng::from_entropy(), DEFAULT_REPLY_DELAY)
    }
}

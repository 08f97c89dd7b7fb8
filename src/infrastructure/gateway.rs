use crate::domain::ports::{PaymentGateway, PaymentOutcome, PaymentRequest};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);
pub const DEFAULT_DECLINE_REASON: &str = "The card was declined by the issuing bank.";

/// Knobs for the simulated processor.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    /// Delay before every charge resolves.
    pub latency: Duration,
    /// Probability in `[0, 1]` that a charge is declined.
    pub failure_rate: f64,
    pub decline_reason: String,
    /// Seed for the decline draw; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            failure_rate: 0.0,
            decline_reason: DEFAULT_DECLINE_REASON.to_string(),
            seed: None,
        }
    }
}

/// A stand-in payment processor: waits out a fixed latency, then settles.
///
/// With the default settings every charge succeeds after two seconds.
pub struct SimulatedGateway {
    settings: GatewaySettings,
    rng: Mutex<StdRng>,
    charges: AtomicU64,
}

impl SimulatedGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            rng: Mutex::new(rng),
            charges: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Number of charges started so far.
    pub fn charges(&self) -> u64 {
        self.charges.load(Ordering::SeqCst)
    }

    fn draw_decline(&self) -> bool {
        let rate = self.settings.failure_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        let rate = rate.min(1.0);
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(rate),
            Err(poisoned) => poisoned.into_inner().gen_bool(rate),
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(GatewaySettings::default())
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: PaymentRequest) -> PaymentOutcome {
        self.charges.fetch_add(1, Ordering::SeqCst);
        let declined = self.draw_decline();

        tracing::info!(
            attempt = request.attempt,
            amount = %request.amount,
            latency_ms = self.settings.latency.as_millis() as u64,
            "Connecting to simulated payment gateway"
        );
        tokio::time::sleep(self.settings.latency).await;

        if declined {
            tracing::warn!(attempt = request.attempt, "Simulated charge declined");
            PaymentOutcome::Failed(self.settings.decline_reason.clone())
        } else {
            tracing::info!(attempt = request.attempt, "Simulated charge settled");
            PaymentOutcome::Succeeded
        }
    }
}

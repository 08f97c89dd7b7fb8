use crate::application::wizard::WizardOptions;
use crate::error::Result;
use crate::infrastructure::gateway::GatewaySettings;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Contents of the optional TOML configuration file. Every key is optional.
///
/// ```toml
/// [gateway]
/// latency_ms = 2000
/// failure_rate = 0.0
/// seed = 42
///
/// [wizard]
/// placeholder_nights = 3
/// today = "2024-10-01"
///
/// [logging]
/// filter = "info"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct BookingConfig {
    pub gateway: Option<GatewayConfig>,
    pub wizard: Option<WizardConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GatewayConfig {
    pub latency_ms: Option<u64>,
    pub failure_rate: Option<f64>,
    pub decline_reason: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WizardConfig {
    pub placeholder_nights: Option<u32>,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl BookingConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        let mut settings = GatewaySettings::default();
        if let Some(gateway) = &self.gateway {
            if let Some(ms) = gateway.latency_ms {
                settings.latency = Duration::from_millis(ms);
            }
            if let Some(rate) = gateway.failure_rate {
                settings.failure_rate = rate;
            }
            if let Some(reason) = &gateway.decline_reason {
                settings.decline_reason = reason.clone();
            }
            settings.seed = gateway.seed;
        }
        settings
    }

    pub fn wizard_options(&self) -> WizardOptions {
        let mut options = WizardOptions::default();
        if let Some(wizard) = &self.wizard {
            if let Some(nights) = wizard.placeholder_nights {
                options.placeholder_nights = nights;
            }
            if let Some(today) = wizard.today {
                options.today = today;
            }
        }
        options
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.logging.as_ref()?.filter.as_deref()
    }
}

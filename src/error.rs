use crate::domain::step::Step;
use crate::domain::validation::Violations;
use thiserror::Error;

/// Failures reported by the reservation wizard to its caller.
///
/// None of these are fatal: validation and payment failures are expected outcomes
/// the UI layer renders, while `InvalidTransition` indicates a caller bug.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("validation failed: {0}")]
    Validation(Violations),
    #[error("cannot {action} while on step {step}")]
    InvalidTransition { step: Step, action: &'static str },
    #[error("payment failed: {0}")]
    PaymentFailed(String),
    #[error("a payment submission is already pending")]
    AlreadyPending,
    #[error("no async runtime is available to run the payment gateway")]
    RuntimeUnavailable,
    #[error("settlement for payment attempt {attempt} is no longer pending")]
    StaleSettlement { attempt: u64 },
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
    #[error("Script error: {0}")]
    ScriptError(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

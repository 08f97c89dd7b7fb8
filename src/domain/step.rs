use serde::Serialize;
use std::fmt;

/// One stage of the booking wizard. The order is linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Availability,
    Details,
    Payment,
    Confirmed,
}

impl Step {
    /// The step that follows this one, if any.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Availability => Some(Step::Details),
            Step::Details => Some(Step::Payment),
            Step::Payment => Some(Step::Confirmed),
            Step::Confirmed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Confirmed
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Availability => "availability",
            Step::Details => "details",
            Step::Payment => "payment",
            Step::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// Lifecycle of the simulated payment call. Only meaningful on `Step::Payment`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }
}

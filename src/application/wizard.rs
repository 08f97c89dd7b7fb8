use crate::domain::confirmation::ConfirmationView;
use crate::domain::draft::{FieldUpdate, ReservationDraft};
use crate::domain::ports::{
    NotifierBox, PaymentGatewayHandle, PaymentOutcome, PaymentRequest, Toast,
};
use crate::domain::pricing::{self, DEFAULT_PLACEHOLDER_NIGHTS, Quote};
use crate::domain::step::{Step, SubmissionState};
use crate::domain::validation::{self, Violations};
use crate::error::WizardError;
use chrono::NaiveDate;
use serde::Serialize;
use tokio::task::JoinHandle;

/// Settings that shape a single wizard instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardOptions {
    /// Nights assumed while no check-out is chosen.
    pub placeholder_nights: u32,
    /// Earliest allowed check-in.
    pub today: NaiveDate,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            placeholder_nights: DEFAULT_PLACEHOLDER_NIGHTS,
            today: chrono::Local::now().date_naive(),
        }
    }
}

/// Owned copy of the wizard state handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSnapshot {
    pub step: Step,
    pub submission: SubmissionState,
    pub draft: ReservationDraft,
    pub quote: Option<Quote>,
}

/// Result of a successful `advance`.
#[derive(Debug)]
pub enum Advance {
    Moved(WizardSnapshot),
    /// Advancing from the payment step submits the payment instead of moving.
    PaymentStarted(PendingPayment),
}

/// The outcome of one payment attempt, ready to be applied to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSettlement {
    pub attempt: u64,
    pub outcome: PaymentOutcome,
}

/// An in-flight gateway call.
///
/// Dropping it aborts the call; its result can then never reach a wizard.
#[derive(Debug)]
pub struct PendingPayment {
    attempt: u64,
    handle: Option<JoinHandle<PaymentOutcome>>,
}

impl PendingPayment {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Waits for the gateway to settle.
    pub async fn wait(mut self) -> PaymentSettlement {
        let outcome = match self.handle.take() {
            Some(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(e) => PaymentOutcome::Failed(format!(
                    "Payment gateway call did not complete: {e}"
                )),
            },
            None => {
                PaymentOutcome::Failed("Payment gateway call did not complete".to_string())
            }
        };
        PaymentSettlement {
            attempt: self.attempt,
            outcome,
        }
    }
}

impl Drop for PendingPayment {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// The booking flow: Availability → Details → Payment → Confirmed.
///
/// The wizard is the single owner of its `ReservationDraft`. Every operation
/// either returns a fresh snapshot or a `WizardError` and leaves the state
/// untouched on error. The one exception is a settled payment that cannot be
/// summarized, which marks the submission `Failed` so it can be retried.
pub struct ReservationWizard {
    draft: ReservationDraft,
    step: Step,
    submission: SubmissionState,
    attempts: u64,
    confirmation: Option<ConfirmationView>,
    gateway: PaymentGatewayHandle,
    notifier: NotifierBox,
    options: WizardOptions,
}

impl ReservationWizard {
    /// Mounts a wizard with an empty draft.
    ///
    /// Check-in dates are validated against the local clock; use
    /// `with_options` to pin "today" to a fixed date.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The processor charged on the payment step.
    /// * `notifier` - Receives the toasts raised along the way.
    pub fn new(gateway: PaymentGatewayHandle, notifier: NotifierBox) -> Self {
        Self::with_options(gateway, notifier, WizardOptions::default())
    }

    pub fn with_options(
        gateway: PaymentGatewayHandle,
        notifier: NotifierBox,
        options: WizardOptions,
    ) -> Self {
        tracing::debug!(today = %options.today, "Reservation wizard mounted");
        Self {
            draft: ReservationDraft::new(),
            step: Step::Availability,
            submission: SubmissionState::Idle,
            attempts: 0,
            confirmation: None,
            gateway,
            notifier,
            options,
        }
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    /// Current price breakdown, recomputed from the draft on every call.
    pub fn quote(&self) -> Option<Quote> {
        pricing::quote(&self.draft, self.options.placeholder_nights)
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.step,
            submission: self.submission.clone(),
            draft: self.draft.clone(),
            quote: self.quote(),
        }
    }

    /// The frozen summary, available once the booking is confirmed.
    pub fn confirmation(&self) -> Option<&ConfirmationView> {
        self.confirmation.as_ref()
    }

    /// Changes one field of the draft.
    ///
    /// The draft is editable on the availability and details steps only; it is
    /// locked once the payment step is reached.
    pub fn update_field(&mut self, update: FieldUpdate) -> Result<WizardSnapshot, WizardError> {
        match self.step {
            Step::Availability | Step::Details => {}
            Step::Payment | Step::Confirmed => {
                return Err(self.invalid("update the draft"));
            }
        }
        tracing::debug!(field = %update.field(), step = %self.step, "Draft field updated");
        self.draft.apply(update);
        Ok(self.snapshot())
    }

    /// Validates the current step and moves to the next one.
    ///
    /// On the payment step this submits the payment instead; the move to
    /// `Confirmed` only happens when that payment settles successfully.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        if self.step.is_terminal() {
            return Err(self.invalid("advance"));
        }

        let checked = validation::validate(
            self.step,
            &self.draft,
            self.options.today,
            self.options.placeholder_nights,
        );
        if let Err(violations) = checked {
            self.report_violations(&violations);
            return Err(WizardError::Validation(violations));
        }

        match self.step {
            Step::Availability | Step::Details => {
                let from = self.step;
                // Checked above: only Confirmed has no successor
                self.step = from.next().unwrap_or(from);
                tracing::debug!(%from, to = %self.step, "Wizard advanced");
                Ok(Advance::Moved(self.snapshot()))
            }
            Step::Payment => self.submit_payment().map(Advance::PaymentStarted),
            Step::Confirmed => Err(self.invalid("advance")),
        }
    }

    /// Steps back from details to availability, keeping everything entered.
    pub fn retreat(&mut self) -> Result<WizardSnapshot, WizardError> {
        if self.step != Step::Details || self.submission != SubmissionState::Idle {
            return Err(self.invalid("go back"));
        }
        self.step = Step::Availability;
        tracing::debug!(from = %Step::Details, to = %self.step, "Wizard retreated");
        Ok(self.snapshot())
    }

    /// Starts a payment attempt.
    ///
    /// The submission enters `Pending` before this returns. The gateway call
    /// runs on the current Tokio runtime; feed its settlement to
    /// `apply_settlement`. Without a runtime the call is rejected with
    /// `RuntimeUnavailable` and the state is left unchanged.
    pub fn submit_payment(&mut self) -> Result<PendingPayment, WizardError> {
        if self.step != Step::Payment {
            return Err(self.invalid("submit payment"));
        }
        if self.submission.is_pending() {
            tracing::debug!(attempt = self.attempts, "Duplicate payment submission rejected");
            return Err(WizardError::AlreadyPending);
        }
        let Some(quote) = self.quote() else {
            return Err(self.invalid("submit payment"));
        };
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            tracing::warn!(%e, "Payment submitted outside a Tokio runtime");
            WizardError::RuntimeUnavailable
        })?;

        self.attempts += 1;
        self.submission = SubmissionState::Pending;
        let request = PaymentRequest {
            attempt: self.attempts,
            room_type: quote.room_type,
            nights: quote.nights.count,
            amount: quote.total,
            guest_email: self.draft.guest_email.trim().to_string(),
        };
        tracing::info!(attempt = request.attempt, amount = %request.amount, "Payment submitted");
        self.notifier.notify(Toast::info(
            "Processing Payment",
            "Connecting to the secure payment gateway...",
        ));

        let gateway = self.gateway.clone();
        let handle = runtime.spawn(async move { gateway.charge(request).await });
        Ok(PendingPayment {
            attempt: self.attempts,
            handle: Some(handle),
        })
    }

    /// Folds a settled payment back into the wizard.
    ///
    /// A settlement for any attempt other than the one currently pending is
    /// discarded without touching the state.
    pub fn apply_settlement(
        &mut self,
        settlement: PaymentSettlement,
    ) -> Result<WizardSnapshot, WizardError> {
        if self.step != Step::Payment
            || !self.submission.is_pending()
            || settlement.attempt != self.attempts
        {
            tracing::debug!(attempt = settlement.attempt, "Stale payment settlement discarded");
            return Err(WizardError::StaleSettlement {
                attempt: settlement.attempt,
            });
        }

        match settlement.outcome {
            PaymentOutcome::Succeeded => {
                let Some(view) =
                    ConfirmationView::capture(&self.draft, self.options.placeholder_nights)
                else {
                    self.submission = SubmissionState::Failed(
                        "The reservation could not be summarized.".to_string(),
                    );
                    return Err(self.invalid("confirm"));
                };
                self.submission = SubmissionState::Succeeded;
                self.step = Step::Confirmed;
                tracing::info!(
                    attempt = settlement.attempt,
                    total = %view.total,
                    "Reservation confirmed"
                );
                self.confirmation = Some(view);
                self.notifier.notify(Toast::info(
                    "Booking Confirmed",
                    "Your retreat has been successfully reserved.",
                ));
                Ok(self.snapshot())
            }
            PaymentOutcome::Failed(reason) => {
                tracing::warn!(attempt = settlement.attempt, %reason, "Payment failed");
                self.submission = SubmissionState::Failed(reason.clone());
                self.notifier
                    .notify(Toast::destructive("Payment Failed", reason.clone()));
                Err(WizardError::PaymentFailed(reason))
            }
        }
    }

    /// Submits the payment and waits for it to settle.
    pub async fn pay(&mut self) -> Result<WizardSnapshot, WizardError> {
        let pending = self.submit_payment()?;
        let settlement = pending.wait().await;
        self.apply_settlement(settlement)
    }

    /// Tears the wizard down. The draft is discarded and any settlement still
    /// in flight has nothing left to apply to.
    pub fn unmount(self) {
        tracing::debug!(
            step = %self.step,
            pending = self.submission.is_pending(),
            "Reservation wizard unmounted"
        );
    }

    fn report_violations(&self, violations: &Violations) {
        tracing::debug!(step = %self.step, %violations, "Step validation failed");
        let description = violations
            .iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join(" ");
        self.notifier
            .notify(Toast::destructive("Missing Information", description));
    }

    fn invalid(&self, action: &'static str) -> WizardError {
        tracing::error!(step = %self.step, action, "Invalid wizard transition");
        WizardError::InvalidTransition {
            step: self.step,
            action,
        }
    }
}

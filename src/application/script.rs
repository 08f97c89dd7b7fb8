use super::wizard::{Advance, ReservationWizard, WizardSnapshot};
use crate::domain::draft::FieldUpdate;
use crate::error::WizardError;

/// One user action against the wizard, as recorded in a booking script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    Set(FieldUpdate),
    Advance,
    Retreat,
    Pay,
}

/// Runs a single command, waiting for the gateway when it starts a payment.
pub async fn execute(
    wizard: &mut ReservationWizard,
    command: WizardCommand,
) -> Result<WizardSnapshot, WizardError> {
    match command {
        WizardCommand::Set(update) => wizard.update_field(update),
        WizardCommand::Advance => match wizard.advance()? {
            Advance::Moved(snapshot) => Ok(snapshot),
            Advance::PaymentStarted(pending) => {
                let settlement = pending.wait().await;
                wizard.apply_settlement(settlement)
            }
        },
        WizardCommand::Retreat => wizard.retreat(),
        WizardCommand::Pay => wizard.pay().await,
    }
}

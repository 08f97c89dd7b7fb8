#![allow(dead_code)]

use chrono::NaiveDate;
use retreat_booking::application::wizard::{Advance, ReservationWizard, WizardOptions};
use retreat_booking::domain::draft::FieldUpdate;
use retreat_booking::domain::ports::PaymentGatewayHandle;
use retreat_booking::domain::room::RoomType;
use retreat_booking::infrastructure::notifier::RecordingNotifier;
use std::io::{Error, Write};
use std::path::Path;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn options() -> WizardOptions {
    WizardOptions {
        placeholder_nights: 3,
        today: date(2024, 10, 1),
    }
}

pub fn mount(gateway: PaymentGatewayHandle) -> (ReservationWizard, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let wizard = ReservationWizard::with_options(gateway, Box::new(notifier.clone()), options());
    (wizard, notifier)
}

/// Fills both form steps with the Lakeside stay and advances to payment.
pub fn reach_payment(wizard: &mut ReservationWizard) {
    for update in [
        FieldUpdate::RoomType(RoomType::LakesideLodge),
        FieldUpdate::CheckIn(date(2024, 10, 12)),
        FieldUpdate::CheckOut(Some(date(2024, 10, 15))),
        FieldUpdate::GuestCount(2),
    ] {
        wizard.update_field(update).unwrap();
    }
    assert!(matches!(wizard.advance(), Ok(Advance::Moved(_))));

    wizard
        .update_field(FieldUpdate::GuestName("Jane Doe".to_string()))
        .unwrap();
    wizard
        .update_field(FieldUpdate::GuestEmail("jane.doe@example.com".to_string()))
        .unwrap();
    assert!(matches!(wizard.advance(), Ok(Advance::Moved(_))));
}

pub fn write_script(path: &Path, rows: &[&str]) -> Result<(), Error> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "action, field, value")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(())
}

use crate::domain::confirmation::ConfirmationView;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ConfirmationRow<'a> {
    guest: &'a str,
    email: &'a str,
    room: &'a str,
    dates: &'a str,
    guests: u8,
    nights: u32,
    total: rust_decimal::Decimal,
}

impl<'a> From<&'a ConfirmationView> for ConfirmationRow<'a> {
    fn from(view: &'a ConfirmationView) -> Self {
        Self {
            guest: &view.guest_name,
            email: &view.guest_email,
            room: &view.room,
            dates: &view.dates,
            guests: view.guests,
            nights: view.nights,
            total: view.total.value().normalize(),
        }
    }
}

/// Writes confirmed reservations as CSV with a header row.
pub struct ConfirmationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ConfirmationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_confirmation(&mut self, view: &ConfirmationView) -> Result<()> {
        self.writer.serialize(ConfirmationRow::from(view))?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{FieldUpdate, ReservationDraft};
    use crate::domain::room::RoomType;
    use chrono::NaiveDate;

    #[test]
    fn test_write_confirmation() {
        let mut draft = ReservationDraft::new();
        draft.apply(FieldUpdate::RoomType(RoomType::LakesideLodge));
        draft.apply(FieldUpdate::CheckIn(NaiveDate::from_ymd_opt(2024, 10, 12).unwrap()));
        draft.apply(FieldUpdate::CheckOut(NaiveDate::from_ymd_opt(2024, 10, 15)));
        draft.apply(FieldUpdate::GuestName("Jane Doe".into()));
        draft.apply(FieldUpdate::GuestEmail("jane@example.com".into()));
        let view = ConfirmationView::capture(&draft, 3).unwrap();

        let mut buffer = Vec::new();
        ConfirmationWriter::new(&mut buffer)
            .write_confirmation(&view)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "guest,email,room,dates,guests,nights,total\n\
             Jane Doe,jane@example.com,Lakeside Eco-Lodge,\"Oct 12 - 15, 2024\",2,3,1860\n"
        );
    }
}

use super::draft::ReservationDraft;
use super::pricing;
use super::room::{Price, RoomType};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Read-only summary shown once a reservation is confirmed.
///
/// Captured at the moment the payment succeeds; it owns copies of every value
/// and is never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    pub guest_name: String,
    pub guest_email: String,
    pub room_type: RoomType,
    pub room: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Set when no check-out was chosen and the placeholder stay was used.
    pub check_out_estimated: bool,
    pub dates: String,
    pub guests: u8,
    pub nights: u32,
    pub nightly_rate: Price,
    pub total: Price,
}

impl ConfirmationView {
    /// Projects a finalized draft. Returns `None` if the draft lacks a room or
    /// check-in date, which the availability step guarantees.
    pub fn capture(draft: &ReservationDraft, placeholder_nights: u32) -> Option<Self> {
        let quote = pricing::quote(draft, placeholder_nights)?;
        let check_in = draft.date_range.check_in?;
        let check_out = match draft.date_range.check_out {
            Some(date) if !quote.nights.estimated => date,
            _ => check_in.checked_add_days(Days::new(u64::from(quote.nights.count)))?,
        };

        let mut dates = format_date_range(check_in, check_out);
        if quote.nights.estimated {
            dates.push_str(" (estimated)");
        }

        Some(Self {
            guest_name: draft.guest_name.trim().to_string(),
            guest_email: draft.guest_email.trim().to_string(),
            room_type: quote.room_type,
            room: quote.room_type.display_name().to_string(),
            check_in,
            check_out,
            check_out_estimated: quote.nights.estimated,
            dates,
            guests: draft.guest_count.unwrap_or_default(),
            nights: quote.nights.count,
            nightly_rate: quote.nightly_rate,
            total: quote.total,
        })
    }
}

/// Formats a stay compactly: `Oct 12 - 15, 2024`, `Oct 30 - Nov 02, 2024`,
/// or `Dec 30, 2024 - Jan 02, 2025`.
pub fn format_date_range(from: NaiveDate, to: NaiveDate) -> String {
    if from.year() != to.year() {
        format!("{} - {}", from.format("%b %d, %Y"), to.format("%b %d, %Y"))
    } else if from.month() != to.month() {
        format!("{} - {}", from.format("%b %d"), to.format("%b %d, %Y"))
    } else {
        format!("{} - {}", from.format("%b %d"), to.format("%d, %Y"))
    }
}

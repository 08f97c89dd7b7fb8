use super::room::RoomType;
use crate::error::BookingError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Guests per booking when the form is first shown.
pub const DEFAULT_GUEST_COUNT: u8 = 2;

/// Check-in and (optional) check-out dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

/// The in-progress reservation gathered by the wizard.
///
/// Derived values (nights, total) are deliberately absent: they are recomputed
/// from these fields by `pricing::quote` whenever they are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub room_type: Option<RoomType>,
    pub date_range: DateRange,
    pub guest_count: Option<u8>,
    pub guest_name: String,
    pub guest_email: String,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            room_type: None,
            date_range: DateRange::default(),
            guest_count: Some(DEFAULT_GUEST_COUNT),
            guest_name: String::new(),
            guest_email: String::new(),
        }
    }
}

impl ReservationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single field change in place.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::RoomType(room) => self.room_type = Some(room),
            FieldUpdate::CheckIn(date) => self.date_range.check_in = Some(date),
            FieldUpdate::CheckOut(date) => self.date_range.check_out = date,
            FieldUpdate::GuestCount(count) => self.guest_count = Some(count),
            FieldUpdate::GuestName(name) => self.guest_name = name,
            FieldUpdate::GuestEmail(email) => self.guest_email = email,
        }
    }
}

/// Names of the draft fields, as used in violation maps and booking scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    RoomType,
    CheckIn,
    CheckOut,
    GuestCount,
    GuestName,
    GuestEmail,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::RoomType => "roomType",
            Field::CheckIn => "checkIn",
            Field::CheckOut => "checkOut",
            Field::GuestCount => "guestCount",
            Field::GuestName => "guestName",
            Field::GuestEmail => "guestEmail",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "roomType" => Ok(Field::RoomType),
            "checkIn" => Ok(Field::CheckIn),
            "checkOut" => Ok(Field::CheckOut),
            "guestCount" => Ok(Field::GuestCount),
            "guestName" => Ok(Field::GuestName),
            "guestEmail" => Ok(Field::GuestEmail),
            other => Err(BookingError::ScriptError(format!("Unknown field: {other}"))),
        }
    }
}

/// A typed change to one draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    RoomType(RoomType),
    CheckIn(NaiveDate),
    /// `None` clears a previously chosen check-out.
    CheckOut(Option<NaiveDate>),
    GuestCount(u8),
    GuestName(String),
    GuestEmail(String),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::RoomType(_) => Field::RoomType,
            FieldUpdate::CheckIn(_) => Field::CheckIn,
            FieldUpdate::CheckOut(_) => Field::CheckOut,
            FieldUpdate::GuestCount(_) => Field::GuestCount,
            FieldUpdate::GuestName(_) => Field::GuestName,
            FieldUpdate::GuestEmail(_) => Field::GuestEmail,
        }
    }

    /// Builds an update from a field name and its textual value.
    ///
    /// Dates use `YYYY-MM-DD`. An empty `checkOut` clears the check-out date.
    pub fn parse(name: &str, raw: &str) -> Result<Self, BookingError> {
        let field: Field = name.parse()?;
        let raw = raw.trim();
        let update = match field {
            Field::RoomType => FieldUpdate::RoomType(raw.parse()?),
            Field::CheckIn => FieldUpdate::CheckIn(parse_date(field, raw)?),
            Field::CheckOut if raw.is_empty() => FieldUpdate::CheckOut(None),
            Field::CheckOut => FieldUpdate::CheckOut(Some(parse_date(field, raw)?)),
            Field::GuestCount => FieldUpdate::GuestCount(raw.parse().map_err(|_| {
                BookingError::ScriptError(format!("Invalid value for {field}: {raw}"))
            })?),
            Field::GuestName => FieldUpdate::GuestName(raw.to_string()),
            Field::GuestEmail => FieldUpdate::GuestEmail(raw.to_string()),
        };
        Ok(update)
    }
}

fn parse_date(field: Field, raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| BookingError::ScriptError(format!("Invalid date for {field}: {raw} ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_defaults() {
        let draft = ReservationDraft::new();
        assert_eq!(draft.room_type, None);
        assert_eq!(draft.guest_count, Some(DEFAULT_GUEST_COUNT));
        assert!(draft.guest_name.is_empty());
    }

    #[test]
    fn test_parse_and_apply_updates() {
        let mut draft = ReservationDraft::new();
        for (name, value) in [
            ("roomType", "lakeside"),
            ("checkIn", "2024-10-12"),
            ("checkOut", "2024-10-15"),
            ("guestCount", "3"),
            ("guestName", " Jane Doe "),
        ] {
            draft.apply(FieldUpdate::parse(name, value).unwrap());
        }

        assert_eq!(draft.room_type, Some(RoomType::LakesideLodge));
        assert_eq!(draft.date_range.check_in, NaiveDate::from_ymd_opt(2024, 10, 12));
        assert_eq!(draft.date_range.check_out, NaiveDate::from_ymd_opt(2024, 10, 15));
        assert_eq!(draft.guest_count, Some(3));
        assert_eq!(draft.guest_name, "Jane Doe");

        draft.apply(FieldUpdate::parse("checkOut", "").unwrap());
        assert_eq!(draft.date_range.check_out, None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            FieldUpdate::parse("favouriteColour", "green"),
            Err(BookingError::ScriptError(_))
        ));
        assert!(matches!(
            FieldUpdate::parse("checkIn", "12/10/2024"),
            Err(BookingError::ScriptError(_))
        ));
        assert!(matches!(
            FieldUpdate::parse("guestCount", "two"),
            Err(BookingError::ScriptError(_))
        ));
    }
}

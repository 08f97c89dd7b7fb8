use super::draft::{Field, ReservationDraft};
use super::step::Step;
use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

pub const GUEST_RANGE: RangeInclusive<u8> = 1..=4;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Field-keyed violation messages for one step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Violations(BTreeMap<Field, String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks the constraints that gate leaving `step`.
///
/// Only the fields owned by that step are inspected; the payment and
/// confirmed steps have no field constraints.
///
/// `placeholder_nights` is the stay assumed when no check-out is chosen; a
/// check-in that cannot carry that stay on the calendar is rejected.
pub fn validate(
    step: Step,
    draft: &ReservationDraft,
    today: NaiveDate,
    placeholder_nights: u32,
) -> Result<(), Violations> {
    let mut violations = Violations::new();
    match step {
        Step::Availability => {
            check_availability(draft, today, placeholder_nights, &mut violations)
        }
        Step::Details => check_details(draft, &mut violations),
        Step::Payment | Step::Confirmed => {}
    }
    violations.into_result()
}

fn check_availability(
    draft: &ReservationDraft,
    today: NaiveDate,
    placeholder_nights: u32,
    violations: &mut Violations,
) {
    if draft.room_type.is_none() {
        violations.add(Field::RoomType, "Please select a room.");
    }

    match draft.date_range.check_in {
        None => violations.add(Field::CheckIn, "Please select check-in date."),
        Some(check_in) if check_in < today => {
            violations.add(Field::CheckIn, "Check-in date cannot be in the past.")
        }
        Some(check_in) => match draft.date_range.check_out {
            Some(check_out) if check_out <= check_in => {
                violations.add(Field::CheckOut, "Check-out must be after check-in.")
            }
            Some(_) => {}
            None => {
                let nights = u64::from(placeholder_nights.max(1));
                if check_in.checked_add_days(Days::new(nights)).is_none() {
                    violations.add(Field::CheckIn, "Check-in date is too far in the future.");
                }
            }
        },
    }

    match draft.guest_count {
        None => violations.add(Field::GuestCount, "Please select number of guests."),
        Some(count) if !GUEST_RANGE.contains(&count) => violations.add(
            Field::GuestCount,
            format!(
                "Number of guests must be between {} and {}.",
                GUEST_RANGE.start(),
                GUEST_RANGE.end()
            ),
        ),
        Some(_) => {}
    }
}

fn check_details(draft: &ReservationDraft, violations: &mut Violations) {
    if draft.guest_name.trim().is_empty() {
        violations.add(Field::GuestName, "Please provide your name.");
    }

    let email = draft.guest_email.trim();
    if email.is_empty() {
        violations.add(Field::GuestEmail, "Please provide your email.");
    } else if !is_valid_email(email) {
        violations.add(Field::GuestEmail, "Please enter a valid email.");
    }
}

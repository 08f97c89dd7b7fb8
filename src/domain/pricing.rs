use super::draft::{DateRange, ReservationDraft};
use super::room::{Price, RoomType};
use serde::Serialize;

/// Nights assumed while no check-out has been chosen.
pub const DEFAULT_PLACEHOLDER_NIGHTS: u32 = 3;

/// Length of a stay and whether it came from the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nights {
    pub count: u32,
    pub estimated: bool,
}

/// Price breakdown for a draft. Always computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub room_type: RoomType,
    pub nightly_rate: Price,
    pub nights: Nights,
    pub sustainability_fee: Price,
    pub total: Price,
}

/// Whole nights between two dates, never less than one.
pub fn nights_between(check_in: chrono::NaiveDate, check_out: chrono::NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days();
    u32::try_from(days).unwrap_or(0).max(1)
}

pub fn stay_nights(dates: &DateRange, placeholder_nights: u32) -> Nights {
    match (dates.check_in, dates.check_out) {
        (Some(check_in), Some(check_out)) => Nights {
            count: nights_between(check_in, check_out),
            estimated: false,
        },
        _ => Nights {
            count: placeholder_nights.max(1),
            estimated: true,
        },
    }
}

pub fn total(room: RoomType, nights: u32) -> Price {
    room.nightly_rate() * nights
}

/// Quotes the draft, or `None` until a room has been selected.
pub fn quote(draft: &ReservationDraft, placeholder_nights: u32) -> Option<Quote> {
    let room_type = draft.room_type?;
    let nights = stay_nights(&draft.date_range, placeholder_nights);
    let sustainability_fee = Price::ZERO;
    Some(Quote {
        room_type,
        nightly_rate: room_type.nightly_rate(),
        nights,
        sustainability_fee,
        total: total(room_type, nights.count) + sustainability_fee,
    })
}

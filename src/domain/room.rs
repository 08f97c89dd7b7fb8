use crate::error::BookingError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// A price in whole currency units.
///
/// Wraps `rust_decimal::Decimal` so nightly rates and totals cannot be mixed up
/// with plain numbers such as night or guest counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Add for Price {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;
    fn mul(self, nights: u32) -> Self::Output {
        Self(self.0 * Decimal::from(nights))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

/// The three sanctuaries that can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    CanopySuite,
    LakesideLodge,
    AlpineRetreat,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [
        RoomType::CanopySuite,
        RoomType::LakesideLodge,
        RoomType::AlpineRetreat,
    ];

    /// Fixed nightly rate for the room.
    pub fn nightly_rate(self) -> Price {
        match self {
            RoomType::CanopySuite => Price(dec!(450)),
            RoomType::LakesideLodge => Price(dec!(620)),
            RoomType::AlpineRetreat => Price(dec!(550)),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RoomType::CanopySuite => "Forest Canopy Suite",
            RoomType::LakesideLodge => "Lakeside Eco-Lodge",
            RoomType::AlpineRetreat => "The Alpine Retreat",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RoomType {
    type Err = BookingError;

    /// Accepts the short form used by the booking form (`canopy`) as well as
    /// the variant name (`CanopySuite`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canopy" | "canopysuite" => Ok(RoomType::CanopySuite),
            "lakeside" | "lakesidelodge" => Ok(RoomType::LakesideLodge),
            "alpine" | "alpineretreat" => Ok(RoomType::AlpineRetreat),
            other => Err(BookingError::ScriptError(format!(
                "Unknown room type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_table() {
        assert_eq!(RoomType::CanopySuite.nightly_rate(), Price::new(dec!(450)));
        assert_eq!(RoomType::LakesideLodge.nightly_rate(), Price::new(dec!(620)));
        assert_eq!(RoomType::AlpineRetreat.nightly_rate(), Price::new(dec!(550)));
    }

    #[test]
    fn test_price_arithmetic_and_display() {
        let rate = Price::new(dec!(620));
        assert_eq!(rate * 3, Price::new(dec!(1860)));
        assert_eq!(rate + Price::ZERO, rate);
        assert_eq!((rate * 3).to_string(), "$1860");
    }

    #[test]
    fn test_room_type_parsing() {
        assert_eq!("lakeside".parse::<RoomType>().unwrap(), RoomType::LakesideLodge);
        assert_eq!("CanopySuite".parse::<RoomType>().unwrap(), RoomType::CanopySuite);
        assert_eq!(" Alpine ".parse::<RoomType>().unwrap(), RoomType::AlpineRetreat);
        assert!(matches!(
            "penthouse".parse::<RoomType>(),
            Err(BookingError::ScriptError(_))
        ));
    }
}

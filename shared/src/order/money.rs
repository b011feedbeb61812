//! Money in integer minor units
//!
//! Amounts are stored and added as `i64` cents. `Decimal` appears only when
//! converting from/to the API (JSON number with two decimal places) and when
//! applying percentage rates, which round half-up to the cent.
//!
//! No operator impls; sums go through `checked_*` and the caller maps `None`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Decimal places of every supported currency
pub const DECIMAL_PLACES: u32 = 2;

const MINOR_PER_MAJOR: i64 = 100;

/// Monetary amount in minor units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor(&self) -> i64 {
        self.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Convert a decimal major-unit amount, rounding half-up to the cent.
    ///
    /// Returns `None` if the value does not fit in `i64` cents.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        (value * Decimal::from(MINOR_PER_MAJOR))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PLACES)
    }

    /// `self × rate_bps / 10 000`, half-up to the cent (e.g. VAT rates)
    pub fn apply_bps(&self, rate_bps: i64) -> Option<Money> {
        let raw = Decimal::from(self.0).checked_mul(Decimal::from(rate_bps))?
            / Decimal::from(10_000);
        Self::round_minor(raw)
    }

    /// `self × percent / 100`, half-up to the cent (e.g. tip percentages)
    pub fn apply_percent(&self, percent: Decimal) -> Option<Money> {
        let raw = Decimal::from(self.0).checked_mul(percent)? / Decimal::from(100);
        Self::round_minor(raw)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    pub fn saturating_mul(self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }

    /// Sum of `amounts`, `None` on overflow
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    fn round_minor(raw: Decimal) -> Option<Money> {
        raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Money::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_decimal_rounds_half_up() {
        assert_eq!(Money::from_decimal(dec("20.00")), Some(Money::from_minor(2000)));
        assert_eq!(Money::from_decimal(dec("15.505")), Some(Money::from_minor(1551)));
        assert_eq!(Money::from_decimal(dec("15.504")), Some(Money::from_minor(1550)));
        assert_eq!(Money::from_decimal(dec("0.005")), Some(Money::from_minor(1)));
    }

    #[test]
    fn test_apply_bps() {
        // 10 % VAT on 35.50
        assert_eq!(Money::from_minor(3550).apply_bps(1000), Some(Money::from_minor(355)));
        // 21 % on 12.34 = 2.5914
        assert_eq!(Money::from_minor(1234).apply_bps(2100), Some(Money::from_minor(259)));
        // 5 % on 0.10 = 0.005 -> 0.01
        assert_eq!(Money::from_minor(10).apply_bps(500), Some(Money::from_minor(1)));
        assert_eq!(Money::from_minor(1234).apply_bps(0), Some(Money::ZERO));
        // result does not fit in i64 cents
        assert_eq!(Money::from_minor(i64::MAX).apply_bps(20_000), None);
    }

    #[test]
    fn test_apply_percent() {
        assert_eq!(Money::from_minor(2000).apply_percent(dec("10")), Some(Money::from_minor(200)));
        assert_eq!(
            Money::from_minor(1550).apply_percent(dec("12.5")),
            Some(Money::from_minor(194))
        );
        assert_eq!(Money::from_minor(999).apply_percent(dec("0")), Some(Money::ZERO));
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Money::from_minor(450).checked_mul(3), Some(Money::from_minor(1350)));
        let total = Money::checked_sum([Money::from_minor(2000), Money::from_minor(1550)]);
        assert_eq!(total, Some(Money::from_minor(3550)));
        assert_eq!(Money::checked_sum([]), Some(Money::ZERO));

        assert_eq!(Money::from_minor(i64::MAX).checked_add(Money::from_minor(1)), None);
        assert_eq!(Money::from_minor(i64::MAX).checked_mul(2), None);
        assert_eq!(Money::from_minor(i64::MAX).saturating_mul(2), Money::from_minor(i64::MAX));
        assert_eq!(
            Money::checked_sum([Money::from_minor(i64::MAX), Money::from_minor(1)]),
            None
        );
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Money::from_minor(3550)).unwrap();
        assert_eq!(json, "35.5");

        let m: Money = serde_json::from_str("20.5").unwrap();
        assert_eq!(m, Money::from_minor(2050));
        let m: Money = serde_json::from_str("7").unwrap();
        assert_eq!(m, Money::from_minor(700));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(3550).to_string(), "35.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
    }
}

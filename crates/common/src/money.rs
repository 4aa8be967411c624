//! Exact money arithmetic in minor currency units.

use serde::{Deserialize, Serialize};

/// Symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a whole-unit value.
    pub const fn from_units(units: i64) -> Self {
        Self { cents: units * 100 }
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-unit portion.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after whole units).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity, or `None` if the product overflows.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Money::from_cents)
    }

    /// Multiplies by a quantity, saturating at the numeric bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{CURRENCY_SYMBOL}{}.{:02}",
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents - rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.cents -= rhs.cents;
    }
}

/// A percentage held in basis points (hundredths of a percent).
///
/// `Percent::from_basis_points(1250)` is 12.5%. Valid range is 0% to 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(u32);

impl Percent {
    pub const MAX_BASIS_POINTS: u32 = 10_000;

    /// Creates a percentage from basis points, rejecting values above 100%.
    pub fn from_basis_points(bps: u32) -> Option<Self> {
        (bps <= Self::MAX_BASIS_POINTS).then_some(Self(bps))
    }

    /// Creates a percentage from a whole number of percent.
    pub fn from_whole(percent: u32) -> Option<Self> {
        percent
            .checked_mul(100)
            .and_then(Self::from_basis_points)
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// Applies this percentage to an amount, rounding half away from zero to the cent.
    pub fn of(&self, amount: Money) -> Money {
        let product = i128::from(amount.cents()) * i128::from(self.0);
        let magnitude = (product.abs() + 5_000) / 10_000;
        let cents = if product < 0 { -magnitude } else { magnitude };
        // |cents| <= |amount| because the rate is capped at 100%.
        Money::from_cents(cents as i64)
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
        assert_eq!(money.units(), 12);
        assert_eq!(money.cents_part(), 34);
    }

    #[test]
    fn test_money_from_units() {
        assert_eq!(Money::from_units(500).cents(), 50_000);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "₹12.34");
        assert_eq!(Money::from_units(1000).to_string(), "₹1000.00");
        assert_eq!(Money::from_cents(5).to_string(), "₹0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-₹12.34");
        assert_eq!(Money::from_cents(-5).to_string(), "-₹0.05");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply(3).cents(), 3000);
    }

    #[test]
    fn test_money_multiply_overflow() {
        let huge = Money::from_cents(i64::MAX / 2);

        assert_eq!(huge.checked_multiply(3), None);
        assert_eq!(huge.multiply(3), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(-i64::MAX / 2).multiply(3).cents(), i64::MIN);
        assert_eq!(huge.checked_multiply(2), Some(Money::from_cents(i64::MAX - 1)));
    }

    #[test]
    fn test_money_assign_ops() {
        let mut money = Money::from_cents(100);
        money += Money::from_cents(50);
        money -= Money::from_cents(30);
        assert_eq!(money.cents(), 120);
    }

    #[test]
    fn test_percent_bounds() {
        assert!(Percent::from_basis_points(10_000).is_some());
        assert!(Percent::from_basis_points(10_001).is_none());
        assert!(Percent::from_whole(101).is_none());
    }

    #[test]
    fn test_percent_of_amount() {
        let ten = Percent::from_whole(10).unwrap();
        assert_eq!(ten.of(Money::from_units(1000)), Money::from_units(100));

        // 12.5% of 0.99 = 0.12375 -> 0.12
        let twelve_half = Percent::from_basis_points(1250).unwrap();
        assert_eq!(twelve_half.of(Money::from_cents(99)), Money::from_cents(12));

        // 50% of 0.01 = 0.005 -> rounds half away from zero
        let half = Percent::from_whole(50).unwrap();
        assert_eq!(half.of(Money::from_cents(1)), Money::from_cents(1));
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::from_whole(10).unwrap().to_string(), "10%");
        assert_eq!(Percent::from_basis_points(1250).unwrap().to_string(), "12.50%");
    }

    #[test]
    fn test_money_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(999)).unwrap();
        assert_eq!(json, "999");
    }
}

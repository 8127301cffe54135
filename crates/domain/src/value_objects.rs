//! Value objects for the store domain.
//!
//! Each type validates its invariant on construction, so holding a value of
//! the type is proof that the invariant holds.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Non-negative amount of money in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    /// Creates a money amount, rejecting negative values.
    pub fn new(amount: i64) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::invalid_value(format!(
                "money amount must not be negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn amount(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies the unit amount by a quantity.
    ///
    /// Fails instead of wrapping when the product does not fit.
    pub fn multiply(&self, quantity: Quantity) -> Result<Money, DomainError> {
        self.0
            .checked_mul(i64::from(quantity.value()))
            .map(Money)
            .ok_or_else(|| {
                DomainError::invalid_value(format!(
                    "money amount {} multiplied by {} overflows",
                    self.0,
                    quantity.value()
                ))
            })
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Money {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Positive number of units requested in a purchase (always at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a quantity from a raw integer, rejecting anything below 1.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 1 {
            return Err(DomainError::invalid_value(format!(
                "quantity must be at least 1, got {value}"
            )));
        }
        u32::try_from(value).map(Self).map_err(|_| {
            DomainError::invalid_value(format!("quantity {value} exceeds the supported maximum"))
        })
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Subtracts another quantity.
    ///
    /// The result must still be a valid quantity, so subtracting an equal or
    /// larger amount fails.
    pub fn checked_sub(&self, other: Quantity) -> Result<Quantity, DomainError> {
        if other.0 >= self.0 {
            return Err(DomainError::invalid_value(format!(
                "quantity {} minus {} is not positive",
                self.0, other.0
            )));
        }
        Ok(Quantity(self.0 - other.0))
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Units on hand for a stocked item. Unlike [`Quantity`] it may reach zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StockLevel(u32);

impl StockLevel {
    pub fn new(units: u32) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u32 {
        self.0
    }

    /// Returns true if at least `quantity` units are on hand.
    pub fn covers(&self, quantity: Quantity) -> bool {
        self.0 >= quantity.value()
    }

    /// Returns the level left after taking `quantity`, or `None` if the stock
    /// does not cover it.
    pub fn take(&self, quantity: Quantity) -> Option<StockLevel> {
        self.0.checked_sub(quantity.value()).map(StockLevel)
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of an item can still be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Availability {
    /// A finite number of units remain.
    Limited { remaining: u32 },

    /// The item has no inventory concept.
    Unlimited,
}

impl Availability {
    /// Returns the remaining units, or `None` for unlimited items.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Availability::Limited { remaining } => Some(*remaining),
            Availability::Unlimited => None,
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Limited { remaining } => write!(f, "{remaining} remaining"),
            Availability::Unlimited => write!(f, "unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rejects_negative_amounts() {
        for amount in [-1, -100, i64::MIN] {
            assert!(matches!(
                Money::new(amount),
                Err(DomainError::InvalidValue(_))
            ));
        }
    }

    #[test]
    fn test_money_accepts_non_negative_amounts() {
        for amount in [0, 1, 4000, i64::MAX] {
            assert_eq!(Money::new(amount).unwrap().amount(), amount);
        }
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_money_multiply() {
        let price = Money::new(4000).unwrap();
        let total = price.multiply(Quantity::new(3).unwrap()).unwrap();
        assert_eq!(total.amount(), 12000);
        // the original is unchanged
        assert_eq!(price.amount(), 4000);
    }

    #[test]
    fn test_money_multiply_overflow_fails() {
        let price = Money::new(i64::MAX).unwrap();
        let result = price.multiply(Quantity::new(2).unwrap());
        assert!(matches!(result, Err(DomainError::InvalidValue(_))));
    }

    #[test]
    fn test_money_deserialization_validates() {
        let money: Money = serde_json::from_str("250").unwrap();
        assert_eq!(money.amount(), 250);

        let negative: Result<Money, _> = serde_json::from_str("-5");
        assert!(negative.is_err());
    }

    #[test]
    fn test_quantity_rejects_non_positive_values() {
        for value in [0, -1, -50] {
            assert!(matches!(
                Quantity::new(value),
                Err(DomainError::InvalidValue(_))
            ));
        }
    }

    #[test]
    fn test_quantity_rejects_values_beyond_u32() {
        assert!(Quantity::new(i64::from(u32::MAX) + 1).is_err());
        assert_eq!(
            Quantity::new(i64::from(u32::MAX)).unwrap().value(),
            u32::MAX
        );
    }

    #[test]
    fn test_quantity_accepts_positive_values() {
        for value in [1, 3, 50] {
            assert_eq!(i64::from(Quantity::new(value).unwrap().value()), value);
        }
    }

    #[test]
    fn test_quantity_comparison() {
        let three = Quantity::new(3).unwrap();
        let ten = Quantity::new(10).unwrap();
        assert!(ten >= three);
        assert!(three >= three);
        assert!(three < ten);
    }

    #[test]
    fn test_quantity_checked_sub() {
        let ten = Quantity::new(10).unwrap();
        let three = Quantity::new(3).unwrap();

        assert_eq!(ten.checked_sub(three).unwrap().value(), 7);
        assert!(three.checked_sub(ten).is_err());
        assert!(three.checked_sub(three).is_err());
    }

    #[test]
    fn test_quantity_deserialization_validates() {
        let quantity: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(quantity.value(), 4);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }

    #[test]
    fn test_stock_level_take() {
        let stock = StockLevel::new(5);
        assert!(stock.covers(Quantity::new(5).unwrap()));
        assert!(!stock.covers(Quantity::new(6).unwrap()));

        assert_eq!(stock.take(Quantity::new(5).unwrap()), Some(StockLevel::new(0)));
        assert_eq!(stock.take(Quantity::new(6).unwrap()), None);
    }

    #[test]
    fn test_availability_serialization() {
        let limited = serde_json::to_value(Availability::Limited { remaining: 7 }).unwrap();
        assert_eq!(limited, serde_json::json!({"kind": "limited", "remaining": 7}));

        let unlimited = serde_json::to_value(Availability::Unlimited).unwrap();
        assert_eq!(unlimited, serde_json::json!({"kind": "unlimited"}));
    }

    #[test]
    fn test_availability_display() {
        assert_eq!(
            Availability::Limited { remaining: 7 }.to_string(),
            "7 remaining"
        );
        assert_eq!(Availability::Unlimited.to_string(), "unlimited");
        assert_eq!(Availability::Unlimited.remaining(), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            #[test]
            fn money_rejects_every_negative_amount(amount in i64::MIN..0) {
                prop_assert!(matches!(Money::new(amount), Err(DomainError::InvalidValue(_))));
            }

            #[test]
            fn money_keeps_every_non_negative_amount(amount in 0..=i64::MAX) {
                prop_assert_eq!(Money::new(amount).unwrap().amount(), amount);
            }

            #[test]
            fn quantity_rejects_every_non_positive_value(value in i64::MIN..1) {
                prop_assert!(matches!(Quantity::new(value), Err(DomainError::InvalidValue(_))));
            }

            #[test]
            fn quantity_keeps_every_positive_value(value in 1..=i64::from(u32::MAX)) {
                prop_assert_eq!(i64::from(Quantity::new(value).unwrap().value()), value);
            }

            #[test]
            fn checked_sub_is_positive_or_fails(a in 1..=u32::MAX, b in 1..=u32::MAX) {
                let left = Quantity::new(i64::from(a)).unwrap();
                let right = Quantity::new(i64::from(b)).unwrap();

                match left.checked_sub(right) {
                    Ok(difference) => {
                        prop_assert!(a > b);
                        prop_assert_eq!(difference.value(), a - b);
                    }
                    Err(err) => {
                        prop_assert!(a <= b);
                        prop_assert!(matches!(err, DomainError::InvalidValue(_)));
                    }
                }
            }

            #[test]
            fn multiply_matches_checked_arithmetic(
                amount in 0..=i64::MAX,
                units in 1..=u32::MAX,
            ) {
                let price = Money::new(amount).unwrap();
                let quantity = Quantity::new(i64::from(units)).unwrap();

                match amount.checked_mul(i64::from(units)) {
                    Some(total) => {
                        prop_assert_eq!(price.multiply(quantity).unwrap().amount(), total);
                    }
                    None => {
                        prop_assert!(price.multiply(quantity).is_err());
                    }
                }
            }
        }
    }
}

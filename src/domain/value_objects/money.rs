//! # Money Value Object
//!
//! Currency-aware decimal amount with checked arithmetic.
//!
//! This module provides the [`Money`] type pairing a `rust_decimal::Decimal`
//! amount with an ISO 4217 currency code. All arithmetic is checked:
//! combining amounts of different currencies or overflowing the decimal
//! range returns a [`DomainError`] instead of panicking.
//!
//! # Examples
//!
//! ```
//! use commerce_shipping::domain::value_objects::Money;
//! use rust_decimal::Decimal;
//!
//! let amount = Money::new(Decimal::new(1200, 2), "USD").unwrap();
//! let shipping = Money::new(Decimal::new(500, 2), "USD").unwrap();
//!
//! let total = amount.checked_add(&shipping).unwrap();
//! assert_eq!(total.to_string(), "17.00 USD");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in a specific currency.
///
/// # Invariants
///
/// - The currency code is three ASCII uppercase letters.
/// - Arithmetic never combines different currencies silently.
///
/// # Examples
///
/// ```
/// use commerce_shipping::domain::value_objects::Money;
/// use rust_decimal::Decimal;
///
/// let price = Money::new(Decimal::new(499, 2), "EUR").unwrap();
/// assert_eq!(price.currency_code(), "EUR");
/// assert!(price.is_positive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The decimal amount.
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: String,
}

impl Money {
    /// Creates a new monetary amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProperty` if the currency code is not
    /// three ASCII uppercase letters.
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> DomainResult<Self> {
        let currency_code = currency_code.into();
        Self::validate_currency_code(&currency_code)?;
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Creates a zero amount in the given currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProperty` if the currency code is invalid.
    pub fn zero(currency_code: impl Into<String>) -> DomainResult<Self> {
        Self::new(Decimal::ZERO, currency_code)
    }

    fn validate_currency_code(code: &str) -> DomainResult<()> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::invalid_property(
                "currency_code",
                format!("expected three uppercase letters, got {:?}", code),
            ));
        }
        Ok(())
    }

    fn assert_same_currency(&self, other: &Self) -> DomainResult<()> {
        if self.currency_code != other.currency_code {
            return Err(DomainError::currency_mismatch(
                self.currency_code.clone(),
                other.currency_code.clone(),
            ));
        }
        Ok(())
    }

    /// Returns the decimal amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency code.
    #[inline]
    #[must_use]
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Adds another amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ,
    /// or `DomainError::Overflow` if the sum overflows.
    pub fn checked_add(&self, other: &Self) -> DomainResult<Self> {
        self.assert_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::Overflow)?;
        Ok(Self {
            amount,
            currency_code: self.currency_code.clone(),
        })
    }

    /// Subtracts another amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ,
    /// or `DomainError::Overflow` if the difference overflows.
    pub fn checked_sub(&self, other: &Self) -> DomainResult<Self> {
        self.assert_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(DomainError::Overflow)?;
        Ok(Self {
            amount,
            currency_code: self.currency_code.clone(),
        })
    }

    /// Multiplies the amount by a decimal factor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the product overflows.
    pub fn checked_mul(&self, factor: Decimal) -> DomainResult<Self> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(DomainError::Overflow)?;
        Ok(Self {
            amount,
            currency_code: self.currency_code.clone(),
        })
    }

    /// Returns the amount with its sign flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            amount: -self.amount,
            currency_code: self.currency_code.clone(),
        }
    }

    /// Rounds the amount to cent precision, midpoint away from zero.
    #[must_use]
    pub fn round_to_cents(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency_code: self.currency_code.clone(),
        }
    }

    /// Compares against another amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ.
    pub fn greater_than(&self, other: &Self) -> DomainResult<bool> {
        self.assert_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// Returns the smaller of two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ.
    pub fn min(&self, other: &Self) -> DomainResult<Self> {
        self.assert_same_currency(other)?;
        Ok(if self.amount <= other.amount {
            self.clone()
        } else {
            other.clone()
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.amount;
        if amount.scale() < 2 {
            amount.rescale(2);
        }
        write!(f, "{} {}", amount, self.currency_code)
    }
}

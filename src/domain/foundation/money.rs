//! Money value objects: ISO currency codes and prices in minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Three-letter ISO 4217 currency code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parses a currency code, accepting any case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "must be a three-letter ISO code",
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Pound sterling, the studio default.
    pub fn gbp() -> Self {
        Self("GBP".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::gbp()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// A non-negative amount in minor units (pence, cents) with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    minor_units: i64,
    currency: Currency,
}

impl Price {
    /// Creates a price, rejecting negative amounts.
    pub fn new(minor_units: i64, currency: Currency) -> Result<Self, ValidationError> {
        if minor_units < 0 {
            return Err(ValidationError::out_of_range(
                "price",
                0,
                i64::MAX,
                minor_units,
            ));
        }
        Ok(Self {
            minor_units,
            currency,
        })
    }

    /// Parses a major-unit amount typed by staff ("12.50" or "12,50").
    ///
    /// The result is rounded to the nearest minor unit.
    pub fn parse_major(input: &str, currency: Currency) -> Result<Self, ValidationError> {
        let minor_units = parse_major_to_minor(input)?;
        Self::new(minor_units, currency)
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Display label: `£12.50` for sterling, `12.50 EUR` otherwise.
    pub fn label(&self) -> String {
        let amount = format!("{}.{:02}", self.minor_units / 100, self.minor_units % 100);
        if self.currency == Currency::gbp() {
            format!("£{}", amount)
        } else {
            format!("{} {}", amount, self.currency)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Converts "12.50" / "12,5" / "12" into minor units.
pub fn parse_major_to_minor(input: &str) -> Result<i64, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(ValidationError::empty_field("price"));
    }

    let value: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::invalid_format("price", "must be a number"))?;

    if !value.is_finite() {
        return Err(ValidationError::invalid_format("price", "must be a number"));
    }
    if value < 0.0 {
        return Err(ValidationError::invalid_format("price", "must not be negative"));
    }

    Ok((value * 100.0).round() as i64)
}

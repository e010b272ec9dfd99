//! Types that can be used in other crates

use std::{fmt::Display, str::FromStr};

use error_stack::{report, ResultExt};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::errors::ParsingError;

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Minor unit amount formatted the way form encoded gateways expect it
    pub fn to_minor_unit_as_string(self) -> String {
        self.0.to_string()
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector specific string type for amounts expressed in the major unit, e.g. "42.50"
#[derive(Default, Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    /// forms a new major unit from amount
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Get string amount from struct to be removed in future
    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }

    /// Converts to the minor unit given the number of digits after the decimal point.
    ///
    /// Fails when the amount carries more precision than `exponent` allows.
    pub fn to_minor_unit_as_i64(
        &self,
        exponent: u32,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal = Decimal::from_str(self.0.trim())
            .change_context(ParsingError::StringToDecimalConversionFailure)
            .attach_printable_lazy(|| format!("invalid major unit amount: {}", self.0))?;

        let scaled = 10_i64
            .checked_pow(exponent)
            .and_then(|factor| amount_decimal.checked_mul(Decimal::from(factor)))
            .ok_or(report!(ParsingError::DecimalToI64ConversionFailure))
            .attach_printable_lazy(|| format!("major unit amount out of range: {}", self.0))?;
        if !scaled.fract().is_zero() {
            return Err(report!(ParsingError::FractionalMinorUnit));
        }

        scaled
            .to_i64()
            .map(MinorUnit::new)
            .ok_or(report!(ParsingError::DecimalToI64ConversionFailure))
    }
}

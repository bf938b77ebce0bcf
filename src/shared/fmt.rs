//! Fixed-point price conversion and display formatting.
//!
//! The price contract stores USD prices as integers scaled by `10^8`. All
//! math uses `rust_decimal::Decimal` for exact arithmetic. No async, no
//! network calls.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places of the on-chain price encoding.
pub const PRICE_DECIMALS: u32 = 8;

/// Errors that can occur when converting between raw scaled integers and
/// decimal values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error("scale 10^{0} overflows")]
    ScaleOverflow(u32),

    #[error("value {value} does not fit at scale {decimals}")]
    Overflow { value: String, decimals: u32 },

    #[error("negative value not representable: {0}")]
    Negative(String),

    #[error("value {value} has more than {decimals} fractional digits")]
    Fractional { value: String, decimals: u32 },
}

/// Convert a raw scaled integer (e.g. `200000000000` at scale 8) into an
/// exact decimal (`2000.00000000`).
pub fn scaled_to_decimal(raw: u128, decimals: u32) -> Result<Decimal, ScaleError> {
    let signed = i128::try_from(raw).map_err(|_| ScaleError::Overflow {
        value: raw.to_string(),
        decimals,
    })?;
    // from_i128_with_scale panics above 28 digits of scale; the contract
    // scale is fixed well below that, but reject instead of trusting it.
    if decimals > 28 {
        return Err(ScaleError::ScaleOverflow(decimals));
    }
    Ok(Decimal::from_i128_with_scale(signed, decimals))
}

/// Convert a decimal value into the raw scaled integer representation.
///
/// Rejects negative values and values with more fractional digits than the
/// scale can hold (no silent truncation of price data).
pub fn to_scaled_units(value: &Decimal, decimals: u32) -> Result<u128, ScaleError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ScaleError::Negative(value.to_string()));
    }

    let multiplier = Decimal::from(
        10u64
            .checked_pow(decimals)
            .ok_or(ScaleError::ScaleOverflow(decimals))?,
    );

    let scaled = value
        .checked_mul(multiplier)
        .ok_or_else(|| ScaleError::Overflow {
            value: value.to_string(),
            decimals,
        })?;

    if scaled.fract() != Decimal::ZERO {
        return Err(ScaleError::Fractional {
            value: value.to_string(),
            decimals,
        });
    }

    scaled.to_u128().ok_or_else(|| ScaleError::Overflow {
        value: value.to_string(),
        decimals,
    })
}

/// Format a decimal price for display with exactly two decimal places.
pub fn display_2dp(value: &Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

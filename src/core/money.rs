use rust_decimal::Decimal;
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Maximum decimal places accepted for a configured rate
pub const RATE_MAX_SCALE: u32 = 4;

/// Largest accepted monetary amount: one quadrillion rupiah.
///
/// Annualising, VAT and report totals all multiply or sum amounts, and
/// `Decimal` arithmetic panics on overflow, so inputs are capped well
/// below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Rejects negative or oversized monetary amounts
pub fn validate_amount(field: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} cannot be negative, got {}",
            field, amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{} cannot exceed {}",
            field, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Validate a rate is within [0, 1] with at most 4 decimal places
pub fn validate_rate(field: &str, rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO {
        return Err(AppError::validation(format!("{} cannot be negative", field)));
    }

    if rate > Decimal::ONE {
        return Err(AppError::validation(format!(
            "{} cannot exceed 1.0 (100%)",
            field
        )));
    }

    // normalize() drops trailing zeros so 0.1100 passes
    if rate.normalize().scale() > RATE_MAX_SCALE {
        return Err(AppError::validation(format!(
            "{} cannot have more than {} decimal places",
            field, RATE_MAX_SCALE
        )));
    }

    Ok(())
}

/// Decode a monetary TEXT column back into a Decimal
pub fn decimal_from_db(column: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| {
        AppError::internal(format!(
            "Invalid decimal in column {}: '{}' ({})",
            column, raw, e
        ))
    })
}

/// Divide, yielding zero when the divisor is zero
pub fn safe_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        Decimal::ZERO
    } else {
        numerator / divisor
    }
}

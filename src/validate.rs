//! Form input validation. Pure functions, run before any payload is built.

use crate::{ClientError, Result, ADDRESS_LEN, ADDRESS_PREFIX};

/// Check that an address has the expected shape: "0x" prefix and exactly
/// 66 characters. No checksum or hex validation beyond that; the chain
/// rejects addresses that do not resolve.
pub fn validate_address(address: &str) -> Result<()> {
    if !address.starts_with(ADDRESS_PREFIX) || address.len() != ADDRESS_LEN {
        return Err(ClientError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

/// Parse an amount field and require it to be a positive finite number.
/// No upper bound: the contract is the final arbiter of sufficient balance.
pub fn validate_amount(amount: &str) -> Result<f64> {
    let value: f64 = amount
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidAmount(amount.to_string()))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ClientError::InvalidAmount(amount.to_string()));
    }
    Ok(value)
}

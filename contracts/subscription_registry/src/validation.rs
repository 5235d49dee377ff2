use soroban_sdk::{Address, String, Vec};

use crate::error::Error;
use crate::storage::MAX_FEE_BPS;

/// Fee rate must not exceed MAX_FEE_BPS (10%)
pub fn validate_fee_rate(fee_rate_bps: u32) -> Result<(), Error> {
    if fee_rate_bps > MAX_FEE_BPS {
        return Err(Error::FeeTooHigh);
    }
    Ok(())
}

/// A creator needs a name and at least one distinct accepted asset
pub fn validate_profile(name: &String, accepted_assets: &Vec<Address>) -> Result<(), Error> {
    if name.len() == 0 || accepted_assets.is_empty() {
        return Err(Error::InvalidInput);
    }

    for (index, asset) in accepted_assets.iter().enumerate() {
        if accepted_assets.first_index_of(&asset) != Some(index as u32) {
            return Err(Error::InvalidInput);
        }
    }

    Ok(())
}

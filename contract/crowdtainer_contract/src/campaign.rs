//! Campaign lifecycle rules.
//!
//! Everything here is free of storage access so that the phase of a campaign
//! can be queried at any time without side effects. Entry points in `lib.rs`
//! decide when a derived phase is written back.

use soroban_sdk::{Address, Env, String, Vec};

use crate::storage_types::{
    Campaign, CampaignData, CampaignState, Error, MAX_PRODUCT_TYPES, MAX_REFERRAL_RATE,
};
use crate::utils;

/// Phase of a campaign at `now`.
///
/// Stored `Failed` and `Settled` are final. A stored `Funding` campaign turns
/// into `Success` or `Failed` once `expire_time` is reached, depending on
/// whether `target_minimum` was met.
pub fn evaluate(
    stored: CampaignState,
    now: u64,
    total_raised: i128,
    target_minimum: i128,
    expire_time: u64,
) -> CampaignState {
    match stored {
        CampaignState::Funding if now < expire_time => CampaignState::Funding,
        CampaignState::Funding if total_raised >= target_minimum => CampaignState::Success,
        CampaignState::Funding => CampaignState::Failed,
        other => other,
    }
}

pub fn phase(campaign: &Campaign, now: u64) -> CampaignState {
    evaluate(
        campaign.status,
        now,
        campaign.total_raised,
        campaign.data.target_minimum,
        campaign.data.expire_time,
    )
}

pub fn validate_data(data: &CampaignData, labels: &Vec<String>, now: u64) -> Result<(), Error> {
    if data.opening_time <= now || data.opening_time >= data.expire_time {
        return Err(Error::InvalidTimeWindow);
    }
    if data.target_minimum < 0 || data.target_minimum > data.target_maximum {
        return Err(Error::InvalidTargets);
    }

    let products = data.unit_price_per_type.len();
    if products == 0 || products > MAX_PRODUCT_TYPES {
        return Err(Error::TooManyProducts);
    }
    if data.unit_price_per_type.iter().any(|price| price <= 0) {
        return Err(Error::InvalidPrice);
    }
    if labels.len() != products {
        return Err(Error::LabelCountMismatch);
    }

    if data.referral_rate > MAX_REFERRAL_RATE || data.referral_eligibility_value < 0 {
        return Err(Error::InvalidReferralRate);
    }

    Ok(())
}

/// Orders are accepted only in `Funding` and inside `[opening_time, expire_time)`.
pub fn ensure_accepting_orders(campaign: &Campaign, now: u64) -> Result<(), Error> {
    match phase(campaign, now) {
        CampaignState::Funding if now < campaign.data.opening_time => Err(Error::NotYetOpen),
        CampaignState::Funding => Ok(()),
        CampaignState::Success => Err(Error::EnrollmentClosed),
        CampaignState::Failed if now >= campaign.data.expire_time => Err(Error::EnrollmentClosed),
        _ => Err(Error::InvalidState),
    }
}

/// Value of an order, rejecting malformed quantity vectors.
pub fn price_order(campaign: &Campaign, quantities: &Vec<u32>) -> Result<i128, Error> {
    if quantities.len() != campaign.data.unit_price_per_type.len() {
        return Err(Error::ProductCountMismatch);
    }
    if quantities.iter().all(|quantity| quantity == 0) {
        return Err(Error::InvalidQuantities);
    }
    utils::order_value(&campaign.data.unit_price_per_type, quantities)
}

/// Reject an order that would push the campaign past its ceiling.
pub fn raised_after(campaign: &Campaign, value: i128) -> Result<i128, Error> {
    let raised = utils::checked_add(campaign.total_raised, value)?;
    if raised > campaign.data.target_maximum {
        return Err(Error::TargetMaximumExceeded);
    }
    Ok(raised)
}

pub fn new_campaign(
    env: &Env,
    id: u64,
    data: CampaignData,
    metadata_service: Address,
) -> Campaign {
    Campaign {
        id,
        data,
        status: CampaignState::Funding,
        total_raised: 0,
        participants: 0,
        total_referral_credit: 0,
        metadata_service,
        enrollment_urls: Vec::new(env),
        created_at: utils::now(env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRE: u64 = 1_000;

    #[test]
    fn funding_until_expiry() {
        assert_eq!(
            evaluate(CampaignState::Funding, EXPIRE - 1, 0, 10, EXPIRE),
            CampaignState::Funding
        );
        assert_eq!(
            evaluate(CampaignState::Funding, EXPIRE - 1, 50, 10, EXPIRE),
            CampaignState::Funding
        );
    }

    #[test]
    fn expiry_decides_outcome() {
        assert_eq!(
            evaluate(CampaignState::Funding, EXPIRE, 10, 10, EXPIRE),
            CampaignState::Success
        );
        assert_eq!(
            evaluate(CampaignState::Funding, EXPIRE, 9, 10, EXPIRE),
            CampaignState::Failed
        );
    }

    #[test]
    fn stored_outcomes_are_final() {
        assert_eq!(
            evaluate(CampaignState::Failed, 0, 500, 10, EXPIRE),
            CampaignState::Failed
        );
        assert_eq!(
            evaluate(CampaignState::Settled, EXPIRE * 2, 0, 10, EXPIRE),
            CampaignState::Settled
        );
    }
}

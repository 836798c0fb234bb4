//! Participant records and referral bookkeeping.
//!
//! Referral credit is never paid out while a campaign is funding. It is held
//! against the escrow balance in `Campaign::total_referral_credit` and only
//! becomes claimable after settlement.

use soroban_sdk::{log, Address, Env};

use crate::storage;
use crate::storage_types::{Campaign, CampaignId, Error, ParticipantRecord, VoucherId};
use crate::utils;

/// Credit to be written to a referrer's record.
pub struct ReferralAccrual {
    pub referrer: Address,
    pub referrer_record: ParticipantRecord,
    pub credit: i128,
}

/// Credit to be taken back from a referrer when a referred participant leaves.
pub struct CreditReversal {
    pub referrer: Address,
    pub referrer_record: ParticipantRecord,
    pub amount: i128,
}

/// Resolve the referrer named at first enrollment to its voucher id.
///
/// The voucher id, not the address, is stored so that the attribution follows
/// the referrer's position if its voucher changes hands.
pub fn resolve_referrer(
    env: &Env,
    campaign_id: CampaignId,
    participant: &Address,
    referrer: &Option<Address>,
) -> Result<Option<VoucherId>, Error> {
    let Some(referrer) = referrer else {
        return Ok(None);
    };
    if referrer == participant {
        return Err(Error::SelfReferral);
    }
    storage::voucher_of(env, campaign_id, referrer)
        .map(Some)
        .ok_or(Error::ReferrerNotFound)
}

/// Work out the credit an order of `value` earns for the participant's referrer.
///
/// Nothing accrues when the referrer has left the campaign or has not yet
/// contributed `referral_eligibility_value` itself.
pub fn plan_referral_credit(
    env: &Env,
    campaign: &Campaign,
    referrer: Option<VoucherId>,
    value: i128,
) -> Result<Option<ReferralAccrual>, Error> {
    let Some(voucher_id) = referrer else {
        return Ok(None);
    };
    if campaign.data.referral_rate == 0 {
        return Ok(None);
    }
    let Ok(voucher) = storage::load_voucher(env, voucher_id) else {
        return Ok(None);
    };
    let Some(mut referrer_record) = storage::load_record(env, campaign.id, &voucher.owner) else {
        return Ok(None);
    };
    if referrer_record.contribution < campaign.data.referral_eligibility_value {
        log!(env, "referrer below eligibility value", voucher_id);
        return Ok(None);
    }

    let credit = utils::calculate_percentage(value, campaign.data.referral_rate)?;
    if credit == 0 {
        return Ok(None);
    }
    referrer_record.referral_credit = utils::checked_add(referrer_record.referral_credit, credit)?;

    Ok(Some(ReferralAccrual {
        referrer: voucher.owner,
        referrer_record,
        credit,
    }))
}

/// Work out how much credit must be taken back from the referrer of a
/// participant who is leaving.
pub fn plan_credit_reversal(
    env: &Env,
    campaign: &Campaign,
    record: &ParticipantRecord,
) -> Result<Option<CreditReversal>, Error> {
    if record.credit_generated == 0 {
        return Ok(None);
    }
    let Some(voucher_id) = record.referrer else {
        return Ok(None);
    };
    // A referrer that already left forfeited its credit on the way out.
    let Ok(voucher) = storage::load_voucher(env, voucher_id) else {
        return Ok(None);
    };
    let Some(mut referrer_record) = storage::load_record(env, campaign.id, &voucher.owner) else {
        return Ok(None);
    };

    let amount = record.credit_generated.min(referrer_record.referral_credit);
    referrer_record.referral_credit = utils::checked_sub(referrer_record.referral_credit, amount)?;

    Ok(Some(CreditReversal {
        referrer: voucher.owner,
        referrer_record,
        amount,
    }))
}

pub fn apply_referral_credit(
    env: &Env,
    campaign: &mut Campaign,
    record: &mut ParticipantRecord,
    accrual: ReferralAccrual,
) {
    campaign.total_referral_credit += accrual.credit;
    record.credit_generated += accrual.credit;
    storage::save_record(env, campaign.id, &accrual.referrer, &accrual.referrer_record);
}

/// Persist a reversal. The campaign total is adjusted by the caller.
pub fn save_credit_reversal(env: &Env, campaign_id: CampaignId, reversal: &CreditReversal) {
    storage::save_record(env, campaign_id, &reversal.referrer, &reversal.referrer_record);
}

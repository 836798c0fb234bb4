#![no_std]


mod authorization;
mod campaign;
mod events;
mod metadata;
mod participant;
mod storage;
mod storage_types;
mod utils;
mod vouchers;

pub use authorization::enrollment_message;
pub use metadata::{MetadataService, MetadataServiceClient};
pub use storage_types::{
    Campaign, CampaignData, CampaignId, CampaignState, EnrollmentAuthorization, Error,
    ParticipantRecord, Voucher, VoucherId,
};

use soroban_sdk::{contract, contractimpl, log, token, Address, Bytes, BytesN, Env, String, Vec};

#[contract]
pub struct CrowdtainerContract;

#[contractimpl]
impl CrowdtainerContract {
    /// Create a new campaign and return its id.
    ///
    /// Ids are sequential from 1. `product_labels` must pair one label with
    /// each entry of `data.unit_price_per_type`.
    pub fn create_campaign(
        e: Env,
        data: CampaignData,
        product_labels: Vec<String>,
        metadata_service: Address,
    ) -> Result<CampaignId, Error> {
        data.shipping_agent.require_auth();
        campaign::validate_data(&data, &product_labels, utils::now(&e))?;

        let campaign_id = storage::next_campaign_id(&e);
        let campaign = campaign::new_campaign(&e, campaign_id, data, metadata_service);

        storage::save_campaign(&e, &campaign);
        storage::save_product_labels(&e, campaign_id, &product_labels);

        events::emit_campaign_created(
            &e,
            events::CampaignCreatedEvent {
                campaign_id,
                shipping_agent: campaign.data.shipping_agent.clone(),
                token: campaign.data.token.clone(),
                opening_time: campaign.data.opening_time,
                expire_time: campaign.data.expire_time,
            },
        );

        Ok(campaign_id)
    }

    /// Place a first order in a campaign and receive a voucher for it.
    ///
    /// The order value is pulled from `participant` with `transfer_from`, so
    /// the registry needs an allowance on the campaign token. `referrer`, when
    /// given, must already be enrolled in the same campaign.
    pub fn enroll(
        e: Env,
        campaign_id: CampaignId,
        participant: Address,
        quantities: Vec<u32>,
        referrer: Option<Address>,
        authorization: Option<EnrollmentAuthorization>,
    ) -> Result<VoucherId, Error> {
        participant.require_auth();

        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        campaign::ensure_accepting_orders(&campaign, utils::now(&e))?;
        let value = campaign::price_order(&campaign, &quantities)?;

        if storage::load_record(&e, campaign_id, &participant).is_some() {
            return Err(Error::AlreadyEnrolled);
        }
        let referrer = participant::resolve_referrer(&e, campaign_id, &participant, &referrer)?;
        let nonce =
            authorization::verify(&e, &campaign, &participant, &quantities, &authorization)?;
        let total_raised = campaign::raised_after(&campaign, value)?;
        let accrual = participant::plan_referral_credit(&e, &campaign, referrer, value)?;

        Self::collect_payment(&e, &campaign, &participant, value);
        if let Some(nonce) = nonce {
            storage::mark_nonce_used(&e, campaign_id, &participant, nonce);
        }

        let voucher_id = vouchers::mint(&e, campaign_id, &participant);
        let mut record = ParticipantRecord {
            voucher_id,
            quantities,
            contribution: value,
            referrer,
            referral_credit: 0,
            credit_generated: 0,
        };

        campaign.total_raised = total_raised;
        campaign.participants += 1;
        if let Some(accrual) = accrual {
            Self::credit_referrer(&e, &mut campaign, &mut record, accrual);
        }

        storage::save_record(&e, campaign_id, &participant, &record);
        storage::save_campaign(&e, &campaign);

        events::emit_participant_enrolled(
            &e,
            events::ParticipantEnrolledEvent {
                campaign_id,
                participant,
                voucher_id,
                value,
                referrer,
            },
        );

        Ok(voucher_id)
    }

    /// Add quantities to an existing order. Returns the participant's new
    /// contribution.
    pub fn increase_order(
        e: Env,
        campaign_id: CampaignId,
        participant: Address,
        quantities: Vec<u32>,
        authorization: Option<EnrollmentAuthorization>,
    ) -> Result<i128, Error> {
        participant.require_auth();

        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        campaign::ensure_accepting_orders(&campaign, utils::now(&e))?;
        let value = campaign::price_order(&campaign, &quantities)?;

        let mut record =
            storage::load_record(&e, campaign_id, &participant).ok_or(Error::NotEnrolled)?;
        let nonce =
            authorization::verify(&e, &campaign, &participant, &quantities, &authorization)?;
        let total_raised = campaign::raised_after(&campaign, value)?;
        let accrual = participant::plan_referral_credit(&e, &campaign, record.referrer, value)?;
        let merged = utils::add_quantities(&e, &record.quantities, &quantities)?;
        let contribution = utils::checked_add(record.contribution, value)?;

        Self::collect_payment(&e, &campaign, &participant, value);
        if let Some(nonce) = nonce {
            storage::mark_nonce_used(&e, campaign_id, &participant, nonce);
        }

        record.quantities = merged;
        record.contribution = contribution;
        campaign.total_raised = total_raised;
        if let Some(accrual) = accrual {
            Self::credit_referrer(&e, &mut campaign, &mut record, accrual);
        }

        storage::save_record(&e, campaign_id, &participant, &record);
        storage::save_campaign(&e, &campaign);

        events::emit_order_increased(
            &e,
            events::OrderIncreasedEvent {
                campaign_id,
                participant,
                voucher_id: record.voucher_id,
                value,
            },
        );

        Ok(contribution)
    }

    /// Leave a campaign and get the full contribution back.
    ///
    /// Allowed while funding, and as a refund once the campaign failed. The
    /// voucher is burned. Returns the refunded amount.
    pub fn withdraw(e: Env, campaign_id: CampaignId, participant: Address) -> Result<i128, Error> {
        participant.require_auth();

        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        let phase = campaign::phase(&campaign, utils::now(&e));
        match phase {
            CampaignState::Funding | CampaignState::Failed => {}
            CampaignState::Settled => return Err(Error::AlreadySettled),
            _ => return Err(Error::InvalidState),
        }

        let record =
            storage::load_record(&e, campaign_id, &participant).ok_or(Error::NotEnrolled)?;
        let voucher = storage::load_voucher(&e, record.voucher_id)?;
        let reversal = participant::plan_credit_reversal(&e, &campaign, &record)?;
        let reversed = reversal.as_ref().map(|r| r.amount).unwrap_or(0);
        let total_referral_credit = utils::checked_sub(
            utils::checked_sub(campaign.total_referral_credit, reversed)?,
            record.referral_credit,
        )?;
        let total_raised = utils::checked_sub(campaign.total_raised, record.contribution)?;

        if phase == CampaignState::Failed && campaign.status == CampaignState::Funding {
            Self::change_state(&e, &mut campaign, CampaignState::Failed);
        }
        if let Some(reversal) = &reversal {
            participant::save_credit_reversal(&e, campaign_id, reversal);
        }

        storage::remove_record(&e, campaign_id, &participant);
        vouchers::burn(&e, &voucher);

        campaign.total_raised = total_raised;
        campaign.total_referral_credit = total_referral_credit;
        campaign.participants -= 1;
        if phase == CampaignState::Failed && campaign.participants == 0 {
            Self::change_state(&e, &mut campaign, CampaignState::Settled);
        }
        storage::save_campaign(&e, &campaign);

        Self::transfer_funds(&e, &campaign, &participant, record.contribution);

        events::emit_participant_withdrew(
            &e,
            events::ParticipantWithdrewEvent {
                campaign_id,
                participant,
                voucher_id: record.voucher_id,
                refunded: record.contribution,
            },
        );

        Ok(record.contribution)
    }

    /// Pay the raised funds to the shipping agent once the campaign succeeded.
    ///
    /// Referral credit stays in escrow for referrers to claim. Returns the
    /// amount paid to the agent.
    pub fn settle(e: Env, campaign_id: CampaignId) -> Result<i128, Error> {
        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        campaign.data.shipping_agent.require_auth();

        match campaign::phase(&campaign, utils::now(&e)) {
            CampaignState::Success => {}
            CampaignState::Funding => return Err(Error::CampaignStillOpen),
            CampaignState::Failed => return Err(Error::CampaignFailed),
            CampaignState::Settled => return Err(Error::AlreadySettled),
            CampaignState::Uninitialized => return Err(Error::CampaignNotFound),
        }

        let payout = utils::checked_sub(campaign.total_raised, campaign.total_referral_credit)?;

        campaign.status = CampaignState::Settled;
        storage::save_campaign(&e, &campaign);

        let agent = campaign.data.shipping_agent.clone();
        Self::transfer_funds(&e, &campaign, &agent, payout);

        events::emit_campaign_settled(
            &e,
            events::CampaignSettledEvent {
                campaign_id,
                shipping_agent: agent,
                payout,
            },
        );

        Ok(payout)
    }

    /// Stop a funding campaign. Every participant can then withdraw a refund.
    /// A campaign without participants is settled right away.
    pub fn abort(e: Env, campaign_id: CampaignId) -> Result<(), Error> {
        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        campaign.data.shipping_agent.require_auth();

        match campaign::phase(&campaign, utils::now(&e)) {
            CampaignState::Funding => {}
            CampaignState::Settled => return Err(Error::AlreadySettled),
            _ => return Err(Error::InvalidState),
        }

        Self::change_state(&e, &mut campaign, CampaignState::Failed);
        // Nobody to refund.
        if campaign.participants == 0 {
            Self::change_state(&e, &mut campaign, CampaignState::Settled);
        }
        storage::save_campaign(&e, &campaign);
        Ok(())
    }

    /// Pay out the referral credit a participant accumulated, after settlement.
    pub fn claim_referral_rewards(
        e: Env,
        campaign_id: CampaignId,
        participant: Address,
    ) -> Result<i128, Error> {
        participant.require_auth();

        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        if campaign.status != CampaignState::Settled {
            return Err(Error::InvalidState);
        }
        let mut record =
            storage::load_record(&e, campaign_id, &participant).ok_or(Error::NotEnrolled)?;
        let amount = record.referral_credit;
        if amount == 0 {
            return Err(Error::NoReferralCredit);
        }

        record.referral_credit = 0;
        campaign.total_referral_credit = utils::checked_sub(campaign.total_referral_credit, amount)?;
        storage::save_record(&e, campaign_id, &participant, &record);
        storage::save_campaign(&e, &campaign);

        Self::transfer_funds(&e, &campaign, &participant, amount);

        events::emit_referral_reward_claimed(
            &e,
            events::ReferralRewardClaimedEvent {
                campaign_id,
                participant,
                amount,
            },
        );

        Ok(amount)
    }

    /// Replace the key that signs enrollment attestations. `None` lets anyone
    /// enroll without one.
    pub fn set_authorizer(
        e: Env,
        campaign_id: CampaignId,
        authorizer: Option<BytesN<32>>,
    ) -> Result<(), Error> {
        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        campaign.data.shipping_agent.require_auth();

        campaign.data.authorizer = authorizer.clone();
        storage::save_campaign(&e, &campaign);

        events::emit_authorizer_updated(
            &e,
            events::AuthorizerUpdatedEvent {
                campaign_id,
                authorizer,
            },
        );
        Ok(())
    }

    /// Set the endpoints clients query for enrollment attestations.
    pub fn set_enrollment_urls(
        e: Env,
        campaign_id: CampaignId,
        urls: Vec<String>,
    ) -> Result<(), Error> {
        let mut campaign = storage::load_campaign(&e, campaign_id)?;
        campaign.data.shipping_agent.require_auth();

        campaign.enrollment_urls = urls.clone();
        storage::save_campaign(&e, &campaign);

        events::emit_enrollment_urls_updated(
            &e,
            events::EnrollmentUrlsUpdatedEvent { campaign_id, urls },
        );
        Ok(())
    }

    /// Move a voucher, and the order behind it, to another account.
    ///
    /// Only possible while the campaign is funding.
    pub fn transfer_voucher(
        e: Env,
        from: Address,
        to: Address,
        voucher_id: VoucherId,
    ) -> Result<(), Error> {
        from.require_auth();

        let voucher = storage::load_voucher(&e, voucher_id)?;
        if voucher.owner != from {
            return Err(Error::NotVoucherOwner);
        }
        if from == to {
            return Err(Error::InvalidRecipient);
        }

        let campaign = storage::load_campaign(&e, voucher.campaign_id)?;
        if campaign::phase(&campaign, utils::now(&e)) != CampaignState::Funding {
            return Err(Error::TransferNotAllowed);
        }
        if storage::load_record(&e, campaign.id, &to).is_some() {
            return Err(Error::AlreadyEnrolled);
        }
        let record = storage::load_record(&e, campaign.id, &from).ok_or(Error::NotEnrolled)?;

        storage::remove_record(&e, campaign.id, &from);
        storage::save_record(&e, campaign.id, &to, &record);
        vouchers::reassign(&e, voucher, &to);
        Ok(())
    }

    // Queries

    pub fn campaign_count(e: Env) -> u64 {
        storage::campaign_count(&e)
    }

    pub fn get_campaign(e: Env, campaign_id: CampaignId) -> Result<Campaign, Error> {
        storage::load_campaign(&e, campaign_id)
    }

    /// Current phase, derived from the ledger time. Never writes.
    pub fn campaign_state(e: Env, campaign_id: CampaignId) -> CampaignState {
        match storage::load_campaign(&e, campaign_id) {
            Ok(campaign) => campaign::phase(&campaign, utils::now(&e)),
            Err(_) => CampaignState::Uninitialized,
        }
    }

    pub fn total_raised(e: Env, campaign_id: CampaignId) -> Result<i128, Error> {
        Ok(storage::load_campaign(&e, campaign_id)?.total_raised)
    }

    pub fn product_labels(e: Env, campaign_id: CampaignId) -> Result<Vec<String>, Error> {
        storage::load_product_labels(&e, campaign_id)
    }

    pub fn enrollment_urls(e: Env, campaign_id: CampaignId) -> Result<Vec<String>, Error> {
        Ok(storage::load_campaign(&e, campaign_id)?.enrollment_urls)
    }

    pub fn get_participant(
        e: Env,
        campaign_id: CampaignId,
        participant: Address,
    ) -> Option<ParticipantRecord> {
        storage::load_record(&e, campaign_id, &participant)
    }

    pub fn referral_credit(e: Env, campaign_id: CampaignId, participant: Address) -> i128 {
        storage::load_record(&e, campaign_id, &participant)
            .map(|record| record.referral_credit)
            .unwrap_or(0)
    }

    /// Canonical bytes an authorizer signs for an order.
    pub fn enrollment_payload(
        e: Env,
        campaign_id: CampaignId,
        participant: Address,
        quantities: Vec<u32>,
        nonce: u64,
        expires_at: u64,
    ) -> Result<Bytes, Error> {
        if !storage::has_campaign(&e, campaign_id) {
            return Err(Error::CampaignNotFound);
        }
        Ok(enrollment_message(
            &e,
            &e.current_contract_address(),
            campaign_id,
            &participant,
            &quantities,
            nonce,
            expires_at,
        ))
    }

    pub fn owner_of(e: Env, voucher_id: VoucherId) -> Result<Address, Error> {
        Ok(storage::load_voucher(&e, voucher_id)?.owner)
    }

    pub fn balance_of(e: Env, owner: Address) -> u32 {
        storage::voucher_balance(&e, &owner)
    }

    pub fn voucher_of(e: Env, campaign_id: CampaignId, owner: Address) -> Option<VoucherId> {
        storage::voucher_of(&e, campaign_id, &owner)
    }

    pub fn voucher_campaign(e: Env, voucher_id: VoucherId) -> Result<CampaignId, Error> {
        Ok(storage::load_voucher(&e, voucher_id)?.campaign_id)
    }

    /// Description of a voucher, rendered by the campaign's metadata service.
    pub fn token_uri(e: Env, voucher_id: VoucherId) -> Result<String, Error> {
        let voucher = storage::load_voucher(&e, voucher_id)?;
        let campaign = storage::load_campaign(&e, voucher.campaign_id)?;
        let service = MetadataServiceClient::new(&e, &campaign.metadata_service);
        Ok(service.describe(&voucher.campaign_id, &voucher.id))
    }
}

impl CrowdtainerContract {
    fn collect_payment(e: &Env, campaign: &Campaign, from: &Address, amount: i128) {
        let contract = e.current_contract_address();
        let token_client = token::Client::new(e, &campaign.data.token);
        token_client.transfer_from(&contract, from, &contract, &amount);
    }

    fn transfer_funds(e: &Env, campaign: &Campaign, recipient: &Address, amount: i128) {
        if amount <= 0 {
            return;
        }
        let token_client = token::Client::new(e, &campaign.data.token);
        token_client.transfer(&e.current_contract_address(), recipient, &amount);
    }

    fn credit_referrer(
        e: &Env,
        campaign: &mut Campaign,
        record: &mut ParticipantRecord,
        accrual: participant::ReferralAccrual,
    ) {
        let referrer = accrual.referrer.clone();
        let credit = accrual.credit;
        participant::apply_referral_credit(e, campaign, record, accrual);

        events::emit_referral_credited(
            e,
            events::ReferralCreditedEvent {
                campaign_id: campaign.id,
                referrer,
                credit,
            },
        );
    }

    fn change_state(e: &Env, campaign: &mut Campaign, state: CampaignState) {
        log!(e, "campaign state changed", campaign.id, state);
        campaign.status = state;
        events::emit_campaign_state_changed(
            e,
            events::CampaignStateChangedEvent {
                campaign_id: campaign.id,
                state,
            },
        );
    }
}

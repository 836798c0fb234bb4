use soroban_sdk::{contracttype, Address, BytesN, Env, String, Symbol, Vec};

use crate::storage_types::{CampaignId, CampaignState, VoucherId};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub shipping_agent: Address,
    pub token: Address,
    pub opening_time: u64,
    pub expire_time: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct ParticipantEnrolledEvent {
    pub campaign_id: CampaignId,
    pub participant: Address,
    pub voucher_id: VoucherId,
    pub value: i128,
    pub referrer: Option<VoucherId>,
}

#[contracttype]
#[derive(Clone)]
pub struct OrderIncreasedEvent {
    pub campaign_id: CampaignId,
    pub participant: Address,
    pub voucher_id: VoucherId,
    pub value: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ParticipantWithdrewEvent {
    pub campaign_id: CampaignId,
    pub participant: Address,
    pub voucher_id: VoucherId,
    pub refunded: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ReferralCreditedEvent {
    pub campaign_id: CampaignId,
    pub referrer: Address,
    pub credit: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ReferralRewardClaimedEvent {
    pub campaign_id: CampaignId,
    pub participant: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignStateChangedEvent {
    pub campaign_id: CampaignId,
    pub state: CampaignState,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignSettledEvent {
    pub campaign_id: CampaignId,
    pub shipping_agent: Address,
    pub payout: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct AuthorizerUpdatedEvent {
    pub campaign_id: CampaignId,
    pub authorizer: Option<BytesN<32>>,
}

#[contracttype]
#[derive(Clone)]
pub struct EnrollmentUrlsUpdatedEvent {
    pub campaign_id: CampaignId,
    pub urls: Vec<String>,
}

#[contracttype]
#[derive(Clone)]
pub struct VoucherMintedEvent {
    pub voucher_id: VoucherId,
    pub campaign_id: CampaignId,
    pub owner: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct VoucherBurnedEvent {
    pub voucher_id: VoucherId,
    pub campaign_id: CampaignId,
    pub owner: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct VoucherTransferredEvent {
    pub voucher_id: VoucherId,
    pub campaign_id: CampaignId,
    pub from: Address,
    pub to: Address,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "created")),
        event,
    );
}

pub fn emit_participant_enrolled(env: &Env, event: ParticipantEnrolledEvent) {
    env.events().publish(
        (Symbol::new(env, "participant"), Symbol::new(env, "enrolled")),
        event,
    );
}

pub fn emit_order_increased(env: &Env, event: OrderIncreasedEvent) {
    env.events().publish(
        (Symbol::new(env, "participant"), Symbol::new(env, "increased")),
        event,
    );
}

pub fn emit_participant_withdrew(env: &Env, event: ParticipantWithdrewEvent) {
    env.events().publish(
        (Symbol::new(env, "participant"), Symbol::new(env, "withdrew")),
        event,
    );
}

pub fn emit_referral_credited(env: &Env, event: ReferralCreditedEvent) {
    env.events().publish(
        (Symbol::new(env, "referral"), Symbol::new(env, "credited")),
        event,
    );
}

pub fn emit_referral_reward_claimed(env: &Env, event: ReferralRewardClaimedEvent) {
    env.events().publish(
        (Symbol::new(env, "referral"), Symbol::new(env, "claimed")),
        event,
    );
}

pub fn emit_campaign_state_changed(env: &Env, event: CampaignStateChangedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "state")),
        event,
    );
}

pub fn emit_campaign_settled(env: &Env, event: CampaignSettledEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "settled")),
        event,
    );
}

pub fn emit_authorizer_updated(env: &Env, event: AuthorizerUpdatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "authorizer")),
        event,
    );
}

pub fn emit_enrollment_urls_updated(env: &Env, event: EnrollmentUrlsUpdatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign"), Symbol::new(env, "urls")),
        event,
    );
}

pub fn emit_voucher_minted(env: &Env, event: VoucherMintedEvent) {
    env.events().publish(
        (Symbol::new(env, "voucher"), Symbol::new(env, "minted")),
        event,
    );
}

pub fn emit_voucher_burned(env: &Env, event: VoucherBurnedEvent) {
    env.events().publish(
        (Symbol::new(env, "voucher"), Symbol::new(env, "burned")),
        event,
    );
}

pub fn emit_voucher_transferred(env: &Env, event: VoucherTransferredEvent) {
    env.events().publish(
        (Symbol::new(env, "voucher"), Symbol::new(env, "transfer")),
        event,
    );
}

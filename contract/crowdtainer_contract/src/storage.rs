use soroban_sdk::{Address, Env, IntoVal, String, TryFromVal, Val, Vec};

use crate::storage_types::{
    Campaign, CampaignId, DataKey, Error, ParticipantRecord, PersistentKey, Voucher, VoucherId,
    TTL_INSTANCE, TTL_PERSISTENT,
};

pub fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

pub fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn set_persistent<V>(e: &Env, key: &PersistentKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    e.storage().persistent().set(key, value);
    extend_persistent(e, key);
}

/// Reading an entry extends its TTL as well.
fn get_persistent<V>(e: &Env, key: &PersistentKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value = e.storage().persistent().get(key);
    if value.is_some() {
        extend_persistent(e, key);
    }
    value
}

// Campaign arena

pub fn campaign_count(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Reserve the next campaign id. Ids start at 1 and are never handed out twice.
pub fn next_campaign_id(e: &Env) -> CampaignId {
    let id = campaign_count(e) + 1;
    e.storage().instance().set(&DataKey::CampaignCount, &id);
    extend_instance(e);
    id
}

pub fn has_campaign(e: &Env, campaign_id: CampaignId) -> bool {
    e.storage()
        .persistent()
        .has(&PersistentKey::Campaign(campaign_id))
}

pub fn load_campaign(e: &Env, campaign_id: CampaignId) -> Result<Campaign, Error> {
    get_persistent(e, &PersistentKey::Campaign(campaign_id)).ok_or(Error::CampaignNotFound)
}

pub fn save_campaign(e: &Env, campaign: &Campaign) {
    set_persistent(e, &PersistentKey::Campaign(campaign.id), campaign);
    extend_instance(e);
}

pub fn load_product_labels(e: &Env, campaign_id: CampaignId) -> Result<Vec<String>, Error> {
    get_persistent(e, &PersistentKey::ProductLabels(campaign_id)).ok_or(Error::CampaignNotFound)
}

pub fn save_product_labels(e: &Env, campaign_id: CampaignId, labels: &Vec<String>) {
    set_persistent(e, &PersistentKey::ProductLabels(campaign_id), labels);
}

// Participants

pub fn load_record(
    e: &Env,
    campaign_id: CampaignId,
    participant: &Address,
) -> Option<ParticipantRecord> {
    get_persistent(e, &PersistentKey::Participant(campaign_id, participant.clone()))
}

pub fn save_record(
    e: &Env,
    campaign_id: CampaignId,
    participant: &Address,
    record: &ParticipantRecord,
) {
    set_persistent(
        e,
        &PersistentKey::Participant(campaign_id, participant.clone()),
        record,
    );
}

pub fn remove_record(e: &Env, campaign_id: CampaignId, participant: &Address) {
    e.storage()
        .persistent()
        .remove(&PersistentKey::Participant(campaign_id, participant.clone()));
}

pub fn is_nonce_used(e: &Env, campaign_id: CampaignId, participant: &Address, nonce: u64) -> bool {
    e.storage()
        .persistent()
        .has(&PersistentKey::UsedNonce(campaign_id, participant.clone(), nonce))
}

pub fn mark_nonce_used(e: &Env, campaign_id: CampaignId, participant: &Address, nonce: u64) {
    set_persistent(
        e,
        &PersistentKey::UsedNonce(campaign_id, participant.clone(), nonce),
        &true,
    );
}

// Vouchers

pub fn next_voucher_id(e: &Env) -> VoucherId {
    let id: VoucherId = e
        .storage()
        .instance()
        .get(&DataKey::NextVoucherId)
        .unwrap_or(1);
    e.storage().instance().set(&DataKey::NextVoucherId, &(id + 1));
    extend_instance(e);
    id
}

pub fn load_voucher(e: &Env, voucher_id: VoucherId) -> Result<Voucher, Error> {
    get_persistent(e, &PersistentKey::Voucher(voucher_id)).ok_or(Error::VoucherNotFound)
}

pub fn save_voucher(e: &Env, voucher: &Voucher) {
    set_persistent(e, &PersistentKey::Voucher(voucher.id), voucher);
}

pub fn remove_voucher(e: &Env, voucher_id: VoucherId) {
    e.storage()
        .persistent()
        .remove(&PersistentKey::Voucher(voucher_id));
}

pub fn voucher_of(e: &Env, campaign_id: CampaignId, owner: &Address) -> Option<VoucherId> {
    get_persistent(e, &PersistentKey::VoucherOf(campaign_id, owner.clone()))
}

pub fn set_voucher_of(e: &Env, campaign_id: CampaignId, owner: &Address, voucher_id: VoucherId) {
    set_persistent(
        e,
        &PersistentKey::VoucherOf(campaign_id, owner.clone()),
        &voucher_id,
    );
}

pub fn remove_voucher_of(e: &Env, campaign_id: CampaignId, owner: &Address) {
    e.storage()
        .persistent()
        .remove(&PersistentKey::VoucherOf(campaign_id, owner.clone()));
}

pub fn voucher_balance(e: &Env, owner: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&PersistentKey::VoucherBalance(owner.clone()))
        .unwrap_or(0)
}

pub fn set_voucher_balance(e: &Env, owner: &Address, balance: u32) {
    let key = PersistentKey::VoucherBalance(owner.clone());
    if balance == 0 {
        e.storage().persistent().remove(&key);
    } else {
        set_persistent(e, &key, &balance);
    }
}

//! Voucher ledger.
//!
//! One voucher exists per live participant record. Vouchers are only minted,
//! burned or moved from inside campaign entry points.

use soroban_sdk::{Address, Env};

use crate::events;
use crate::storage;
use crate::storage_types::{CampaignId, Voucher, VoucherId};

pub fn mint(env: &Env, campaign_id: CampaignId, owner: &Address) -> VoucherId {
    let voucher = Voucher {
        id: storage::next_voucher_id(env),
        campaign_id,
        owner: owner.clone(),
    };
    storage::save_voucher(env, &voucher);
    storage::set_voucher_of(env, campaign_id, owner, voucher.id);
    storage::set_voucher_balance(env, owner, storage::voucher_balance(env, owner) + 1);

    events::emit_voucher_minted(
        env,
        events::VoucherMintedEvent {
            voucher_id: voucher.id,
            campaign_id,
            owner: owner.clone(),
        },
    );

    voucher.id
}

/// Burned ids are never minted again since ids only grow.
pub fn burn(env: &Env, voucher: &Voucher) {
    storage::remove_voucher(env, voucher.id);
    storage::remove_voucher_of(env, voucher.campaign_id, &voucher.owner);
    storage::set_voucher_balance(
        env,
        &voucher.owner,
        storage::voucher_balance(env, &voucher.owner).saturating_sub(1),
    );

    events::emit_voucher_burned(
        env,
        events::VoucherBurnedEvent {
            voucher_id: voucher.id,
            campaign_id: voucher.campaign_id,
            owner: voucher.owner.clone(),
        },
    );
}

pub fn reassign(env: &Env, mut voucher: Voucher, to: &Address) {
    let from = voucher.owner.clone();

    storage::remove_voucher_of(env, voucher.campaign_id, &from);
    storage::set_voucher_balance(
        env,
        &from,
        storage::voucher_balance(env, &from).saturating_sub(1),
    );

    voucher.owner = to.clone();
    storage::save_voucher(env, &voucher);
    storage::set_voucher_of(env, voucher.campaign_id, to, voucher.id);
    storage::set_voucher_balance(env, to, storage::voucher_balance(env, to) + 1);

    events::emit_voucher_transferred(
        env,
        events::VoucherTransferredEvent {
            voucher_id: voucher.id,
            campaign_id: voucher.campaign_id,
            from,
            to: to.clone(),
        },
    );
}

use soroban_sdk::{log, xdr::ToXdr, Address, Bytes, Env, Vec};

use crate::storage;
use crate::storage_types::{
    Campaign, CampaignId, EnrollmentAuthorization, Error, ENROLLMENT_DOMAIN,
};
use crate::utils;

/// Bytes the campaign authorizer signs to approve an order.
///
/// The layout is the domain tag followed by the XDR encoding of each field, so
/// a signature for one registry, campaign or participant never verifies for
/// another.
pub fn enrollment_message(
    env: &Env,
    registry: &Address,
    campaign_id: CampaignId,
    participant: &Address,
    quantities: &Vec<u32>,
    nonce: u64,
    expires_at: u64,
) -> Bytes {
    let mut message = Bytes::from_slice(env, ENROLLMENT_DOMAIN);
    message.append(&registry.clone().to_xdr(env));
    message.append(&campaign_id.to_xdr(env));
    message.append(&participant.clone().to_xdr(env));
    message.append(&quantities.clone().to_xdr(env));
    message.append(&nonce.to_xdr(env));
    message.append(&expires_at.to_xdr(env));
    message
}

/// Check an order against the campaign's authorizer.
///
/// Returns the nonce that must be consumed once the order is committed, or
/// `None` when the campaign does not require authorization. An invalid
/// signature traps inside the host and rejects the whole invocation.
pub fn verify(
    env: &Env,
    campaign: &Campaign,
    participant: &Address,
    quantities: &Vec<u32>,
    authorization: &Option<EnrollmentAuthorization>,
) -> Result<Option<u64>, Error> {
    let Some(authorizer) = &campaign.data.authorizer else {
        return Ok(None);
    };

    let Some(authorization) = authorization else {
        log!(env, "attestation required", campaign.id);
        return Err(Error::AuthorizationRequired);
    };

    if utils::now(env) > authorization.expires_at {
        return Err(Error::AuthorizationExpired);
    }
    if storage::is_nonce_used(env, campaign.id, participant, authorization.nonce) {
        return Err(Error::NonceAlreadyUsed);
    }

    let message = enrollment_message(
        env,
        &env.current_contract_address(),
        campaign.id,
        participant,
        quantities,
        authorization.nonce,
        authorization.expires_at,
    );
    env.crypto()
        .ed25519_verify(authorizer, &message, &authorization.signature);

    Ok(Some(authorization.nonce))
}

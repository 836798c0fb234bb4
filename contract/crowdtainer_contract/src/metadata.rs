use soroban_sdk::{contractclient, Env, String};

/// Renders the description of a voucher. Implemented by a separate contract
/// whose address is fixed per campaign at creation.
#[contractclient(name = "MetadataServiceClient")]
pub trait MetadataService {
    fn describe(env: Env, campaign_id: u64, voucher_id: u64) -> String;
}

use soroban_sdk::{contracterror, contracttype, Address, BytesN, String, Vec};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    CampaignCount,
    NextVoucherId,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    ProductLabels(CampaignId),
    Participant(CampaignId, Address),
    UsedNonce(CampaignId, Address, u64),
    Voucher(VoucherId),
    VoucherOf(CampaignId, Address),
    VoucherBalance(Address),
}

pub type CampaignId = u64;
pub type VoucherId = u64;

/// Lifecycle phase of a campaign.
///
/// Only `Funding`, `Failed` and `Settled` are ever written to storage.
/// `Success` and the time-driven `Failed` are derived on read, see
/// [`crate::campaign::evaluate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CampaignState {
    Uninitialized,
    Funding,
    Success,
    Failed,
    Settled,
}

/// Parameters supplied by the campaign creator.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignData {
    pub shipping_agent: Address,
    pub authorizer: Option<BytesN<32>>, // ed25519 key, None disables the gateway
    pub opening_time: u64,
    pub expire_time: u64,
    pub target_minimum: i128,
    pub target_maximum: i128,
    pub unit_price_per_type: Vec<i128>,
    pub referral_rate: u32,               // percent of a referred order credited to the referrer
    pub referral_eligibility_value: i128, // own contribution needed before credit accrues
    pub token: Address,
    pub legal_contract_uri: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub data: CampaignData,
    pub status: CampaignState,
    pub total_raised: i128,
    pub participants: u32,
    pub total_referral_credit: i128,
    pub metadata_service: Address,
    pub enrollment_urls: Vec<String>,
    pub created_at: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ParticipantRecord {
    pub voucher_id: VoucherId,
    pub quantities: Vec<u32>,
    pub contribution: i128,
    pub referrer: Option<VoucherId>,
    pub referral_credit: i128,
    pub credit_generated: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Voucher {
    pub id: VoucherId,
    pub campaign_id: CampaignId,
    pub owner: Address,
}

/// Off-chain attestation submitted with an order when the campaign has an
/// authorizer.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct EnrollmentAuthorization {
    pub nonce: u64,
    pub expires_at: u64,
    pub signature: BytesN<64>,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Malformed input
    CampaignNotFound = 1,
    InvalidQuantities = 2,
    ProductCountMismatch = 3,
    InvalidPrice = 4,
    InvalidTimeWindow = 5,
    InvalidTargets = 6,
    InvalidReferralRate = 7,
    LabelCountMismatch = 8,
    TooManyProducts = 9,
    VoucherNotFound = 10,
    InvalidRecipient = 11,
    ReferrerNotFound = 12,
    SelfReferral = 13,

    // Lifecycle
    NotYetOpen = 20,
    EnrollmentClosed = 21,
    InvalidState = 22,
    CampaignStillOpen = 23,
    CampaignFailed = 24,
    AlreadySettled = 25,
    NotEnrolled = 26,
    TransferNotAllowed = 27,
    NoReferralCredit = 28,

    // Authorization
    AuthorizationRequired = 40,
    AuthorizationExpired = 41,
    NonceAlreadyUsed = 42,
    NotVoucherOwner = 43,

    // Invariants
    TargetMaximumExceeded = 60,
    AlreadyEnrolled = 61,
    ArithmeticOverflow = 62,
}

// Constants
pub const PERCENTAGE_BASE: i128 = 100;
pub const MAX_REFERRAL_RATE: u32 = 100;
pub const MAX_PRODUCT_TYPES: u32 = 64;
pub const ENROLLMENT_DOMAIN: &[u8] = b"crowdtainer:enroll";
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

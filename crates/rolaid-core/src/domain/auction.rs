//! Auction settlement payload and result record.

use serde::{Deserialize, Serialize};

use super::commitment::Commitment;
use super::nullable::null_as_default;
use crate::typed::Task;

/// Already-decided auction outcome to be committed to.
///
/// 欠けたフィールドと `null` は空値で decode し、判定は handler の field 検証に任せる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionTask {
    #[serde(deserialize_with = "null_as_default")]
    pub auction_id: u64,
    /// bytes32 hex
    #[serde(deserialize_with = "null_as_default")]
    pub pool_id: String,
    /// bytes32 hex
    #[serde(deserialize_with = "null_as_default")]
    pub oracle_update_id: String,
    /// Hex payload forwarded on-chain, any length.
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_data: String,
    /// Decimal or hex; not interpreted here.
    #[serde(deserialize_with = "null_as_default")]
    pub expected_bid_wei: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_digest: String,
    /// Replay guard, carried through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_nonce: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auction_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_vault: Option<String>,
}

impl Task for AuctionTask {
    const KIND: &'static str = "auction_settlement";
    const LABEL: &'static str = "auction";

    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn image_digest(&self) -> &str {
        &self.image_digest
    }
}

/// Result record returned to the task server.
///
/// Fields are declared in key order: the executor signs the encoded bytes, and
/// other performers emit the keys sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionSettlement {
    pub auction_id: u64,
    pub auction_service: String,
    pub commitment: Commitment,
    pub kind: &'static str,
    pub oracle_update_id: String,
    pub pool_id: String,
}

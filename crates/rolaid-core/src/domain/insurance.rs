//! Insurance payout payload and result record.

use serde::{Deserialize, Serialize};

use super::commitment::Commitment;
use super::nullable::null_as_default;
use crate::typed::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceTask {
    #[serde(deserialize_with = "null_as_default")]
    pub policy_batch_id: String,
    /// Event descriptors. Order is part of the commitment.
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<String>,
    /// Drives the downstream deterministic computation; only carried here.
    #[serde(deserialize_with = "null_as_default")]
    pub seed: u64,
    /// Total pot to allocate (decimal string).
    #[serde(deserialize_with = "null_as_default")]
    pub amount_wei: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_vault: Option<String>,
}

impl InsuranceTask {
    /// Events joined with a bare `,`.
    ///
    /// Event strings are not escaped, so `["a,b"]` and `["a", "b"]` join to the
    /// same bytes. Changing this changes every existing payout commitment.
    pub fn joined_events(&self) -> String {
        self.events.join(",")
    }
}

impl Task for InsuranceTask {
    const KIND: &'static str = "insurance_payout";
    const LABEL: &'static str = "insurance";

    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn image_digest(&self) -> &str {
        &self.image_digest
    }
}

/// Keys in sorted order, same as [`AuctionSettlement`](super::AuctionSettlement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsurancePayout {
    pub kind: &'static str,
    pub payout_commitment: Commitment,
    pub policy_batch_id: String,
    pub seed: u64,
    pub settlement_vault: String,
}

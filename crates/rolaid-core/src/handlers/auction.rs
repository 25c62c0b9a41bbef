//! Auction settlement handler.
//!
//! # 検証順序（最初の失敗で止まる）
//! 1. pool_id / oracle_update_id / app_id / image_digest が bytes32 hex
//! 2. settlement_data が hex として decode できる（長さは任意）
//! 3. auction service アドレスの解決（override → AUCTION_SERVICE_ADDRESS）
//!
//! commitment = sha256(settlement_data || oracle_update_id || pool_id)

use std::sync::Arc;

use tracing::info;

use crate::config::{AddressKey, PerformerConfig};
use crate::domain::errors::{FieldFault, PerformerError};
use crate::domain::validate::{decode_hex_bytes, require_bytes32};
use crate::domain::{AuctionSettlement, AuctionTask, hash_commitment};
use crate::typed::{Handler, Task};

pub struct AuctionSettlementHandler {
    config: Arc<PerformerConfig>,
}

impl AuctionSettlementHandler {
    pub fn new(config: Arc<PerformerConfig>) -> Self {
        Self { config }
    }
}

impl Handler<AuctionTask> for AuctionSettlementHandler {
    type Output = AuctionSettlement;

    fn handle(&self, task: &AuctionTask) -> Result<AuctionSettlement, PerformerError> {
        info!(
            auction_id = task.auction_id,
            pool_id = %task.pool_id,
            oracle_update_id = %task.oracle_update_id,
            "auction settlement task"
        );

        require_bytes32("pool_id", &task.pool_id)?;
        require_bytes32("oracle_update_id", &task.oracle_update_id)?;
        require_bytes32("app_id", &task.app_id)?;
        require_bytes32("image_digest", &task.image_digest)?;
        decode_hex_bytes(&task.settlement_data).map_err(|e| {
            PerformerError::invalid_field("settlement_data", FieldFault::InvalidHex(e.to_string()))
        })?;

        let auction_service = self
            .config
            .resolve_address(task.auction_service.as_deref(), AddressKey::AuctionService)?;

        let commitment = hash_commitment(&[
            task.settlement_data.as_str(),
            task.oracle_update_id.as_str(),
            task.pool_id.as_str(),
        ]);

        Ok(AuctionSettlement {
            kind: AuctionTask::KIND,
            auction_id: task.auction_id,
            oracle_update_id: task.oracle_update_id.clone(),
            pool_id: task.pool_id.clone(),
            commitment,
            auction_service,
        })
    }
}

//! Insurance payout handler.
//!
//! payout_commitment = sha256(events.join(",") || seed(10進) || amount_wei)

use std::sync::Arc;

use tracing::info;

use crate::config::{AddressKey, PerformerConfig};
use crate::domain::errors::PerformerError;
use crate::domain::validate::require_bytes32;
use crate::domain::{InsurancePayout, InsuranceTask, hash_commitment};
use crate::typed::{Handler, Task};

pub struct InsurancePayoutHandler {
    config: Arc<PerformerConfig>,
}

impl InsurancePayoutHandler {
    pub fn new(config: Arc<PerformerConfig>) -> Self {
        Self { config }
    }
}

impl Handler<InsuranceTask> for InsurancePayoutHandler {
    type Output = InsurancePayout;

    fn handle(&self, task: &InsuranceTask) -> Result<InsurancePayout, PerformerError> {
        info!(
            batch = %task.policy_batch_id,
            events = ?task.events,
            seed = task.seed,
            "insurance payout task"
        );

        require_bytes32("app_id", &task.app_id)?;
        require_bytes32("image_digest", &task.image_digest)?;

        let settlement_vault = self
            .config
            .resolve_address(task.settlement_vault.as_deref(), AddressKey::SettlementVault)?;

        // amount_wei は数値として解釈せず、そのままの文字列を commit する
        let payout_commitment = hash_commitment(&[
            task.joined_events(),
            task.seed.to_string(),
            task.amount_wei.clone(),
        ]);

        Ok(InsurancePayout {
            kind: InsuranceTask::KIND,
            policy_batch_id: task.policy_batch_id.clone(),
            payout_commitment,
            seed: task.seed,
            settlement_vault,
        })
    }
}

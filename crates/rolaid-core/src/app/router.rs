//! TaskRouter - リクエスト検証と kind による dispatch
//!
//! # フロー
//! 1. validate_task: task id / payload の存在 + envelope の decode
//! 2. handle_task: envelope を再 decode（純粋関数なので冪等）→ kind で handler を選択 → TaskResponse
//!
//! dispatch は `TaskKind` の網羅的 match で、未知の kind は handler を呼ばずに失敗する。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::PerformerConfig;
use crate::domain::{
    DecodedEnvelope, PerformerError, TaskKind, TaskRequest, TaskResponse, decode_task_envelope,
};
use crate::handlers::{AuctionSettlementHandler, InsurancePayoutHandler};
use crate::ports::{ChainLookup, TASK_AVS_REGISTRAR};
use crate::typed::Handler;

pub struct TaskRouter {
    auction: AuctionSettlementHandler,
    insurance: InsurancePayoutHandler,
    chain: Option<Arc<dyn ChainLookup>>,
}

impl TaskRouter {
    pub fn new(config: Arc<PerformerConfig>) -> Self {
        Self {
            auction: AuctionSettlementHandler::new(Arc::clone(&config)),
            insurance: InsurancePayoutHandler::new(config),
            chain: None,
        }
    }

    pub fn with_chain_lookup(mut self, chain: Arc<dyn ChainLookup>) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Checks the request before it is handled.
    pub fn validate_task(&self, request: &TaskRequest) -> Result<(), PerformerError> {
        debug!(task_id = %request.task_id(), bytes = request.payload().len(), "validating task");

        if request.task_id().is_empty() {
            return Err(PerformerError::MissingTaskId);
        }
        if request.payload().is_empty() {
            return Err(PerformerError::MissingPayload);
        }
        decode_task_envelope(request.payload())
            .map_err(|e| e.context("invalid task payload"))?;
        Ok(())
    }

    pub fn handle_task(&self, request: &TaskRequest) -> Result<TaskResponse, PerformerError> {
        let DecodedEnvelope { kind, metadata } = decode_task_envelope(request.payload())
            .map_err(|e| e.context("decode envelope"))?;
        info!(
            task_id = %request.task_id(),
            kind = kind.tag(),
            meta = ?metadata,
            "handling task"
        );

        let result = self.dispatch(&kind)?;
        self.log_contracts();

        Ok(TaskResponse::new(request.task_id().clone(), result))
    }

    fn dispatch(&self, kind: &TaskKind) -> Result<Vec<u8>, PerformerError> {
        match kind {
            TaskKind::Auction(task) => self.auction.handle_encoded(task),
            TaskKind::Insurance(task) => self.insurance.handle_encoded(task),
            TaskKind::Unrecognized(other) => Err(PerformerError::UnsupportedKind(other.clone())),
        }
    }

    /// 補助ログのみ。失敗しても応答には影響しない
    fn log_contracts(&self) {
        let Some(chain) = &self.chain else {
            return;
        };
        match chain.contract_address(TASK_AVS_REGISTRAR) {
            Some(address) => info!(contract = TASK_AVS_REGISTRAR, %address, "contract address"),
            None => warn!(contract = TASK_AVS_REGISTRAR, "contract not found"),
        }
        info!(contracts = ?chain.list_contracts(), "available contracts");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddressKey;
    use crate::domain::{ErrorKind, TaskId};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn b32(byte: &str) -> String {
        format!("0x{}", byte.repeat(32))
    }

    fn router() -> TaskRouter {
        let cfg = PerformerConfig::default()
            .with_default_address(AddressKey::AuctionService, "0xabc")
            .with_default_address(AddressKey::SettlementVault, "0xvault");
        TaskRouter::new(Arc::new(cfg))
    }

    fn request(payload: serde_json::Value) -> TaskRequest {
        TaskRequest::new(TaskId::new(b"task-1".to_vec()), serde_json::to_vec(&payload).unwrap())
    }

    fn insurance_payload() -> serde_json::Value {
        json!({
            "kind": "insurance_payout",
            "insurance": {
                "policy_batch_id": "b1",
                "events": ["e1"],
                "seed": 1,
                "amount_wei": "5",
                "app_id": b32("33"),
                "image_digest": b32("44")
            }
        })
    }

    #[test]
    fn validate_rejects_empty_id_and_payload() {
        let r = router();
        let err = r
            .validate_task(&TaskRequest::new(TaskId::new(Vec::new()), b"{}".to_vec()))
            .unwrap_err();
        assert!(matches!(err, PerformerError::MissingTaskId));

        let err = r
            .validate_task(&TaskRequest::new(TaskId::new(b"x".to_vec()), Vec::new()))
            .unwrap_err();
        assert!(matches!(err, PerformerError::MissingPayload));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn validate_rejects_incomplete_envelope() {
        let err = router()
            .validate_task(&request(json!({"kind": "insurance_payout", "insurance": {}})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(
            err.to_string(),
            "invalid task payload: insurance task missing app attestation fields"
        );
    }

    #[test]
    fn decode_failures_carry_context() {
        let req = TaskRequest::new(TaskId::new(b"t".to_vec()), b"{not json".to_vec());
        let err = router().validate_task(&req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.to_string().starts_with("invalid task payload: "));

        let err = router().handle_task(&req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.to_string().starts_with("decode envelope: "));
    }

    #[test]
    fn null_payload_is_unsupported_kind() {
        let req = TaskRequest::new(TaskId::new(b"t".to_vec()), b"null".to_vec());
        router().validate_task(&req).unwrap();
        let err = router().handle_task(&req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Routing);
        assert_eq!(err.to_string(), "unsupported task kind: ");
    }

    #[test]
    fn validate_accepts_unknown_kind() {
        // 未知の kind は handle 時に拒否する
        router().validate_task(&request(json!({"kind": "unknown"}))).unwrap();
    }

    #[test]
    fn handle_pairs_result_with_task_id() {
        let req = request(insurance_payload());
        let resp = router().handle_task(&req).unwrap();
        assert_eq!(resp.task_id(), req.task_id());
        let v: serde_json::Value = serde_json::from_slice(resp.result()).unwrap();
        assert_eq!(v["kind"], "insurance_payout");
    }

    #[test]
    fn unknown_kind_is_routing_error() {
        let err = router().handle_task(&request(json!({"kind": "unknown"}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Routing);
        assert_eq!(err.to_string(), "unsupported task kind: unknown");
    }

    struct CountingLookup {
        calls: AtomicUsize,
    }

    impl ChainLookup for CountingLookup {
        fn contract_address(&self, name: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            (name == TASK_AVS_REGISTRAR).then(|| "0xregistrar".to_string())
        }

        fn list_contracts(&self) -> Vec<String> {
            vec![TASK_AVS_REGISTRAR.to_string()]
        }
    }

    #[test]
    fn chain_lookup_runs_only_after_success() {
        let lookup = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
        });
        let r = router().with_chain_lookup(lookup.clone());

        r.handle_task(&request(insurance_payload())).unwrap();
        assert_eq!(lookup.calls.load(Ordering::Relaxed), 1);

        r.handle_task(&request(json!({"kind": "unknown"}))).unwrap_err();
        assert_eq!(lookup.calls.load(Ordering::Relaxed), 1);
    }
}

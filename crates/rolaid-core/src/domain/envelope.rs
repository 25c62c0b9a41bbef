//! TaskEnvelope - payload bytes と型付き task の相互変換
//!
//! # デコードフロー
//! 1. serde_json で wire 形式の `TaskEnvelope` に decode（失敗は structural error。`null` は空の envelope）
//! 2. kind が選ぶ typed payload の attestation field（app_id / image_digest）の存在確認
//! 3. `TaskKind` へ変換（未知の kind は `Unrecognized` のまま返し、router が拒否する）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::auction::AuctionTask;
use super::errors::PerformerError;
use super::insurance::InsuranceTask;
use super::nullable::null_as_default;
use crate::typed::Task;

/// Wire form of a task payload.
///
/// ```json
/// {"kind": "auction_settlement", "auction": {...}, "meta": {"k": "v"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction: Option<AuctionTask>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<InsuranceTask>,

    /// Passthrough, never validated.
    #[serde(rename = "meta", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Decoded task, one variant per settlement domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Auction(AuctionTask),
    Insurance(InsuranceTask),
    /// Any other `kind` tag. Rejected at dispatch, not at decode.
    Unrecognized(String),
}

impl TaskKind {
    pub fn tag(&self) -> &str {
        match self {
            TaskKind::Auction(_) => AuctionTask::KIND,
            TaskKind::Insurance(_) => InsuranceTask::KIND,
            TaskKind::Unrecognized(kind) => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEnvelope {
    pub kind: TaskKind,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Decodes and checks attestation presence. Pure, so callers may decode twice.
pub fn decode_task_envelope(data: &[u8]) -> Result<DecodedEnvelope, PerformerError> {
    let envelope: Option<TaskEnvelope> = serde_json::from_slice(data)
        .map_err(|e| PerformerError::MalformedEnvelope(e.to_string()))?;
    DecodedEnvelope::try_from(envelope.unwrap_or_default())
}

fn require_attestation<T: Task>(task: &T) -> Result<(), PerformerError> {
    if task.has_attestation() {
        Ok(())
    } else {
        Err(PerformerError::MissingAttestation(T::LABEL))
    }
}

fn require_present<T: Task>(task: Option<T>) -> Result<T, PerformerError> {
    let task = task.ok_or(PerformerError::MissingTask(T::LABEL))?;
    require_attestation(&task)?;
    Ok(task)
}

impl TryFrom<TaskEnvelope> for DecodedEnvelope {
    type Error = PerformerError;

    fn try_from(envelope: TaskEnvelope) -> Result<Self, Self::Error> {
        let TaskEnvelope {
            kind,
            auction,
            insurance,
            metadata,
        } = envelope;

        let kind = match kind.as_str() {
            AuctionTask::KIND => TaskKind::Auction(require_present(auction)?),
            InsuranceTask::KIND => TaskKind::Insurance(require_present(insurance)?),
            _ => TaskKind::Unrecognized(kind),
        };
        Ok(Self { kind, metadata })
    }
}

/// Rebuilds the wire form from the decoded task.
///
/// Only the payload selected by `kind` survives decoding, so the other kind's
/// payload and the payloads of an `Unrecognized` envelope are not restored.
impl From<DecodedEnvelope> for TaskEnvelope {
    fn from(decoded: DecodedEnvelope) -> Self {
        let mut envelope = TaskEnvelope {
            kind: decoded.kind.tag().to_string(),
            metadata: decoded.metadata,
            ..Default::default()
        };
        match decoded.kind {
            TaskKind::Auction(a) => envelope.auction = Some(a),
            TaskKind::Insurance(i) => envelope.insurance = Some(i),
            TaskKind::Unrecognized(_) => {}
        }
        envelope
    }
}

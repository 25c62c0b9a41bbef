//! Handler trait - typed task を検証して結果レコードを作る
//!
//! Handler は純粋な同期処理（I/O なし）。結果は JSON bytes として transport に返る。

use serde::Serialize;

use super::codec::encode_result;
use super::task::Task;
use crate::domain::errors::PerformerError;

/// Handler は Task を検証し、commitment を含む結果レコードを返す
///
/// # ジェネリクスによる型安全性
/// - `Handler<AuctionTask>` は `AuctionTask` しか受け取れない
/// - router 側の match で Task と Handler の対応がコンパイル時に決まる
pub trait Handler<T: Task>: Send + Sync {
    type Output: Serialize;

    /// All checks run before any result is built; an error means no commitment.
    fn handle(&self, task: &T) -> Result<Self::Output, PerformerError>;

    /// `handle` + [`encode_result`].
    fn handle_encoded(&self, task: &T) -> Result<Vec<u8>, PerformerError> {
        let output = self.handle(task)?;
        Ok(encode_result(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, InsuranceTask};

    struct EchoBatch;

    impl Handler<InsuranceTask> for EchoBatch {
        type Output = serde_json::Value;

        fn handle(&self, task: &InsuranceTask) -> Result<Self::Output, PerformerError> {
            if task.policy_batch_id.is_empty() {
                return Err(PerformerError::MissingTask(InsuranceTask::LABEL));
            }
            Ok(serde_json::json!({ "batch": task.policy_batch_id }))
        }
    }

    #[test]
    fn handle_encoded_serializes_output() {
        let task = InsuranceTask {
            policy_batch_id: "b9".into(),
            ..Default::default()
        };
        let bytes = EchoBatch.handle_encoded(&task).unwrap();
        assert_eq!(bytes, br#"{"batch":"b9"}"#);
    }

    #[test]
    fn handle_encoded_passes_errors_through() {
        let err = EchoBatch
            .handle_encoded(&InsuranceTask::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}

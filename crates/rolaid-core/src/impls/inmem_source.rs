//! InMemoryTaskSource - 開発・テスト用の TaskSource
//!
//! # 実装詳細
//! - 受信側は tokio mpsc（unbounded）。複数 worker で共有するため receiver を Mutex で包む
//! - respond / reject の結果は別の channel に `TaskOutcome` として流す
//! - `TaskSubmitter` を全て drop すると source が閉じ、worker は終了する

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

use crate::domain::{PerformerError, TaskId, TaskRequest, TaskResponse};
use crate::ports::{TaskDelivery, TaskSource};

/// What the worker did with one request.
#[derive(Debug)]
pub enum TaskOutcome {
    Responded(TaskResponse),
    Rejected { task_id: TaskId, error: PerformerError },
}

impl TaskOutcome {
    pub fn task_id(&self) -> &TaskId {
        match self {
            TaskOutcome::Responded(response) => response.task_id(),
            TaskOutcome::Rejected { task_id, .. } => task_id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("task source is closed")]
pub struct SourceClosed;

/// Sending half. Cloneable; the source closes when every clone is dropped.
#[derive(Clone)]
pub struct TaskSubmitter {
    tx: mpsc::UnboundedSender<TaskRequest>,
}

impl TaskSubmitter {
    /// Submits a payload under a freshly generated ULID task id.
    pub fn submit(&self, payload: impl Into<Vec<u8>>) -> Result<TaskId, SourceClosed> {
        let task_id = TaskId::generate();
        self.submit_request(TaskRequest::new(task_id.clone(), payload))?;
        Ok(task_id)
    }

    pub fn submit_request(&self, request: TaskRequest) -> Result<(), SourceClosed> {
        self.tx.send(request).map_err(|_| SourceClosed)
    }
}

/// # 使用例
/// ```ignore
/// let (submitter, source, mut outcomes) = InMemoryTaskSource::channel();
/// let workers = WorkerGroup::spawn(2, Arc::new(source), router);
/// let id = submitter.submit(payload)?;
/// let outcome = outcomes.recv().await;
/// ```
pub struct InMemoryTaskSource {
    inbox: Mutex<mpsc::UnboundedReceiver<TaskRequest>>,
    outbox: mpsc::UnboundedSender<TaskOutcome>,
}

impl InMemoryTaskSource {
    pub fn channel() -> (
        TaskSubmitter,
        InMemoryTaskSource,
        mpsc::UnboundedReceiver<TaskOutcome>,
    ) {
        let (tx, inbox) = mpsc::unbounded_channel();
        let (outbox, outcomes) = mpsc::unbounded_channel();
        let source = InMemoryTaskSource {
            inbox: Mutex::new(inbox),
            outbox,
        };
        (TaskSubmitter { tx }, source, outcomes)
    }
}

#[async_trait]
impl TaskSource for InMemoryTaskSource {
    async fn receive(&self) -> Option<Box<dyn TaskDelivery>> {
        let request = self.inbox.lock().await.recv().await?;
        debug!(task_id = %request.task_id(), "received task");
        Some(Box::new(InMemoryDelivery {
            request,
            outbox: self.outbox.clone(),
        }))
    }
}

struct InMemoryDelivery {
    request: TaskRequest,
    outbox: mpsc::UnboundedSender<TaskOutcome>,
}

impl InMemoryDelivery {
    fn send(&self, outcome: TaskOutcome) -> Result<(), PerformerError> {
        self.outbox
            .send(outcome)
            .map_err(|_| PerformerError::Transport("outcome receiver dropped".to_string()))
    }
}

#[async_trait]
impl TaskDelivery for InMemoryDelivery {
    fn request(&self) -> &TaskRequest {
        &self.request
    }

    async fn respond(self: Box<Self>, response: TaskResponse) -> Result<(), PerformerError> {
        self.send(TaskOutcome::Responded(response))
    }

    async fn reject(self: Box<Self>, error: PerformerError) -> Result<(), PerformerError> {
        let task_id = self.request.task_id().clone();
        self.send(TaskOutcome::Rejected { task_id, error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_then_receive() {
        let (submitter, source, mut outcomes) = InMemoryTaskSource::channel();
        let id = submitter.submit(b"{}".to_vec()).unwrap();

        let delivery = source.receive().await.unwrap();
        assert_eq!(delivery.request().task_id(), &id);
        assert_eq!(delivery.request().payload(), b"{}");

        let response = TaskResponse::new(id.clone(), b"ok".to_vec());
        delivery.respond(response).await.unwrap();

        let outcome = outcomes.recv().await.unwrap();
        assert_eq!(outcome.task_id(), &id);
        assert!(matches!(outcome, TaskOutcome::Responded(r) if r.result() == b"ok"));
    }

    #[tokio::test]
    async fn reject_carries_task_id() {
        let (submitter, source, mut outcomes) = InMemoryTaskSource::channel();
        let id = submitter.submit(b"x".to_vec()).unwrap();

        let delivery = source.receive().await.unwrap();
        delivery
            .reject(PerformerError::UnsupportedKind("x".into()))
            .await
            .unwrap();

        match outcomes.recv().await.unwrap() {
            TaskOutcome::Rejected { task_id, error } => {
                assert_eq!(task_id, id);
                assert_eq!(error.to_string(), "unsupported task kind: x");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dropping_submitters_closes_source() {
        let (submitter, source, _outcomes) = InMemoryTaskSource::channel();
        let extra = submitter.clone();
        drop(submitter);
        drop(extra);
        assert!(source.receive().await.is_none());
    }

    #[tokio::test]
    async fn respond_fails_when_outcomes_dropped() {
        let (submitter, source, outcomes) = InMemoryTaskSource::channel();
        let id = submitter.submit(b"{}".to_vec()).unwrap();
        drop(outcomes);

        let delivery = source.receive().await.unwrap();
        let err = delivery
            .respond(TaskResponse::new(id, Vec::new()))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn submit_after_source_dropped_fails() {
        let (submitter, source, _outcomes) = InMemoryTaskSource::channel();
        drop(source);
        assert!(submitter.submit(b"{}".to_vec()).is_err());
    }
}

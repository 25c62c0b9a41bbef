//! WorkerGroup - TaskSource と TaskRouter をつなぐ実行ループ
//!
//! # フロー（1 delivery ごと）
//! 1. TaskSource::receive() で受信（shutdown と select で競合させる）
//! 2. validate_task → handle_task（同期・純粋。await を挟まない）
//! 3. 成功なら respond、失敗なら reject
//!
//! task 間で共有する可変状態は無いので、worker 数はそのまま並列度になる。

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::app::router::TaskRouter;
use crate::domain::{PerformerError, TaskRequest, TaskResponse};
use crate::ports::TaskSource;

/// Worker group handle.
/// - `request_shutdown()` で新規受信を止める（処理中の task は最後まで走る）
/// - `join()` で全ワーカーの終了を待てる
pub struct WorkerGroup {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl WorkerGroup {
    /// Spawn `n` workers.
    pub fn spawn(n: usize, source: Arc<dyn TaskSource>, router: Arc<TaskRouter>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut joins = Vec::with_capacity(n);
        for worker_id in 0..n {
            let src = Arc::clone(&source);
            let rt = Arc::clone(&router);
            let mut rx = shutdown_rx.clone();

            let join = tokio::spawn(async move {
                worker_loop(worker_id, src, rt, &mut rx).await;
            });
            joins.push(join);
        }

        Self { shutdown_tx, joins }
    }

    pub fn request_shutdown(&self) {
        // receivers may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    /// Waits for every worker to exit (source closed or shutdown requested).
    pub async fn join(self) {
        for j in self.joins {
            if let Err(e) = j.await {
                error!("worker task panicked: {e}");
            }
        }
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        self.join().await;
    }

    /// Waits for the workers, requesting shutdown once `signal` resolves.
    pub async fn join_until<F>(self, signal: F)
    where
        F: Future<Output = ()>,
    {
        let Self { shutdown_tx, joins } = self;
        tokio::pin!(signal);
        let mut signalled = false;

        for mut join in joins {
            loop {
                tokio::select! {
                    res = &mut join => {
                        if let Err(e) = res {
                            error!("worker task panicked: {e}");
                        }
                        break;
                    }
                    _ = &mut signal, if !signalled => {
                        signalled = true;
                        let _ = shutdown_tx.send(true);
                    }
                }
            }
        }
    }
}

/// Validate + handle one request.
pub fn process(router: &TaskRouter, request: &TaskRequest) -> Result<TaskResponse, PerformerError> {
    router.validate_task(request)?;
    router.handle_task(request)
}

async fn worker_loop(
    worker_id: usize,
    source: Arc<dyn TaskSource>,
    router: Arc<TaskRouter>,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let delivery = tokio::select! {
            changed = shutdown_rx.changed() => {
                // sender が drop された場合も停止扱い
                if changed.is_err() {
                    break;
                }
                continue;
            }
            delivery = source.receive() => delivery,
        };

        let Some(delivery) = delivery else {
            debug!(worker_id, "task source closed");
            break;
        };

        let task_id = delivery.request().task_id().clone();
        match process(&router, delivery.request()) {
            Ok(response) => {
                if let Err(e) = delivery.respond(response).await {
                    error!(worker_id, %task_id, "respond failed: {e}");
                }
            }
            Err(err) => {
                warn!(
                    worker_id,
                    %task_id,
                    kind = err.kind().as_str(),
                    "task rejected: {err}"
                );
                if let Err(e) = delivery.reject(err).await {
                    error!(worker_id, %task_id, "reject failed: {e}");
                }
            }
        }
    }
}

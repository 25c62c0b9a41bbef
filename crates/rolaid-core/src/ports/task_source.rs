//! TaskSource port - task server からのリクエスト受信と応答返却
//!
//! 実体は RPC の task server（外部）。core はこの trait だけに依存する。
//!
//! # 実装
//! - `InMemoryTaskSource`（開発・テスト用、impls/inmem_source.rs）
//! - stdio JSON-lines（rolaid-performer バイナリ側）

use async_trait::async_trait;

use crate::domain::{PerformerError, TaskRequest, TaskResponse};

/// A received task. The worker owns it and must either `respond` or `reject`.
///
/// - request は不変参照で渡す（handler 実行中に書き換えられないように）
/// - 結果の返却方法（RPC 応答、stdout など）は実装側が決める
#[async_trait]
pub trait TaskDelivery: Send {
    fn request(&self) -> &TaskRequest;

    async fn respond(self: Box<Self>, response: TaskResponse) -> Result<(), PerformerError>;

    async fn reject(self: Box<Self>, error: PerformerError) -> Result<(), PerformerError>;
}

#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Waits for the next task. `None` means the source is closed.
    async fn receive(&self) -> Option<Box<dyn TaskDelivery>>;
}

//! App - アプリケーション層
//!
//! domain / handlers / ports を組み合わせる。
//!
//! # 主要コンポーネント
//! - **PerformerBuilder**: 設定と ports のワイヤリング、起動時検証
//! - **TaskRouter**: validate → decode → dispatch
//! - **WorkerGroup**: TaskSource から受信して router に流すループ

pub mod builder;
pub mod router;
pub mod worker;

pub use self::builder::{BuildError, PerformerBuilder};
pub use self::router::TaskRouter;
pub use self::worker::{WorkerGroup, process};

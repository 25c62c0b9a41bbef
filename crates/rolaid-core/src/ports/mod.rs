//! Ports - 外部 collaborator との境界
//!
//! core が依存するのは以下の 2 つの capability だけ:
//! - `TaskSource`: task server からの受信と応答
//! - `ChainLookup`: 名前付きコントラクトアドレスの参照（任意）
//!
//! どちらも構築時に注入し、検証ロジックからは直接参照しない。

pub mod task_source;
pub mod chain_lookup;

pub use self::task_source::{TaskDelivery, TaskSource};
pub use self::chain_lookup::{ChainLookup, TASK_AVS_REGISTRAR};

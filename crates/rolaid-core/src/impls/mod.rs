//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryTaskSource**: channel ベースの TaskSource
//! - **StaticContractStore**: 固定マップの ChainLookup
//!
//! RPC task server との接続は transport 側の責務で、ここには含めない。

pub mod contract_store;
pub mod inmem_source;

pub use self::contract_store::{CONTRACT_ADDRESSES, StaticContractStore};
pub use self::inmem_source::{InMemoryTaskSource, SourceClosed, TaskOutcome, TaskSubmitter};

//! rolaid-core
//!
//! Task envelope decoding, validation and commitment generation for the
//! rolaid performer.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, request/response, envelope, auction/insurance payload, validators, commitment, errors）
//! - **config**: 起動時に一度だけ読む不変の設定 + 宛先アドレス解決
//! - **typed**: 型付き Task API（Task trait, Handler trait）
//! - **handlers**: auction settlement / insurance payout handler
//! - **ports**: 外部 collaborator の抽象（TaskSource, ChainLookup）
//! - **app**: ワイヤリングと実行（PerformerBuilder, TaskRouter, WorkerGroup）
//! - **impls**: ports の開発用実装（InMemoryTaskSource, StaticContractStore）

pub mod app;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod impls;
pub mod ports;
pub mod typed;

pub use app::{PerformerBuilder, TaskRouter, WorkerGroup};
pub use config::{AddressKey, PerformerConfig};
pub use domain::{PerformerError, TaskId, TaskRequest, TaskResponse};

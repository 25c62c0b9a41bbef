//! Typed - 型付き Task API
//!
//! envelope の kind 文字列を `Task::KIND` に集約し、
//! Handler との対応付けを静的に保証する。
//!
//! # 構成
//! - `Task` trait: kind タグ + attestation accessor
//! - `Handler<T>` trait: typed task → 結果レコード
//! - `encode_result`: 結果レコードの JSON encode（キー順・エスケープ固定）

pub mod task;
pub mod handler;
pub mod codec;

pub use self::task::Task;
pub use self::handler::Handler;
pub use self::codec::{HtmlSafeFormatter, encode_result};

//! Task identifiers.
//!
//! Transport 側から来る task id は不透明な byte 列で、こちらでは中身を解釈しない。
//! id を持たない入力（開発用の in-memory source や stdio）には ULID を割り当てる。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Opaque task identifier as delivered by the task server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Vec<u8>);

impl TaskId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// ULID の 16 bytes を id として使う
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid.to_bytes().to_vec())
    }

    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for TaskId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

//! Commitment - 入力値を束縛する SHA-256 digest
//!
//! # バイト列の定義
//! `sha256(part_0 || part_1 || ... || part_n)`（各 part の UTF-8 bytes をそのまま連結、区切り無し）
//!
//! 下流は digest を「どの値が使われたか」の証明として扱うので、
//! 連結順序とバイト表現は変えてはいけない。

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// 32-byte commitment. Displays as `0x` + 64 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Hashes `parts` in the given order with no separators.
#[must_use]
pub fn hash_commitment<S: AsRef<str>>(parts: &[S]) -> Commitment {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref().as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = [0_u8; 32];
    out.copy_from_slice(&digest);
    Commitment(out)
}

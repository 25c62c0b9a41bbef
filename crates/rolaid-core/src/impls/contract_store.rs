//! StaticContractStore - 名前 → アドレスの固定マップによる ChainLookup
//!
//! `CONTRACT_ADDRESSES` に JSON object で渡す:
//! `{"TaskAVSRegistrar": "0x...", "AuctionService": "0x..."}`

use std::collections::BTreeMap;

use crate::ports::ChainLookup;

pub const CONTRACT_ADDRESSES: &str = "CONTRACT_ADDRESSES";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticContractStore {
    contracts: BTreeMap<String, String>,
}

impl StaticContractStore {
    pub fn new(contracts: BTreeMap<String, String>) -> Self {
        Self { contracts }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// `Ok(None)` when the variable is unset or empty.
    pub fn from_env() -> Result<Option<Self>, serde_json::Error> {
        match std::env::var(CONTRACT_ADDRESSES) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_json(&raw).map(Some),
            _ => Ok(None),
        }
    }
}

impl ChainLookup for StaticContractStore {
    fn contract_address(&self, name: &str) -> Option<String> {
        self.contracts.get(name).cloned()
    }

    fn list_contracts(&self) -> Vec<String> {
        self.contracts.keys().cloned().collect()
    }
}

//! Process-wide configuration, read once at start-up.
//!
//! 起動後は不変。handler は参照で受け取り、環境変数を直接読まない。

use std::fmt;

use crate::domain::errors::PerformerError;

pub const AUCTION_SERVICE_ADDRESS: &str = "AUCTION_SERVICE_ADDRESS";
pub const SETTLEMENT_VAULT_ADDRESS: &str = "SETTLEMENT_VAULT_ADDRESS";
pub const L1_RPC_URL: &str = "L1_RPC_URL";
pub const L2_RPC_URL: &str = "L2_RPC_URL";

/// Destination contract a task result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKey {
    AuctionService,
    SettlementVault,
}

impl AddressKey {
    pub const ALL: [AddressKey; 2] = [AddressKey::AuctionService, AddressKey::SettlementVault];

    /// Result / override field name.
    pub fn field(&self) -> &'static str {
        match self {
            AddressKey::AuctionService => "auction_service",
            AddressKey::SettlementVault => "settlement_vault",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            AddressKey::AuctionService => AUCTION_SERVICE_ADDRESS,
            AddressKey::SettlementVault => SETTLEMENT_VAULT_ADDRESS,
        }
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformerConfig {
    pub auction_service_address: Option<String>,
    pub settlement_vault_address: Option<String>,
    /// Chain endpoints for the auxiliary contract lookups. Not used by the core.
    pub l1_rpc_url: Option<String>,
    pub l2_rpc_url: Option<String>,
}

impl PerformerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            auction_service_address: get(AUCTION_SERVICE_ADDRESS),
            settlement_vault_address: get(SETTLEMENT_VAULT_ADDRESS),
            l1_rpc_url: get(L1_RPC_URL),
            l2_rpc_url: get(L2_RPC_URL),
        }
    }

    pub fn with_default_address(mut self, key: AddressKey, address: impl Into<String>) -> Self {
        let slot = match key {
            AddressKey::AuctionService => &mut self.auction_service_address,
            AddressKey::SettlementVault => &mut self.settlement_vault_address,
        };
        *slot = Some(address.into());
        self
    }

    pub fn default_address(&self, key: AddressKey) -> Option<&str> {
        match key {
            AddressKey::AuctionService => self.auction_service_address.as_deref(),
            AddressKey::SettlementVault => self.settlement_vault_address.as_deref(),
        }
        .filter(|v| !v.is_empty())
    }

    /// Task-level override first, then the configured default.
    ///
    /// Address format is not checked here.
    pub fn resolve_address(
        &self,
        override_address: Option<&str>,
        key: AddressKey,
    ) -> Result<String, PerformerError> {
        override_address
            .filter(|v| !v.is_empty())
            .or_else(|| self.default_address(key))
            .map(str::to_string)
            .ok_or(PerformerError::AddressMissing {
                field: key.field(),
                env_var: key.env_var(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_known_keys() {
        let cfg = PerformerConfig::from_lookup(lookup(&[
            (AUCTION_SERVICE_ADDRESS, "0xabc"),
            (L1_RPC_URL, "http://l1"),
        ]));
        assert_eq!(cfg.default_address(AddressKey::AuctionService), Some("0xabc"));
        assert_eq!(cfg.default_address(AddressKey::SettlementVault), None);
        assert_eq!(cfg.l1_rpc_url.as_deref(), Some("http://l1"));
        assert_eq!(cfg.l2_rpc_url, None);
    }

    #[test]
    fn empty_values_are_unset() {
        let cfg = PerformerConfig::from_lookup(lookup(&[(SETTLEMENT_VAULT_ADDRESS, "")]));
        assert_eq!(cfg.settlement_vault_address, None);
    }

    #[test]
    fn override_wins_over_default() {
        let cfg = PerformerConfig::default()
            .with_default_address(AddressKey::AuctionService, "0xdefault");
        let got = cfg
            .resolve_address(Some("0xoverride"), AddressKey::AuctionService)
            .unwrap();
        assert_eq!(got, "0xoverride");
    }

    #[test]
    fn empty_override_falls_back() {
        let cfg = PerformerConfig::default()
            .with_default_address(AddressKey::SettlementVault, "0xvault");
        assert_eq!(
            cfg.resolve_address(Some(""), AddressKey::SettlementVault).unwrap(),
            "0xvault"
        );
        assert_eq!(
            cfg.resolve_address(None, AddressKey::SettlementVault).unwrap(),
            "0xvault"
        );
    }

    #[test]
    fn missing_both_is_configuration_error() {
        let err = PerformerConfig::default()
            .resolve_address(None, AddressKey::SettlementVault)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(
            err.to_string(),
            "settlement_vault address missing (env SETTLEMENT_VAULT_ADDRESS)"
        );
    }
}

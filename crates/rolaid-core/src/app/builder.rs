//! PerformerBuilder - router の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - require_defaults() で「必ず設定されているべき」宛先アドレスを宣言
//! - build() 時に未設定のものがあれば BuildError を返す
//! - 宣言しなければ従来通り、task ごとの override 頼りでも起動できる

use std::sync::Arc;

use crate::app::router::TaskRouter;
use crate::config::{AddressKey, PerformerConfig};
use crate::ports::ChainLookup;

/// # 使用例
/// ```ignore
/// let router = PerformerBuilder::new(PerformerConfig::from_env())
///     .chain_lookup(Arc::new(store))
///     .require_defaults(&AddressKey::ALL)
///     .build()?;
/// ```
pub struct PerformerBuilder {
    config: PerformerConfig,
    chain: Option<Arc<dyn ChainLookup>>,
    required_defaults: Vec<AddressKey>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing default addresses: {0:?}. Set them in the environment or .env.")]
    MissingDefaults(Vec<&'static str>),
}

impl PerformerBuilder {
    pub fn new(config: PerformerConfig) -> Self {
        Self {
            config,
            chain: None,
            required_defaults: Vec::new(),
        }
    }

    pub fn chain_lookup(mut self, chain: Arc<dyn ChainLookup>) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn require_defaults(mut self, keys: &[AddressKey]) -> Self {
        self.required_defaults = keys.to_vec();
        self
    }

    pub fn build(self) -> Result<TaskRouter, BuildError> {
        let missing: Vec<&'static str> = self
            .required_defaults
            .iter()
            .filter(|key| self.config.default_address(**key).is_none())
            .map(AddressKey::env_var)
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::MissingDefaults(missing));
        }

        let router = TaskRouter::new(Arc::new(self.config));
        Ok(match self.chain {
            Some(chain) => router.with_chain_lookup(chain),
            None => router,
        })
    }
}

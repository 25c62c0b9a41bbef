//! ChainLookup port - 名前付きコントラクトアドレスの参照
//!
//! 補助的なログ出力にのみ使う。検証や commitment には影響しない。

/// Contract the router looks up after a task succeeds.
pub const TASK_AVS_REGISTRAR: &str = "TaskAVSRegistrar";

pub trait ChainLookup: Send + Sync {
    fn contract_address(&self, name: &str) -> Option<String>;

    fn list_contracts(&self) -> Vec<String>;
}

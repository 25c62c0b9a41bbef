//! Task trait - kind タグと typed payload の対応付け

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Task は envelope の kind タグと payload 型を対応付ける
///
/// # 使用例
/// ```ignore
/// impl Task for AuctionTask {
///     const KIND: &'static str = "auction_settlement";
///     const LABEL: &'static str = "auction";
///     fn app_id(&self) -> &str { &self.app_id }
///     fn image_digest(&self) -> &str { &self.image_digest }
/// }
/// ```
pub trait Task: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Envelope `kind` tag that selects this payload.
    const KIND: &'static str;

    /// Short name used in error messages ("auction task missing ...").
    const LABEL: &'static str;

    fn app_id(&self) -> &str;

    fn image_digest(&self) -> &str;

    /// Both attestation identifiers are non-empty. Format is checked later by the handler.
    fn has_attestation(&self) -> bool {
        !self.app_id().is_empty() && !self.image_digest().is_empty()
    }
}

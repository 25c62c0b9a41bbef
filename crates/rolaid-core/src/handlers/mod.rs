//! Handlers - settlement domain ごとの検証と commitment 生成

pub mod auction;
pub mod insurance;

pub use self::auction::AuctionSettlementHandler;
pub use self::insurance::InsurancePayoutHandler;

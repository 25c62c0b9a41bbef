//! Domain model (ids, requests, envelopes, typed payloads, validators, errors).

pub mod auction;
pub mod commitment;
pub mod envelope;
pub mod errors;
pub mod ids;
pub mod insurance;
mod nullable;
pub mod task;
pub mod validate;

pub use auction::{AuctionSettlement, AuctionTask};
pub use commitment::{Commitment, hash_commitment};
pub use envelope::{DecodedEnvelope, TaskEnvelope, TaskKind, decode_task_envelope};
pub use errors::{ErrorKind, FieldFault, PerformerError};
pub use ids::TaskId;
pub use insurance::{InsurancePayout, InsuranceTask};
pub use task::{TaskRequest, TaskResponse};
pub use validate::{BYTES32_HEX_LEN, decode_hex_bytes, require_bytes32, require_hex};

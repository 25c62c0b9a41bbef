//! Errors - エラー型と分類
//!
//! core の検証が返すエラーは呼び出し側の入力か設定の問題であり、内部でリトライはしない。

use thiserror::Error;

/// ErrorKind は失敗の運用分類
///
/// - Structural: task id / payload の欠落、payload の decode 失敗
/// - Schema: kind に対応する typed payload や attestation field の欠落
/// - FieldValidation: 特定フィールドの hex prefix / 長さ / decode 違反
/// - Configuration: 宛先アドレスが override にも設定にも無い
/// - Routing: 未知の task kind
/// - Transport: TaskSource 側の受信・応答失敗（core の検証からは発生しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Structural,
    Schema,
    FieldValidation,
    Configuration,
    Routing,
    Transport,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::Schema => "schema",
            ErrorKind::FieldValidation => "field_validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Routing => "routing",
            ErrorKind::Transport => "transport",
        }
    }
}

/// Reason a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldFault {
    #[error("missing")]
    Missing,

    #[error("must start with 0x")]
    MissingPrefix,

    #[error("length must be {expected} chars incl 0x (got {actual})")]
    Length { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Error)]
pub enum PerformerError {
    #[error("missing task id")]
    MissingTaskId,

    #[error("missing task payload")]
    MissingPayload,

    /// JSON decode failure; the message is serde_json's.
    #[error("{0}")]
    MalformedEnvelope(String),

    #[error("{0} task missing")]
    MissingTask(&'static str),

    #[error("{0} task missing app attestation fields")]
    MissingAttestation(&'static str),

    #[error("{field} {fault}")]
    InvalidField {
        field: &'static str,
        fault: FieldFault,
    },

    #[error("{field} address missing (env {env_var})")]
    AddressMissing {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("unsupported task kind: {0}")]
    UnsupportedKind(String),

    #[error("encode result: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport: {0}")]
    Transport(String),

    /// Adds a prefix to the message. kind / field は内側のエラーのまま
    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        source: Box<PerformerError>,
    },
}

impl PerformerError {
    pub fn invalid_field(field: &'static str, fault: FieldFault) -> Self {
        Self::InvalidField { field, fault }
    }

    pub fn context(self, context: &'static str) -> Self {
        Self::Context {
            context,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PerformerError::MissingTaskId
            | PerformerError::MissingPayload
            | PerformerError::MalformedEnvelope(_)
            | PerformerError::Encode(_) => ErrorKind::Structural,
            PerformerError::MissingTask(_) | PerformerError::MissingAttestation(_) => {
                ErrorKind::Schema
            }
            PerformerError::InvalidField { .. } => ErrorKind::FieldValidation,
            PerformerError::AddressMissing { .. } => ErrorKind::Configuration,
            PerformerError::UnsupportedKind(_) => ErrorKind::Routing,
            PerformerError::Transport(_) => ErrorKind::Transport,
            PerformerError::Context { source, .. } => source.kind(),
        }
    }

    /// Name of the offending field, if the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PerformerError::InvalidField { field, .. }
            | PerformerError::AddressMissing { field, .. } => Some(*field),
            PerformerError::Context { source, .. } => source.field(),
            _ => None,
        }
    }

    /// 入力・設定起因のエラーは呼び出し側が修正して再投入する前提なので false。
    /// transport の失敗だけは再送で回復しうる。
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

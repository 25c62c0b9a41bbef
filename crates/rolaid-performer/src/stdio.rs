//! StdioTaskSource - JSON lines を stdin から受けて stdout に結果を書く TaskSource
//!
//! # 入力（1 行 1 task）
//! - `{"task_id": "0x01ab", "payload": {...envelope...}}`
//! - `{"kind": "...", ...}`（envelope をそのまま。task_id は ULID を採番）
//!
//! # 出力（1 行 1 結果）
//! - `{"task_id": "...", "ok": true, "result": {...}}`
//! - `{"task_id": "...", "ok": false, "error": {"kind": "...", "message": "..."}}`

use std::sync::Arc;

use async_trait::async_trait;
use rolaid_core::domain::{PerformerError, TaskId, TaskRequest, TaskResponse};
use rolaid_core::ports::{TaskDelivery, TaskSource};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tokio::sync::Mutex;
use tracing::{debug, error};

pub struct StdioTaskSource {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    out: Arc<Mutex<Stdout>>,
}

impl StdioTaskSource {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            out: Arc::new(Mutex::new(tokio::io::stdout())),
        }
    }
}

impl Default for StdioTaskSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskSource for StdioTaskSource {
    async fn receive(&self) -> Option<Box<dyn TaskDelivery>> {
        let mut lines = self.lines.lock().await;
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    error!("stdin read failed: {e}");
                    return None;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let (label, request) = parse_line(&line);
            debug!(task_id = %label, "read task line");
            return Some(Box::new(StdioDelivery {
                label,
                request,
                out: Arc::clone(&self.out),
            }));
        }
    }
}

/// Splits a line into (printable id, request).
///
/// 行が JSON で無い場合もそのまま payload として渡し、router に decode エラーを返させる。
pub fn parse_line(line: &str) -> (String, TaskRequest) {
    let wrapped = serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|v| match v {
            Value::Object(mut obj) if obj.contains_key("payload") => {
                let payload = obj.remove("payload").unwrap_or(Value::Null);
                let task_id = obj.remove("task_id").and_then(|id| match id {
                    Value::String(s) => Some(s),
                    _ => None,
                });
                Some((task_id, payload))
            }
            _ => None,
        });

    match wrapped {
        Some((task_id, payload)) => {
            let (label, id) = match task_id {
                Some(label) => {
                    let id = task_id_bytes(&label);
                    (label, id)
                }
                None => {
                    let id = TaskId::generate();
                    (id.to_string(), id)
                }
            };
            let payload = match payload {
                // payload を JSON 文字列で渡された場合は中身をそのまま使う
                Value::String(s) => s.into_bytes(),
                other => other.to_string().into_bytes(),
            };
            (label, TaskRequest::new(id, payload))
        }
        None => {
            let id = TaskId::generate();
            (id.to_string(), TaskRequest::new(id, line.as_bytes().to_vec()))
        }
    }
}

/// `0x` 付き hex なら bytes に、それ以外は UTF-8 bytes をそのまま id にする
fn task_id_bytes(label: &str) -> TaskId {
    match label.strip_prefix("0x").map(hex::decode) {
        Some(Ok(bytes)) => TaskId::new(bytes),
        _ => TaskId::new(label.as_bytes().to_vec()),
    }
}

#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OutputLine<'a> {
    task_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorLine<'a>>,
}

struct StdioDelivery {
    label: String,
    request: TaskRequest,
    out: Arc<Mutex<Stdout>>,
}

impl StdioDelivery {
    async fn write(&self, line: &OutputLine<'_>) -> Result<(), PerformerError> {
        let mut bytes = serde_json::to_vec(line)?;
        bytes.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&bytes)
            .await
            .map_err(|e| PerformerError::Transport(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| PerformerError::Transport(e.to_string()))
    }
}

#[async_trait]
impl TaskDelivery for StdioDelivery {
    fn request(&self) -> &TaskRequest {
        &self.request
    }

    async fn respond(self: Box<Self>, response: TaskResponse) -> Result<(), PerformerError> {
        let result: Value = serde_json::from_slice(response.result())?;
        self.write(&OutputLine {
            task_id: &self.label,
            ok: true,
            result: Some(result),
            error: None,
        })
        .await
    }

    async fn reject(self: Box<Self>, error: PerformerError) -> Result<(), PerformerError> {
        self.write(&OutputLine {
            task_id: &self.label,
            ok: false,
            result: None,
            error: Some(ErrorLine {
                kind: error.kind().as_str(),
                message: error.to_string(),
                field: error.field(),
            }),
        })
        .await
    }
}

use std::fmt;

use super::TaskId;

/// TaskId + payload bytes の“運搬用”データ（transport 層が生成する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    task_id: TaskId,
    payload: Vec<u8>,
}

impl TaskRequest {
    pub fn new(task_id: TaskId, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            task_id,
            payload: payload.into(),
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Handler の結果を元の task id と組にしたもの
#[derive(Clone, PartialEq, Eq)]
pub struct TaskResponse {
    task_id: TaskId,
    result: Vec<u8>,
}

impl TaskResponse {
    pub fn new(task_id: TaskId, result: Vec<u8>) -> Self {
        Self { task_id, result }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Serialized result record (JSON bytes).
    pub fn result(&self) -> &[u8] {
        &self.result
    }

    pub fn into_parts(self) -> (TaskId, Vec<u8>) {
        (self.task_id, self.result)
    }
}

impl fmt::Debug for TaskResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskResponse")
            .field("task_id", &self.task_id.to_string())
            .field("result", &String::from_utf8_lossy(&self.result))
            .finish()
    }
}

use crate::errors::AppResult;
use serde::Serialize;

/// Structured outcome of a write operation, safe to hand to any caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
}

impl OperationResult {
    pub fn ok(id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            id,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            message: message.into(),
        }
    }

    /// Fold an internal result into the structured form, logging failures.
    pub fn from_result(op: &str, result: AppResult<OperationResult>) -> Self {
        result.unwrap_or_else(|e| {
            tracing::error!(operation = op, error = %e, "write operation failed");
            Self::failed(e.to_string())
        })
    }
}

use serde::{Deserialize, Serialize};

/// One line of a work order checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn pending(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }
}

/// Expand a template (plain strings) into unchecked items.
pub fn from_template(template: &[String]) -> Vec<ChecklistItem> {
    template.iter().map(ChecklistItem::pending).collect()
}

/// Parse the JSON stored in a checklist cell; invalid or empty text yields
/// an empty checklist.
pub fn parse_checklist(raw: &str) -> Vec<ChecklistItem> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable checklist cell, treating as empty");
        Vec::new()
    })
}

/// Parse a stored checklist template (JSON array of strings).
pub fn parse_template(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable checklist template, treating as empty");
        Vec::new()
    })
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Done,
    Cancelled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Cancelled => "Cancelled",
        }
    }

    /// Convert a stored label → enum. Both `In Progress` and `InProgress`
    /// are accepted for the in-progress state.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(Status::Open),
            "in progress" | "inprogress" | "in-progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            "cancelled" | "canceled" => Some(Status::Cancelled),
            _ => None,
        }
    }

    /// Lenient conversion: unknown labels degrade to `Open`.
    pub fn from_label(s: &str) -> Self {
        Self::from_db_str(s).unwrap_or_default()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Open | Status::InProgress)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Status::Done | Status::Cancelled)
    }
}

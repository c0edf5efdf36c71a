use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// App variant under comparison. One parameterized engine with capability
/// flags, selected at runtime, instead of four parallel codebases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    V1,
    V2,
    V3,
    V4,
}

impl Variant {
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.to_lowercase().as_str() {
            "v1" => Ok(Variant::V1),
            "v2" => Ok(Variant::V2),
            "v3" => Ok(Variant::V3),
            "v4" => Ok(Variant::V4),
            _ => Err(AppError::InvalidVariant(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Variant::V1 => "v1",
            Variant::V2 => "v2",
            Variant::V3 => "v3",
            Variant::V4 => "v4",
        }
    }

    /// Per-task timers exist at all. v1 tracks only the whole shift.
    pub fn has_task_tracking(&self) -> bool {
        !matches!(self, Variant::V1)
    }

    /// Allocation rows split tracked time from manually added time.
    pub fn has_manual_split(&self) -> bool {
        matches!(self, Variant::V2 | Variant::V4)
    }

    /// Allocation rows accept note attachments.
    pub fn has_attachments(&self) -> bool {
        matches!(self, Variant::V3)
    }
}

use serde::Serialize;

/// Billing category shown next to each task name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskCategory {
    TimeAndMaterial, // T&M
    Planned,         // PL
    Standard,        // ST
}

impl TaskCategory {
    pub fn code(&self) -> &'static str {
        match self {
            TaskCategory::TimeAndMaterial => "T&M",
            TaskCategory::Planned => "PL",
            TaskCategory::Standard => "ST",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "T&M" => Some(TaskCategory::TimeAndMaterial),
            "PL" => Some(TaskCategory::Planned),
            "ST" => Some(TaskCategory::Standard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub category: TaskCategory,
}

/// Fixed task catalog shown on the timer and allocation screens.
/// Static configuration data, not user-editable.
pub fn task_catalog() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            name: "Module Cleaning".to_string(),
            category: TaskCategory::TimeAndMaterial,
        },
        Task {
            id: 2,
            name: "Site Preparation".to_string(),
            category: TaskCategory::Planned,
        },
        Task {
            id: 3,
            name: "Excavation".to_string(),
            category: TaskCategory::Standard,
        },
        Task {
            id: 4,
            name: "Foundation".to_string(),
            category: TaskCategory::Standard,
        },
    ]
}

pub fn find_task(catalog: &[Task], id: u32) -> Option<&Task> {
    catalog.iter().find(|t| t.id == id)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Task summary row as shown in the dashboard's listing views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Composite `<instanceId>@<containerId>` id.
    pub id: String,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub owner: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub due_to: Option<DateTime<Utc>>,
    pub priority: Option<i32>,
    pub process_id: Option<String>,
    pub process_instance_id: Option<u64>,
    pub container_id: Option<String>,
}

/// Full task view returned by the detail endpoint: the summary fields plus
/// the instance's input and output variable maps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub input_data: Map<String, serde_json::Value>,
    #[serde(default)]
    pub output_data: Map<String, serde_json::Value>,
}

//! Wire-level serde types for the KIE server's JSON shapes.
//!
//! Field names follow the engine's kebab-case convention verbatim; the
//! service layer owns the mapping into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Mapper name for raw tabular rows from the custom-query subsystem.
pub const RAW_LIST_MAPPER: &str = "RawList";

/// Dates on the wire are epoch millis, either bare or wrapped in the
/// engine's legacy `{"java.util.Date": millis}` envelope depending on the
/// marshaller in use. Accept both, emit bare millis.
pub(crate) mod kie_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(crate) enum WireDate {
        Millis(i64),
        Wrapped {
            #[serde(rename = "java.util.Date")]
            millis: i64,
        },
    }

    pub(crate) fn to_datetime(wire: WireDate) -> Result<DateTime<Utc>, String> {
        let millis = match wire {
            WireDate::Millis(m) | WireDate::Wrapped { millis: m } => m,
        };
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| format!("timestamp out of range: {millis}"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireDate::deserialize(deserializer)?;
        to_datetime(wire).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.timestamp_millis())
    }
}

/// Optional variant of [`kie_date`] for fields the engine may omit or null.
pub(crate) mod kie_date_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::kie_date;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<kie_date::WireDate>::deserialize(deserializer)?
            .map(kie_date::to_datetime)
            .transpose()
            .map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }
}

/// One row from the pot-owners task query.
#[derive(Debug, Clone, Deserialize)]
pub struct KieTaskSummary {
    #[serde(rename = "task-id")]
    pub id: u64,
    #[serde(rename = "task-name")]
    pub name: Option<String>,
    #[serde(rename = "task-subject")]
    pub subject: Option<String>,
    #[serde(rename = "task-description")]
    pub description: Option<String>,
    #[serde(rename = "task-status")]
    pub status: Option<String>,
    #[serde(rename = "task-priority")]
    pub priority: Option<i32>,
    #[serde(rename = "task-actual-owner")]
    pub actual_owner: Option<String>,
    #[serde(rename = "task-created-by")]
    pub created_by: Option<String>,
    #[serde(rename = "task-created-on", with = "kie_date_opt", default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(rename = "task-expiration-time", with = "kie_date_opt", default)]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(rename = "task-proc-def-id")]
    pub process_id: Option<String>,
    #[serde(rename = "task-proc-inst-id")]
    pub process_instance_id: Option<u64>,
    #[serde(rename = "task-container-id")]
    pub container_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TaskSummaryList {
    #[serde(rename = "task-summary", default)]
    pub tasks: Vec<KieTaskSummary>,
}

/// Full task instance from the detail endpoint, including variable maps.
#[derive(Debug, Clone, Deserialize)]
pub struct KieTaskInstance {
    #[serde(rename = "task-id")]
    pub id: u64,
    #[serde(rename = "task-name")]
    pub name: Option<String>,
    #[serde(rename = "task-subject")]
    pub subject: Option<String>,
    #[serde(rename = "task-description")]
    pub description: Option<String>,
    #[serde(rename = "task-status")]
    pub status: Option<String>,
    #[serde(rename = "task-priority")]
    pub priority: Option<i32>,
    #[serde(rename = "task-actual-owner")]
    pub actual_owner: Option<String>,
    #[serde(rename = "task-created-by")]
    pub created_by: Option<String>,
    #[serde(rename = "task-created-on", with = "kie_date_opt", default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(rename = "task-expiration-time", with = "kie_date_opt", default)]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(rename = "task-process-id")]
    pub process_id: Option<String>,
    #[serde(rename = "task-process-instance-id")]
    pub process_instance_id: Option<u64>,
    #[serde(rename = "task-container-id")]
    pub container_id: Option<String>,
    #[serde(rename = "task-input-data", default)]
    pub input_data: Map<String, serde_json::Value>,
    #[serde(rename = "task-output-data", default)]
    pub output_data: Map<String, serde_json::Value>,
}

/// Task comment as the engine stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KieComment {
    #[serde(rename = "comment-id", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "comment")]
    pub text: String,
    #[serde(rename = "comment-added-by")]
    pub added_by: String,
    #[serde(rename = "comment-added-at", with = "kie_date")]
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommentList {
    #[serde(rename = "task-comment", default)]
    pub comments: Vec<KieComment>,
}

/// Ad-hoc query definition, upserted by name into the engine's custom-query
/// subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefinition {
    #[serde(rename = "query-name")]
    pub name: String,
    #[serde(rename = "query-source")]
    pub source: String,
    #[serde(rename = "query-expression")]
    pub expression: String,
    #[serde(rename = "query-target")]
    pub target: String,
}

impl QueryDefinition {
    /// Definition targeting the engine's `CUSTOM` query target.
    #[must_use]
    pub fn custom(
        name: impl Into<String>,
        source: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            expression: expression.into(),
            target: "CUSTOM".to_owned(),
        }
    }
}

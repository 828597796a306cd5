use pda_kie_client::{KieClient, QueryDefinition, RAW_LIST_MAPPER};
use pda_kie_core::Connection;
use serde_json::Value;

use crate::KIE_SERVER_PERSISTENCE_DS;
use crate::error::ServiceError;

/// Name the group query is registered under; upserted on every call.
pub const GROUPS_QUERY_NAME: &str = "pda-groups";

const GROUPS_QUERY: &str = "SELECT id FROM organizationalentity WHERE dtype = 'Group'";

/// Looks up group names known to the engine through its custom-query
/// subsystem. The comment service uses this to detect user/group name
/// clashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupService;

impl GroupService {
    /// Returns the engine's group names, narrowed to `filter` when the
    /// filter is non-empty.
    pub async fn list(
        &self,
        connection: &Connection,
        filter: &[&str],
    ) -> Result<Vec<String>, ServiceError> {
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let definition =
            QueryDefinition::custom(GROUPS_QUERY_NAME, KIE_SERVER_PERSISTENCE_DS, GROUPS_QUERY);
        client.replace_query(&definition).await.map_err(ServiceError::from_status)?;

        let rows = client
            .run_query(GROUPS_QUERY_NAME, RAW_LIST_MAPPER, 0, -1)
            .await
            .map_err(ServiceError::from_status)?;

        let mut groups: Vec<String> = rows
            .iter()
            .filter_map(|row| row.first().and_then(Value::as_str).map(str::to_owned))
            .collect();
        if !filter.is_empty() {
            groups.retain(|g| filter.contains(&g.as_str()));
        }
        Ok(groups)
    }
}

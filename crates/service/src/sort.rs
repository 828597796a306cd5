use std::collections::HashMap;

use pda_kie_core::DEFAULT_SORT;

/// Translation table from the dashboard's sort keys to the engine's task
/// query column names. Built once at startup and passed into the services
/// that need it; unknown keys fall back to the default key's mapping.
#[derive(Debug, Clone)]
pub struct SortProperties {
    map: HashMap<&'static str, &'static str>,
}

impl Default for SortProperties {
    fn default() -> Self {
        let map = HashMap::from([
            ("id", "taskId"),
            ("name", "taskName"),
            ("description", "description"),
            ("status", "status"),
            ("priority", "priority"),
            ("createdAt", "createdOn"),
            ("dueTo", "expirationTime"),
            ("processId", "processId"),
            ("processInstanceId", "processInstanceId"),
        ]);
        Self { map }
    }
}

impl SortProperties {
    /// Engine column for a dashboard sort key.
    #[must_use]
    pub fn resolve(&self, sort: &str) -> &str {
        self.map
            .get(sort)
            .or_else(|| self.map.get(DEFAULT_SORT))
            .copied()
            .unwrap_or(DEFAULT_SORT)
    }
}

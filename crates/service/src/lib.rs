//! Adapter services for the KIE engine
//!
//! Each service is stateless between calls: a fresh engine client is built
//! from the `Connection` the caller supplies, the engine is queried, and the
//! raw records are mapped into the domain shapes the dashboard consumes.
//! Engine status codes are folded into the typed [`ServiceError`] taxonomy
//! through explicit per-endpoint not-found allow-lists.

mod comment_service;
mod engine;
mod error;
mod group_service;
mod identity;
mod sort;
mod summary;
mod task_service;

#[cfg(test)]
mod comment_service_tests;
#[cfg(test)]
mod summary_tests;

pub use comment_service::{CommentService, PDA_USER_PREFIX};
pub use engine::{ENGINE_TYPE, KieEngine};
pub use error::ServiceError;
pub use group_service::{GROUPS_QUERY_NAME, GroupService};
pub use sort::SortProperties;
pub use summary::{
    PDA_PERC_DAYS_PREFIX, PDA_PERC_MONTHS_PREFIX, PDA_PERC_YEARS_PREFIX, PDA_TOTAL_PREFIX,
    RequestsSummary,
};
pub use task_service::{PAGE_START, TaskService};

/// Placeholder the engine resolves to its own persistence datasource when a
/// custom query is registered.
pub const KIE_SERVER_PERSISTENCE_DS: &str = "${org.kie.server.persistence.ds}";

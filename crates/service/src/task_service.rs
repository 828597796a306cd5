use pda_kie_client::{KieClient, KieTaskInstance, KieTaskSummary, TaskQuery};
use pda_kie_core::{
    AuthenticatedUser, CompositeId, Connection, InvalidPageError, PagedRequest, PagedResult,
    SortDirection, Task, TaskDetail,
};

use crate::error::ServiceError;
use crate::identity::effective_username;
use crate::sort::SortProperties;

/// Lowest valid 1-based page number.
pub const PAGE_START: u32 = 1;

/// The task detail endpoint reports missing tasks as 500 as often as 404.
const TASK_NOT_FOUND_STATUSES: &[u16] = &[404, 500];

/// Task listing pipeline and single-task detail fetch.
#[derive(Debug, Clone, Default)]
pub struct TaskService {
    sort_properties: SortProperties,
}

impl TaskService {
    #[must_use]
    pub fn new(sort_properties: SortProperties) -> Self {
        Self { sort_properties }
    }

    /// Lists tasks visible to the effective user, one page at a time.
    ///
    /// The engine does not report totals, so `last_page` is inferred: a page
    /// shorter than requested is last outright; a full page triggers one
    /// speculative query for the next page and is last iff that probe comes
    /// back empty. The extra round trip per listing call is part of the
    /// caller-visible contract.
    pub async fn list(
        &self,
        connection: &Connection,
        user: Option<&AuthenticatedUser>,
        request: &PagedRequest,
        filter: Option<&str>,
        groups: &[String],
    ) -> Result<PagedResult<Task>, ServiceError> {
        if request.page < PAGE_START {
            return Err(InvalidPageError { page: request.page }.into());
        }
        let search_filter = normalize_filter(filter);
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let username = effective_username(connection, user);

        let records =
            self.query_page(&client, username, request, search_filter.as_deref(), groups).await?;

        let last_page = if records.len() != request.page_size as usize {
            true
        } else {
            self.query_page(&client, username, &request.next_page(), search_filter.as_deref(), groups)
                .await?
                .is_empty()
        };

        Ok(PagedResult {
            items: records.into_iter().map(to_task).collect(),
            page: request.page,
            page_size: request.page_size,
            last_page,
        })
    }

    /// Fetches one task with its input/output variables and assignments.
    pub async fn get(
        &self,
        connection: &Connection,
        _user: Option<&AuthenticatedUser>,
        id: &str,
    ) -> Result<TaskDetail, ServiceError> {
        let task_id: CompositeId = id.parse()?;
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let instance = client
            .get_task(&task_id.container_id, task_id.instance_id)
            .await
            .map_err(|e| ServiceError::for_entity(e, TASK_NOT_FOUND_STATUSES, "task", id))?;
        Ok(to_detail(instance))
    }

    async fn query_page(
        &self,
        client: &KieClient,
        username: &str,
        request: &PagedRequest,
        filter: Option<&str>,
        groups: &[String],
    ) -> Result<Vec<KieTaskSummary>, ServiceError> {
        let sort = request
            .sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| self.sort_properties.resolve(s));
        let query = TaskQuery {
            page: request.page - PAGE_START,
            page_size: request.page_size,
            sort_ascending: request.direction != SortDirection::Desc,
            sort,
            groups,
            filter,
            user: username,
        };
        client.query_tasks(&query).await.map_err(ServiceError::from_status)
    }
}

/// The dashboard's `*` wildcard becomes the engine's `%`; a blank filter is
/// dropped from the query entirely.
fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter.map(|f| f.replace('*', "%")).filter(|f| !f.trim().is_empty())
}

fn to_task(record: KieTaskSummary) -> Task {
    let container_id = record.container_id.unwrap_or_default();
    Task {
        id: CompositeId::new(container_id.clone(), record.id).to_string(),
        name: record.name,
        subject: record.subject,
        description: record.description,
        status: record.status,
        owner: record.actual_owner,
        created_by: record.created_by,
        created_at: record.created_on,
        due_to: record.expiration_time,
        priority: record.priority,
        process_id: record.process_id,
        process_instance_id: record.process_instance_id,
        container_id: Some(container_id),
    }
}

fn to_detail(instance: KieTaskInstance) -> TaskDetail {
    let container_id = instance.container_id.unwrap_or_default();
    TaskDetail {
        task: Task {
            id: CompositeId::new(container_id.clone(), instance.id).to_string(),
            name: instance.name,
            subject: instance.subject,
            description: instance.description,
            status: instance.status,
            owner: instance.actual_owner,
            created_by: instance.created_by,
            created_at: instance.created_on,
            due_to: instance.expiration_time,
            priority: instance.priority,
            process_id: instance.process_id,
            process_instance_id: instance.process_instance_id,
            container_id: Some(container_id),
        },
        input_data: instance.input_data,
        output_data: instance.output_data,
    }
}

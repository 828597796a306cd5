use std::time::Duration;

use pda_kie_core::Connection;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::types::{CommentList, KieComment, KieTaskInstance, KieTaskSummary, QueryDefinition, TaskSummaryList};

/// Engine query endpoint for tasks the user owns or may claim.
const POT_OWNERS_ENDPOINT: &str = "/queries/tasks/instances/pot-owners";
/// Outbound request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters of one pot-owners task query. `page` is already zero-based
/// here; the 1-based translation happens in the service layer.
#[derive(Debug, Clone)]
pub struct TaskQuery<'a> {
    pub page: u32,
    pub page_size: u32,
    pub sort_ascending: bool,
    pub sort: Option<&'a str>,
    pub groups: &'a [String],
    pub filter: Option<&'a str>,
    pub user: &'a str,
}

/// HTTP client bound to one engine connection.
///
/// Fresh per inbound call; holds no state beyond the base URL and the
/// connection's basic auth credentials.
pub struct KieClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for KieClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KieClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl KieClient {
    /// Builds a client for the given connection.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// failure).
    pub fn new(connection: &Connection) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Init(e.to_string()))?;
        Ok(Self {
            client,
            base_url: connection.url.trim_end_matches('/').to_owned(),
            username: connection.username.clone(),
            password: connection.password.clone(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Runs the pot-owners task query. An empty response body means an empty
    /// result set, not an error.
    pub async fn query_tasks(&self, query: &TaskQuery<'_>) -> Result<Vec<KieTaskSummary>, ClientError> {
        tracing::debug!(page = query.page, page_size = query.page_size, user = query.user,
            "querying pot-owner tasks");
        let mut request = self.get(POT_OWNERS_ENDPOINT).query(&[
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
            ("sortOrder", query.sort_ascending.to_string()),
            ("user", query.user.to_owned()),
        ]);
        if let Some(sort) = query.sort {
            request = request.query(&[("sort", sort)]);
        }
        for group in query.groups {
            request = request.query(&[("groups", group.as_str())]);
        }
        if let Some(filter) = query.filter {
            request = request.query(&[("filter", filter)]);
        }

        let body = expect_success(request.send().await?).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: TaskSummaryList = parse_json(&body, "task summary list")?;
        Ok(list.tasks)
    }

    /// Fetches one task instance with input/output data and assignments.
    pub async fn get_task(
        &self,
        container_id: &str,
        instance_id: u64,
    ) -> Result<KieTaskInstance, ClientError> {
        let body = expect_success(
            self.get(&format!("/containers/{container_id}/tasks/{instance_id}"))
                .query(&[
                    ("withInputData", "true"),
                    ("withOutputData", "true"),
                    ("withAssignments", "true"),
                ])
                .send()
                .await?,
        )
        .await?;
        parse_json(&body, "task instance")
    }

    pub async fn list_comments(
        &self,
        container_id: &str,
        instance_id: u64,
    ) -> Result<Vec<KieComment>, ClientError> {
        let body = expect_success(
            self.get(&format!("/containers/{container_id}/tasks/{instance_id}/comments"))
                .send()
                .await?,
        )
        .await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: CommentList = parse_json(&body, "task comment list")?;
        Ok(list.comments)
    }

    pub async fn get_comment(
        &self,
        container_id: &str,
        instance_id: u64,
        comment_id: u64,
    ) -> Result<KieComment, ClientError> {
        let body = expect_success(
            self.get(&format!(
                "/containers/{container_id}/tasks/{instance_id}/comments/{comment_id}"
            ))
            .send()
            .await?,
        )
        .await?;
        parse_json(&body, "task comment")
    }

    /// Adds a comment and returns the id the engine assigned to it.
    pub async fn add_comment(
        &self,
        container_id: &str,
        instance_id: u64,
        comment: &KieComment,
    ) -> Result<u64, ClientError> {
        let body = expect_success(
            self.client
                .post(format!(
                    "{}/containers/{container_id}/tasks/{instance_id}/comments",
                    self.base_url
                ))
                .basic_auth(&self.username, Some(&self.password))
                .json(comment)
                .send()
                .await?,
        )
        .await?;
        parse_json(&body, "new comment id")
    }

    pub async fn delete_comment(
        &self,
        container_id: &str,
        instance_id: u64,
        comment_id: u64,
    ) -> Result<(), ClientError> {
        expect_success(
            self.client
                .delete(format!(
                    "{}/containers/{container_id}/tasks/{instance_id}/comments/{comment_id}",
                    self.base_url
                ))
                .basic_auth(&self.username, Some(&self.password))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// Upserts a named query definition in the engine's custom-query
    /// subsystem.
    pub async fn replace_query(&self, definition: &QueryDefinition) -> Result<(), ClientError> {
        tracing::debug!(name = %definition.name, "replacing query definition");
        expect_success(
            self.client
                .put(format!("{}/queries/definitions/{}", self.base_url, definition.name))
                .basic_auth(&self.username, Some(&self.password))
                .json(definition)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// Executes a registered query, returning raw tabular rows. A negative
    /// `page_size` asks the engine for all rows.
    pub async fn run_query(
        &self,
        name: &str,
        mapper: &str,
        page: u32,
        page_size: i32,
    ) -> Result<Vec<Vec<Value>>, ClientError> {
        tracing::debug!(name, mapper, "running query");
        let body = expect_success(
            self.get(&format!("/queries/definitions/{name}/data"))
                .query(&[
                    ("mapper", mapper),
                    ("page", &page.to_string()),
                    ("pageSize", &page_size.to_string()),
                ])
                .send()
                .await?,
        )
        .await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        parse_json(&body, "query result rows")
    }
}

async fn expect_success(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        tracing::warn!(code = status.as_u16(), "engine returned non-success status");
        Err(ClientError::Status { code: status.as_u16(), message: body })
    }
}

fn parse_json<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ClientError> {
    serde_json::from_str(body)
        .map_err(|e| ClientError::Json { context: context.to_owned(), source: e })
}

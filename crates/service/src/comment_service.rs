use chrono::Utc;
use pda_kie_client::{KieClient, KieComment};
use pda_kie_core::{
    AuthenticatedUser, Comment, CompositeId, Connection, CreateCommentRequest, InvalidIdError,
};

use crate::error::ServiceError;
use crate::group_service::GroupService;
use crate::identity::effective_username;

/// Marker prepended to a comment author whose name clashes with an engine
/// group, so the engine does not resolve the person as a group.
pub const PDA_USER_PREFIX: &str = "pda-user-";

/// Comment endpoints report missing resources as 404 only; a 500 here is a
/// genuine engine error and must stay visible as one.
const COMMENT_NOT_FOUND_STATUSES: &[u16] = &[404];

/// CRUD on a task's comment sub-resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentService {
    groups: GroupService,
}

impl CommentService {
    #[must_use]
    pub fn new(groups: GroupService) -> Self {
        Self { groups }
    }

    pub async fn list(
        &self,
        connection: &Connection,
        _user: Option<&AuthenticatedUser>,
        task_id: &str,
    ) -> Result<Vec<Comment>, ServiceError> {
        let id: CompositeId = task_id.parse()?;
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let comments = client
            .list_comments(&id.container_id, id.instance_id)
            .await
            .map_err(|e| ServiceError::for_entity(e, COMMENT_NOT_FOUND_STATUSES, "task", task_id))?;
        Ok(comments.into_iter().map(to_comment).collect())
    }

    pub async fn get(
        &self,
        connection: &Connection,
        _user: Option<&AuthenticatedUser>,
        task_id: &str,
        comment_id: &str,
    ) -> Result<Comment, ServiceError> {
        let id: CompositeId = task_id.parse()?;
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let comment = client
            .get_comment(&id.container_id, id.instance_id, parse_comment_id(comment_id)?)
            .await
            .map_err(|e| {
                ServiceError::for_entity(e, COMMENT_NOT_FOUND_STATUSES, "comment", comment_id)
            })?;
        Ok(to_comment(comment))
    }

    /// Creates a comment authored by the effective user. If that name is
    /// also a group name known to the engine, the stored author gets the
    /// [`PDA_USER_PREFIX`] marker; the single group lookup per create is the
    /// clash check.
    pub async fn create(
        &self,
        connection: &Connection,
        user: Option<&AuthenticatedUser>,
        task_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<Comment, ServiceError> {
        let id: CompositeId = task_id.parse()?;
        let author = effective_username(connection, user);
        let clashing = self.groups.list(connection, &[author]).await?;
        let created_by = if clashing.iter().any(|g| g == author) {
            tracing::debug!(author, "author name clashes with an engine group, prefixing");
            format!("{PDA_USER_PREFIX}{author}")
        } else {
            author.to_owned()
        };

        let comment = KieComment {
            id: None,
            text: request.comment.clone(),
            added_by: created_by,
            added_at: Utc::now(),
        };
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let new_id = client
            .add_comment(&id.container_id, id.instance_id, &comment)
            .await
            .map_err(|e| ServiceError::for_entity(e, COMMENT_NOT_FOUND_STATUSES, "task", task_id))?;

        Ok(Comment {
            id: new_id.to_string(),
            text: comment.text,
            created_by: comment.added_by,
            created_at: comment.added_at,
        })
    }

    /// Deletes a comment and returns its id.
    pub async fn delete(
        &self,
        connection: &Connection,
        _user: Option<&AuthenticatedUser>,
        task_id: &str,
        comment_id: &str,
    ) -> Result<String, ServiceError> {
        let id: CompositeId = task_id.parse()?;
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        client
            .delete_comment(&id.container_id, id.instance_id, parse_comment_id(comment_id)?)
            .await
            .map_err(|e| {
                ServiceError::for_entity(e, COMMENT_NOT_FOUND_STATUSES, "comment", comment_id)
            })?;
        Ok(comment_id.to_owned())
    }
}

fn parse_comment_id(comment_id: &str) -> Result<u64, ServiceError> {
    comment_id
        .parse::<u64>()
        .map_err(|_| InvalidIdError { raw: comment_id.to_owned() }.into())
}

fn to_comment(comment: KieComment) -> Comment {
    Comment {
        id: comment.id.map(|id| id.to_string()).unwrap_or_default(),
        text: comment.text,
        created_by: comment.added_by,
        created_at: comment.added_at,
    }
}

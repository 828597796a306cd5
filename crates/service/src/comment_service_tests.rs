use pda_kie_core::{AuthenticatedUser, Connection, CreateCommentRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::comment_service::{CommentService, PDA_USER_PREFIX};
use crate::error::ServiceError;
use crate::group_service::GroupService;

fn connection_to(server: &MockServer) -> Connection {
    Connection::new(server.uri(), "service-account", "secret")
}

fn service() -> CommentService {
    CommentService::new(GroupService)
}

/// Group query endpoints used by the clash check on create.
async fn mount_groups(server: &MockServer, groups: serde_json::Value) {
    Mock::given(method("PUT"))
        .and(path("/queries/definitions/pda-groups"))
        .respond_with(ResponseTemplate::new(201))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/queries/definitions/pda-groups/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(groups))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_comments_for_a_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/containers/c1/tasks/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task-comment": [{
                "comment-id": 3,
                "comment": "first",
                "comment-added-by": "alice",
                "comment-added-at": 1_717_243_200_000_i64
            }]
        })))
        .mount(&server)
        .await;

    let comments = service().list(&connection_to(&server), None, "1@c1").await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, "3");
    assert_eq!(comments[0].text, "first");
    assert_eq!(comments[0].created_by, "alice");
}

#[tokio::test]
async fn creates_comment_as_effective_user() {
    let server = MockServer::start().await;
    mount_groups(&server, serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/containers/c2/tasks/2/comments"))
        .respond_with(ResponseTemplate::new(201).set_body_string("22"))
        .mount(&server)
        .await;

    let user = AuthenticatedUser::new("alice");
    let request = CreateCommentRequest { comment: "please review".to_owned() };
    let comment =
        service().create(&connection_to(&server), Some(&user), "2@c2", &request).await.unwrap();

    assert_eq!(comment.id, "22");
    assert_eq!(comment.text, "please review");
    assert_eq!(comment.created_by, "alice");
}

#[tokio::test]
async fn prefixes_author_clashing_with_group_name() {
    let server = MockServer::start().await;
    // Group lookup returns the clashing name; expect(1) pins exactly one
    // lookup per create.
    mount_groups(&server, serde_json::json!([["admin"]])).await;
    Mock::given(method("POST"))
        .and(path("/containers/c2/tasks/2/comments"))
        .respond_with(ResponseTemplate::new(201).set_body_string("22"))
        .mount(&server)
        .await;

    let user = AuthenticatedUser::new("admin");
    let request = CreateCommentRequest { comment: "note".to_owned() };
    let comment =
        service().create(&connection_to(&server), Some(&user), "2@c2", &request).await.unwrap();

    assert_eq!(comment.created_by, format!("{PDA_USER_PREFIX}admin"));

    let posted = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.method.to_string() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&posted.body).unwrap();
    assert_eq!(body["comment-added-by"], format!("{PDA_USER_PREFIX}admin"));
}

#[tokio::test]
async fn gets_a_single_comment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/containers/c1/tasks/1/comments/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "comment-id": 3,
            "comment": "first",
            "comment-added-by": "alice",
            "comment-added-at": 1_717_243_200_000_i64
        })))
        .mount(&server)
        .await;

    let comment = service().get(&connection_to(&server), None, "1@c1", "3").await.unwrap();
    assert_eq!(comment.id, "3");
}

#[tokio::test]
async fn deletes_and_returns_the_comment_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/containers/c1/tasks/1/comments/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = service().delete(&connection_to(&server), None, "1@c1", "3").await.unwrap();
    assert_eq!(deleted, "3");
}

#[tokio::test]
async fn get_folds_only_404_into_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/containers/c1/tasks/1/comments/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service().get(&connection_to(&server), None, "1@c1", "3").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_keeps_500_as_engine_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/containers/c1/tasks/1/comments/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = service().get(&connection_to(&server), None, "1@c1", "3").await.unwrap_err();
    assert!(matches!(err, ServiceError::EngineResponse { status: 500, .. }));
}

#[tokio::test]
async fn delete_folds_only_404_into_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/containers/c1/tasks/1/comments/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service().delete(&connection_to(&server), None, "1@c1", "3").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_keeps_500_as_engine_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/containers/c1/tasks/1/comments/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = service().delete(&connection_to(&server), None, "1@c1", "3").await.unwrap_err();
    assert!(matches!(err, ServiceError::EngineResponse { status: 500, .. }));
}

#[tokio::test]
async fn rejects_malformed_task_ids() {
    let server = MockServer::start().await;

    for raw in ["notnumeric@c1", "1-c1"] {
        let err = service().list(&connection_to(&server), None, raw).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidId(_)), "{raw} should be invalid");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejects_non_numeric_comment_ids() {
    let server = MockServer::start().await;
    let err = service().get(&connection_to(&server), None, "1@c1", "abc").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidId(_)));
}

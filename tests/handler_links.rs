mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

fn make_server(pool: PgPool) -> TestServer {
    let (state, _mailer) = common::create_test_state(pool);
    TestServer::new(common::api_router(state)).unwrap()
}

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_and_list(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let auth = common::bearer_for(user_id, "alice");
    let server = make_server(pool);

    let created = server
        .post("/api/user/links")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "title": "Blog", "url": "https://blog.example.com" }))
        .await;

    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["order"], 0);
    assert_eq!(body["linkType"], "link");
    assert_eq!(body["clickCount"], 0);

    server
        .post("/api/user/links")
        .add_header("Authorization", auth.clone())
        .json(&json!({
            "title": "Video",
            "url": "https://youtube.com/watch?v=1",
            "linkType": "youtube"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let list = server
        .get("/api/user/links")
        .add_header("Authorization", auth)
        .await;

    list.assert_status_ok();
    let links = list.json::<Vec<Value>>();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["title"], "Blog");
    assert_eq!(links[1]["order"], 1);
    assert_eq!(links[1]["linkType"], "youtube");
}

#[sqlx::test]
async fn test_create_requires_title_and_url(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let server = make_server(pool);

    let response = server
        .post("/api/user/links")
        .add_header("Authorization", common::bearer_for(user_id, "alice"))
        .json(&json!({ "title": "No url" }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_links_require_auth(pool: PgPool) {
    let server = make_server(pool);

    server.get("/api/user/links").await.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_update_foreign_link_is_not_found(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let link = common::create_test_link(&pool, alice, "A", 0).await;
    let server = make_server(pool);

    let response = server
        .put(&format!("/api/user/links/{link}"))
        .add_header("Authorization", common::bearer_for(bob, "bob"))
        .json(&json!({ "title": "Mine now", "url": "https://evil.example" }))
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_update_malformed_id(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let server = make_server(pool);

    server
        .put("/api/user/links/not-a-uuid")
        .add_header("Authorization", common::bearer_for(user_id, "alice"))
        .json(&json!({ "title": "T", "url": "https://example.com" }))
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_delete_link(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let link = common::create_test_link(&pool, user_id, "A", 0).await;
    let auth = common::bearer_for(user_id, "alice");
    let server = make_server(pool);

    let response = server
        .delete(&format!("/api/user/links/{link}"))
        .add_header("Authorization", auth.clone())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Link deleted successfully");

    server
        .delete(&format!("/api/user/links/{link}"))
        .add_header("Authorization", auth)
        .await
        .assert_status_not_found();
}

// ─── REORDER ─────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_reorder_success(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let a = common::create_test_link(&pool, user_id, "A", 0).await;
    let b = common::create_test_link(&pool, user_id, "B", 1).await;
    let c = common::create_test_link(&pool, user_id, "C", 2).await;
    let server = make_server(pool.clone());

    let response = server
        .put("/api/user/links/reorder")
        .add_header("Authorization", common::bearer_for(user_id, "alice"))
        .json(&json!({ "orderedLinkIds": [c, a, b] }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Links reordered successfully"
    );
    assert_eq!(common::link_position(&pool, a).await, 1);
    assert_eq!(common::link_position(&pool, b).await, 2);
    assert_eq!(common::link_position(&pool, c).await, 0);
}

#[sqlx::test]
async fn test_reorder_with_foreign_id_fails_atomically(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let a = common::create_test_link(&pool, alice, "A", 0).await;
    let b = common::create_test_link(&pool, alice, "B", 1).await;
    let foreign = common::create_test_link(&pool, bob, "X", 0).await;
    let server = make_server(pool.clone());

    let response = server
        .put("/api/user/links/reorder")
        .add_header("Authorization", common::bearer_for(alice, "alice"))
        .json(&json!({ "orderedLinkIds": [b, foreign, a] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Server error reordering links"
    );
    assert_eq!(common::link_position(&pool, a).await, 0);
    assert_eq!(common::link_position(&pool, b).await, 1);
    assert_eq!(common::link_position(&pool, foreign).await, 0);
}

#[sqlx::test]
async fn test_reorder_with_malformed_id_fails_atomically(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let a = common::create_test_link(&pool, user_id, "A", 0).await;
    let b = common::create_test_link(&pool, user_id, "B", 1).await;
    let server = make_server(pool.clone());

    let response = server
        .put("/api/user/links/reorder")
        .add_header("Authorization", common::bearer_for(user_id, "alice"))
        .json(&json!({ "orderedLinkIds": [b.to_string(), "garbage"] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(common::link_position(&pool, a).await, 0);
    assert_eq!(common::link_position(&pool, b).await, 1);
}

#[sqlx::test]
async fn test_reorder_requires_array(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let server = make_server(pool);

    let response = server
        .put("/api/user/links/reorder")
        .add_header("Authorization", common::bearer_for(user_id, "alice"))
        .json(&json!({ "orderedLinkIds": "a,b,c" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "orderedLinkIds must be an array"
    );
}

// ─── CLICKS ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_click_is_public_and_counts(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let link = common::create_test_link(&pool, user_id, "A", 0).await;
    let server = make_server(pool.clone());

    server
        .post(&format!("/api/links/{link}/click"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .post(&format!("/api/links/{link}/click"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::click_count(&pool, link).await, 2);
}

#[sqlx::test]
async fn test_click_unknown_and_malformed(pool: PgPool) {
    let server = make_server(pool);

    server
        .post(&format!("/api/links/{}/click", Uuid::new_v4()))
        .await
        .assert_status_not_found();
    server
        .post("/api/links/nope/click")
        .await
        .assert_status_bad_request();
}

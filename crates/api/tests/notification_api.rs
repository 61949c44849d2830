//! HTTP-level integration tests for the notification inbox.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_auth, token_for};
use mentorbridge_db::models::user::User;
use mentorbridge_db::repositories::NotificationRepo;
use sqlx::PgPool;

/// Seed `count` notifications for `user` directly through the repository.
async fn seed(pool: &PgPool, user: &User, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let id = NotificationRepo::create(
            pool,
            user.id,
            &format!("Title {i}"),
            &format!("Message {i}"),
            "connection_update",
            None,
        )
        .await
        .expect("seed should succeed");
        ids.push(id);
    }
    ids
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_newest_first(pool: PgPool) {
    let user = common::create_mentee(&pool, "reader").await;
    seed(&pool, &user, 3).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let list = json["data"].as_array().expect("data should be an array");
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["title"], "Title 2");
    assert_eq!(list[2]["title"], "Title 0");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_supports_paging_and_unread_filter(pool: PgPool) {
    let user = common::create_mentee(&pool, "pager").await;
    let ids = seed(&pool, &user, 5).await;
    NotificationRepo::mark_read(&pool, ids[0], user.id)
        .await
        .expect("mark should succeed");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/notifications?limit=2&offset=2",
        &token_for(&user),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/notifications?unread_only=true",
        &token_for(&user),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(4));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unread_count_tracks_reads(pool: PgPool) {
    let user = common::create_mentee(&pool, "counter").await;
    let ids = seed(&pool, &user, 3).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token_for(&user)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread_count"], 3);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{}/read", ids[0]);
    let response = post_auth(app, &uri, &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token_for(&user)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_is_scoped_to_owner(pool: PgPool) {
    let owner = common::create_mentee(&pool, "owner").await;
    let other = common::create_mentee(&pool, "other").await;
    let ids = seed(&pool, &owner, 1).await;

    // Someone else's notification looks like it does not exist.
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{}/read", ids[0]);
    let response = post_auth(app, &uri, &token_for(&other)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Marking twice is idempotent, not an error.
    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post_auth(app, &uri, &token_for(&owner)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn read_all_marks_everything(pool: PgPool) {
    let user = common::create_mentee(&pool, "bulk").await;
    seed(&pool, &user, 4).await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/notifications/read-all", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 4);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread-count", &token_for(&user)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_and_clear(pool: PgPool) {
    let user = common::create_mentee(&pool, "cleaner").await;
    let ids = seed(&pool, &user, 3).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{}", ids[0]);
    let response = delete_auth(app, &uri, &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting it again is a 404.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Clear the rest.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/notifications", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 2);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", &token_for(&user)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
}

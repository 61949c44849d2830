//! HTTP-level integration tests for the mentor directory and profiles.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, put_json_auth, token_for};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Only approved, active mentors appear in the directory, decorated with
/// their profile summary.
#[sqlx::test(migrations = "../db/migrations")]
async fn directory_lists_approved_mentors_with_profiles(pool: PgPool) {
    let approved = common::create_mentor(&pool, "approved").await;
    common::create_user(&pool, "unapproved", "mentor", false).await;
    let retired = common::create_mentor(&pool, "retired").await;
    mentorbridge_db::repositories::UserRepo::deactivate(&pool, retired.id)
        .await
        .expect("deactivation should succeed");
    let viewer = common::create_mentee(&pool, "viewer").await;

    // Give the approved mentor a profile.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "bio": "20 years of Rust", "skills": "rust,sql" });
    let response = put_json_auth(app, "/api/v1/profile", &token_for(&approved), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/mentors", &token_for(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let list = json["data"].as_array().expect("data should be an array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["username"], "approved");
    assert_eq!(list[0]["bio"], "20 years of Rust");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn directory_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/mentors").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Profile updates are partial: omitted fields keep their values.
#[sqlx::test(migrations = "../db/migrations")]
async fn profile_upsert_is_partial(pool: PgPool) {
    let user = common::create_mentee(&pool, "profiled").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "bio": "learning Rust", "location": "Berlin" });
    let response = put_json_auth(app, "/api/v1/profile", &token_for(&user), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Update only the bio; the location must survive.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "bio": "learning Rust and SQL" });
    let response = put_json_auth(app, "/api/v1/profile", &token_for(&user), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/profile", &token_for(&user)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "learning Rust and SQL");
    assert_eq!(json["data"]["location"], "Berlin");
}

/// Without a profile row the own-profile endpoint returns null data, not 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_own_profile_is_null(pool: PgPool) {
    let user = common::create_mentee(&pool, "blank").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/profile", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn other_users_profile_is_visible(pool: PgPool) {
    let mentor = common::create_mentor(&pool, "mentor").await;
    let viewer = common::create_mentee(&pool, "viewer").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "skills": "systems" });
    put_json_auth(app, "/api/v1/profile", &token_for(&mentor), body).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/users/{}/profile", mentor.id);
    let response = get_auth(app, &uri, &token_for(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["skills"], "systems");

    // A user without a profile is a 404 here.
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/users/{}/profile", viewer.id);
    let response = get_auth(app, &uri, &token_for(&mentor)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Mentor approval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_approves_mentor_into_directory(pool: PgPool) {
    let admin = common::create_user(&pool, "admin", "admin", true).await;
    let mentor = common::create_user(&pool, "newbie", "mentor", false).await;
    let viewer = common::create_mentee(&pool, "viewer").await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/mentors/{}/approve", mentor.id);
    let response = post_auth(app, &uri, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/mentors", &token_for(&viewer)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["username"], "newbie");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_admin_cannot_approve(pool: PgPool) {
    let mentor = common::create_user(&pool, "newbie", "mentor", false).await;
    let mentee = common::create_mentee(&pool, "mentee").await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/admin/mentors/{}/approve", mentor.id);
    let response = post_auth(app, &uri, &token_for(&mentee)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approving_a_non_mentor_is_not_found(pool: PgPool) {
    let admin = common::create_user(&pool, "admin", "admin", true).await;
    let mentee = common::create_mentee(&pool, "mentee").await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/admin/mentors/{}/approve", mentee.id);
    let response = post_auth(app, &uri, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

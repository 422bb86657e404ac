//! Integration tests for the `/members` resource: user enrichment,
//! role changes, removal, and the last-admin invariant.

mod common;

use std::sync::Arc;

use atrium_core::roles::MemberRole;
use atrium_store::{DocumentStore, MemoryStore};
use axum::http::{Method, StatusCode};
use common::{expect_status, seed_member, seed_user, seed_workspace, token_for};
use serde_json::json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: GET /members enriches each member with the user's name and email
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_enriches_members_with_user_details() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::get(
        app,
        &format!("/api/v1/members?workspace_id={}", workspace.id),
        &token_for(alice.id),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Oldest membership first: the workspace creator.
    assert_eq!(data[0]["name"], "Alice");
    assert_eq!(data[0]["email"], "alice@example.com");
    assert_eq!(data[0]["role"], "ADMIN");
    assert_eq!(data[1]["name"], "Bob");
    assert_eq!(data[1]["role"], "MEMBER");
}

#[tokio::test]
async fn member_with_missing_user_record_gets_placeholders() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    // Member whose user document does not exist.
    seed_member(&store, workspace.id, Uuid::new_v4(), MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::get(
        app,
        &format!("/api/v1/members?workspace_id={}", workspace.id),
        &token_for(alice.id),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2, "orphaned members are still listed");
    assert_eq!(data[1]["name"], "[User Not Found]");
    assert_eq!(data[1]["email"], "[Email Not Found]");
}

#[tokio::test]
async fn list_requires_membership() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let mallory = seed_user(&store, "Mallory", "mallory@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::get(
        app,
        &format!("/api/v1/members?workspace_id={}", workspace.id),
        &token_for(mallory.id),
    )
    .await;

    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

// ---------------------------------------------------------------------------
// Test: role changes are admin-only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn only_admins_can_change_roles() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let carol = seed_user(&store, "Carol", "carol@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;
    let carols = seed_member(&store, workspace.id, carol.id, MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::PATCH,
        &format!("/api/v1/members/{}", carols.id),
        Some(&token_for(bob.id)),
        Some(json!({ "role": "ADMIN" })),
    )
    .await;

    let json = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_can_promote_a_member() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    let bobs = seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::PATCH,
        &format!("/api/v1/members/{}", bobs.id),
        Some(&token_for(alice.id)),
        Some(json!({ "role": "ADMIN" })),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["role"], "ADMIN");

    let reloaded = store.get_member(bobs.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, MemberRole::Admin);
}

#[tokio::test]
async fn setting_the_same_role_is_a_successful_noop() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let (workspace, admin) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    let _ = workspace;

    // Alice re-asserts her own ADMIN role: no demotion, no guard trip.
    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::PATCH,
        &format!("/api/v1/members/{}", admin.id),
        Some(&token_for(alice.id)),
        Some(json!({ "role": "ADMIN" })),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["role"], "ADMIN");
}

// ---------------------------------------------------------------------------
// Test: the last-admin invariant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demoting_the_sole_admin_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let (workspace, admin) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::PATCH,
        &format!("/api/v1/members/{}", admin.id),
        Some(&token_for(alice.id)),
        Some(json!({ "role": "MEMBER" })),
    )
    .await;

    let json = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");

    let reloaded = store.get_member(admin.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, MemberRole::Admin, "role must be unchanged");
}

#[tokio::test]
async fn removing_the_sole_admin_is_rejected_even_for_themself() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let (_, admin) = seed_workspace(&store, &alice, "AAAAAAAA").await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::DELETE,
        &format!("/api/v1/members/{}", admin.id),
        Some(&token_for(alice.id)),
        None,
    )
    .await;

    expect_status(response, StatusCode::FORBIDDEN).await;
    assert!(store.get_member(admin.id).await.unwrap().is_some());
}

#[tokio::test]
async fn admin_can_leave_after_promoting_a_successor() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let (workspace, admin) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    let bobs = seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;

    // Promote Bob first.
    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::PATCH,
        &format!("/api/v1/members/{}", bobs.id),
        Some(&token_for(alice.id)),
        Some(json!({ "role": "ADMIN" })),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    // Now Alice can remove herself.
    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::DELETE,
        &format!("/api/v1/members/{}", admin.id),
        Some(&token_for(alice.id)),
        None,
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    assert!(store.get_member(admin.id).await.unwrap().is_none());
    assert_eq!(store.count_admins(workspace.id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: removal authorization -- self vs others
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plain_member_can_remove_themself() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    let bobs = seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::DELETE,
        &format!("/api/v1/members/{}", bobs.id),
        Some(&token_for(bob.id)),
        None,
    )
    .await;

    expect_status(response, StatusCode::OK).await;
    assert!(store.get_member(bobs.id).await.unwrap().is_none());
}

#[tokio::test]
async fn plain_member_cannot_remove_someone_else() {
    let store = Arc::new(MemoryStore::new());
    let alice = seed_user(&store, "Alice", "alice@example.com").await;
    let bob = seed_user(&store, "Bob", "bob@example.com").await;
    let carol = seed_user(&store, "Carol", "carol@example.com").await;
    let (workspace, _) = seed_workspace(&store, &alice, "AAAAAAAA").await;
    seed_member(&store, workspace.id, bob.id, MemberRole::Member).await;
    let carols = seed_member(&store, workspace.id, carol.id, MemberRole::Member).await;

    let app = common::build_test_app(Arc::clone(&store));
    let response = common::request(
        app,
        Method::DELETE,
        &format!("/api/v1/members/{}", carols.id),
        Some(&token_for(bob.id)),
        None,
    )
    .await;

    expect_status(response, StatusCode::FORBIDDEN).await;
    assert!(store.get_member(carols.id).await.unwrap().is_some());
}

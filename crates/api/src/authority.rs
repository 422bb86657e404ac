//! Membership Authority.
//!
//! Every workspace-scoped operation resolves the caller's membership
//! here before touching anything else. A missing membership is always
//! reported as `Unauthorized` — never `NotFound` — so the response
//! does not reveal whether the workspace exists to non-members.

use atrium_core::error::CoreError;
use atrium_core::types::DocId;
use atrium_store::models::member::Member;
use atrium_store::DocumentStore;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// Resolve the caller's membership in a workspace.
///
/// Fails with `Unauthorized` when no member record exists for the
/// (user, workspace) pair, regardless of whether the workspace itself
/// exists.
pub async fn resolve_membership(
    store: &dyn DocumentStore,
    auth: &AuthUser,
    workspace_id: DocId,
) -> Result<Member, AppError> {
    store
        .find_member(workspace_id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Not a member of this workspace".into(),
            ))
        })
}

/// Resolve the caller's membership and require the ADMIN role.
pub async fn resolve_admin(
    store: &dyn DocumentStore,
    auth: &AuthUser,
    workspace_id: DocId,
) -> Result<Member, AppError> {
    let member = resolve_membership(store, auth, workspace_id).await?;
    if !member.role.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }
    Ok(member)
}

/// Enforce the last-admin invariant before deleting or demoting
/// `target`.
///
/// A workspace must always retain at least one ADMIN member. If the
/// target holds the ADMIN role and is the only admin of its workspace,
/// the operation is rejected with `Forbidden`. Non-admin targets never
/// trip the guard.
pub async fn ensure_not_last_admin(
    store: &dyn DocumentStore,
    target: &Member,
) -> Result<(), AppError> {
    if !target.role.is_admin() {
        return Ok(());
    }
    let admins = store.count_admins(target.workspace_id).await?;
    if admins <= 1 {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot remove or demote the last admin of the workspace".into(),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use atrium_core::roles::MemberRole;
    use atrium_store::MemoryStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn auth_for(user_id: DocId) -> AuthUser {
        AuthUser { user_id }
    }

    async fn seed_member(store: &MemoryStore, workspace_id: DocId, role: MemberRole) -> Member {
        let member = Member {
            id: Uuid::new_v4(),
            workspace_id,
            user_id: Uuid::new_v4(),
            role,
            created_at: Utc::now(),
        };
        store.create_member(member.clone()).await.unwrap();
        member
    }

    // -----------------------------------------------------------------------
    // resolve_membership / resolve_admin
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn non_member_is_unauthorized_even_for_missing_workspace() {
        let store = MemoryStore::new();
        let auth = auth_for(Uuid::new_v4());

        // Same outcome whether or not the workspace exists: the caller
        // cannot distinguish the two cases.
        let err = resolve_membership(&store, &auth, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn member_resolves_with_their_role() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        let member = seed_member(&store, workspace_id, MemberRole::Member).await;
        let auth = auth_for(member.user_id);

        let resolved = resolve_membership(&store, &auth, workspace_id).await.unwrap();
        assert_eq!(resolved.id, member.id);
        assert_eq!(resolved.role, MemberRole::Member);
    }

    #[tokio::test]
    async fn resolve_admin_rejects_plain_members_with_forbidden() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        let member = seed_member(&store, workspace_id, MemberRole::Member).await;
        let auth = auth_for(member.user_id);

        let err = resolve_admin(&store, &auth, workspace_id).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn resolve_admin_accepts_admins() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        let admin = seed_member(&store, workspace_id, MemberRole::Admin).await;
        let auth = auth_for(admin.user_id);

        let resolved = resolve_admin(&store, &auth, workspace_id).await.unwrap();
        assert_eq!(resolved.id, admin.id);
    }

    // -----------------------------------------------------------------------
    // Last-admin invariant
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn sole_admin_cannot_be_removed() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        let admin = seed_member(&store, workspace_id, MemberRole::Admin).await;
        seed_member(&store, workspace_id, MemberRole::Member).await;

        let err = ensure_not_last_admin(&store, &admin).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    }

    #[tokio::test]
    async fn admin_with_a_peer_passes_the_guard() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        let admin = seed_member(&store, workspace_id, MemberRole::Admin).await;
        seed_member(&store, workspace_id, MemberRole::Admin).await;

        ensure_not_last_admin(&store, &admin).await.unwrap();
    }

    #[tokio::test]
    async fn non_admin_target_never_trips_the_guard() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        seed_member(&store, workspace_id, MemberRole::Admin).await;
        let member = seed_member(&store, workspace_id, MemberRole::Member).await;

        ensure_not_last_admin(&store, &member).await.unwrap();
    }

    #[tokio::test]
    async fn admin_counts_are_per_workspace() {
        let store = MemoryStore::new();
        let workspace_id = Uuid::new_v4();
        let admin = seed_member(&store, workspace_id, MemberRole::Admin).await;
        // An admin of an unrelated workspace must not satisfy the invariant.
        seed_member(&store, Uuid::new_v4(), MemberRole::Admin).await;

        let err = ensure_not_last_admin(&store, &admin).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    }
}

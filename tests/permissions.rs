//! Permission gate integration tests: identity resolution, membership status,
//! and the least-strict-allowed-role rank comparison.

mod common;

use common::*;
use pokerclubs_backend::entities::*;
use pokerclubs_backend::error::AppError;
use pokerclubs_backend::services::PermissionService;

#[tokio::test]
async fn gate_rejects_missing_identity_and_unknown_user() {
    let db = setup_db().await;
    let gate = PermissionService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    add_member(&db, owner.id, club.id, ClubRole::Owner, 0, 0).await;

    let err = gate
        .require_role(None, club.id, &[ClubRole::Member])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    let err = gate
        .require_role(Some(9999), club.id, &[ClubRole::Member])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));
}

#[tokio::test]
async fn gate_rejects_missing_club_non_member_and_inactive_member() {
    let db = setup_db().await;
    let gate = PermissionService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    add_member(&db, owner.id, club.id, ClubRole::Owner, 0, 0).await;

    // 俱乐部不存在
    let err = gate
        .require_role(Some(owner.id), 9999, &[ClubRole::Member])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // 非会员
    let outsider = create_user(&db, "outsider@example.com").await;
    let err = gate
        .require_role(Some(outsider.id), club.id, &[ClubRole::Member])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // 停用会员
    let suspended = create_user(&db, "suspended@example.com").await;
    add_member_with_status(
        &db,
        suspended.id,
        club.id,
        ClubRole::Member,
        0,
        0,
        MemberStatus::Inactive,
    )
    .await;
    let err = gate
        .require_role(Some(suspended.id), club.id, &[ClubRole::Member])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn gate_enforces_minimum_rank() {
    let db = setup_db().await;
    let gate = PermissionService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    add_member(&db, owner.id, club.id, ClubRole::Owner, 0, 0).await;

    let manager = create_user(&db, "manager@example.com").await;
    add_member(&db, manager.id, club.id, ClubRole::Manager, 0, 0).await;

    let player = create_user(&db, "player@example.com").await;
    add_member(&db, player.id, club.id, ClubRole::Member, 0, 0).await;

    let elevated = [ClubRole::Manager, ClubRole::Admin, ClubRole::Owner];

    // 普通会员达不到 manager 门槛
    let err = gate
        .require_role(Some(player.id), club.id, &elevated)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // manager 与更高角色通过
    assert!(gate.require_role(Some(manager.id), club.id, &elevated).await.is_ok());
    assert!(gate.require_role(Some(owner.id), club.id, &elevated).await.is_ok());
}

#[tokio::test]
async fn gate_uses_least_strict_allowed_role() {
    let db = setup_db().await;
    let gate = PermissionService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    add_member(&db, owner.id, club.id, ClubRole::Owner, 0, 0).await;

    let player = create_user(&db, "player@example.com").await;
    add_member(&db, player.id, club.id, ClubRole::Member, 0, 0).await;

    // 允许列表中最低的角色就是门槛: [owner, member] 等价于 member 及以上
    let ctx = gate
        .require_role(Some(player.id), club.id, &[ClubRole::Owner, ClubRole::Member])
        .await
        .unwrap();
    assert_eq!(ctx.membership.role, ClubRole::Member);
    assert_eq!(ctx.club.id, club.id);
    assert_eq!(ctx.user.id, player.id);
}

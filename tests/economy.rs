//! Economy operation integration tests: tournament buy-in, points award, store
//! redemption. Each test drives the real services against in-memory SQLite.

mod common;

use common::*;
use pokerclubs_backend::entities::*;
use pokerclubs_backend::error::AppError;
use pokerclubs_backend::models::AwardPointsRequest;
use pokerclubs_backend::services::{MemberService, StoreService, TournamentService};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

async fn member_row(db: &DatabaseConnection, id: i64) -> club_members::Model {
    club_members::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .expect("membership exists")
}

async fn transactions_of(
    db: &DatabaseConnection,
    user_id: i64,
    kind: TransactionType,
) -> Vec<transactions::Model> {
    transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(user_id))
        .filter(transactions::Column::TransactionType.eq(kind))
        .all(db)
        .await
        .unwrap()
}

// 场景A: 余额1000, buy_in=100, fee=10 -> 余额890, 流水金额 -110
#[tokio::test]
async fn buy_in_debits_balance_and_appends_ledger() {
    let db = setup_db().await;
    let service = TournamentService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    let membership = add_member(&db, player.id, club.id, ClubRole::Member, 1000, 0).await;
    let tournament = create_tournament(
        &db,
        club.id,
        owner.id,
        100,
        10,
        TournamentStatus::Registering,
    )
    .await;

    let result = service.buy_in(player.id, tournament.id).await.unwrap();
    assert_eq!(result.amount_charged, 110);
    assert_eq!(result.new_balance, 890);

    // 会员余额与流水一致
    let member = member_row(&db, membership.id).await;
    assert_eq!(member.balance, 890);

    let ledger = transactions_of(&db, player.id, TransactionType::TournamentBuyIn).await;
    assert_eq!(ledger.len(), 1);
    let tx = &ledger[0];
    assert_eq!(tx.amount, -110);
    assert_eq!(tx.balance_before, 1000);
    assert_eq!(tx.balance_after, 890);
    // 不变式: balance_after = balance_before + amount
    assert_eq!(tx.balance_after, tx.balance_before + tx.amount);
    assert_eq!(tx.balance_after, member.balance);
    assert!(tx.description.as_deref().unwrap().contains("Friday Night Deepstack"));
}

// 幂等性: 重复报名只扣一次费
#[tokio::test]
async fn buy_in_twice_fails_with_duplicate_registration() {
    let db = setup_db().await;
    let service = TournamentService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    let membership = add_member(&db, player.id, club.id, ClubRole::Member, 1000, 0).await;
    let tournament =
        create_tournament(&db, club.id, owner.id, 100, 10, TournamentStatus::Scheduled).await;

    service.buy_in(player.id, tournament.id).await.unwrap();

    let err = service.buy_in(player.id, tournament.id).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateRegistration));

    // 没有二次扣费, 也没有第二条流水
    let member = member_row(&db, membership.id).await;
    assert_eq!(member.balance, 890);
    let ledger = transactions_of(&db, player.id, TransactionType::TournamentBuyIn).await;
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn buy_in_with_insufficient_balance_leaves_no_partial_state() {
    let db = setup_db().await;
    let service = TournamentService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    let membership = add_member(&db, player.id, club.id, ClubRole::Member, 50, 0).await;
    let tournament = create_tournament(
        &db,
        club.id,
        owner.id,
        100,
        10,
        TournamentStatus::Registering,
    )
    .await;

    let err = service.buy_in(player.id, tournament.id).await.unwrap_err();
    assert!(matches!(err, AppError::InsufficientFunds));

    // 余额不变, 无报名记录, 无流水
    let member = member_row(&db, membership.id).await;
    assert_eq!(member.balance, 50);

    let registrations = tournament_registrations::Entity::find()
        .filter(tournament_registrations::Column::UserId.eq(player.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(registrations, 0);

    let ledger = transactions_of(&db, player.id, TransactionType::TournamentBuyIn).await;
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn buy_in_rejects_wrong_status_missing_tournament_and_non_member() {
    let db = setup_db().await;
    let service = TournamentService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    add_member(&db, player.id, club.id, ClubRole::Member, 1000, 0).await;

    // 已完赛的赛事不接受报名
    let completed =
        create_tournament(&db, club.id, owner.id, 100, 10, TournamentStatus::Completed).await;
    let err = service.buy_in(player.id, completed.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // 不存在的赛事
    let err = service.buy_in(player.id, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // 非会员
    let outsider = create_user(&db, "outsider@example.com").await;
    let open =
        create_tournament(&db, club.id, owner.id, 100, 10, TournamentStatus::Registering).await;
    let err = service.buy_in(outsider.id, open.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // 停用会员
    let suspended = create_user(&db, "suspended@example.com").await;
    add_member_with_status(
        &db,
        suspended.id,
        club.id,
        ClubRole::Member,
        1000,
        0,
        MemberStatus::Inactive,
    )
    .await;
    let err = service.buy_in(suspended.id, open.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

// 场景B: 发放50积分, 事由 "tournament prize"
#[tokio::test]
async fn award_points_credits_member_and_appends_ledger() {
    let db = setup_db().await;
    let service = MemberService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    let membership = add_member(&db, player.id, club.id, ClubRole::Member, 0, 10).await;

    let result = service
        .award_points(
            club.id,
            player.id,
            AwardPointsRequest {
                points: 50,
                reason: "tournament prize".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.previous_points, 10);
    assert_eq!(result.new_points, 60);
    assert_eq!(result.points_earned, 50);

    let member = member_row(&db, membership.id).await;
    assert_eq!(member.points, 60);

    let ledger = transactions_of(&db, player.id, TransactionType::PointsEarned).await;
    assert_eq!(ledger.len(), 1);
    let tx = &ledger[0];
    assert_eq!(tx.amount, 50);
    assert_eq!(tx.balance_before, 10);
    assert_eq!(tx.balance_after, 60);
    assert_eq!(tx.description.as_deref(), Some("tournament prize"));
    // 引用号是请求级别生成的, 必须非空
    assert!(!tx.reference_id.is_empty());
}

#[tokio::test]
async fn award_points_validates_amount_reason_and_target() {
    let db = setup_db().await;
    let service = MemberService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    add_member(&db, player.id, club.id, ClubRole::Member, 0, 0).await;

    let err = service
        .award_points(
            club.id,
            player.id,
            AwardPointsRequest {
                points: 0,
                reason: "prize".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service
        .award_points(
            club.id,
            player.id,
            AwardPointsRequest {
                points: 10,
                reason: "   ".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // 目标不是会员
    let outsider = create_user(&db, "outsider@example.com").await;
    let err = service
        .award_points(
            club.id,
            outsider.id,
            AwardPointsRequest {
                points: 10,
                reason: "prize".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

// 边界: 积分恰好等于价格成功且归零; 差一分失败
#[tokio::test]
async fn redeem_boundary_points_exactly_equal_and_one_short() {
    let db = setup_db().await;
    let service = StoreService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;

    let exact = create_user(&db, "exact@example.com").await;
    let exact_membership = add_member(&db, exact.id, club.id, ClubRole::Member, 0, 500).await;
    let item = create_store_item(&db, club.id, 500, 10, true).await;

    let result = service.redeem_item(exact.id, club.id, item.id).await.unwrap();
    assert_eq!(result.points_spent, 500);
    assert_eq!(result.new_points_balance, 0);
    assert_eq!(member_row(&db, exact_membership.id).await.points, 0);

    let short = create_user(&db, "short@example.com").await;
    let short_membership = add_member(&db, short.id, club.id, ClubRole::Member, 0, 499).await;

    let err = service
        .redeem_item(short.id, club.id, item.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientPoints));

    // 失败回滚: 积分和库存都不受损
    assert_eq!(member_row(&db, short_membership.id).await.points, 499);
    let item_row = store_items::Entity::find_by_id(item.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item_row.stock, 9);
}

#[tokio::test]
async fn redeem_creates_pending_redemption_with_derived_reference() {
    let db = setup_db().await;
    let service = StoreService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    add_member(&db, player.id, club.id, ClubRole::Member, 0, 800).await;
    let item = create_store_item(&db, club.id, 300, 5, true).await;

    let result = service.redeem_item(player.id, club.id, item.id).await.unwrap();

    let redemption = redemptions::Entity::find_by_id(result.redemption_id)
        .one(&db)
        .await
        .unwrap()
        .expect("redemption exists");
    assert_eq!(redemption.status, RedemptionStatus::Pending);
    assert_eq!(redemption.points_spent, 300);

    let ledger = transactions_of(&db, player.id, TransactionType::PointsRedeemed).await;
    assert_eq!(ledger.len(), 1);
    let tx = &ledger[0];
    assert_eq!(tx.amount, -300);
    assert_eq!(tx.balance_after, tx.balance_before + tx.amount);
    // 引用号由兑换记录ID派生
    assert_eq!(tx.reference_id, format!("RDM-{}", redemption.id));
}

// 场景C: 下架商品一律按不存在处理, 与库存/积分无关
#[tokio::test]
async fn redeem_inactive_item_fails_with_not_found() {
    let db = setup_db().await;
    let service = StoreService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    add_member(&db, player.id, club.id, ClubRole::Member, 0, 10_000).await;
    let item = create_store_item(&db, club.id, 100, 50, false).await;

    let err = service
        .redeem_item(player.id, club.id, item.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn redeem_zero_stock_fails_out_of_stock() {
    let db = setup_db().await;
    let service = StoreService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let player = create_user(&db, "player@example.com").await;
    let membership = add_member(&db, player.id, club.id, ClubRole::Member, 0, 10_000).await;
    let item = create_store_item(&db, club.id, 100, 0, true).await;

    let err = service
        .redeem_item(player.id, club.id, item.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::OutOfStock));
    assert_eq!(member_row(&db, membership.id).await.points, 10_000);
}

// 并发: 库存为1时 N 个并发兑换只有一个成功, 只扣一份积分
#[tokio::test]
async fn concurrent_redemptions_of_last_item_succeed_exactly_once() {
    let db = setup_db().await;
    let service = StoreService::new(db.clone());

    let owner = create_user(&db, "owner@example.com").await;
    let club = create_club(&db, owner.id).await;
    let item = create_store_item(&db, club.id, 250, 1, true).await;

    let mut memberships = Vec::new();
    let mut handles = Vec::new();
    for i in 0..4 {
        let user = create_user(&db, &format!("racer{}@example.com", i)).await;
        let membership = add_member(&db, user.id, club.id, ClubRole::Member, 0, 1000).await;
        memberships.push(membership);

        let svc = service.clone();
        let club_id = club.id;
        let item_id = item.id;
        let user_id = user.id;
        handles.push(tokio::spawn(async move {
            svc.redeem_item(user_id, club_id, item_id).await
        }));
    }

    let mut successes = 0;
    let mut out_of_stock = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::OutOfStock) => out_of_stock += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(out_of_stock, 3);

    let item_row = store_items::Entity::find_by_id(item.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item_row.stock, 0);

    // 总扣除积分恰好等于一份兑换的价格
    let mut total_deducted = 0;
    for membership in &memberships {
        let row = member_row(&db, membership.id).await;
        total_deducted += 1000 - row.points;
    }
    assert_eq!(total_deducted, 250);

    let ledger_count = transactions::Entity::find()
        .filter(transactions::Column::ClubId.eq(club.id))
        .filter(transactions::Column::TransactionType.eq(TransactionType::PointsRedeemed))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(ledger_count, 1);
}

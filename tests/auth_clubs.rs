//! Auth and club lifecycle integration tests.

mod common;

use common::*;
use pokerclubs_backend::entities::*;
use pokerclubs_backend::error::AppError;
use pokerclubs_backend::models::{CreateClubRequest, LoginRequest, RegisterRequest};
use pokerclubs_backend::services::{AuthService, ClubService, DEFAULT_STARTING_BALANCE};
use pokerclubs_backend::utils::JwtService;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

fn jwt() -> JwtService {
    JwtService::new("integration-test-secret", 3600, 86400)
}

#[tokio::test]
async fn register_login_refresh_round_trip() {
    let db = setup_db().await;
    let service = AuthService::new(db.clone(), jwt());

    let auth = service
        .register(RegisterRequest {
            email: "Player@Example.com".to_string(),
            username: "Daniel".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();

    // 邮箱已规范化
    assert_eq!(auth.user.email, "player@example.com");
    assert!(!auth.access_token.is_empty());

    // 重复注册同一邮箱
    let err = service
        .register(RegisterRequest {
            email: "player@example.com".to_string(),
            username: "Daniel".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // 登录
    let login = service
        .login(LoginRequest {
            email: "player@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let err = service
        .login(LoginRequest {
            email: "player@example.com".to_string(),
            password: "WrongPassword1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    // refresh token 换新令牌对
    let refreshed = service.refresh(&login.refresh_token).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);

    // access token 不能当 refresh token 用
    let err = service.refresh(&login.access_token).await.unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));
}

#[tokio::test]
async fn create_club_bootstraps_owner_membership() {
    let db = setup_db().await;
    let service = ClubService::new(db.clone());

    let user = create_user(&db, "founder@example.com").await;
    let club = service
        .create_club(
            user.id,
            CreateClubRequest {
                name: "Riverside Poker Club".to_string(),
                description: Some("Tuesday and Friday games".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(club.owner_id, user.id);

    let membership = club_members::Entity::find()
        .filter(club_members::Column::UserId.eq(user.id))
        .filter(club_members::Column::ClubId.eq(club.id))
        .one(&db)
        .await
        .unwrap()
        .expect("owner membership created");
    assert_eq!(membership.role, ClubRole::Owner);
    assert_eq!(membership.balance, DEFAULT_STARTING_BALANCE);
    assert_eq!(membership.status, MemberStatus::Active);
}

#[tokio::test]
async fn join_club_once_then_rejects_duplicate_join() {
    let db = setup_db().await;
    let service = ClubService::new(db.clone());

    let founder = create_user(&db, "founder@example.com").await;
    let club = service
        .create_club(
            founder.id,
            CreateClubRequest {
                name: "Riverside Poker Club".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let player = create_user(&db, "player@example.com").await;
    let joined = service.join_club(player.id, club.id).await.unwrap();
    assert_eq!(joined.role, ClubRole::Member);
    assert_eq!(joined.balance, DEFAULT_STARTING_BALANCE);

    let err = service.join_club(player.id, club.id).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // 用户俱乐部列表
    let clubs = service.list_user_clubs(player.id).await.unwrap();
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].club.id, club.id);

    // 不存在的俱乐部
    let err = service.join_club(player.id, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

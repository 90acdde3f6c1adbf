//! Shared fixtures for the integration suites.
//!
//! Tests run against in-memory SQLite through the real migrations. The pool is
//! capped at a single connection so every task shares one database; concurrent
//! operations serialize through it exactly like conflicting writers serialize
//! through the production store.

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use pokerclubs_backend::entities::*;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn create_user(db: &DatabaseConnection, email: &str) -> users::Model {
    users::ActiveModel {
        email: Set(email.to_string()),
        username: Set(email.split('@').next().unwrap_or("player").to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn create_club(db: &DatabaseConnection, owner_id: i64) -> clubs::Model {
    clubs::ActiveModel {
        name: Set("Test Club".to_string()),
        description: Set(None),
        owner_id: Set(owner_id),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert club")
}

pub async fn add_member(
    db: &DatabaseConnection,
    user_id: i64,
    club_id: i64,
    role: ClubRole,
    balance: i64,
    points: i64,
) -> club_members::Model {
    add_member_with_status(db, user_id, club_id, role, balance, points, MemberStatus::Active).await
}

pub async fn add_member_with_status(
    db: &DatabaseConnection,
    user_id: i64,
    club_id: i64,
    role: ClubRole,
    balance: i64,
    points: i64,
    status: MemberStatus,
) -> club_members::Model {
    club_members::ActiveModel {
        user_id: Set(user_id),
        club_id: Set(club_id),
        role: Set(role),
        balance: Set(balance),
        points: Set(points),
        status: Set(status),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert membership")
}

pub async fn create_tournament(
    db: &DatabaseConnection,
    club_id: i64,
    created_by: i64,
    buy_in: i64,
    fee: i64,
    status: TournamentStatus,
) -> tournaments::Model {
    tournaments::ActiveModel {
        club_id: Set(club_id),
        name: Set("Friday Night Deepstack".to_string()),
        buy_in: Set(buy_in),
        fee: Set(fee),
        status: Set(status),
        starts_at: Set(Utc::now() + Duration::hours(2)),
        created_by: Set(created_by),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert tournament")
}

pub async fn create_store_item(
    db: &DatabaseConnection,
    club_id: i64,
    points_required: i64,
    stock: i64,
    is_active: bool,
) -> store_items::Model {
    store_items::ActiveModel {
        club_id: Set(club_id),
        name: Set("Hoodie".to_string()),
        description: Set(None),
        points_required: Set(points_required),
        stock: Set(stock),
        is_active: Set(is_active),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert store item")
}

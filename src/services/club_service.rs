use crate::entities::{
    ClubRole, MemberStatus, club_entity as clubs, club_member_entity as club_members,
};
use crate::error::{AppError, AppResult};
use crate::models::{ClubMembershipResponse, ClubResponse, CreateClubRequest};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::collections::HashMap;

/// 新会员初始余额 (最小货币单位)
pub const DEFAULT_STARTING_BALANCE: i64 = 10000;

#[derive(Clone)]
pub struct ClubService {
    pool: DatabaseConnection,
}

impl ClubService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建俱乐部, 创建者自动成为 owner 会员
    pub async fn create_club(
        &self,
        user_id: i64,
        request: CreateClubRequest,
    ) -> AppResult<ClubResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() || name.len() > 64 {
            return Err(AppError::ValidationError(
                "Club name length must be between 1 and 64 characters".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let club = clubs::ActiveModel {
            name: Set(name),
            description: Set(request.description),
            owner_id: Set(user_id),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        club_members::ActiveModel {
            user_id: Set(user_id),
            club_id: Set(club.id),
            role: Set(ClubRole::Owner),
            balance: Set(DEFAULT_STARTING_BALANCE),
            points: Set(0),
            status: Set(MemberStatus::Active),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!("Club {} created by user {}", club.id, user_id);

        Ok(club.into())
    }

    /// 加入俱乐部, 默认角色 member
    pub async fn join_club(&self, user_id: i64, club_id: i64) -> AppResult<ClubMembershipResponse> {
        let club = clubs::Entity::find_by_id(club_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?;

        let existing = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(user_id))
            .filter(club_members::Column::ClubId.eq(club_id))
            .one(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Already a member of this club".to_string(),
            ));
        }

        let membership = club_members::ActiveModel {
            user_id: Set(user_id),
            club_id: Set(club_id),
            role: Set(ClubRole::Member),
            balance: Set(DEFAULT_STARTING_BALANCE),
            points: Set(0),
            status: Set(MemberStatus::Active),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ClubMembershipResponse {
            club: club.into(),
            role: membership.role,
            balance: membership.balance,
            points: membership.points,
            status: membership.status,
        })
    }

    /// 列出用户加入的所有俱乐部
    pub async fn list_user_clubs(&self, user_id: i64) -> AppResult<Vec<ClubMembershipResponse>> {
        let memberships = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?;

        if memberships.is_empty() {
            return Ok(vec![]);
        }

        let club_ids: Vec<i64> = memberships.iter().map(|m| m.club_id).collect();
        let club_map: HashMap<i64, clubs::Model> = clubs::Entity::find()
            .filter(clubs::Column::Id.is_in(club_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let items = memberships
            .into_iter()
            .filter_map(|m| {
                club_map.get(&m.club_id).map(|club| ClubMembershipResponse {
                    club: club.clone().into(),
                    role: m.role,
                    balance: m.balance,
                    points: m.points,
                    status: m.status,
                })
            })
            .collect();

        Ok(items)
    }
}

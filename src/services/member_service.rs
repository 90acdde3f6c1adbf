use crate::entities::{
    ClubRole, MemberStatus, TransactionType, club_member_entity as club_members,
    transaction_entity as transactions, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AwardPointsRequest, AwardPointsResponse, MemberResponse, PaginatedResponse, PaginationParams,
};
use crate::utils::generate_reference_token;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct MemberService {
    pool: DatabaseConnection,
}

impl MemberService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 给会员发放积分。
    ///
    /// 单事务完成: 重新读取目标会员 -> 原子加积分 -> 追加流水。
    /// 调用方角色校验 (manager 及以上) 由权限层完成。
    pub async fn award_points(
        &self,
        club_id: i64,
        target_user_id: i64,
        request: AwardPointsRequest,
    ) -> AppResult<AwardPointsResponse> {
        if request.points <= 0 {
            return Err(AppError::ValidationError(
                "Points must be positive".to_string(),
            ));
        }
        let reason = request.reason.trim().to_string();
        if reason.is_empty() {
            return Err(AppError::ValidationError(
                "Reason must not be empty".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let membership = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(target_user_id))
            .filter(club_members::Column::ClubId.eq(club_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Target user is not a member of this club".to_string())
            })?;

        if membership.status != MemberStatus::Active {
            return Err(AppError::Forbidden(
                "Target membership is not active".to_string(),
            ));
        }

        // 原子加积分
        club_members::Entity::update_many()
            .col_expr(
                club_members::Column::Points,
                Expr::col(club_members::Column::Points).add(request.points),
            )
            .col_expr(club_members::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(club_members::Column::Id.eq(membership.id))
            .exec(&txn)
            .await?;

        // 读取最新积分, 由此推导流水的 before/after
        let updated = club_members::Entity::find_by_id(membership.id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Membership disappeared during update".to_string())
            })?;

        let new_points = updated.points;
        let previous_points = new_points - request.points;

        transactions::ActiveModel {
            user_id: Set(target_user_id),
            club_id: Set(club_id),
            transaction_type: Set(TransactionType::PointsEarned),
            amount: Set(request.points),
            balance_before: Set(previous_points),
            balance_after: Set(new_points),
            description: Set(Some(reason)),
            reference_id: Set(generate_reference_token("PTS")),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(AwardPointsResponse {
            previous_points,
            new_points,
            points_earned: request.points,
        })
    }

    /// 分页列出俱乐部会员
    pub async fn list_members(
        &self,
        club_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<MemberResponse>> {
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query =
            club_members::Entity::find().filter(club_members::Column::ClubId.eq(club_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let memberships = base_query
            .order_by_asc(club_members::Column::Id)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let user_ids: Vec<i64> = memberships.iter().map(|m| m.user_id).collect();
        let user_map: HashMap<i64, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let items: Vec<MemberResponse> = memberships
            .into_iter()
            .filter_map(|m| {
                user_map
                    .get(&m.user_id)
                    .map(|u| MemberResponse::from_parts(m, u))
            })
            .collect();

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }

    /// 调整会员角色。owner 角色不可授予也不可剥夺。
    pub async fn change_role(
        &self,
        club_id: i64,
        target_user_id: i64,
        new_role: ClubRole,
    ) -> AppResult<MemberResponse> {
        if new_role == ClubRole::Owner {
            return Err(AppError::ValidationError(
                "Owner role cannot be assigned".to_string(),
            ));
        }

        let membership = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(target_user_id))
            .filter(club_members::Column::ClubId.eq(club_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Target user is not a member of this club".to_string())
            })?;

        if membership.role == ClubRole::Owner {
            return Err(AppError::Forbidden(
                "The club owner's role cannot be changed".to_string(),
            ));
        }

        let user = users::Entity::find_by_id(target_user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut am = membership.into_active_model();
        am.role = Set(new_role);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(MemberResponse::from_parts(updated, &user))
    }

    /// 停用会员 (软删除: 只改 status, 记录保留)
    pub async fn deactivate_member(&self, club_id: i64, target_user_id: i64) -> AppResult<()> {
        let membership = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(target_user_id))
            .filter(club_members::Column::ClubId.eq(club_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Target user is not a member of this club".to_string())
            })?;

        if membership.role == ClubRole::Owner {
            return Err(AppError::Forbidden(
                "The club owner cannot be deactivated".to_string(),
            ));
        }

        let mut am = membership.into_active_model();
        am.status = Set(MemberStatus::Inactive);
        am.updated_at = Set(Some(Utc::now()));
        am.update(&self.pool).await?;

        Ok(())
    }
}

use crate::entities::{
    ClubRole, MemberStatus, club_entity as clubs, club_member_entity as club_members,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// 权限校验通过后的请求上下文, 供下游操作复用
#[derive(Debug)]
pub struct ClubContext {
    pub user: users::Model,
    pub membership: club_members::Model,
    pub club: clubs::Model,
}

#[derive(Clone)]
pub struct PermissionService {
    pool: DatabaseConnection,
}

impl PermissionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 解析调用者身份并检查其在俱乐部内的角色等级。
    ///
    /// `allowed` 中等级最低的角色即为门槛: 满足最宽松的允许角色即可通过。
    pub async fn require_role(
        &self,
        user_id: Option<i64>,
        club_id: i64,
        allowed: &[ClubRole],
    ) -> AppResult<ClubContext> {
        let user_id =
            user_id.ok_or_else(|| AppError::AuthError("Missing access token".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid session".to_string()))?;

        let club = clubs::Entity::find_by_id(club_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?;

        let membership = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(user_id))
            .filter(club_members::Column::ClubId.eq(club_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this club".to_string()))?;

        if membership.status != MemberStatus::Active {
            return Err(AppError::Forbidden("Membership is not active".to_string()));
        }

        let min_role = allowed
            .iter()
            .min_by_key(|r| r.rank())
            .ok_or_else(|| AppError::InternalError("No allowed roles given".to_string()))?;

        if membership.role.rank() < min_role.rank() {
            return Err(AppError::Forbidden(format!(
                "Requires {} role or above",
                min_role
            )));
        }

        Ok(ClubContext {
            user,
            membership,
            club,
        })
    }
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 俱乐部角色, 按权限从低到高排序。
/// 权限判断只看 rank(), 不做能力继承。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum ClubRole {
    #[sea_orm(string_value = "guest")]
    Guest,
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "vip")]
    Vip,
    #[sea_orm(string_value = "dealer")]
    Dealer,
    #[sea_orm(string_value = "cashier")]
    Cashier,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "owner")]
    Owner,
}

impl ClubRole {
    /// 角色权限等级, 唯一的比较入口
    pub fn rank(&self) -> u8 {
        match self {
            ClubRole::Guest => 0,
            ClubRole::Member => 1,
            ClubRole::Vip => 2,
            ClubRole::Dealer => 3,
            ClubRole::Cashier => 4,
            ClubRole::Manager => 5,
            ClubRole::Admin => 6,
            ClubRole::Owner => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Guest => "guest",
            ClubRole::Member => "member",
            ClubRole::Vip => "vip",
            ClubRole::Dealer => "dealer",
            ClubRole::Cashier => "cashier",
            ClubRole::Manager => "manager",
            ClubRole::Admin => "admin",
            ClubRole::Owner => "owner",
        }
    }
}

impl std::fmt::Display for ClubRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "club_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub club_id: i64,
    pub role: ClubRole,
    pub balance: i64,
    pub points: i64,
    pub status: MemberStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_rank_total_order() {
        let ordered = [
            ClubRole::Guest,
            ClubRole::Member,
            ClubRole::Vip,
            ClubRole::Dealer,
            ClubRole::Cashier,
            ClubRole::Manager,
            ClubRole::Admin,
            ClubRole::Owner,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_manager_and_above_outrank_manager() {
        assert!(ClubRole::Manager.rank() >= ClubRole::Manager.rank());
        assert!(ClubRole::Admin.rank() >= ClubRole::Manager.rank());
        assert!(ClubRole::Owner.rank() >= ClubRole::Manager.rank());
        assert!(ClubRole::Cashier.rank() < ClubRole::Manager.rank());
    }
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 流水类型。借记 (debit) 流水 amount 为负, 贷记 (credit) 为正。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// 赛事报名费 (buy-in + fee, 借记余额)
    #[sea_orm(string_value = "tournament_buy_in")]
    TournamentBuyIn,
    /// 积分发放 (贷记积分)
    #[sea_orm(string_value = "points_earned")]
    PointsEarned,
    /// 积分商城兑换 (借记积分)
    #[sea_orm(string_value = "points_redeemed")]
    PointsRedeemed,
    /// 管理员手工调整
    #[sea_orm(string_value = "admin_adjustment")]
    AdminAdjustment,
}

/// 账本流水, 只插入不修改。
/// 不变式: balance_after = balance_before + amount
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub club_id: i64,
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub balance_before: i64,
    pub balance_after: i64,
    pub description: Option<String>,
    pub reference_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

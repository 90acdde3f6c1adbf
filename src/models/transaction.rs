use crate::entities::{TransactionType, transaction_entity as transactions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
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

impl From<transactions::Model> for TransactionResponse {
    fn from(tx: transactions::Model) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            club_id: tx.club_id,
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            balance_before: tx.balance_before,
            balance_after: tx.balance_after,
            description: tx.description,
            reference_id: tx.reference_id,
            created_at: tx.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// manager 及以上角色可查询指定会员的流水
    pub user_id: Option<i64>,
}

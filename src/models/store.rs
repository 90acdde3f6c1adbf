use crate::entities::{RedemptionStatus, redemption_entity as redemptions, store_item_entity as store_items};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreItemResponse {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub points_required: i64,
    pub stock: i64,
    pub is_active: bool,
}

impl From<store_items::Model> for StoreItemResponse {
    fn from(item: store_items::Model) -> Self {
        Self {
            id: item.id,
            club_id: item.club_id,
            name: item.name,
            description: item.description,
            points_required: item.points_required,
            stock: item.stock,
            is_active: item.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateStoreItemRequest {
    #[schema(example = "Hoodie")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 500)]
    pub points_required: i64,
    #[schema(example = 10)]
    pub stock: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateStoreItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub points_required: Option<i64>,
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
}

/// 商城列表: 在售商品 + 当前会员积分
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreListResponse {
    pub items: Vec<StoreItemResponse>,
    pub user_points: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedeemResponse {
    pub redemption_id: i64,
    pub item_id: i64,
    pub points_spent: i64,
    pub new_points_balance: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedemptionResponse {
    pub id: i64,
    pub user_id: i64,
    pub club_id: i64,
    pub item_id: i64,
    pub points_spent: i64,
    pub status: RedemptionStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<redemptions::Model> for RedemptionResponse {
    fn from(r: redemptions::Model) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            club_id: r.club_id,
            item_id: r.item_id,
            points_spent: r.points_spent,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

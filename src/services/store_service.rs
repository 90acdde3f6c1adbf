use crate::entities::{
    MemberStatus, RedemptionStatus, TransactionType, club_member_entity as club_members,
    redemption_entity as redemptions, store_item_entity as store_items,
    transaction_entity as transactions,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateStoreItemRequest, RedeemResponse, StoreItemResponse, UpdateStoreItemRequest,
};
use crate::utils::redemption_reference;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait, UpdateResult,
};

#[derive(Clone)]
pub struct StoreService {
    pool: DatabaseConnection,
}

impl StoreService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 列出俱乐部商城的在售商品
    pub async fn list_items(&self, club_id: i64) -> AppResult<Vec<StoreItemResponse>> {
        let items = store_items::Entity::find()
            .filter(store_items::Column::ClubId.eq(club_id))
            .filter(store_items::Column::IsActive.eq(true))
            .order_by_asc(store_items::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn create_item(
        &self,
        club_id: i64,
        request: CreateStoreItemRequest,
    ) -> AppResult<StoreItemResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() || name.len() > 128 {
            return Err(AppError::ValidationError(
                "Item name length must be between 1 and 128 characters".to_string(),
            ));
        }
        if request.points_required < 0 {
            return Err(AppError::ValidationError(
                "Points required must be non-negative".to_string(),
            ));
        }
        if request.stock < 0 {
            return Err(AppError::ValidationError(
                "Stock must be non-negative".to_string(),
            ));
        }

        let item = store_items::ActiveModel {
            club_id: Set(club_id),
            name: Set(name),
            description: Set(request.description),
            points_required: Set(request.points_required),
            stock: Set(request.stock),
            is_active: Set(true),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(item.into())
    }

    pub async fn update_item(
        &self,
        club_id: i64,
        item_id: i64,
        request: UpdateStoreItemRequest,
    ) -> AppResult<StoreItemResponse> {
        let item = store_items::Entity::find_by_id(item_id)
            .one(&self.pool)
            .await?
            .filter(|i| i.club_id == club_id)
            .ok_or_else(|| AppError::NotFound("Store item not found".to_string()))?;

        if let Some(points_required) = request.points_required
            && points_required < 0
        {
            return Err(AppError::ValidationError(
                "Points required must be non-negative".to_string(),
            ));
        }
        if let Some(stock) = request.stock
            && stock < 0
        {
            return Err(AppError::ValidationError(
                "Stock must be non-negative".to_string(),
            ));
        }

        let mut am = item.into_active_model();
        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() || name.len() > 128 {
                return Err(AppError::ValidationError(
                    "Item name length must be between 1 and 128 characters".to_string(),
                ));
            }
            am.name = Set(name);
        }
        if let Some(description) = request.description {
            am.description = Set(Some(description));
        }
        if let Some(points_required) = request.points_required {
            am.points_required = Set(points_required);
        }
        if let Some(stock) = request.stock {
            am.stock = Set(stock);
        }
        if let Some(is_active) = request.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// 积分兑换商品。
    ///
    /// 单事务完成:
    /// 1. 读取商品, 未找到或已下架一律按不存在处理
    /// 2. 重新读取会员记录
    /// 3. 原子扣库存 (where stock > 0), 失败即售罄
    /// 4. 原子扣积分 (where points >= points_required), 失败即积分不足
    /// 5. 写兑换记录 (pending), 流水引用号由兑换记录ID派生
    ///
    /// 任一步失败整个事务回滚, 库存与积分都不受损。
    pub async fn redeem_item(
        &self,
        user_id: i64,
        club_id: i64,
        item_id: i64,
    ) -> AppResult<RedeemResponse> {
        let txn = self.pool.begin().await?;

        let item = store_items::Entity::find_by_id(item_id)
            .one(&txn)
            .await?
            .filter(|i| i.club_id == club_id && i.is_active)
            .ok_or_else(|| AppError::NotFound("Store item not found".to_string()))?;

        let membership = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(user_id))
            .filter(club_members::Column::ClubId.eq(club_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this club".to_string()))?;

        if membership.status != MemberStatus::Active {
            return Err(AppError::Forbidden("Membership is not active".to_string()));
        }

        // 原子扣库存
        let stock_update: UpdateResult = store_items::Entity::update_many()
            .col_expr(
                store_items::Column::Stock,
                Expr::col(store_items::Column::Stock).sub(1),
            )
            .col_expr(store_items::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(store_items::Column::Id.eq(item.id))
            .filter(store_items::Column::Stock.gt(0))
            .filter(store_items::Column::IsActive.eq(true))
            .exec(&txn)
            .await?;

        if stock_update.rows_affected == 0 {
            return Err(AppError::OutOfStock);
        }

        // 原子扣积分
        let points_update: UpdateResult = club_members::Entity::update_many()
            .col_expr(
                club_members::Column::Points,
                Expr::col(club_members::Column::Points).sub(item.points_required),
            )
            .col_expr(club_members::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(club_members::Column::Id.eq(membership.id))
            .filter(club_members::Column::Points.gte(item.points_required))
            .exec(&txn)
            .await?;

        if points_update.rows_affected == 0 {
            return Err(AppError::InsufficientPoints);
        }

        let updated_member = club_members::Entity::find_by_id(membership.id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Membership disappeared during update".to_string())
            })?;
        let new_points = updated_member.points;

        let redemption = redemptions::ActiveModel {
            user_id: Set(user_id),
            club_id: Set(club_id),
            item_id: Set(item.id),
            points_spent: Set(item.points_required),
            status: Set(RedemptionStatus::Pending),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        transactions::ActiveModel {
            user_id: Set(user_id),
            club_id: Set(club_id),
            transaction_type: Set(TransactionType::PointsRedeemed),
            amount: Set(-item.points_required),
            balance_before: Set(new_points + item.points_required),
            balance_after: Set(new_points),
            description: Set(Some(format!("Store redemption: {}", item.name))),
            reference_id: Set(redemption_reference(redemption.id)),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "User {} redeemed item {} for {} points",
            user_id,
            item.id,
            item.points_required
        );

        Ok(RedeemResponse {
            redemption_id: redemption.id,
            item_id: item.id,
            points_spent: item.points_required,
            new_points_balance: new_points,
        })
    }
}

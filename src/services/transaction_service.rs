use crate::entities::transaction_entity as transactions;
use crate::error::AppResult;
use crate::models::{PaginatedResponse, PaginationParams, TransactionResponse};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

#[derive(Clone)]
pub struct TransactionService {
    pool: DatabaseConnection,
}

impl TransactionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 分页查询某会员在俱乐部内的账本流水 (倒序)
    pub async fn list_transactions(
        &self,
        club_id: i64,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<TransactionResponse>> {
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = transactions::Entity::find()
            .filter(transactions::Column::ClubId.eq(club_id))
            .filter(transactions::Column::UserId.eq(user_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let records = base_query
            .order_by(transactions::Column::CreatedAt, Order::Desc)
            .order_by(transactions::Column::Id, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<TransactionResponse> = records.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }
}

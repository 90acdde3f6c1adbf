use crate::entities::{
    MemberStatus, TournamentStatus, TransactionType, club_member_entity as club_members,
    tournament_entity as tournaments, tournament_registration_entity as registrations,
    transaction_entity as transactions,
};
use crate::error::{AppError, AppResult};
use crate::models::{BuyInResponse, CreateTournamentRequest, TournamentResponse};
use crate::utils::generate_reference_token;
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, UpdateResult,
};

/// 开赛前多少分钟自动打开报名
const REGISTRATION_OPENS_BEFORE_MINUTES: i64 = 60;

#[derive(Clone)]
pub struct TournamentService {
    pool: DatabaseConnection,
}

impl TournamentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_tournament(
        &self,
        club_id: i64,
        created_by: i64,
        request: CreateTournamentRequest,
    ) -> AppResult<TournamentResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() || name.len() > 128 {
            return Err(AppError::ValidationError(
                "Tournament name length must be between 1 and 128 characters".to_string(),
            ));
        }
        if request.buy_in < 0 || request.fee < 0 {
            return Err(AppError::ValidationError(
                "Buy-in and fee must be non-negative".to_string(),
            ));
        }

        let tournament = tournaments::ActiveModel {
            club_id: Set(club_id),
            name: Set(name),
            buy_in: Set(request.buy_in),
            fee: Set(request.fee),
            status: Set(TournamentStatus::Scheduled),
            starts_at: Set(request.starts_at),
            created_by: Set(created_by),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(tournament.into())
    }

    pub async fn list_tournaments(&self, club_id: i64) -> AppResult<Vec<TournamentResponse>> {
        let list = tournaments::Entity::find()
            .filter(tournaments::Column::ClubId.eq(club_id))
            .order_by_asc(tournaments::Column::StartsAt)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 赛事报名 (buy-in)。
    ///
    /// 整个操作在一个事务内完成:
    /// 1. 读取赛事并校验状态 (scheduled / registering 才接受报名)
    /// 2. 重新读取调用者在该俱乐部的会员记录
    /// 3. 重复报名检查
    /// 4. 原子扣余额 (where balance >= buy_in + fee), 扣减失败即余额不足
    /// 5. 写报名记录与账本流水
    ///
    /// 任一步失败则整个事务回滚, 不产生半完成状态。
    pub async fn buy_in(&self, user_id: i64, tournament_id: i64) -> AppResult<BuyInResponse> {
        let txn = self.pool.begin().await?;

        let tournament = tournaments::Entity::find_by_id(tournament_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        if !tournament.status.accepts_entries() {
            return Err(AppError::InvalidState(format!(
                "Tournament is not accepting entries (status: {:?})",
                tournament.status
            )));
        }

        let membership = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(user_id))
            .filter(club_members::Column::ClubId.eq(tournament.club_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this club".to_string()))?;

        if membership.status != MemberStatus::Active {
            return Err(AppError::Forbidden("Membership is not active".to_string()));
        }

        let existing = registrations::Entity::find()
            .filter(registrations::Column::TournamentId.eq(tournament_id))
            .filter(registrations::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(AppError::DuplicateRegistration);
        }

        let total = tournament.buy_in + tournament.fee;

        // 原子扣余额: 条件更新代替先读后写, 并发下不会透支
        let debit: UpdateResult = club_members::Entity::update_many()
            .col_expr(
                club_members::Column::Balance,
                Expr::col(club_members::Column::Balance).sub(total),
            )
            .col_expr(club_members::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(club_members::Column::Id.eq(membership.id))
            .filter(club_members::Column::Balance.gte(total))
            .exec(&txn)
            .await?;

        if debit.rows_affected == 0 {
            return Err(AppError::InsufficientFunds);
        }

        let updated = club_members::Entity::find_by_id(membership.id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Membership disappeared during update".to_string())
            })?;
        let new_balance = updated.balance;

        let registration = registrations::ActiveModel {
            tournament_id: Set(tournament_id),
            user_id: Set(user_id),
            club_id: Set(tournament.club_id),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        transactions::ActiveModel {
            user_id: Set(user_id),
            club_id: Set(tournament.club_id),
            transaction_type: Set(TransactionType::TournamentBuyIn),
            amount: Set(-total),
            balance_before: Set(new_balance + total),
            balance_after: Set(new_balance),
            description: Set(Some(format!("Tournament buy-in: {}", tournament.name))),
            reference_id: Set(generate_reference_token("TBI")),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "User {} registered for tournament {} (charged {})",
            user_id,
            tournament_id,
            total
        );

        Ok(BuyInResponse {
            registration_id: registration.id,
            tournament_id,
            amount_charged: total,
            new_balance,
        })
    }

    /// 状态推进, 由后台任务周期调用:
    /// - scheduled 且临近开赛的赛事打开报名
    /// - registering 且已到开赛时间的赛事进入进行中
    pub async fn advance_statuses(&self) -> AppResult<u64> {
        let now = Utc::now();

        let opened = tournaments::Entity::update_many()
            .col_expr(
                tournaments::Column::Status,
                Expr::value(TournamentStatus::Registering),
            )
            .col_expr(tournaments::Column::UpdatedAt, Expr::value(now))
            .filter(tournaments::Column::Status.eq(TournamentStatus::Scheduled))
            .filter(
                tournaments::Column::StartsAt
                    .lte(now + Duration::minutes(REGISTRATION_OPENS_BEFORE_MINUTES)),
            )
            .exec(&self.pool)
            .await?;

        let started = tournaments::Entity::update_many()
            .col_expr(
                tournaments::Column::Status,
                Expr::value(TournamentStatus::InProgress),
            )
            .col_expr(tournaments::Column::UpdatedAt, Expr::value(now))
            .filter(tournaments::Column::Status.eq(TournamentStatus::Registering))
            .filter(tournaments::Column::StartsAt.lte(now))
            .exec(&self.pool)
            .await?;

        Ok(opened.rows_affected + started.rows_affected)
    }
}

use crate::entities::{TournamentStatus, tournament_entity as tournaments};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTournamentRequest {
    #[schema(example = "Friday Night Deepstack")]
    pub name: String,
    /// 报名费 (最小货币单位)
    #[schema(example = 100)]
    pub buy_in: i64,
    /// 行政费用
    #[schema(example = 10)]
    pub fee: i64,
    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentResponse {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    pub buy_in: i64,
    pub fee: i64,
    pub status: TournamentStatus,
    pub starts_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<tournaments::Model> for TournamentResponse {
    fn from(t: tournaments::Model) -> Self {
        Self {
            id: t.id,
            club_id: t.club_id,
            name: t.name,
            buy_in: t.buy_in,
            fee: t.fee,
            status: t.status,
            starts_at: t.starts_at,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuyInResponse {
    pub registration_id: i64,
    pub tournament_id: i64,
    /// 本次扣除的总额 (buy_in + fee)
    pub amount_charged: i64,
    pub new_balance: i64,
}

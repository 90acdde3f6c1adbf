use crate::entities::{ClubRole, MemberStatus, club_entity as clubs};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClubRequest {
    #[schema(example = "Riverside Poker Club")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClubResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<clubs::Model> for ClubResponse {
    fn from(club: clubs::Model) -> Self {
        Self {
            id: club.id,
            name: club.name,
            description: club.description,
            owner_id: club.owner_id,
            created_at: club.created_at,
        }
    }
}

/// 用户视角的俱乐部条目: 俱乐部信息 + 本人会员状态
#[derive(Debug, Serialize, ToSchema)]
pub struct ClubMembershipResponse {
    pub club: ClubResponse,
    pub role: ClubRole,
    pub balance: i64,
    pub points: i64,
    pub status: MemberStatus,
}

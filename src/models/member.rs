use crate::entities::{ClubRole, MemberStatus, club_member_entity as club_members, user_entity as users};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub user_id: i64,
    pub club_id: i64,
    pub username: String,
    pub email: String,
    pub role: ClubRole,
    pub balance: i64,
    pub points: i64,
    pub status: MemberStatus,
    pub joined_at: Option<DateTime<Utc>>,
}

impl MemberResponse {
    pub fn from_parts(membership: club_members::Model, user: &users::Model) -> Self {
        Self {
            user_id: membership.user_id,
            club_id: membership.club_id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: membership.role,
            balance: membership.balance,
            points: membership.points,
            status: membership.status,
            joined_at: membership.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardPointsRequest {
    #[schema(example = 50)]
    pub points: i64,
    #[schema(example = "tournament prize")]
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardPointsResponse {
    pub previous_points: i64,
    pub new_points: i64,
    pub points_earned: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    pub role: ClubRole,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

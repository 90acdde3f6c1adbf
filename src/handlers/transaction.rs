use crate::entities::ClubRole;
use crate::error::AppError;
use crate::models::*;
use crate::services::{PermissionService, TransactionService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/clubs/{club_id}/transactions",
    tag = "transaction",
    params(
        ("club_id" = i64, Path, description = "俱乐部ID"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)"),
        ("user_id" = Option<i64>, Query, description = "查询指定会员的流水 (manager 及以上)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取流水成功", body = PaginatedResponse<TransactionResponse>),
        (status = 403, description = "非会员或无权查看他人流水")
    )
)]
/// 查询账本流水。默认查询本人, manager 及以上可以通过 user_id 查询任意会员
pub async fn get_transactions(
    permission_service: web::Data<PermissionService>,
    transaction_service: web::Data<TransactionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<TransactionQuery>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();
    let caller = get_user_id_from_request(&req);

    let ctx = match permission_service
        .require_role(caller, club_id, &[ClubRole::Member])
        .await
    {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    let target_user_id = match query.user_id {
        Some(user_id) if user_id != ctx.user.id => {
            if ctx.membership.role.rank() < ClubRole::Manager.rank() {
                let e = AppError::Forbidden(
                    "Requires manager role or above to view other members' transactions"
                        .to_string(),
                );
                return Ok(e.error_response());
            }
            user_id
        }
        _ => ctx.user.id,
    };

    let params = PaginationParams::new(query.page, query.per_page);
    match transaction_service
        .list_transactions(club_id, target_user_id, &params)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn transaction_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/clubs/{club_id}/transactions",
        web::get().to(get_transactions),
    );
}

use crate::entities::ClubRole;
use crate::models::*;
use crate::services::{PermissionService, TournamentService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/clubs/{club_id}/tournaments",
    tag = "tournament",
    params(
        ("club_id" = i64, Path, description = "俱乐部ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取赛事列表成功", body = [TournamentResponse]),
        (status = 403, description = "非俱乐部会员")
    )
)]
pub async fn list_tournaments(
    permission_service: web::Data<PermissionService>,
    tournament_service: web::Data<TournamentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();
    let caller = get_user_id_from_request(&req);

    if let Err(e) = permission_service
        .require_role(caller, club_id, &[ClubRole::Member])
        .await
    {
        return Ok(e.error_response());
    }

    match tournament_service.list_tournaments(club_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{club_id}/tournaments",
    tag = "tournament",
    request_body = CreateTournamentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建赛事成功", body = TournamentResponse),
        (status = 400, description = "参数无效"),
        (status = 403, description = "需要 manager 及以上角色")
    )
)]
pub async fn create_tournament(
    permission_service: web::Data<PermissionService>,
    tournament_service: web::Data<TournamentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<CreateTournamentRequest>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();
    let caller = get_user_id_from_request(&req);

    let ctx = match permission_service
        .require_role(
            caller,
            club_id,
            &[ClubRole::Manager, ClubRole::Admin, ClubRole::Owner],
        )
        .await
    {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match tournament_service
        .create_tournament(club_id, ctx.user.id, request.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn tournament_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/clubs/{club_id}/tournaments",
        web::get().to(list_tournaments),
    )
    .route(
        "/clubs/{club_id}/tournaments",
        web::post().to(create_tournament),
    );
}

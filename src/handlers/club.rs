use crate::models::*;
use crate::services::ClubService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// 从请求扩展中获取用户ID (中间件在鉴权后注入)
fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/clubs",
    tag = "club",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户的俱乐部列表成功", body = [ClubMembershipResponse]),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_clubs(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    match club_service.list_user_clubs(user_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs",
    tag = "club",
    request_body = CreateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建俱乐部成功", body = ClubResponse),
        (status = 400, description = "参数无效"),
        (status = 401, description = "未授权")
    )
)]
/// 创建俱乐部, 创建者自动成为 owner
pub async fn create_club(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
    request: web::Json<CreateClubRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    match club_service.create_club(user_id, request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{club_id}/join",
    tag = "club",
    params(
        ("club_id" = i64, Path, description = "俱乐部ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "加入俱乐部成功", body = ClubMembershipResponse),
        (status = 400, description = "已经是会员"),
        (status = 404, description = "俱乐部不存在")
    )
)]
pub async fn join_club(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    let club_id = path.into_inner();
    match club_service.join_club(user_id, club_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

// 俱乐部下的子资源 (members/store/...) 在各自模块注册完整路径,
// 这里不使用 scope 以避免前缀吞掉子资源路由
pub fn club_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/clubs", web::get().to(list_clubs))
        .route("/clubs", web::post().to(create_club))
        .route("/clubs/{club_id}/join", web::post().to(join_club));
}

use crate::entities::ClubRole;
use crate::models::*;
use crate::services::{MemberService, PermissionService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/clubs/{club_id}/members",
    tag = "member",
    params(
        ("club_id" = i64, Path, description = "俱乐部ID"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取会员列表成功", body = PaginatedResponse<MemberResponse>),
        (status = 403, description = "需要 manager 及以上角色")
    )
)]
pub async fn list_members(
    permission_service: web::Data<PermissionService>,
    member_service: web::Data<MemberService>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<MemberQuery>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();
    let caller = get_user_id_from_request(&req);

    if let Err(e) = permission_service
        .require_role(
            caller,
            club_id,
            &[ClubRole::Manager, ClubRole::Admin, ClubRole::Owner],
        )
        .await
    {
        return Ok(e.error_response());
    }

    let params = PaginationParams::new(query.page, query.per_page);
    match member_service.list_members(club_id, &params).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{club_id}/members/{user_id}/points/earn",
    tag = "member",
    request_body = AwardPointsRequest,
    params(
        ("club_id" = i64, Path, description = "俱乐部ID"),
        ("user_id" = i64, Path, description = "目标用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "积分发放成功", body = AwardPointsResponse),
        (status = 400, description = "积分数或事由无效"),
        (status = 403, description = "需要 manager 及以上角色"),
        (status = 404, description = "俱乐部不存在")
    )
)]
/// 给会员发放积分 (manager 及以上)
pub async fn award_points(
    permission_service: web::Data<PermissionService>,
    member_service: web::Data<MemberService>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    request: web::Json<AwardPointsRequest>,
) -> Result<HttpResponse> {
    let (club_id, target_user_id) = path.into_inner();
    let caller = get_user_id_from_request(&req);

    if let Err(e) = permission_service
        .require_role(
            caller,
            club_id,
            &[ClubRole::Manager, ClubRole::Admin, ClubRole::Owner],
        )
        .await
    {
        return Ok(e.error_response());
    }

    match member_service
        .award_points(club_id, target_user_id, request.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/clubs/{club_id}/members/{user_id}/role",
    tag = "member",
    request_body = ChangeRoleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "角色调整成功", body = MemberResponse),
        (status = 403, description = "需要 admin 及以上角色")
    )
)]
pub async fn change_role(
    permission_service: web::Data<PermissionService>,
    member_service: web::Data<MemberService>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    request: web::Json<ChangeRoleRequest>,
) -> Result<HttpResponse> {
    let (club_id, target_user_id) = path.into_inner();
    let caller = get_user_id_from_request(&req);

    if let Err(e) = permission_service
        .require_role(caller, club_id, &[ClubRole::Admin, ClubRole::Owner])
        .await
    {
        return Ok(e.error_response());
    }

    match member_service
        .change_role(club_id, target_user_id, request.role)
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/clubs/{club_id}/members/{user_id}",
    tag = "member",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "会员已停用"),
        (status = 403, description = "需要 admin 及以上角色")
    )
)]
/// 停用会员 (软删除)
pub async fn deactivate_member(
    permission_service: web::Data<PermissionService>,
    member_service: web::Data<MemberService>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (club_id, target_user_id) = path.into_inner();
    let caller = get_user_id_from_request(&req);

    if let Err(e) = permission_service
        .require_role(caller, club_id, &[ClubRole::Admin, ClubRole::Owner])
        .await
    {
        return Ok(e.error_response());
    }

    match member_service
        .deactivate_member(club_id, target_user_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "message": "Member deactivated" }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn member_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/clubs/{club_id}/members", web::get().to(list_members))
        .route(
            "/clubs/{club_id}/members/{user_id}/points/earn",
            web::post().to(award_points),
        )
        .route(
            "/clubs/{club_id}/members/{user_id}/role",
            web::put().to(change_role),
        )
        .route(
            "/clubs/{club_id}/members/{user_id}",
            web::delete().to(deactivate_member),
        );
}

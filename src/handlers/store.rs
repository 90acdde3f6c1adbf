use crate::entities::ClubRole;
use crate::models::*;
use crate::services::{PermissionService, StoreService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/clubs/{club_id}/store",
    tag = "store",
    params(
        ("club_id" = i64, Path, description = "俱乐部ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取商城列表成功", body = StoreListResponse),
        (status = 403, description = "非俱乐部会员")
    )
)]
/// 商城列表: 在售商品 + 当前会员积分
pub async fn get_store(
    permission_service: web::Data<PermissionService>,
    store_service: web::Data<StoreService>,
    req: HttpRequest,
    path: web::Path<i64>,
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

    match store_service.list_items(club_id).await {
        Ok(items) => {
            let data = StoreListResponse {
                items,
                user_points: ctx.membership.points,
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{club_id}/store",
    tag = "store",
    request_body = CreateStoreItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "商品创建成功", body = StoreItemResponse),
        (status = 400, description = "参数无效"),
        (status = 403, description = "需要 manager 及以上角色")
    )
)]
pub async fn create_item(
    permission_service: web::Data<PermissionService>,
    store_service: web::Data<StoreService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<CreateStoreItemRequest>,
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

    match store_service.create_item(club_id, request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/clubs/{club_id}/store/{item_id}",
    tag = "store",
    request_body = UpdateStoreItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "商品更新成功", body = StoreItemResponse),
        (status = 403, description = "需要 manager 及以上角色"),
        (status = 404, description = "商品不存在")
    )
)]
pub async fn update_item(
    permission_service: web::Data<PermissionService>,
    store_service: web::Data<StoreService>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    request: web::Json<UpdateStoreItemRequest>,
) -> Result<HttpResponse> {
    let (club_id, item_id) = path.into_inner();
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

    match store_service
        .update_item(club_id, item_id, request.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{club_id}/store/{item_id}/redeem",
    tag = "store",
    params(
        ("club_id" = i64, Path, description = "俱乐部ID"),
        ("item_id" = i64, Path, description = "商品ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "兑换成功", body = RedeemResponse),
        (status = 400, description = "售罄或积分不足"),
        (status = 403, description = "非俱乐部会员"),
        (status = 404, description = "商品不存在或已下架")
    )
)]
/// 积分兑换商品
pub async fn redeem_item(
    permission_service: web::Data<PermissionService>,
    store_service: web::Data<StoreService>,
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (club_id, item_id) = path.into_inner();
    let caller = get_user_id_from_request(&req);

    let ctx = match permission_service
        .require_role(caller, club_id, &[ClubRole::Member])
        .await
    {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };

    match store_service
        .redeem_item(ctx.user.id, club_id, item_id)
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn store_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/clubs/{club_id}/store", web::get().to(get_store))
        .route("/clubs/{club_id}/store", web::post().to(create_item))
        .route(
            "/clubs/{club_id}/store/{item_id}",
            web::put().to(update_item),
        )
        .route(
            "/clubs/{club_id}/store/{item_id}/redeem",
            web::post().to(redeem_item),
        );
}

use crate::models::*;
use crate::services::AssistantService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    post,
    path = "/assistant/chat",
    tag = "assistant",
    request_body = ChatRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "助手回复", body = ChatResponse),
        (status = 400, description = "消息为空"),
        (status = 502, description = "LLM 服务不可用")
    )
)]
/// AI 助手对话。赛事报名 (buy-in) 以工具形式暴露给模型,
/// 工具在服务端以当前用户身份执行真实操作。
pub async fn chat(
    assistant_service: web::Data<AssistantService>,
    req: HttpRequest,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match assistant_service.chat(user_id, request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn assistant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/assistant").route("/chat", web::post().to(chat)));
}

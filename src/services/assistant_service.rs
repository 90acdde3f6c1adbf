use crate::error::{AppError, AppResult};
use crate::external::{AssistantAPI, ProviderMessage};
use crate::models::{ChatRequest, ChatResponse, ToolInvocation};
use crate::services::TournamentService;
use serde_json::{Value, json};

/// 单次对话中最多执行的模型往返轮数
const MAX_TOOL_ROUNDS: usize = 4;

const SYSTEM_PROMPT: &str = "You are the poker club assistant. You help members with club \
questions and can register the current member for a tournament using the tournament_buy_in tool.";

/// 暴露给模型的工具目录 (function calling)
fn tool_catalog() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": "tournament_buy_in",
                "description": "Register the current member for a tournament and charge the buy-in plus fee from their club balance.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "tournament_id": {
                            "type": "integer",
                            "description": "Identifier of the tournament to register for"
                        }
                    },
                    "required": ["tournament_id"]
                }
            }
        }
    ])
}

#[derive(Clone)]
pub struct AssistantService {
    api: AssistantAPI,
    tournament_service: TournamentService,
}

impl AssistantService {
    pub fn new(api: AssistantAPI, tournament_service: TournamentService) -> Self {
        Self {
            api,
            tournament_service,
        }
    }

    /// 执行一轮助手对话。模型请求工具时在服务端执行真实操作,
    /// 把 {success, message|error} 信封回传给模型后继续, 直到产生文本回复。
    pub async fn chat(&self, user_id: i64, request: ChatRequest) -> AppResult<ChatResponse> {
        if request.messages.is_empty() {
            return Err(AppError::ValidationError(
                "Messages must not be empty".to_string(),
            ));
        }

        let mut messages: Vec<ProviderMessage> =
            vec![ProviderMessage::text("system", SYSTEM_PROMPT)];
        messages.extend(
            request
                .messages
                .iter()
                .map(|m| ProviderMessage::text(&m.role, m.content.clone())),
        );

        let tools = tool_catalog();
        let mut invocations: Vec<ToolInvocation> = Vec::new();

        for _ in 0..MAX_TOOL_ROUNDS {
            let reply = self.api.chat_completion(&messages, &tools).await?;
            let tool_calls = reply.tool_calls.clone().unwrap_or_default();

            if tool_calls.is_empty() {
                return Ok(ChatResponse {
                    reply: reply.content.unwrap_or_default(),
                    tool_invocations: invocations,
                });
            }

            messages.push(reply);

            for call in tool_calls {
                let arguments: Value =
                    serde_json::from_str(&call.function.arguments).unwrap_or_else(|_| json!({}));

                let result = self
                    .dispatch_tool(user_id, &call.function.name, &arguments)
                    .await;

                log::info!(
                    "Assistant tool call {} for user {}: {}",
                    call.function.name,
                    user_id,
                    result
                );

                invocations.push(ToolInvocation {
                    tool: call.function.name.clone(),
                    arguments,
                    result: result.clone(),
                });

                messages.push(ProviderMessage::tool_result(&call.id, result.to_string()));
            }
        }

        Err(AppError::ExternalApiError(
            "Assistant exceeded tool call limit".to_string(),
        ))
    }

    /// 工具结果统一为 {success, message|error} 信封。
    /// 业务失败 (余额不足/重复报名等) 不中断对话, 交给模型向用户解释。
    async fn dispatch_tool(&self, user_id: i64, name: &str, arguments: &Value) -> Value {
        match name {
            "tournament_buy_in" => {
                let Some(tournament_id) = arguments.get("tournament_id").and_then(|v| v.as_i64())
                else {
                    return json!({"success": false, "error": "tournament_id is required"});
                };

                match self.tournament_service.buy_in(user_id, tournament_id).await {
                    Ok(result) => json!({
                        "success": true,
                        "message": format!(
                            "Registered for tournament {}. Charged {}, new balance {}.",
                            result.tournament_id, result.amount_charged, result.new_balance
                        )
                    }),
                    Err(e) => json!({"success": false, "error": e.to_string()}),
                }
            }
            _ => json!({"success": false, "error": format!("Unknown tool: {}", name)}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_catalog_shape() {
        let tools = tool_catalog();
        let list = tools.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["type"], "function");
        assert_eq!(list[0]["function"]["name"], "tournament_buy_in");
        assert_eq!(
            list[0]["function"]["parameters"]["required"][0],
            "tournament_id"
        );
    }
}

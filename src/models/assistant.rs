use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 客户端与助手之间的一条消息
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    /// "user" / "assistant" / "system"
    #[schema(example = "user")]
    pub role: String,
    #[schema(example = "Register me for tournament 3")]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// 助手回复中执行过的工具调用记录
#[derive(Debug, Serialize, ToSchema)]
pub struct ToolInvocation {
    pub tool: String,
    #[schema(value_type = Object)]
    pub arguments: serde_json::Value,
    /// 工具返回的 {success, message|error} 信封
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
    pub tool_invocations: Vec<ToolInvocation>,
}

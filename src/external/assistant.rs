use crate::config::AssistantConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// chat-completions 协议中的一条消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ProviderToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ProviderMessage {
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// 工具执行结果消息, 回传给模型
    pub fn tool_result(tool_call_id: &str, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: ProviderFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderFunctionCall {
    pub name: String,
    /// JSON 字符串形式的参数
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ProviderMessage,
}

#[derive(Clone)]
pub struct AssistantAPI {
    client: Client,
    config: AssistantConfig,
}

impl AssistantAPI {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 调用 OpenAI 兼容的 chat-completions 接口
    pub async fn chat_completion(
        &self,
        messages: &[ProviderMessage],
        tools: &Value,
    ) -> AppResult<ProviderMessage> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "tools": tools,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("LLM provider request failed: {}", error_text);
            return Err(AppError::ExternalApiError(format!(
                "LLM request failed: {}",
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| AppError::ExternalApiError("LLM returned no choices".to_string()))
    }
}

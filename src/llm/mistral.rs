//! Mistral API 客户端（OpenAI 兼容格式）
//!
//! Mistral 提供与 OpenAI 兼容的 Chat Completions 接口。
//! - Base URL: https://api.mistral.ai/v1
//! - 模型: mistral-small-latest（默认）, mistral-large-latest

use crate::llm::OpenAiClient;

/// Mistral API 常量
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const MISTRAL_SMALL: &str = "mistral-small-latest";

/// 创建 Mistral 客户端
///
/// - 优先使用环境变量 `MISTRAL_API_KEY`
/// - 模型可通过 `model` 参数或 `MISTRAL_MODEL` 环境变量指定
pub fn create_mistral_client(model: Option<&str>) -> OpenAiClient {
    let api_key = std::env::var("MISTRAL_API_KEY")
        .ok()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .unwrap_or_else(|| "sk-placeholder".to_string());

    let model = model
        .map(String::from)
        .or_else(|| std::env::var("MISTRAL_MODEL").ok())
        .unwrap_or_else(|| MISTRAL_SMALL.to_string());

    OpenAiClient::new(Some(MISTRAL_BASE_URL), &model, Some(api_key.as_str()))
}

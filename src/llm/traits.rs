//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / Mistral / Mock / Scripted）实现 LlmClient。
//! 核心流水线只需要非流式 complete：Planner 和各 agent 都整段消费回复。

use async_trait::async_trait;

use crate::memory::Message;

/// LLM 客户端 trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成：整段消息列表换一段回复文本
    async fn complete(&self, messages: &[Message]) -> Result<String, String>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}

//! Mock LLM 客户端（用于测试与无 API Key 运行）
//!
//! MockLlmClient 返回一段非 JSON 的说明文字，走 Planner 的会话回退路径；
//! ScriptedLlmClient 按脚本依次吐出预设回复，供单元 / 集成测试离线驱动完整流水线。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::memory::Message;

/// Mock 客户端：固定返回会话式说明文字（非 JSON），Planner 解析失败后原样作为回答
#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
        Ok("Nessun modello LLM configurato: imposta MISTRAL_API_KEY o OPENAI_API_KEY. \
            Posso creare, modificare, consultare e salvare documenti Markdown."
            .to_string())
    }
}

/// 脚本客户端：每次 complete 弹出队首回复；脚本耗尽返回 Err
pub struct ScriptedLlmClient {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedLlmClient {
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }

    /// 剩余未消费的脚本条数
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
        self.responses
            .lock()
            .map_err(|_| "Script lock poisoned".to_string())?
            .pop_front()
            .ok_or_else(|| "Script exhausted".to_string())
    }
}

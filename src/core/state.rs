//! 状态定义：UiState 投影
//!
//! UI 只持有轻量的 UiState（阶段、对话历史、文档全文、锁、错误）；
//! 完整会话状态由后台会话任务（core::orchestrator）持有并投影到 UiState。

use serde::Serialize;

use crate::memory::Message;

/// UI 看到的「投影」状态，轻量且易于渲染
#[derive(Clone, Debug, Serialize)]
pub struct UiState {
    /// 应用名（[app] name），标题栏用
    pub app_name: String,
    pub phase: SessionPhase,
    pub history: Vec<Message>,
    /// 当前文档全文（Markdown），右侧预览面板用
    pub document: String,
    pub input_locked: bool,
    pub error_message: Option<String>,
    /// 累计 token 用量 (prompt, completion, total)，状态行展示
    pub token_usage: (u64, u64, u64),
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            app_name: "Scriba".to_string(),
            phase: SessionPhase::Idle,
            history: Vec::new(),
            document: String::new(),
            input_locked: false,
            error_message: None,
            token_usage: (0, 0, 0),
        }
    }
}

/// 会话阶段（UI 投影用）：一次 run 内部严格串行，无更细粒度
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Idle,
    Working,
    Error,
}

//! Scriba - Markdown 文档助手
//!
//! 模块划分：
//! - **agents**: 提示词特化的五个子智能体（清洗 / 组织 / 修改 / 检索 / 讲解）
//! - **capabilities**: 能力目录（注册表 + 六个具体能力，Planner 的调用对象）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型、UI 状态投影、会话编排（channel 接线）
//! - **export**: 文档导出（Markdown -> HTML / PDF / DOCX）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mistral / Mock）
//! - **memory**: 会话消息与对话记录
//! - **plan**: 编排核心（Planner、Executor、控制循环、SessionManager）
//! - **transcribe**: 语音转写输入适配器（WAV -> 文本）
//! - **ui**: Ratatui TUI 界面

pub mod agents;
pub mod capabilities;
pub mod config;
pub mod core;
pub mod export;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod plan;
pub mod transcribe;
pub mod ui;

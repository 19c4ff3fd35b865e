//! 助手错误类型
//!
//! 能力 / LLM 边界按惯例用 Result<String, String>（错误即面向用户的文本）；
//! AssistantError 用于注册表、配置、导出等内部边界，最终在 SessionManager 处折叠为回答文本。

use thiserror::Error;

/// 助手运行过程中可能出现的错误（注册、解析、配置、导出、转写）
#[derive(Error, Debug)]
pub enum AssistantError {
    /// 重复注册同名能力：注册表在启动期直接失败，不允许静默覆盖
    #[error("Duplicate capability: {0}")]
    DuplicateCapability(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Capability failed: {0}")]
    CapabilityFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),
}

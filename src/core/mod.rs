//! 核心层：错误类型、UI 状态投影、会话编排（channel 接线）

pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::AssistantError;
pub use orchestrator::{build_registry, create_session, Command, ExportTarget};
pub use state::{SessionPhase, UiState};

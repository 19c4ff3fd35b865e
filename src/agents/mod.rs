//! 提示词特化的子智能体
//!
//! 每个子智能体 = 一个系统提示词 + 共享的 LlmClient，对外只有「文本进、文本出」；
//! 由 capabilities 层按名调用，Planner 不直接接触。

pub mod cleaner;
pub mod explainer;
pub mod modifier;
pub mod organizer;
pub mod retriever;

pub use cleaner::CleanerAgent;
pub use explainer::ExplainerAgent;
pub use modifier::ModifierAgent;
pub use organizer::OrganizerAgent;
pub use retriever::RetrieverAgent;

use std::sync::Arc;

use crate::llm::LlmClient;
use crate::memory::Message;

/// 统一调用形态：system prompt + 单条 user 输入，一次 complete
pub(crate) async fn run_agent(
    llm: &Arc<dyn LlmClient>,
    system_prompt: &str,
    input: &str,
) -> Result<String, String> {
    llm.complete(&[Message::system(system_prompt), Message::user(input)])
        .await
}

//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Mistral / Mock），外加请求超时装饰器

pub mod mistral;
pub mod mock;
pub mod openai;
pub mod timeout;
pub mod traits;

pub use mistral::{create_mistral_client, MISTRAL_BASE_URL, MISTRAL_SMALL};
pub use mock::{MockLlmClient, ScriptedLlmClient};
pub use openai::{OpenAiClient, TokenUsage};
pub use timeout::TimeoutLlm;
pub use traits::LlmClient;

//! 请求超时装饰器
//!
//! 包裹任意后端，给每次 complete 套上配置的请求超时（[llm.timeouts] request，秒）。
//! 超时折叠为普通的 Err 文本，上游（Planner 回退、agent 错误文本）按既有失败路径处理。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::memory::Message;

pub struct TimeoutLlm {
    inner: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl TimeoutLlm {
    pub fn new(inner: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl LlmClient for TimeoutLlm {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        match tokio::time::timeout(self.timeout, self.inner.complete(messages)).await {
            Ok(result) => result,
            Err(_) => Err(format!(
                "richiesta LLM scaduta dopo {} secondi",
                self.timeout.as_secs()
            )),
        }
    }

    fn token_usage(&self) -> (u64, u64, u64) {
        self.inner.token_usage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedLlmClient;

    struct StalledLlm;

    #[async_trait]
    impl LlmClient for StalledLlm {
        async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
            std::future::pending().await
        }

        fn token_usage(&self) -> (u64, u64, u64) {
            (1, 2, 3)
        }
    }

    #[tokio::test]
    async fn stalled_backend_times_out_with_an_error_text() {
        let llm = TimeoutLlm::new(Arc::new(StalledLlm), Duration::from_millis(10));
        let err = llm.complete(&[Message::user("ciao")]).await.unwrap_err();
        assert!(err.contains("scaduta"));
    }

    #[tokio::test]
    async fn fast_backend_passes_through_untouched() {
        let inner = Arc::new(ScriptedLlmClient::new(vec!["risposta"]));
        let llm = TimeoutLlm::new(inner, Duration::from_secs(60));
        let out = llm.complete(&[Message::user("ciao")]).await.unwrap();
        assert_eq!(out, "risposta");
    }

    #[test]
    fn usage_is_delegated_to_the_backend() {
        let llm = TimeoutLlm::new(Arc::new(StalledLlm), Duration::from_secs(1));
        assert_eq!(llm.token_usage(), (1, 2, 3));
    }
}

//! 讲解能力：用平实语言回答关于文档的问题，只读

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::agents::ExplainerAgent;
use crate::capabilities::{missing_arg, str_arg, Capability};
use crate::llm::LlmClient;

/// spiega_documento：解释而非摘录，适合「这段在讲什么」类问题
pub struct ExplainCapability {
    explainer: ExplainerAgent,
}

impl ExplainCapability {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            explainer: ExplainerAgent::new(llm),
        }
    }
}

#[async_trait]
impl Capability for ExplainCapability {
    fn name(&self) -> &str {
        "spiega_documento"
    }

    fn description(&self) -> &str {
        "Spiega con linguaggio semplice il contenuto del documento corrente o risponde a una domanda su di esso."
    }

    fn arg_names(&self) -> &[&str] {
        &["domanda", "documento_attuale"]
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let question = str_arg(&args, "domanda").ok_or_else(|| missing_arg("domanda"))?;
        let document = str_arg(&args, "documento_attuale").unwrap_or("");

        self.explainer.explain(document, question).await
    }
}

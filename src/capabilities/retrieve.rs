//! 检索能力：列章节 / 取章节内容，只读

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::agents::RetrieverAgent;
use crate::capabilities::{missing_arg, str_arg, Capability};
use crate::llm::LlmClient;

/// recupera_informazioni：只读查询，不触碰文档内容
pub struct RetrieveCapability {
    retriever: RetrieverAgent,
}

impl RetrieveCapability {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            retriever: RetrieverAgent::new(llm),
        }
    }
}

#[async_trait]
impl Capability for RetrieveCapability {
    fn name(&self) -> &str {
        "recupera_informazioni"
    }

    fn description(&self) -> &str {
        "Cerca e recupera informazioni o sezioni dal documento corrente. L'input è una domanda (es. 'mostrami la sezione Y', 'elenca le sezioni')."
    }

    fn arg_names(&self) -> &[&str] {
        &["query", "documento_attuale"]
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let query = str_arg(&args, "query").ok_or_else(|| missing_arg("query"))?;
        let document = str_arg(&args, "documento_attuale").unwrap_or("");

        self.retriever.retrieve(document, query).await
    }
}

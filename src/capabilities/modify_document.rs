//! 修改文档能力：对当前文档执行一条编辑命令（改写型）

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::agents::ModifierAgent;
use crate::capabilities::{missing_arg, str_arg, Capability};
use crate::llm::LlmClient;

/// modifica_documento：documento_attuale 通常由 Executor 注入，不要求 Planner 携带全文
pub struct ModifyDocumentCapability {
    modifier: ModifierAgent,
}

impl ModifyDocumentCapability {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            modifier: ModifierAgent::new(llm),
        }
    }
}

#[async_trait]
impl Capability for ModifyDocumentCapability {
    fn name(&self) -> &str {
        "modifica_documento"
    }

    fn description(&self) -> &str {
        "Modifica, aggiunge, cancella o riscrive parti del documento corrente. L'input è un comando chiaro che descrive la modifica."
    }

    fn arg_names(&self) -> &[&str] {
        &["comando", "documento_attuale"]
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let command = str_arg(&args, "comando").ok_or_else(|| missing_arg("comando"))?;
        let document = str_arg(&args, "documento_attuale").unwrap_or("");

        self.modifier.apply(document, command).await
    }
}

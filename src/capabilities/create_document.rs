//! 创建文档能力：清洗 + 组织两段式，产出完整 Markdown 文档（改写型）

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::agents::{CleanerAgent, OrganizerAgent};
use crate::capabilities::{missing_arg, str_arg, Capability};
use crate::llm::LlmClient;

/// crea_nuovo_documento：先清洗原始文本，再组织成分节的 Markdown
pub struct CreateDocumentCapability {
    cleaner: CleanerAgent,
    organizer: OrganizerAgent,
}

impl CreateDocumentCapability {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            cleaner: CleanerAgent::new(llm.clone()),
            organizer: OrganizerAgent::new(llm),
        }
    }
}

#[async_trait]
impl Capability for CreateDocumentCapability {
    fn name(&self) -> &str {
        "crea_nuovo_documento"
    }

    fn description(&self) -> &str {
        "Crea un nuovo documento partendo da un testo grezzo: pulisce il testo e lo organizza in sezioni Markdown."
    }

    fn arg_names(&self) -> &[&str] {
        &["testo_grezzo", "titolo"]
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let raw = str_arg(&args, "testo_grezzo").ok_or_else(|| missing_arg("testo_grezzo"))?;
        let title = str_arg(&args, "titolo");

        let clean = self.cleaner.clean(raw).await?;
        self.organizer.organize(&clean, title).await
    }
}

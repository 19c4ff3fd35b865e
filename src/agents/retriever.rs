//! 检索智能体：列出章节或取回指定章节内容，绝不虚构

use std::sync::Arc;

use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = "\
Sei un assistente AI specializzato nell'analizzare documenti tecnici in formato Markdown \
e nel recuperare informazioni specifiche per l'utente. \
Riceverai un \"Documento Attuale\" e una \"Richiesta\".

Logica di esecuzione:
1. Se la richiesta è un elenco (es. \"elenca i capitoli\", \"quali sezioni ci sono?\"), \
estrai tutti i titoli delle sezioni (righe che iniziano con `#`) e restituisci una lista ben formattata.
2. Se la richiesta riguarda una sezione specifica (es. \"mostrami i risultati\"), \
individua quella sezione e restituisci titolo e contenuto.
3. Se una sezione richiesta non viene trovata, NON inventarla: informa l'utente ed elenca \
le sezioni effettivamente disponibili.

L'output deve essere solo la stringa di testo con l'informazione richiesta, senza commenti aggiuntivi.";

/// 检索智能体：只读，不产生文档变更
pub struct RetrieverAgent {
    llm: Arc<dyn LlmClient>,
}

impl RetrieverAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn retrieve(&self, document: &str, query: &str) -> Result<String, String> {
        let input = format!("DOCUMENTO ATTUALE:\n{}\n\nRICHIESTA:\n{}", document, query);
        super::run_agent(&self.llm, SYSTEM_PROMPT, &input).await
    }
}

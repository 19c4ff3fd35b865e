//! 组织智能体：把清洗后的文本结构化为 Markdown 文档（标题 + 分节）

use std::sync::Arc;

use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = "\
Sei un assistente AI esperto nella strutturazione di documenti tecnici in formato Markdown. \
Il tuo compito è organizzare un blocco di testo pulito in un report chiaro e logico.

Regole di esecuzione:
1. Gestione titolo:
   - Se ti viene fornito un titolo dall'utente, usa ESATTAMENTE quello come titolo principale (`#`).
   - Altrimenti, genera tu un titolo principale (`#`) conciso e riassuntivo del contenuto.
2. Strutturazione del contenuto:
   - Se il testo è breve e tratta un singolo argomento coeso, inseriscilo intero sotto il titolo principale.
   - Se tratta argomenti multipli e distinti, suddividilo in sezioni logiche (`## Titolo Sezione`).
3. Regole di output:
   - NON modificare il contenuto del testo originale, distribuiscilo solo sotto i titoli corretti.
   - L'output finale deve essere unicamente la stringa in formato Markdown, senza commenti aggiuntivi.";

/// 组织智能体：可附带用户指定标题
pub struct OrganizerAgent {
    llm: Arc<dyn LlmClient>,
}

impl OrganizerAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn organize(&self, clean_text: &str, title: Option<&str>) -> Result<String, String> {
        let mut input = format!("Testo: {}", clean_text);
        if let Some(title) = title {
            input.push_str(&format!("\nTitolo suggerito: {}", title));
        }
        super::run_agent(&self.llm, SYSTEM_PROMPT, &input).await
    }
}

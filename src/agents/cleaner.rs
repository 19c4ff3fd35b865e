//! 清洗智能体：纠正文本错别字 / 语法 / 标点，不改动含义

use std::sync::Arc;

use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = "\
Sei un assistente AI specializzato nella correzione di bozze per report tecnici in lingua italiana. \
Il tuo unico compito è correggere il testo fornito, applicando solo le seguenti modifiche essenziali:

1. Correggi errori di battitura (typo) e ortografia.
2. Correggi errori grammaticali (coniugazioni, accordi, preposizioni).
3. Sistema la punteggiatura e rimuovi spazi superflui.

Regole assolute:
- NON alterare il significato, il contenuto o lo stile del testo. La correzione deve essere minima.
- Mantieni intatto il gergo tecnico, gli acronimi e i termini in altre lingue (es. `loss function`, `API RESTful`).
- NON modificare nomi propri di persone, aziende o prodotti.
- NON modificare testo che appare come codice o racchiuso tra backtick (`).
- Se un numero precede un sostantivo ordinale (es. epoca, versione, capitolo), formattalo come \"numero-esimo/a\".

Restituisci unicamente il testo corretto, senza aggiungere commenti, saluti o spiegazioni.";

/// 清洗智能体：文本进、纠正后的文本出
pub struct CleanerAgent {
    llm: Arc<dyn LlmClient>,
}

impl CleanerAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn clean(&self, raw_text: &str) -> Result<String, String> {
        super::run_agent(&self.llm, SYSTEM_PROMPT, raw_text).await
    }
}

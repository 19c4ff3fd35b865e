//! 讲解智能体：用平实语言解释文档内容，只读

use std::sync::Arc;

use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = "\
Sei un assistente AI che spiega documenti tecnici in formato Markdown con un linguaggio semplice e chiaro. \
Riceverai un \"Documento Attuale\" e una \"Domanda\".

Regole:
- Rispondi alla domanda basandoti SOLO sul contenuto del documento.
- Se il documento non contiene l'informazione richiesta, dillo esplicitamente senza inventare.
- Usa un tono discorsivo e frasi brevi; evita il gergo quando possibile.
- NON modificare il documento e NON restituirne il testo integrale: restituisci solo la spiegazione.";

/// 讲解智能体：输入 = 当前文档 + 用户问题
pub struct ExplainerAgent {
    llm: Arc<dyn LlmClient>,
}

impl ExplainerAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn explain(&self, document: &str, question: &str) -> Result<String, String> {
        let input = format!("DOCUMENTO ATTUALE:\n{}\n\nDOMANDA:\n{}", document, question);
        super::run_agent(&self.llm, SYSTEM_PROMPT, &input).await
    }
}

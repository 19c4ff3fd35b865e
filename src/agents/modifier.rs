//! 修改智能体：对现有文档执行一次编辑命令，永远返回完整文档

use std::sync::Arc;

use crate::llm::LlmClient;

const SYSTEM_PROMPT: &str = "\
Sei un editor AI avanzato, specializzato nella manipolazione di documenti tecnici in formato Markdown. \
Il tuo compito è applicare una modifica richiesta dall'utente a un documento esistente. \
Riceverai due input: il \"Documento Attuale\" e il \"Comando Utente\".

Regola fondamentale: devi restituire SEMPRE l'INTERO documento aggiornato. \
Le sezioni non interessate dalla modifica devono rimanere INVARIATE e presenti nell'output finale.

Le tue capacità includono:
- Aggiungere: inserire nuove sezioni (`#`), sotto-sezioni (`##`) o paragrafi in punti specifici.
- Riscrivere/Modificare: cambiare il testo di una sezione, riassumerlo, espanderlo o alterarne lo stile.
- Rinominare: modificare il titolo di una sezione mantenendo il contenuto.
- Eliminare: rimuovere intere sezioni o parti specifiche di testo.
- Riorganizzare: cambiare l'ordine delle sezioni.

L'output deve essere solo ed esclusivamente il testo del documento Markdown aggiornato. \
Non includere commenti o spiegazioni.";

/// 修改智能体：输入 = 当前文档 + 编辑命令
pub struct ModifierAgent {
    llm: Arc<dyn LlmClient>,
}

impl ModifierAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn apply(&self, document: &str, command: &str) -> Result<String, String> {
        let input = format!("DOCUMENTO ATTUALE:\n{}\n\nCOMANDO:\n{}", document, command);
        super::run_agent(&self.llm, SYSTEM_PROMPT, &input).await
    }
}

//! 保存文件能力：把文本写入工作目录（覆盖写，只读视角不改文档）
//!
//! 语义取定：整文件覆盖，不追加。content 省略时由 Executor 注入当前文档全文。

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::capabilities::{missing_arg, resolve_in_root, str_arg, Capability};

/// salva_file：非改写型，返回确认文本而非文档
pub struct SaveFileCapability {
    root: PathBuf,
}

impl SaveFileCapability {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Capability for SaveFileCapability {
    fn name(&self) -> &str {
        "salva_file"
    }

    fn description(&self) -> &str {
        "Salva del testo in un file nella cartella di lavoro (sovrascrivendo). L'input è il nome del file e il contenuto da salvare."
    }

    fn arg_names(&self) -> &[&str] {
        &["filename", "content"]
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let filename = str_arg(&args, "filename").ok_or_else(|| missing_arg("filename"))?;
        let content = str_arg(&args, "content").unwrap_or("");
        let path = resolve_in_root(&self.root, filename)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Errore durante il salvataggio del file: {}", e))?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| format!("Errore durante il salvataggio del file: {}", e))?;

        Ok(format!("File '{}' salvato con successo.", filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cap = SaveFileCapability::new(dir.path());

        cap.execute(json!({"filename": "doc.md", "content": "vecchio"}))
            .await
            .unwrap();
        let msg = cap
            .execute(json!({"filename": "doc.md", "content": "nuovo"}))
            .await
            .unwrap();

        assert_eq!(msg, "File 'doc.md' salvato con successo.");
        let saved = std::fs::read_to_string(dir.path().join("doc.md")).unwrap();
        assert_eq!(saved, "nuovo");
    }

    #[tokio::test]
    async fn absolute_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cap = SaveFileCapability::new(dir.path());
        let err = cap
            .execute(json!({"filename": "/etc/passwd", "content": "x"}))
            .await
            .unwrap_err();
        assert!(err.contains("non consentito"));
    }
}

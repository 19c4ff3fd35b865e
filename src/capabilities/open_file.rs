//! 打开文件能力：读取工作目录内的文本文件，内容成为当前文档（改写型）

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::capabilities::{missing_arg, resolve_in_root, str_arg, Capability};

/// apri_file：读到的全文整体替换 DocumentState.content
pub struct OpenFileCapability {
    root: PathBuf,
}

impl OpenFileCapability {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Capability for OpenFileCapability {
    fn name(&self) -> &str {
        "apri_file"
    }

    fn description(&self) -> &str {
        "Apre un file di testo nella cartella di lavoro e ne legge il contenuto. L'input è il nome del file."
    }

    fn arg_names(&self) -> &[&str] {
        &["filename"]
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let filename = str_arg(&args, "filename").ok_or_else(|| missing_arg("filename"))?;
        let path = resolve_in_root(&self.root, filename)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(format!("Errore: File '{}' non trovato.", filename))
            }
            Err(e) => Err(format!("Errore durante l'apertura del file: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn reads_file_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nota.md"), "# Nota\n\nciao").unwrap();

        let cap = OpenFileCapability::new(dir.path());
        let out = cap.execute(json!({"filename": "nota.md"})).await.unwrap();
        assert_eq!(out, "# Nota\n\nciao");
    }

    #[tokio::test]
    async fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cap = OpenFileCapability::new(dir.path());
        let err = cap.execute(json!({"filename": "niente.md"})).await.unwrap_err();
        assert_eq!(err, "Errore: File 'niente.md' non trovato.");
    }

    #[tokio::test]
    async fn parent_dir_escape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cap = OpenFileCapability::new(dir.path());
        let err = cap
            .execute(json!({"filename": "../fuori.md"}))
            .await
            .unwrap_err();
        assert!(err.contains("non consentito"));
    }
}

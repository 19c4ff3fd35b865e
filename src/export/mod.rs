//! 文档导出：Markdown -> HTML / PDF / DOCX
//!
//! 无状态字节级编码器，仅在导出时调用；核心对转换实现与失败形态不作假设
//! （「字节或错误文本」）。排版保真不是目标。

pub mod docx;
pub mod html;
pub mod pdf;

pub use docx::markdown_to_docx;
pub use html::markdown_to_html;
pub use pdf::markdown_to_pdf;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    /// 解析用户输入的格式名（大小写不敏感，接受扩展名别名）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Some(ExportFormat::Markdown),
            "html" => Some(ExportFormat::Html),
            "pdf" => Some(ExportFormat::Pdf),
            "docx" | "word" => Some(ExportFormat::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Html => "HTML",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
        };
        write!(f, "{}", name)
    }
}

/// 把 Markdown 文档编码为目标格式的字节
pub fn export_document(markdown: &str, format: ExportFormat) -> Result<Vec<u8>, String> {
    match format {
        ExportFormat::Markdown => Ok(markdown.as_bytes().to_vec()),
        ExportFormat::Html => Ok(markdown_to_html(markdown).into_bytes()),
        ExportFormat::Pdf => markdown_to_pdf(markdown),
        ExportFormat::Docx => markdown_to_docx(markdown),
    }
}

//! Markdown -> DOCX（docx-rs，逐段落构建）
//!
//! 每行一个段落；标题行映射为放大加粗的 Run。内联格式（粗体 / 斜体 / 链接）原样保留为文本。

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

/// Run 字号单位是半磅：11pt 正文 = 22
const BODY_HALF_POINTS: usize = 22;

pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>, String> {
    let mut docx = Docx::new();

    for line in markdown.lines() {
        docx = docx.add_paragraph(paragraph_for(line));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| e.to_string())?;
    Ok(cursor.into_inner())
}

fn paragraph_for(line: &str) -> Paragraph {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes > 0 && line.chars().nth(hashes) == Some(' ') {
        let size = match hashes {
            1 => 36,
            2 => 28,
            _ => 24,
        };
        let text = line[hashes + 1..].trim();
        Paragraph::new().add_run(Run::new().add_text(text).size(size).bold())
    } else {
        Paragraph::new().add_run(Run::new().add_text(line).size(BODY_HALF_POINTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_zip_container_bytes() {
        // DOCX 是 ZIP 容器，魔数 PK
        let bytes = markdown_to_docx("# Note\n\nciao mondo").unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_document_still_packs() {
        let bytes = markdown_to_docx("").unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}

//! Markdown -> PDF（printpdf，内建 Helvetica，逐行排版）
//!
//! 朴素渲染：标题按 `#` 级别放大加粗，正文按固定行宽折行，满页换页。
//! 版面保真不是目标，导出的是「可读的字节」。

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
/// 近似行宽（Helvetica 11pt 在 170mm 可用宽度内）
const WRAP_COLS: usize = 95;

pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(
        "Documento",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Livello 1",
    );
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let heading_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for raw_line in markdown.lines() {
        let (text, size, font) = classify_line(raw_line, &body_font, &heading_font);
        let line_height = size * 0.5;

        for chunk in wrap_line(text, WRAP_COLS) {
            if y < MARGIN_MM + line_height {
                let (p, l) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Livello 1");
                current = doc.get_page(p).get_layer(l);
                y = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            current.use_text(chunk, size, Mm(MARGIN_MM), Mm(y), font);
            y -= line_height;
        }
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}

/// 标题行放大加粗，其余按正文排；返回 (去记号文本, 字号, 字体)
fn classify_line<'a>(
    line: &'a str,
    body: &'a IndirectFontRef,
    heading: &'a IndirectFontRef,
) -> (&'a str, f32, &'a IndirectFontRef) {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes > 0 && line.chars().nth(hashes) == Some(' ') {
        let size = match hashes {
            1 => 18.0,
            2 => 14.0,
            _ => 12.0,
        };
        (line[hashes + 1..].trim(), size, heading)
    } else {
        (line, 11.0, body)
    }
}

/// 按字符数折行（足够朴素，UTF-8 安全）
fn wrap_line(line: &str, cols: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    let mut current = String::new();
    for ch in line.chars() {
        if current.chars().count() >= cols {
            out.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_pdf_magic_bytes() {
        let bytes = markdown_to_pdf("# Note\n\nciao mondo").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_documents_span_multiple_pages() {
        let md: String = (0..400).map(|i| format!("riga {}\n", i)).collect();
        let bytes = markdown_to_pdf(&md).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn wrap_respects_column_limit() {
        let chunks = wrap_line(&"a".repeat(200), 95);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 95));
    }
}

//! Markdown -> HTML（pulldown-cmark）

use pulldown_cmark::{html, Options, Parser};

/// 转为独立 HTML 页面（内嵌最小样式，PDF 渲染也复用正文部分）
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::new();
    html::push_html(&mut body, parser);

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>body {{ font-family: sans-serif; max-width: 46em; margin: 2em auto; }}</style>\n\
         </head>\n<body>\n{}</body>\n</html>\n",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_become_h_tags() {
        let html = markdown_to_html("# Note\n\n## Intro\n\nciao mondo");
        assert!(html.contains("<h1>Note</h1>"));
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains("<p>ciao mondo</p>"));
    }

    #[test]
    fn output_is_a_standalone_page() {
        let html = markdown_to_html("testo");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("charset=\"utf-8\""));
    }
}

//! 界面渲染
//!
//! 根据 UiState（phase、history、document、error）与 input_buffer 绘制：
//! 左侧对话历史（按角色着色、长消息折叠、按宽度换行），右侧文档预览，底部输入框与命令提示。

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::{SessionPhase, UiState};
use crate::memory::Role;

/// 单条消息在 UI 中显示的最大字符数；过长内容（如整份文档）折叠，避免刷屏
const MAX_DISPLAY_CHARS: usize = 600;

/// 对过长内容做折叠：保留前 N 字 + 省略提示
fn truncate_for_display(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= MAX_DISPLAY_CHARS {
        return content.to_string();
    }
    let head: String = chars.iter().take(MAX_DISPLAY_CHARS).collect();
    format!("{}\n… [{} caratteri in totale]", head, chars.len())
}

/// 将内容按宽度换行（按字符数，UTF-8 安全）
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    for para in s.split('\n') {
        let mut line = String::new();
        for ch in para.chars() {
            if line.chars().count() >= width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(ch);
        }
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// 对话区标题：应用名 + 阶段，有 token 消耗时附带总量
fn status_line(state: &UiState) -> String {
    let phase = match &state.phase {
        SessionPhase::Idle => "pronto",
        SessionPhase::Working => "sto pensando…",
        SessionPhase::Error => "errore",
    };
    let (_, _, total) = state.token_usage;
    if total > 0 {
        format!(" {} — {} — {} token ", state.app_name, phase, total)
    } else {
        format!(" {} — {} ", state.app_name, phase)
    }
}

/// 绘制一帧：左对话区 + 右文档预览，底部输入区；返回对话区 (总行数, 可视高度) 供滚动 clamp
pub fn draw(
    f: &mut Frame,
    state: &UiState,
    input_buffer: &str,
    conversation_scroll: usize,
    out: &mut (usize, usize),
) {
    let input_height = 4u16;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(input_height)])
        .split(f.area());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    // 对话区
    let conv_area = cols[0];
    let content_width = conv_area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for msg in &state.history {
        let (label, style) = match msg.role {
            Role::User => ("Utente", Style::default().fg(Color::Cyan)),
            Role::Assistant => ("Assistente", Style::default().fg(Color::Green)),
            Role::System => ("Sistema", Style::default().fg(Color::DarkGray)),
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", label),
            style.add_modifier(Modifier::BOLD),
        )));
        for l in wrap_text(&truncate_for_display(&msg.content), content_width) {
            lines.push(Line::from(l));
        }
        lines.push(Line::from(""));
    }
    if let Some(err) = &state.error_message {
        lines.push(Line::from(Span::styled(
            format!("Errore: {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    let total_lines = lines.len();
    let visible = conv_area.height.saturating_sub(2) as usize;
    *out = (total_lines, visible);
    let scroll = conversation_scroll.min(total_lines.saturating_sub(visible)) as u16;

    let conversation = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(status_line(state)),
        )
        .scroll((scroll, 0));
    f.render_widget(conversation, conv_area);

    // 文档预览区
    let doc_title = if state.document.is_empty() {
        " Documento (vuoto) "
    } else {
        " Documento "
    };
    let document = Paragraph::new(state.document.as_str())
        .block(Block::default().borders(Borders::ALL).title(doc_title))
        .wrap(Wrap { trim: false });
    f.render_widget(document, cols[1]);

    // 输入区
    let hint = if state.input_locked {
        "in attesa della risposta…"
    } else {
        "Invio: invia | /esporta [doc|chat] <md|html|pdf|docx> | /audio <file.wav> | Ctrl+L: pulisci | Ctrl+Q: esci"
    };
    let input = Paragraph::new(format!("> {}", input_buffer))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", hint)));
    f.render_widget(input, rows[1]);
}

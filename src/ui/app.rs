//! TUI 应用主循环
//!
//! 进入全屏/原始模式，轮询 state_rx 与键盘事件；普通文本 Enter 提交为 Submit，
//! 斜杠命令（/esporta、/audio、/pulisci、/esci）在本层解析为对应 Command。

use std::io;
use std::path::PathBuf;

use crossterm::event::KeyCode;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::watch;

use crate::core::{Command, ExportTarget, UiState};
use crate::export::ExportFormat;
use crate::ui::render::draw;

/// 斜杠命令解析：返回 None 表示按普通指令提交
fn parse_slash_command(input: &str) -> Option<Command> {
    let mut parts = input.split_whitespace();
    match parts.next()? {
        "/esci" | "/quit" | "/exit" => Some(Command::Quit),
        "/pulisci" | "/clear" => Some(Command::Clear),
        "/audio" => {
            let path = parts.next()?;
            Some(Command::Transcribe(PathBuf::from(path)))
        }
        "/esporta" | "/export" => {
            // /esporta [doc|chat] <formato>；target 省略时导出文档
            let first = parts.next()?;
            let (target, fmt_str) = match first {
                "doc" | "documento" => (ExportTarget::Document, parts.next()?),
                "chat" => (ExportTarget::Chat, parts.next()?),
                other => (ExportTarget::Document, other),
            };
            ExportFormat::parse(fmt_str).map(|fmt| Command::Export(target, fmt))
        }
        _ => None,
    }
}

/// 运行 TUI：启用原始模式与全屏，循环 poll 事件 + 渲染，退出时恢复终端
pub async fn run_app(
    state_rx: watch::Receiver<UiState>,
    cmd_tx: tokio::sync::mpsc::UnboundedSender<Command>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = super::event::EventHandler::new(cmd_tx);
    let mut input_buffer = String::new();
    let mut conversation_scroll = 0usize;
    let mut last_history_len = 0usize;

    loop {
        let state = state_rx.borrow().clone();

        // 新消息到达时滚到底部
        if state.history.len() != last_history_len {
            last_history_len = state.history.len();
            conversation_scroll = usize::MAX;
        }

        if let Ok(Some(ev)) = event_handler.poll() {
            match ev {
                super::event::AppEvent::Command(cmd) => {
                    if matches!(cmd, Command::Quit) {
                        break;
                    }
                }
                super::event::AppEvent::Key(key) if !state.input_locked => match key.code {
                    KeyCode::Enter => {
                        let input = input_buffer.trim().to_string();
                        input_buffer.clear();
                        if input.is_empty() {
                            continue;
                        }
                        match parse_slash_command(&input) {
                            Some(Command::Quit) => {
                                // 让后台会话任务也收到退出命令再收尾
                                event_handler.send(Command::Quit);
                                break;
                            }
                            Some(cmd) => event_handler.send(cmd),
                            None if input.starts_with('/') => {
                                // 未识别的斜杠命令：不提交给 Planner，忽略
                            }
                            None => event_handler.send(Command::Submit(input)),
                        }
                    }
                    KeyCode::Backspace => {
                        input_buffer.pop();
                    }
                    KeyCode::Char(c) => {
                        input_buffer.push(c);
                    }
                    KeyCode::Up => {
                        conversation_scroll = conversation_scroll.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        conversation_scroll = conversation_scroll.saturating_add(1);
                    }
                    KeyCode::PageUp => {
                        conversation_scroll = conversation_scroll.saturating_sub(10);
                    }
                    KeyCode::PageDown => {
                        conversation_scroll = conversation_scroll.saturating_add(10);
                    }
                    KeyCode::Home => {
                        conversation_scroll = 0;
                    }
                    KeyCode::End => {
                        conversation_scroll = usize::MAX;
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        let mut scroll_info = (0usize, 0usize);
        terminal.draw(|f| {
            draw(f, &state, &input_buffer, conversation_scroll, &mut scroll_info);
        })?;
        let (total, visible) = scroll_info;
        conversation_scroll = conversation_scroll.min(total.saturating_sub(visible));
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_defaults_to_document_target() {
        match parse_slash_command("/esporta pdf") {
            Some(Command::Export(ExportTarget::Document, ExportFormat::Pdf)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn export_chat_target_is_recognized() {
        match parse_slash_command("/esporta chat html") {
            Some(Command::Export(ExportTarget::Chat, ExportFormat::Html)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn plain_text_is_not_a_slash_command() {
        assert!(parse_slash_command("crea un documento").is_none());
    }

    #[test]
    fn audio_command_carries_the_path() {
        match parse_slash_command("/audio registrazione.wav") {
            Some(Command::Transcribe(p)) => assert_eq!(p, PathBuf::from("registrazione.wav")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}

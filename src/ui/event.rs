//! 事件处理
//!
//! 轮询 crossterm 键盘事件，将 Ctrl+L/Ctrl+Q 转为 Command（Clear/Quit），
//! 其余按键交给 run_app 拼 input_buffer，Enter 时 submit。

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::core::Command;

/// 应用事件：来自快捷键的 Command 或原始 KeyEvent
#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    Key(KeyEvent),
}

/// 事件处理器：持有 cmd_tx，poll 时读键盘并返回 AppEvent
pub struct EventHandler {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl EventHandler {
    pub fn new(cmd_tx: mpsc::UnboundedSender<Command>) -> Self {
        Self { cmd_tx }
    }

    pub fn poll(&self) -> anyhow::Result<Option<AppEvent>> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(self.handle_key(key)));
                }
            }
        }
        Ok(None)
    }

    fn handle_key(&self, key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Char('l')
                if key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                let _ = self.cmd_tx.send(Command::Clear);
                AppEvent::Command(Command::Clear)
            }
            KeyCode::Char('q')
                if key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                // 先通知会话任务收尾，再让 run_app 跳出渲染循环
                let _ = self.cmd_tx.send(Command::Quit);
                AppEvent::Command(Command::Quit)
            }
            _ => AppEvent::Key(key),
        }
    }

    pub fn send(&self, cmd: Command) {
        let _ = self.cmd_tx.send(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_q_forwards_quit_to_the_session_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handler = EventHandler::new(tx);

        let ev = handler.handle_key(press(KeyCode::Char('q'), KeyModifiers::CONTROL));

        assert!(matches!(ev, AppEvent::Command(Command::Quit)));
        assert!(matches!(rx.try_recv(), Ok(Command::Quit)));
    }

    #[test]
    fn ctrl_l_forwards_clear_to_the_session_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handler = EventHandler::new(tx);

        handler.handle_key(press(KeyCode::Char('l'), KeyModifiers::CONTROL));

        assert!(matches!(rx.try_recv(), Ok(Command::Clear)));
    }

    #[test]
    fn plain_keys_stay_raw() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handler = EventHandler::new(tx);

        let ev = handler.handle_key(press(KeyCode::Char('a'), KeyModifiers::NONE));

        assert!(matches!(ev, AppEvent::Key(_)));
        assert!(rx.try_recv().is_err());
    }
}

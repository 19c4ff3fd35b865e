//! 对话记录
//!
//! 会话级转写：user/assistant 消息按顺序追加，只增不删（审计 / 导出聊天用），
//! 供 UI 渲染与聊天导出使用；Planner 不回读。

use serde::{Deserialize, Serialize};

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// 单条消息
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// 对话记录：追加式，无上限
#[derive(Clone, Debug, Default)]
pub struct ConversationMemory {
    messages: Vec<Message>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 将整段对话渲染为 Markdown（导出聊天用）
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for msg in &self.messages {
            let role = match msg.role {
                Role::User => "Utente",
                Role::Assistant => "Assistente",
                Role::System => "Sistema",
            };
            out.push_str(&format!("**{}**: {}\n\n", role, msg.content));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_append_only() {
        let mut mem = ConversationMemory::new();
        mem.push(Message::user("ciao"));
        mem.push(Message::assistant("salve"));
        assert_eq!(mem.len(), 2);
        assert_eq!(mem.messages()[0].content, "ciao");
        assert_eq!(mem.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn markdown_transcript_labels_roles() {
        let mut mem = ConversationMemory::new();
        mem.push(Message::user("crea un documento"));
        let md = mem.to_markdown();
        assert!(md.starts_with("**Utente**: crea un documento"));
    }
}

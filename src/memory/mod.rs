//! 会话记忆：消息与对话记录

pub mod conversation;

pub use conversation::{ConversationMemory, Message, Role};

//! 文档状态与执行记录
//!
//! DocumentState.content 是文档的唯一真相源：由 Session 独占持有，
//! 只有 Executor 在改写型能力返回后整体替换，Planner 永不触碰。

use serde::Serialize;

use crate::plan::PlanStep;

/// 文档状态：静止点（两次 run 之间）content 恒为一份完整的 Markdown 文档（可为空）
#[derive(Clone, Debug, Default)]
pub struct DocumentState {
    /// 当前文档全文（Markdown）
    pub content: String,
    /// 最近一次处理的用户指令
    pub last_instruction: String,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// 执行记录：(步骤原样, 结果文本)，追加后不再修改；审计 / 会话转写用，Planner 不回读
#[derive(Clone, Debug, Serialize)]
pub struct ExecutionRecord {
    pub step: PlanStep,
    pub result: String,
    /// 该步是否改写了文档（决定终态回答走文档还是走文本）
    pub mutated: bool,
}

/// 一轮 run 的终态回答：显式标签替代原先的字符串哨兵值，
/// 避免「合法回答恰好等于哨兵」被误路由。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// 回答即当前文档全文
    Document,
    /// 回答是一段文本（检索结果、解释、错误信息或会话回退）
    Message(String),
}

impl Default for Answer {
    fn default() -> Self {
        Answer::Message(String::new())
    }
}

//! SessionManager：会话的唯一入口
//!
//! 一个会话 = 一份 DocumentState + 一份对话记录 + 一份执行历史。
//! run(instruction) 同步跑完一轮（规划 -> 循环到 Done），任何逃逸异常在此边界
//! 折叠为回答文本；answer() 幂等、无副作用，两次 run 之间恒返回同一值。

use std::sync::Arc;

use uuid::Uuid;

use crate::capabilities::CapabilityRegistry;
use crate::llm::LlmClient;
use crate::memory::{ConversationMemory, Message};
use crate::plan::{
    run_plan, Answer, DocumentState, ExecutionRecord, InstructionPlanner, StepExecutor,
};

/// 会话管理器：独占持有文档状态；一次只处理一条指令，无并发 run
pub struct SessionManager {
    id: Uuid,
    planner: InstructionPlanner,
    executor: StepExecutor,
    registry: Arc<CapabilityRegistry>,
    document: DocumentState,
    conversation: ConversationMemory,
    history: Vec<ExecutionRecord>,
    answer: Answer,
}

impl SessionManager {
    pub fn new(llm: Arc<dyn LlmClient>, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            planner: InstructionPlanner::new(llm),
            executor: StepExecutor::new(registry.clone()),
            registry,
            document: DocumentState::new(),
            conversation: ConversationMemory::new(),
            history: Vec::new(),
            answer: Answer::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 处理一条指令：规划、执行到 Done、更新回答与对话记录。
    /// 本函数不返回 Err：会话级错误即回答文本（无独立错误通道，刻意取舍）。
    pub async fn run(&mut self, instruction: &str) {
        self.document.last_instruction = instruction.to_string();
        self.conversation.push(Message::user(instruction));

        self.answer = self.run_turn(instruction).await;

        let reply = self.answer_text();
        self.conversation.push(Message::assistant(reply));
    }

    async fn run_turn(&mut self, instruction: &str) -> Answer {
        let outcome = self.planner.plan(instruction, &self.registry).await;
        let mut plan = outcome.plan;

        tracing::info!(
            session = %self.id,
            steps = plan.len(),
            "Plan ready"
        );

        let last = run_plan(
            &self.executor,
            &mut self.document,
            &mut plan,
            &mut self.history,
        )
        .await;

        match last {
            // 终态回答 = 最后一条执行记录：改写型步骤指向文档本身，其余原样作为文本
            Some(record) if record.mutated => Answer::Document,
            Some(record) => Answer::Message(record.result),
            // 一步都没执行：回答是 Planner 的会话回退（若有）
            None => Answer::Message(outcome.fallback.unwrap_or_default()),
        }
    }

    /// 当前回答文本；幂等，可在两次 run 之间任意次调用
    pub fn answer_text(&self) -> String {
        match &self.answer {
            Answer::Document => self.document.content.clone(),
            Answer::Message(text) => text.clone(),
        }
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// 当前文档全文（Markdown）
    pub fn document(&self) -> &str {
        &self.document.content
    }

    pub fn conversation(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// 整段对话的 Markdown 转写（聊天导出用）
    pub fn conversation_markdown(&self) -> String {
        self.conversation.to_markdown()
    }

    /// 追加一条系统侧通知（导出完成等），进入对话记录
    pub fn push_system_note(&mut self, text: impl Into<String>) {
        self.conversation.push(Message::system(text));
    }

    /// 执行历史（审计用，追加式）
    pub fn execution_history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    /// 清空会话：文档、对话、历史与回答全部复位
    pub fn reset(&mut self) {
        self.document = DocumentState::new();
        self.conversation.clear();
        self.history.clear();
        self.answer = Answer::default();
    }
}

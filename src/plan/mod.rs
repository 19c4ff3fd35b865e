//! 编排核心：计划与执行
//!
//! 数据流：指令 -> InstructionPlanner -> Plan -> 控制循环 -> StepExecutor
//! -> （能力调用、文档变更）-> 回到控制循环 -> … -> 最终回答交给 SessionManager。
//! 一次 run 内严格串行，计划 FIFO 消费，每步使剩余计划恰好缩短一。

pub mod executor;
pub mod loop_;
pub mod planner;
pub mod session;
pub mod state;

pub use executor::StepExecutor;
pub use loop_::{loop_state, run_plan, LoopState};
pub use planner::{InstructionPlanner, Plan, PlanStep, PlannerOutcome};
pub use session::SessionManager;
pub use state::{Answer, DocumentState, ExecutionRecord};

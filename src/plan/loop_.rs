//! 控制循环
//!
//! 核心里唯一的控制流决策：每步执行后看剩余计划，非空则 Continue 再进 Executor，
//! 空则 Done 把控制权交回 SessionManager。显式迭代 + 可见终止谓词，不用递归
//! （长计划不吃栈深）。每步使计划严格缩短一，有限计划必然终止。

use crate::plan::{DocumentState, ExecutionRecord, Plan, StepExecutor};

/// 循环状态机的两个状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// 计划非空：继续执行
    Continue,
    /// 计划为空：终止，回答可供读取
    Done,
}

/// 转移规则：剩余计划非空 -> Continue，否则 Done（规划后立即求值一次得到初态）
pub fn loop_state(plan: &Plan) -> LoopState {
    if plan.is_empty() {
        LoopState::Done
    } else {
        LoopState::Continue
    }
}

/// 把整个计划跑到 Done：记录逐步追加进 history，返回最后一条记录的克隆
pub async fn run_plan(
    executor: &StepExecutor,
    state: &mut DocumentState,
    plan: &mut Plan,
    history: &mut Vec<ExecutionRecord>,
) -> Option<ExecutionRecord> {
    let mut last = None;

    while loop_state(plan) == LoopState::Continue {
        match executor.step(state, plan).await {
            Some(record) => {
                last = Some(record.clone());
                history.push(record);
            }
            // step 只在计划为空时返回 None，而 Continue 态计划必非空
            None => break,
        }
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanStep;

    #[test]
    fn empty_plan_is_done() {
        assert_eq!(loop_state(&Plan::new()), LoopState::Done);
    }

    #[test]
    fn nonempty_plan_continues() {
        let plan: Plan = vec![PlanStep::default()].into();
        assert_eq!(loop_state(&plan), LoopState::Continue);
    }
}

//! Executor：每次控制循环迭代消费计划的第一步
//!
//! 失败边界在这里：能力不存在、参数缺失、能力内部出错，一律折叠为结果文本并继续执行后续步骤。
//! 改写型能力的返回值整体替换文档内容（能力契约：永远返回完整文档，不返回 diff）。

use std::sync::Arc;

use serde_json::Value;

use crate::capabilities::CapabilityRegistry;
use crate::plan::{DocumentState, ExecutionRecord, Plan};

/// 逐步执行器：无自身状态，持有注册表引用
pub struct StepExecutor {
    registry: Arc<CapabilityRegistry>,
}

impl StepExecutor {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// 执行一步：空计划返回 None（no-op），否则弹出队首、解析能力、组装参数、
    /// 在失败边界内调用，并按能力类别更新文档。每次调用使计划恰好缩短一。
    pub async fn step(
        &self,
        state: &mut DocumentState,
        plan: &mut Plan,
    ) -> Option<ExecutionRecord> {
        let step = plan.pop_front()?;

        let Some(cap) = self.registry.get(&step.tool_name) else {
            let result = format!("Errore: Tool '{}' non trovato.", step.tool_name);
            tracing::warn!("{}", result);
            return Some(ExecutionRecord {
                step,
                result,
                mutated: false,
            });
        };

        tracing::info!(tool = %step.tool_name, "Executing plan step");

        // 参数组装：计划自带参数的浅拷贝 + 按声明注入当前文档
        let args = assemble_args(&step.args, cap.arg_names(), &state.content);

        let (result, ok) = match cap.execute(args).await {
            Ok(result) => (result, true),
            // 能力内部失败不致命：错误文本即结果，继续后续步骤
            Err(e) => (e, false),
        };

        let mutated = ok && cap.is_mutating();
        if mutated {
            state.content = result.clone();
        }

        Some(ExecutionRecord {
            step,
            result,
            mutated,
        })
    }
}

/// 参数组装：若能力声明了 documento_attuale / content 而计划未携带，则注入当前文档全文。
/// 这让 Planner 不必在每一步的 JSON 里扛着整份文档。
fn assemble_args(step_args: &Value, declared: &[&str], document: &str) -> Value {
    let mut map = match step_args {
        Value::Object(m) => m.clone(),
        _ => serde_json::Map::new(),
    };

    for key in ["documento_attuale", "content"] {
        if declared.contains(&key) && !map.contains_key(key) {
            map.insert(key.to_string(), Value::String(document.to_string()));
        }
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capability;
    use crate::plan::PlanStep;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// 记录型假能力：把每次调用 (名字, 参数) 推进共享日志
    struct RecordingCap {
        name: &'static str,
        args: &'static [&'static str],
        mutating: bool,
        output: Result<String, String>,
        log: Arc<Mutex<Vec<(String, Value)>>>,
    }

    #[async_trait]
    impl Capability for RecordingCap {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "fake"
        }
        fn arg_names(&self) -> &[&str] {
            self.args
        }
        fn is_mutating(&self) -> bool {
            self.mutating
        }
        async fn execute(&self, args: Value) -> Result<String, String> {
            self.log.lock().unwrap().push((self.name.to_string(), args));
            self.output.clone()
        }
    }

    fn make_step(name: &str, args: Value) -> PlanStep {
        PlanStep {
            tool_name: name.to_string(),
            args,
        }
    }

    fn setup(caps: Vec<RecordingCap>) -> StepExecutor {
        let mut reg = CapabilityRegistry::new();
        for cap in caps {
            reg.register(cap).unwrap();
        }
        StepExecutor::new(Arc::new(reg))
    }

    #[tokio::test]
    async fn empty_plan_is_a_noop() {
        let exec = setup(vec![]);
        let mut state = DocumentState::new();
        let mut plan = Plan::new();
        assert!(exec.step(&mut state, &mut plan).await.is_none());
        assert!(state.content.is_empty());
    }

    #[tokio::test]
    async fn steps_execute_in_fifo_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mk = |name| RecordingCap {
            name,
            args: &[],
            mutating: false,
            output: Ok("ok".into()),
            log: log.clone(),
        };
        let exec = setup(vec![mk("primo"), mk("secondo"), mk("terzo")]);

        let mut state = DocumentState::new();
        let mut plan: Plan = ["secondo", "primo", "terzo"]
            .iter()
            .map(|n| make_step(n, json!({})))
            .collect();

        while exec.step(&mut state, &mut plan).await.is_some() {}

        let order: Vec<String> = log.lock().unwrap().iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(order, vec!["secondo", "primo", "terzo"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_nonfatal_and_execution_continues() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = setup(vec![RecordingCap {
            name: "reale",
            args: &[],
            mutating: false,
            output: Ok("fatto".into()),
            log: log.clone(),
        }]);

        let mut state = DocumentState::new();
        let mut plan: Plan = vec![
            make_step("delete_everything", json!({})),
            make_step("reale", json!({})),
        ]
        .into();

        let rec = exec.step(&mut state, &mut plan).await.unwrap();
        assert_eq!(rec.result, "Errore: Tool 'delete_everything' non trovato.");
        assert!(!rec.mutated);

        let rec2 = exec.step(&mut state, &mut plan).await.unwrap();
        assert_eq!(rec2.result, "fatto");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn omitted_document_arg_is_injected_from_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = setup(vec![RecordingCap {
            name: "recupera",
            args: &["query", "documento_attuale"],
            mutating: false,
            output: Ok("sezioni".into()),
            log: log.clone(),
        }]);

        let mut state = DocumentState {
            content: "# Intro".to_string(),
            ..Default::default()
        };
        let mut plan: Plan = vec![make_step("recupera", json!({"query": "elenca"}))].into();

        exec.step(&mut state, &mut plan).await.unwrap();

        let (_, args) = log.lock().unwrap()[0].clone();
        assert_eq!(args["documento_attuale"], "# Intro");
        assert_eq!(args["query"], "elenca");
    }

    #[tokio::test]
    async fn explicit_arg_is_not_overwritten_by_injection() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = setup(vec![RecordingCap {
            name: "salva",
            args: &["filename", "content"],
            mutating: false,
            output: Ok("ok".into()),
            log: log.clone(),
        }]);

        let mut state = DocumentState {
            content: "documento".to_string(),
            ..Default::default()
        };
        let mut plan: Plan =
            vec![make_step("salva", json!({"filename": "x.md", "content": "esplicito"}))].into();

        exec.step(&mut state, &mut plan).await.unwrap();
        let (_, args) = log.lock().unwrap()[0].clone();
        assert_eq!(args["content"], "esplicito");
    }

    #[tokio::test]
    async fn mutating_result_replaces_document_wholesale() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = setup(vec![RecordingCap {
            name: "crea",
            args: &[],
            mutating: true,
            output: Ok("# Nuovo\n\ntesto".into()),
            log,
        }]);

        let mut state = DocumentState {
            content: "# Vecchio".to_string(),
            ..Default::default()
        };
        let mut plan: Plan = vec![make_step("crea", json!({}))].into();

        let rec = exec.step(&mut state, &mut plan).await.unwrap();
        assert!(rec.mutated);
        assert_eq!(state.content, "# Nuovo\n\ntesto");
    }

    #[tokio::test]
    async fn nonmutating_leaves_document_byte_identical() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = setup(vec![RecordingCap {
            name: "leggi",
            args: &[],
            mutating: false,
            output: Ok("risposta".into()),
            log,
        }]);

        let before = "# Intro\n\ncontenuto".to_string();
        let mut state = DocumentState {
            content: before.clone(),
            ..Default::default()
        };
        let mut plan: Plan = vec![make_step("leggi", json!({}))].into();

        exec.step(&mut state, &mut plan).await.unwrap();
        assert_eq!(state.content, before);
    }

    #[tokio::test]
    async fn capability_error_becomes_result_string() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = setup(vec![RecordingCap {
            name: "fragile",
            args: &[],
            mutating: true,
            output: Err("Errore interno".into()),
            log,
        }]);

        let mut state = DocumentState {
            content: "intatto".to_string(),
            ..Default::default()
        };
        let mut plan: Plan = vec![make_step("fragile", json!({}))].into();

        let rec = exec.step(&mut state, &mut plan).await.unwrap();
        assert_eq!(rec.result, "Errore interno");
        // 失败的改写型能力不得污染文档
        assert!(!rec.mutated);
        assert_eq!(state.content, "intatto");
    }
}

//! Planner：把自由指令翻译为有序的能力调用计划
//!
//! 单次 completion，无工具循环、无重试；一切失败都退化为空计划，
//! 解析失败时附带原始输出作为会话回退（如 "ciao" 会得到一段说明而非计划）。

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::CapabilityRegistry;
use crate::llm::LlmClient;
use crate::memory::Message;

/// 计划中的一步：{"tool_name": ..., "args": {...}}；字段缺失取默认值，
/// 空 tool_name 在 Executor 走「能力不存在」的非致命路径
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanStep {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// 计划：FIFO 消费，队首弹出，永不重排
pub type Plan = VecDeque<PlanStep>;

/// Planner 输出：计划 + 可选的会话回退文本（两者互斥地决定本轮走向）
#[derive(Debug, Default)]
pub struct PlannerOutcome {
    pub plan: Plan,
    pub fallback: Option<String>,
}

const PLANNER_PROMPT: &str = r#"Sei un pianificatore di task esperto. Il tuo compito è analizzare la richiesta dell'utente e scomporla in una sequenza di passi da eseguire usando i tool a tua disposizione.

# TOOL DISPONIBILI
{tools}

# ISTRUZIONI
- Analizza la richiesta e crea un piano step-by-step.
- Ogni passo del piano deve essere una chiamata a uno dei tool disponibili.
- Restituisci il piano come una lista JSON valida `[ ]`. IMPORTANTE: non inserire nulla prima e dopo le parentesi quadre. Ogni elemento della lista è un dizionario con due chiavi: "tool_name" (il nome del tool da usare) e "args" (un dizionario con gli argomenti per quel tool).
- Estrai gli argomenti direttamente dalla richiesta dell'utente.
- Se la richiesta è una semplice conversazione (es. "ciao"), spiega i tool che hai a disposizione.

# ESEMPIO
Richiesta: "Apri 'report_vecchio.md', cancella la sezione 'Note' e salva tutto come 'report_nuovo.md'."
Output:
[
    {"tool_name": "apri_file", "args": {"filename": "report_vecchio.md"}},
    {"tool_name": "modifica_documento", "args": {"comando": "cancella la sezione 'Note'"}},
    {"tool_name": "salva_file", "args": {"filename": "report_nuovo.md"}}
]
"#;

/// Planner：持有 LLM，plan() 保证不返回 Err
pub struct InstructionPlanner {
    llm: Arc<dyn LlmClient>,
}

impl InstructionPlanner {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// 规划一次：渲染目录 + 指令 -> 单次 completion -> 解析 JSON 数组
    pub async fn plan(&self, instruction: &str, registry: &CapabilityRegistry) -> PlannerOutcome {
        let prompt = PLANNER_PROMPT.replace("{tools}", &render_catalog(registry));
        let prompt = format!(
            "{}\n\n# RICHIESTA REALE\nRichiesta: \"{}\"\nOutput:",
            prompt, instruction
        );

        let raw = match self.llm.complete(&[Message::user(prompt)]).await {
            Ok(raw) => raw,
            Err(e) => {
                // 传输层失败也不上抛：空计划 + 错误文本作为回答
                tracing::warn!("Planner LLM call failed: {}", e);
                return PlannerOutcome {
                    plan: Plan::new(),
                    fallback: Some(format!("Errore del modello: {}", e)),
                };
            }
        };

        parse_plan(&raw)
    }
}

/// 目录渲染：按注册顺序逐行 `- nome: descrizione / Argomenti: [...]`，确定且保序
pub fn render_catalog(registry: &CapabilityRegistry) -> String {
    registry
        .list()
        .iter()
        .map(|cap| {
            format!(
                "- {}: {}\n  Argomenti: [{}]",
                cap.name(),
                cap.description(),
                cap.arg_names().join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 解析模型输出为计划
///
/// - 仅剥掉字面量 "```json" 前缀 + "```" 后缀这一种围栏（其余包装原样保留，已知局限）
/// - 合法 JSON 但顶层不是数组 -> 空计划（格式被忽略，不重试）
/// - 非法 JSON -> 空计划 + 原始输出作为会话回退
pub fn parse_plan(raw: &str) -> PlannerOutcome {
    let text = strip_json_fence(raw.trim());

    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("Plan JSON decode failed ({}), using raw output as reply", e);
            return PlannerOutcome {
                plan: Plan::new(),
                fallback: Some(raw.trim().to_string()),
            };
        }
    };

    let Value::Array(items) = value else {
        tracing::warn!("Planner returned valid JSON but not an array, ignoring");
        return PlannerOutcome::default();
    };

    let plan = items
        .into_iter()
        .map(|item| serde_json::from_value::<PlanStep>(item).unwrap_or_default())
        .collect();

    PlannerOutcome {
        plan,
        fallback: None,
    }
}

fn strip_json_fence(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("```json") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    text
}

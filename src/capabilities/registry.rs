//! 能力注册表
//!
//! 所有能力实现 Capability trait（name / description / arg_names / is_mutating / execute），
//! 由 CapabilityRegistry 在启动期一次性注册；同名重复注册直接报错，不允许静默覆盖。
//! list() 保持注册顺序，Planner 按此顺序渲染目录进提示词。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::AssistantError;

/// 能力 trait：名称、描述（供 LLM 理解）、声明参数名、是否改写文档、异步执行（args 为 JSON）
#[async_trait]
pub trait Capability: Send + Sync {
    /// 能力名称（计划 JSON 中的 "tool_name" 字段）
    fn name(&self) -> &str;

    /// 能力描述（渲染进 Planner 提示词）
    fn description(&self) -> &str;

    /// 声明的参数名，顺序稳定；Executor 据此判断是否注入当前文档
    fn arg_names(&self) -> &[&str];

    /// 改写型能力：其返回值整体替换当前文档内容
    fn is_mutating(&self) -> bool {
        false
    }

    /// 执行能力；错误以面向用户的文本返回，不抛异常
    async fn execute(&self, args: Value) -> Result<String, String>;
}

/// 能力注册表：注册顺序保存在 entries，index 提供按名查找
#[derive(Default)]
pub struct CapabilityRegistry {
    entries: Vec<Arc<dyn Capability>>,
    index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册能力；同名重复注册返回 DuplicateCapability（启动期失败优于运行期静默覆盖）
    pub fn register(&mut self, cap: impl Capability + 'static) -> Result<(), AssistantError> {
        let name = cap.name().to_string();
        if self.index.contains_key(&name) {
            return Err(AssistantError::DuplicateCapability(name));
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(Arc::new(cap));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.index.get(name).map(|&i| self.entries[i].clone())
    }

    /// 注册顺序稳定返回全部能力
    pub fn list(&self) -> &[Arc<dyn Capability>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedCap(&'static str);

    #[async_trait]
    impl Capability for NamedCap {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "test"
        }
        fn arg_names(&self) -> &[&str] {
            &[]
        }
        async fn execute(&self, _args: Value) -> Result<String, String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn duplicate_registration_fails_fast() {
        let mut reg = CapabilityRegistry::new();
        reg.register(NamedCap("apri_file")).unwrap();
        let err = reg.register(NamedCap("apri_file")).unwrap_err();
        assert!(matches!(err, AssistantError::DuplicateCapability(ref n) if n == "apri_file"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn list_preserves_registration_order() {
        let mut reg = CapabilityRegistry::new();
        reg.register(NamedCap("b")).unwrap();
        reg.register(NamedCap("a")).unwrap();
        reg.register(NamedCap("c")).unwrap();
        let names: Vec<&str> = reg.list().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn get_unknown_returns_none() {
        let reg = CapabilityRegistry::new();
        assert!(reg.get("inesistente").is_none());
    }
}

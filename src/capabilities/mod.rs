//! 能力目录
//!
//! 六个能力覆盖文档的创建 / 修改 / 检索 / 讲解 / 打开 / 保存；
//! 名称与参数名是 Planner 的线协议（与提示词中的目录一致），保持意大利语。

pub mod create_document;
pub mod explain;
pub mod modify_document;
pub mod open_file;
pub mod registry;
pub mod retrieve;
pub mod save_file;

pub use create_document::CreateDocumentCapability;
pub use explain::ExplainCapability;
pub use modify_document::ModifyDocumentCapability;
pub use open_file::OpenFileCapability;
pub use registry::{Capability, CapabilityRegistry};
pub use retrieve::RetrieveCapability;
pub use save_file::SaveFileCapability;

use std::path::{Path, PathBuf};

use serde_json::Value;

/// 取字符串参数；缺失或非字符串返回 None
pub(crate) fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

/// 必填参数缺失时的统一错误文本
pub(crate) fn missing_arg(key: &str) -> String {
    format!("Errore: argomento '{}' mancante.", key)
}

/// 文件名解析进工作目录沙箱：拒绝绝对路径与 ../ 逃逸
pub(crate) fn resolve_in_root(root: &Path, filename: &str) -> Result<PathBuf, String> {
    let name = filename.trim().trim_start_matches("./");
    if name.is_empty() {
        return Err(missing_arg("filename"));
    }
    let candidate = Path::new(name);
    if candidate.is_absolute()
        || candidate
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(format!("Errore: percorso '{}' non consentito.", filename));
    }
    Ok(root.join(candidate))
}

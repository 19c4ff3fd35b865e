//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `SCRIBA__*` 覆盖（双下划线表示嵌套，如 `SCRIBA__LLM__PROVIDER=openai`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub transcribe: TranscribeSection,
}

/// [app] 段：应用名与文档工作目录（apri_file / salva_file 的沙箱根）
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppSection {
    pub name: Option<String>,
    /// 文档目录，未设置时用 ./documenti
    pub workspace_root: Option<PathBuf>,
}

/// [llm] 段：后端选择与超时
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：mistral / openai；优先级由 API Key 与 provider 共同决定
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    #[serde(default)]
    pub mistral: LlmMistralSection,
    #[serde(default)]
    pub openai: LlmOpenAiSection,
    #[serde(default)]
    pub timeouts: LlmTimeoutsSection,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            mistral: LlmMistralSection::default(),
            openai: LlmOpenAiSection::default(),
            timeouts: LlmTimeoutsSection::default(),
        }
    }
}

fn default_provider() -> String {
    "mistral".to_string()
}

fn default_model() -> String {
    "mistral-small-latest".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LlmMistralSection {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LlmOpenAiSection {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LlmTimeoutsSection {
    #[serde(default = "default_request_timeout")]
    pub request: u64,
}

fn default_request_timeout() -> u64 {
    60
}

/// [export] 段：导出文件的输出目录
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExportSection {
    /// 未设置时与工作目录一致
    pub output_dir: Option<PathBuf>,
}

/// [transcribe] 段：语音转写端点（OpenAI 兼容 /audio/transcriptions）
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeSection {
    #[serde(default = "default_transcribe_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_transcribe_model")]
    pub model: String,
}

impl Default for TranscribeSection {
    fn default() -> Self {
        Self {
            endpoint: default_transcribe_endpoint(),
            model: default_transcribe_model(),
        }
    }
}

fn default_transcribe_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

fn default_transcribe_model() -> String {
    "whisper-1".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection::default(),
            llm: LlmSection::default(),
            export: ExportSection::default(),
            transcribe: TranscribeSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 SCRIBA__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 SCRIBA__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SCRIBA")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_mistral_provider() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.provider, "mistral");
        assert_eq!(cfg.llm.model, "mistral-small-latest");
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let cfg = load_config(None).unwrap_or_else(|_| AppConfig::default());
        assert_eq!(cfg.llm.timeouts.request, 60);
    }
}

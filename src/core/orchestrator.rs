//! 会话编排：主控接线
//!
//! 负责：加载配置、创建 LLM / 能力注册表 / SessionManager，建立 cmd/state 双通道，
//! 并在后台任务中消费用户命令（Submit/Transcribe/Export/Clear/Quit），驱动一轮轮 run 并投影 UiState。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::capabilities::{
    CapabilityRegistry, CreateDocumentCapability, ExplainCapability, ModifyDocumentCapability,
    OpenFileCapability, RetrieveCapability, SaveFileCapability,
};
use crate::config::{load_config, AppConfig};
use crate::core::{AssistantError, SessionPhase, UiState};
use crate::export::{export_document, ExportFormat};
use crate::llm::{create_mistral_client, LlmClient, MockLlmClient, OpenAiClient, TimeoutLlm};
use crate::memory::Message;
use crate::plan::SessionManager;
use crate::transcribe::AudioTranscriber;

/// 导出对象：当前文档或整段聊天转写
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Document,
    Chat,
}

/// 从 UI 发往编排器的用户命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 提交用户指令，触发一轮 run
    Submit(String),
    /// 转写 WAV 文件，成功后等同 Submit(转写文本)
    Transcribe(PathBuf),
    /// 导出文档或聊天为指定格式
    Export(ExportTarget, ExportFormat),
    /// 清空会话（文档 + 对话 + 历史）
    Clear,
    /// 退出应用
    Quit,
}

/// 根据配置与环境变量选择 LLM 后端（Mistral / OpenAI 兼容 / Mock），
/// 统一套上 [llm.timeouts] request 的请求超时
pub(crate) fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();
    let use_mistral = std::env::var("MISTRAL_API_KEY").is_ok()
        || (provider == "mistral" && std::env::var("OPENAI_API_KEY").is_ok());
    let use_openai = std::env::var("OPENAI_API_KEY").is_ok() && provider != "mistral";

    let backend: Arc<dyn LlmClient> = if use_mistral {
        let model = cfg
            .llm
            .mistral
            .model
            .clone()
            .unwrap_or_else(|| cfg.llm.model.clone());
        tracing::info!("Using Mistral LLM ({})", model);
        Arc::new(create_mistral_client(Some(&model)))
    } else if use_openai {
        let model = cfg
            .llm
            .openai
            .model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string());
        let base = cfg.llm.base_url.as_deref();
        tracing::info!("Using OpenAI LLM ({})", model);
        Arc::new(OpenAiClient::new(
            base,
            &model,
            std::env::var("OPENAI_API_KEY").ok().as_deref(),
        ))
    } else {
        tracing::warn!("No API key set or provider unknown, using Mock LLM");
        Arc::new(MockLlmClient)
    };

    Arc::new(TimeoutLlm::new(
        backend,
        Duration::from_secs(cfg.llm.timeouts.request),
    ))
}

/// 启动期构建能力目录：六个能力，固定注册顺序（同名重复注册在此直接失败）
pub fn build_registry(
    llm: Arc<dyn LlmClient>,
    workspace: &Path,
) -> Result<CapabilityRegistry, AssistantError> {
    let mut registry = CapabilityRegistry::new();
    registry.register(CreateDocumentCapability::new(llm.clone()))?;
    registry.register(ModifyDocumentCapability::new(llm.clone()))?;
    registry.register(RetrieveCapability::new(llm.clone()))?;
    registry.register(ExplainCapability::new(llm))?;
    registry.register(OpenFileCapability::new(workspace))?;
    registry.register(SaveFileCapability::new(workspace))?;
    Ok(registry)
}

/// 创建会话运行时：返回命令发送端与状态接收端；后台任务消费命令并更新 state。
pub async fn create_session(
    config_path: Option<PathBuf>,
) -> anyhow::Result<(mpsc::UnboundedSender<Command>, watch::Receiver<UiState>)> {
    let cfg = load_config(config_path).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    // 文档目录：配置 > 当前目录下的 documenti
    let workspace = cfg
        .app
        .workspace_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("documenti"));
    std::fs::create_dir_all(&workspace).ok();
    let export_dir = cfg.export.output_dir.clone().unwrap_or_else(|| workspace.clone());

    let llm = create_llm_from_config(&cfg);
    let registry = Arc::new(build_registry(llm.clone(), &workspace)?);
    let transcriber = AudioTranscriber::new(
        cfg.transcribe.endpoint.clone(),
        cfg.transcribe.model.clone(),
        Duration::from_secs(cfg.llm.timeouts.request),
    );
    let app_name = cfg.app.name.clone().unwrap_or_else(|| "Scriba".to_string());

    let llm_handle = llm.clone();
    let mut session = SessionManager::new(llm, registry);
    tracing::info!(session = %session.id(), "Session created");

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let (state_tx, state_rx) = watch::channel(UiState::default());

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Submit(input) => {
                    let _ = state_tx.send(project(&session, &llm_handle, &app_name, SessionPhase::Working, Some(&input), None));
                    session.run(&input).await;
                    let _ = state_tx.send(project(&session, &llm_handle, &app_name, SessionPhase::Idle, None, None));
                }
                Command::Transcribe(path) => {
                    let _ = state_tx.send(project(&session, &llm_handle, &app_name, SessionPhase::Working, None, None));
                    match transcriber.transcribe_wav_file(&path).await {
                        Ok(text) => {
                            session.run(&text).await;
                            let _ = state_tx.send(project(&session, &llm_handle, &app_name, SessionPhase::Idle, None, None));
                        }
                        Err(e) => {
                            let _ = state_tx.send(project(
                                &session,
                                &llm_handle,
                                &app_name,
                                SessionPhase::Error,
                                None,
                                Some(e.to_string()),
                            ));
                        }
                    }
                }
                Command::Export(target, format) => {
                    let result = export_to_dir(&session, &export_dir, target, format);
                    match result {
                        Ok(path) => {
                            session.push_system_note(format!(
                                "Esportazione completata: {}",
                                path.display()
                            ));
                            let _ = state_tx.send(project(&session, &llm_handle, &app_name, SessionPhase::Idle, None, None));
                        }
                        Err(e) => {
                            let _ = state_tx.send(project(
                                &session,
                                &llm_handle,
                                &app_name,
                                SessionPhase::Error,
                                None,
                                Some(e.to_string()),
                            ));
                        }
                    }
                }
                Command::Clear => {
                    session.reset();
                    let _ = state_tx.send(project(&session, &llm_handle, &app_name, SessionPhase::Idle, None, None));
                }
                Command::Quit => break,
            }
        }
    });

    Ok((cmd_tx, state_rx))
}

/// 导出到输出目录，文件名带时间戳；返回写入路径
fn export_to_dir(
    session: &SessionManager,
    export_dir: &Path,
    target: ExportTarget,
    format: ExportFormat,
) -> Result<PathBuf, AssistantError> {
    let (stem, markdown) = match target {
        ExportTarget::Document => ("documento", session.document().to_string()),
        ExportTarget::Chat => ("chat", session.conversation_markdown()),
    };

    let bytes = export_document(&markdown, format).map_err(AssistantError::ExportFailed)?;
    let filename = format!(
        "{}_{}.{}",
        stem,
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = export_dir.join(filename);
    std::fs::create_dir_all(export_dir).map_err(|e| AssistantError::ExportFailed(e.to_string()))?;
    std::fs::write(&path, bytes).map_err(|e| AssistantError::ExportFailed(e.to_string()))?;
    tracing::info!("Exported {} as {} to {}", stem, format, path.display());
    Ok(path)
}

/// 把会话状态投影为 UiState；pending 是尚未进入对话记录的在途用户输入
fn project(
    session: &SessionManager,
    llm: &Arc<dyn LlmClient>,
    app_name: &str,
    phase: SessionPhase,
    pending: Option<&str>,
    error: Option<String>,
) -> UiState {
    let mut history: Vec<Message> = session.conversation().to_vec();
    if let Some(text) = pending {
        history.push(Message::user(text));
    }
    UiState {
        app_name: app_name.to_string(),
        input_locked: phase == SessionPhase::Working,
        phase,
        history,
        document: session.document().to_string(),
        error_message: error,
        token_usage: llm.token_usage(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedLlmClient;
    use async_trait::async_trait;

    struct MeteredLlm;

    #[async_trait]
    impl LlmClient for MeteredLlm {
        async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
            Ok(String::new())
        }

        fn token_usage(&self) -> (u64, u64, u64) {
            (7, 3, 10)
        }
    }

    #[test]
    fn projection_carries_app_name_and_token_usage() {
        let llm: Arc<dyn LlmClient> = Arc::new(MeteredLlm);
        let registry = Arc::new(CapabilityRegistry::new());
        let session = SessionManager::new(llm.clone(), registry);

        let state = project(&session, &llm, "Scriba", SessionPhase::Idle, None, None);

        assert_eq!(state.app_name, "Scriba");
        assert_eq!(state.token_usage, (7, 3, 10));
        assert!(!state.input_locked);
    }

    #[tokio::test]
    async fn quit_command_shuts_down_the_session_task() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("scriba.toml");
        std::fs::write(
            &cfg_path,
            format!(
                "[app]\nworkspace_root = \"{}\"\n",
                dir.path().join("documenti").display()
            ),
        )
        .unwrap();

        let (cmd_tx, mut state_rx) = create_session(Some(cfg_path)).await.unwrap();
        cmd_tx.send(Command::Quit).unwrap();

        // 后台任务退出后 state 发送端被丢弃，changed() 以 Err 收尾
        assert!(state_rx.changed().await.is_err());
        assert!(cmd_tx.send(Command::Clear).is_err());
    }

    #[tokio::test]
    async fn registry_rejects_a_second_registration_of_the_same_name() {
        let llm: Arc<dyn LlmClient> = Arc::new(ScriptedLlmClient::new(Vec::<String>::new()));
        let dir = tempfile::tempdir().unwrap();
        let mut registry = build_registry(llm.clone(), dir.path()).unwrap();
        let err = registry
            .register(OpenFileCapability::new(dir.path()))
            .unwrap_err();
        assert!(matches!(err, AssistantError::DuplicateCapability(_)));
    }
}

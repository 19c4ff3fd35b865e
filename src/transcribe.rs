//! 语音转写输入适配器
//!
//! 把 WAV 字节发给 OpenAI 兼容的 /audio/transcriptions 端点（whisper 系），取回纯文本指令。
//! 对核心而言这只是「产生一条指令字符串」的另一条路，音频编解码不在范围内。

use crate::core::AssistantError;

/// 转写客户端：端点 + 模型 + 可选 Bearer Key
pub struct AudioTranscriber {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl AudioTranscriber {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            client,
        }
    }

    /// 转写一段 WAV 音频为文本
    pub async fn transcribe_wav(&self, wav_bytes: Vec<u8>) -> Result<String, AssistantError> {
        let part = reqwest::multipart::Part::bytes(wav_bytes)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| AssistantError::TranscriptionFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssistantError::TranscriptionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssistantError::TranscriptionFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AssistantError::TranscriptionFailed(e.to_string()))?;

        body.get("text")
            .and_then(|t| t.as_str())
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                AssistantError::TranscriptionFailed("risposta senza campo 'text'".to_string())
            })
    }

    /// 从磁盘读 WAV 并转写（TUI 的 /audio 命令用）
    pub async fn transcribe_wav_file(&self, path: &std::path::Path) -> Result<String, AssistantError> {
        if path.extension().and_then(|e| e.to_str()) != Some("wav") {
            return Err(AssistantError::TranscriptionFailed(format!(
                "'{}' non è un file .wav",
                path.display()
            )));
        }
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AssistantError::TranscriptionFailed(e.to_string()))?;
        self.transcribe_wav(bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_wav_extension_is_rejected_before_any_network_io() {
        let t = AudioTranscriber::new(
            "http://127.0.0.1:9/v1/audio/transcriptions",
            "whisper-1",
            std::time::Duration::from_secs(1),
        );
        let err = t
            .transcribe_wav_file(std::path::Path::new("nota.mp3"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non è un file .wav"));
    }
}

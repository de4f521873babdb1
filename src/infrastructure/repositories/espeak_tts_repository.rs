use super::tts_repository::TtsRepository;
use crate::domain::conversion::SynthesisError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Engine name reported in synthesis errors
const ENGINE: &str = "espeak-ng";

/// Local espeak-ng implementation of TTS repository.
/// The whole text is handed to the engine in a single run.
pub struct EspeakTtsRepository {
    binary: String,
    voice: String,
    rate: u32,
}

impl EspeakTtsRepository {
    pub fn new(binary: String, voice: String, rate: u32) -> Self {
        Self {
            binary,
            voice,
            rate,
        }
    }

    async fn run_espeak(&self, text: &str, output_path: &Path) -> Result<(), String> {
        // A stale output from an earlier conversion must not pass for this run's result
        if let Err(e) = tokio::fs::remove_file(output_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(format!("Failed to replace previous output: {}", e));
            }
        }

        let mut child = Command::new(&self.binary)
            .arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(self.rate.to_string())
            .arg("-w")
            .arg(output_path)
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to start {}: {}", self.binary, e))?;

        // Feed stdin concurrently so a chatty engine cannot block on a full stderr pipe
        let stdin_task = child.stdin.take().map(|mut stdin| {
            let text = text.to_owned();
            tokio::spawn(async move {
                stdin.write_all(text.as_bytes()).await?;
                stdin.shutdown().await
            })
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| format!("Failed to wait for {}: {}", self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            ));
        }

        if let Some(task) = stdin_task {
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(format!("Failed to send text to engine: {}", e)),
                Err(e) => return Err(format!("Failed to send text to engine: {}", e)),
            }
        }

        if !tokio::fs::try_exists(output_path).await.unwrap_or(false) {
            return Err(format!("{} produced no audio file", self.binary));
        }

        Ok(())
    }
}

#[async_trait]
impl TtsRepository for EspeakTtsRepository {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, SynthesisError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice = %self.voice,
            rate = self.rate,
            text_length = text.len(),
            "Starting espeak-ng synthesis"
        );

        self.run_espeak(text, output_path).await.map_err(|reason| {
            tracing::error!(error = %reason, binary = %self.binary, "espeak-ng synthesis failed");
            SynthesisError::new(ENGINE, reason)
        })?;

        tracing::info!(
            provider = "espeak-ng",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            output = %output_path.display(),
            "TTS synthesis completed"
        );

        Ok(output_path.to_path_buf())
    }
}

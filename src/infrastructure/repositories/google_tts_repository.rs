use super::tts_repository::TtsRepository;
use crate::domain::conversion::SynthesisError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Engine name reported in synthesis errors
const ENGINE: &str = "gTTS";

/// Default number of characters per chunk file
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Default number of characters the translate endpoint accepts per request
pub const DEFAULT_MAX_REQUEST_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct GoogleTtsSettings {
    pub base_url: String,
    pub language: String,
    pub chunk_size: usize,
    pub max_request_chars: usize,
    /// Parent directory of the per-synthesis scratch directory (OS temp dir when unset)
    pub scratch_dir: Option<PathBuf>,
}

impl Default for GoogleTtsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            language: "en".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_request_chars: DEFAULT_MAX_REQUEST_CHARS,
            scratch_dir: None,
        }
    }
}

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    settings: GoogleTtsSettings,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client, settings: GoogleTtsSettings) -> Self {
        Self { client, settings }
    }

    pub fn with_timeout(
        timeout: Duration,
        settings: GoogleTtsSettings,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, settings))
    }

    /// Split text into consecutive chunks of at most `max_chars` characters.
    /// No overlap, no boundary detection; concatenating the chunks yields the input.
    pub fn split_text_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
        let max_chars = max_chars.max(1);
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (index, _) in text.char_indices() {
            if count == max_chars {
                chunks.push(&text[start..index]);
                start = index;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            chunks.push(&text[start..]);
        }

        chunks
    }

    /// Split a chunk into request-sized segments on whitespace.
    /// Words longer than `max_chars` are split by characters.
    fn split_into_requests(chunk: &str, max_chars: usize) -> Vec<String> {
        let max_chars = max_chars.max(1);
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for word in chunk.split_whitespace() {
            let word_len = word.chars().count();

            if word_len > max_chars {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                segments.extend(
                    Self::split_text_into_chunks(word, max_chars)
                        .into_iter()
                        .map(str::to_string),
                );
                continue;
            }

            let needed = if current.is_empty() { word_len } else { word_len + 1 };
            if current_len + needed > max_chars {
                segments.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Call the translate endpoint for a single segment
    async fn call_google(&self, segment: &str, index: usize, total: usize) -> Result<Vec<u8>, String> {
        let url = format!("{}/translate_tts", self.settings.base_url.trim_end_matches('/'));

        tracing::debug!(
            segment_index = index,
            segment_total = total,
            text_length = segment.len(),
            "Calling Google Translate TTS"
        );

        let total = total.to_string();
        let idx = index.to_string();
        let textlen = segment.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.settings.language.as_str()),
                ("q", segment),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    segment_index = index,
                    "Google Translate TTS request failed"
                );
                format!("Google Translate TTS error: {}", e)
            })?;

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read audio stream: {}", e))?;

        Ok(audio.to_vec())
    }

    /// Synthesize one chunk into its own file
    async fn synthesize_chunk(&self, chunk: &str, chunk_path: &Path) -> Result<u64, String> {
        let segments = Self::split_into_requests(chunk, self.settings.max_request_chars);
        let mut file = tokio::fs::File::create(chunk_path)
            .await
            .map_err(|e| format!("Failed to create chunk file: {}", e))?;

        let mut written = 0u64;
        for (index, segment) in segments.iter().enumerate() {
            let audio = self.call_google(segment, index, segments.len()).await?;
            file.write_all(&audio)
                .await
                .map_err(|e| format!("Failed to write chunk file: {}", e))?;
            written += audio.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| format!("Failed to write chunk file: {}", e))?;

        Ok(written)
    }

    /// Concatenate chunk files byte for byte, in order
    async fn merge_chunks(chunk_files: &[PathBuf], output_path: &Path) -> Result<u64, String> {
        let mut output = tokio::fs::File::create(output_path)
            .await
            .map_err(|e| format!("Failed to create output file: {}", e))?;

        let mut total = 0u64;
        for chunk_path in chunk_files {
            let mut chunk = tokio::fs::File::open(chunk_path)
                .await
                .map_err(|e| format!("Failed to open chunk file: {}", e))?;
            total += tokio::io::copy(&mut chunk, &mut output)
                .await
                .map_err(|e| format!("Failed to merge chunk file: {}", e))?;
        }

        output
            .flush()
            .await
            .map_err(|e| format!("Failed to write output file: {}", e))?;

        Ok(total)
    }

    fn create_scratch_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("tts-chunks-");
        match &self.settings.scratch_dir {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
    }

    async fn synthesize_in_scratch(&self, text: &str, output_path: &Path) -> Result<usize, String> {
        let chunks = Self::split_text_into_chunks(text, self.settings.chunk_size);

        // Removed on drop, whichever way this function returns
        let scratch = self
            .create_scratch_dir()
            .map_err(|e| format!("Failed to create scratch directory: {}", e))?;

        let mut chunk_files = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            // A chunk boundary can isolate a run of blanks, which has nothing to speak
            if chunk.trim().is_empty() {
                tracing::debug!(chunk_index = index, "Skipping blank chunk");
                continue;
            }

            let chunk_path = scratch.path().join(format!("chunk_{}.mp3", index));
            let written = self.synthesize_chunk(chunk, &chunk_path).await?;

            tracing::info!(
                chunk_index = index,
                chunk_chars = chunk.chars().count(),
                chunk_bytes = written,
                "Chunk synthesized"
            );
            chunk_files.push(chunk_path);
        }

        let total = Self::merge_chunks(&chunk_files, output_path).await?;
        tracing::debug!(audio_size_bytes = total, "Chunks merged");

        Ok(chunks.len())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, SynthesisError> {
        let start_time = std::time::Instant::now();

        if text.trim().is_empty() {
            return Err(SynthesisError::new(ENGINE, "No text to speak"));
        }

        tracing::info!(
            language = %self.settings.language,
            chunk_size = self.settings.chunk_size,
            text_length = text.len(),
            "Starting Google Translate TTS synthesis"
        );

        let chunk_count = self
            .synthesize_in_scratch(text, output_path)
            .await
            .map_err(|reason| SynthesisError::new(ENGINE, reason))?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "google",
            latency_ms = duration.as_millis(),
            characters_count = text.chars().count(),
            chunk_count = chunk_count,
            output = %output_path.display(),
            "TTS synthesis completed"
        );

        Ok(output_path.to_path_buf())
    }
}

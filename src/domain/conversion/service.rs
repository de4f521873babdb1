use super::backend::SynthesisBackend;
use super::error::ConversionError;
use super::filename::{output_file_name, sanitize_file_name};
use crate::infrastructure::pdf::PdfTextExtractor;
use crate::infrastructure::repositories::{FileRepository, TtsRepository};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// An uploaded document waiting to be converted
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Filename as supplied by the client, unsanitized
    pub file_name: String,
    pub data: Vec<u8>,
    pub backend: SynthesisBackend,
}

#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Download name of the audio file (`<stem>.mp3`)
    pub file_name: String,
    pub audio_path: PathBuf,
    pub audio_data: Vec<u8>,
    pub backend: SynthesisBackend,
    pub char_count: usize,
}

pub struct ConversionService {
    storage: Arc<FileRepository>,
    extractor: PdfTextExtractor,
    local_tts: Arc<dyn TtsRepository>,
    networked_tts: Arc<dyn TtsRepository>,
}

impl ConversionService {
    pub fn new(
        storage: Arc<FileRepository>,
        extractor: PdfTextExtractor,
        local_tts: Arc<dyn TtsRepository>,
        networked_tts: Arc<dyn TtsRepository>,
    ) -> Self {
        Self {
            storage,
            extractor,
            local_tts,
            networked_tts,
        }
    }

    fn tts_for(&self, backend: SynthesisBackend) -> &Arc<dyn TtsRepository> {
        match backend {
            SynthesisBackend::Local => &self.local_tts,
            SynthesisBackend::Networked => &self.networked_tts,
        }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Convert an uploaded PDF into an audio file
    ///
    /// This operation:
    /// - Stores the upload under a sanitized name
    /// - Extracts the text of every page
    /// - Synthesizes the text with the requested backend into the outputs area
    ///
    /// Returns the audio data along with its download name
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConversionError>;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConversionError> {
        if request.file_name.is_empty() {
            return Err(ConversionError::EmptyFileName);
        }

        // 1. Persist the upload
        let stored_name = sanitize_file_name(&request.file_name);
        tracing::info!(
            original_name = %request.file_name,
            stored_name = %stored_name,
            size_bytes = request.data.len(),
            backend = %request.backend,
            "Conversion request"
        );
        let pdf_path = self.storage.save_upload(&stored_name, &request.data).await?;

        // 2. Extract text
        let text = self.extractor.extract_text(&pdf_path).await?;
        let char_count = text.chars().count();

        // 3. Synthesize into the outputs area
        let output_name = output_file_name(&stored_name);
        let output_path = self.storage.output_path(&output_name);
        let audio_path = self
            .tts_for(request.backend)
            .synthesize(&text, &output_path)
            .await?;

        // 4. Load the produced file for the response
        let audio_data = self.storage.read_output(&audio_path).await?;

        tracing::info!(
            output_name = %output_name,
            backend = %request.backend,
            char_count = char_count,
            audio_size_bytes = audio_data.len(),
            "Conversion completed"
        );

        Ok(ConversionResult {
            file_name: output_name,
            audio_path,
            audio_data,
            backend: request.backend,
            char_count,
        })
    }
}

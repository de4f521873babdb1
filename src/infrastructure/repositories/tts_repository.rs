use crate::domain::conversion::SynthesisError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech engine (local espeak-ng, Google Translate TTS, ...)
///
/// Implementations are responsible for:
/// - Handling engine-specific text length limitations
/// - Splitting text into chunks if needed
/// - Writing a single audio file to the requested path
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech into `output_path`
    ///
    /// Returns the path of the written audio file
    ///
    /// # Arguments
    /// * `text` - The extracted document text
    /// * `output_path` - Destination of the audio file, overwritten if present
    ///
    /// # Errors
    /// Returns error if synthesis fails or the engine is unavailable
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, SynthesisError>;
}

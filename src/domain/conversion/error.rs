use crate::error::AppError;

/// Message returned when the multipart body carries no `pdf_file` part
pub const NO_FILE_UPLOADED: &str = "Error: No PDF file uploaded.";
/// Message returned when the `pdf_file` part has an empty filename
pub const NO_FILE_SELECTED: &str = "Error: No selected file.";

/// Text extraction failure. The message always starts with `Error`.
#[derive(Debug, thiserror::Error)]
#[error("Error: Failed to extract text from PDF. {0}")]
pub struct ExtractionError(pub String);

/// Speech synthesis failure for a given engine. The message always starts with `Error`.
#[derive(Debug, thiserror::Error)]
#[error("Error: Failed to convert text to audio with {engine}. {reason}")]
pub struct SynthesisError {
    pub engine: &'static str,
    pub reason: String,
}

impl SynthesisError {
    pub fn new(engine: &'static str, reason: impl Into<String>) -> Self {
        Self {
            engine,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{}", NO_FILE_UPLOADED)]
    MissingFile,
    #[error("{}", NO_FILE_SELECTED)]
    EmptyFileName,
    #[error("Error: Failed to read upload. {0}")]
    InvalidUpload(String),
    #[error("Error: Upload too large. {0}")]
    UploadTooLarge(String),
    #[error("Error: Failed to store file. {0}")]
    Storage(#[from] std::io::Error),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::MissingFile
            | ConversionError::EmptyFileName
            | ConversionError::InvalidUpload(_) => AppError::BadRequest(err.to_string()),
            ConversionError::UploadTooLarge(_) => AppError::PayloadTooLarge(err.to_string()),
            ConversionError::Synthesis(_) => AppError::ExternalService(err.to_string()),
            ConversionError::Storage(_)
            | ConversionError::Extraction(_) => AppError::Internal(err.to_string()),
        }
    }
}

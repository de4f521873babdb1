use axum::{
    body::Body,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension,
};
use std::sync::Arc;
use tracing::Instrument;

use crate::{
    domain::conversion::{
        ConversionError, ConversionRequest, ConversionService, ConversionServiceApi,
        SynthesisBackend,
    },
    error::{AppError, AppResult},
    infrastructure::http::RequestId,
};

/// Multipart field carrying the PDF
const PDF_FIELD: &str = "pdf_file";
/// Multipart field selecting the networked backend
const BACKEND_FIELD: &str = "use_gtts";

pub struct ConvertController {
    conversion_service: Arc<ConversionService>,
}

/// Upload pulled out of the multipart body
struct UploadForm {
    /// `None` when no `pdf_file` file part was sent
    file: Option<(String, Vec<u8>)>,
    use_gtts: Option<String>,
}

impl ConvertController {
    pub fn new(conversion_service: Arc<ConversionService>) -> Self {
        Self { conversion_service }
    }

    /// POST /convert - Convert an uploaded PDF to an audio attachment
    pub async fn convert(
        State(controller): State<Arc<ConvertController>>,
        Extension(request_id): Extension<RequestId>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let span = tracing::info_span!("convert", request_id = %request_id);
        Self::handle(controller, multipart).instrument(span).await
    }

    async fn handle(
        controller: Arc<ConvertController>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        // A body that is not multipart cannot carry a file part
        let multipart = multipart.map_err(|rejection| {
            tracing::debug!(rejection = %rejection, "Request body is not multipart");
            ConversionError::MissingFile
        })?;
        let form = read_upload_form(multipart).await?;

        let (file_name, data) = form.file.ok_or(ConversionError::MissingFile)?;
        let backend = SynthesisBackend::from_form_value(form.use_gtts.as_deref());

        let result = controller
            .conversion_service
            .convert(ConversionRequest {
                file_name,
                data,
                backend,
            })
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            content_disposition(&result.file_name)?,
        );
        headers.insert("x-character-count", HeaderValue::from(result.char_count));
        headers.insert(
            "x-synthesis-backend",
            HeaderValue::from_static(result.backend.as_str()),
        );

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}

/// Read the form fields; every other field is drained and ignored
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ConversionError> {
    let mut form = UploadForm {
        file: None,
        use_gtts: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            PDF_FIELD => {
                // A part without a filename is a plain form value, not an uploaded file
                let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
                    tracing::debug!("pdf_file part carries no filename, ignoring");
                    continue;
                };
                let data = field.bytes().await.map_err(invalid_upload)?;
                tracing::debug!(file_name = %file_name, size_bytes = data.len(), "Received PDF upload");
                form.file = Some((file_name, data.to_vec()));
            }
            BACKEND_FIELD => {
                form.use_gtts = Some(field.text().await.map_err(invalid_upload)?);
            }
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

fn invalid_upload(err: MultipartError) -> ConversionError {
    tracing::error!(error = %err, "Failed to read multipart body");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ConversionError::UploadTooLarge(err.body_text())
    } else {
        ConversionError::InvalidUpload(err.body_text())
    }
}

/// Attachment header for an already sanitized file name
fn content_disposition(file_name: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|e| AppError::Internal(format!("Error: Invalid download name. {}", e)))
}

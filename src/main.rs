use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use pdf_audio_backend::controllers::convert::ConvertController;
use pdf_audio_backend::domain::conversion::ConversionService;
use pdf_audio_backend::infrastructure::config::{Config, LogFormat};
use pdf_audio_backend::infrastructure::http::{build_router, start_http_server};
use pdf_audio_backend::infrastructure::pdf::PdfTextExtractor;
use pdf_audio_backend::infrastructure::repositories::{
    EspeakTtsRepository, FileRepository, GoogleTtsRepository, GoogleTtsSettings,
};
use pdf_audio_backend::infrastructure::retention::spawn_retention_sweeper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PDF Audio Backend on {}:{}",
        config.host,
        config.port
    );

    if config.is_development() {
        tracing::debug!(config = ?config, "Loaded configuration");
    }

    // Prepare storage areas
    let storage = Arc::new(FileRepository::new(
        config.upload_dir.clone(),
        config.output_dir.clone(),
    ));
    storage.ensure_directories().await?;
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        output_dir = %config.output_dir.display(),
        "Storage directories ready"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate TTS repositories
    tracing::info!("Instantiating TTS repositories...");
    let local_tts = Arc::new(EspeakTtsRepository::new(
        config.espeak_bin.clone(),
        config.espeak_voice.clone(),
        config.espeak_rate,
    ));
    let networked_tts = Arc::new(GoogleTtsRepository::with_timeout(
        Duration::from_secs(config.gtts_timeout_secs),
        GoogleTtsSettings {
            base_url: config.gtts_base_url.clone(),
            language: config.gtts_lang.clone(),
            chunk_size: config.gtts_chunk_size,
            max_request_chars: config.gtts_max_request_chars,
            scratch_dir: config.scratch_dir.clone(),
        },
    )?);

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let conversion_service = Arc::new(ConversionService::new(
        storage.clone(),
        PdfTextExtractor::new(),
        local_tts,
        networked_tts,
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let convert_controller = Arc::new(ConvertController::new(conversion_service));

    // Background cleanup of uploads and outputs
    if config.retention_enabled() {
        spawn_retention_sweeper(
            storage,
            Duration::from_secs(config.retention_sweep_interval_secs.max(1)),
            Duration::from_secs(config.file_retention_secs),
        );
        tracing::info!(
            retention_secs = config.file_retention_secs,
            sweep_interval_secs = config.retention_sweep_interval_secs,
            "Retention sweeper started"
        );
    } else {
        tracing::warn!("File retention disabled, uploads and outputs will accumulate");
    }

    let app = build_router(convert_controller, config.max_upload_bytes);
    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pdf_audio_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pdf_audio_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

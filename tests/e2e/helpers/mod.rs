use pdf_audio_backend::controllers::convert::ConvertController;
use pdf_audio_backend::domain::conversion::ConversionService;
use pdf_audio_backend::infrastructure::http::build_router;
use pdf_audio_backend::infrastructure::pdf::PdfTextExtractor;
use pdf_audio_backend::infrastructure::repositories::{
    FileRepository, GoogleTtsRepository, GoogleTtsSettings,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use wiremock::MockServer;


use api_client::TestClient;
use tts_mocks::{create_failing_google_tts, create_mock_google_tts, FakeLocalTts};

/// Upload limit used by the test server
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Small enough that a few sentences span several chunks and requests
pub const TEST_CHUNK_SIZE: usize = 40;
pub const TEST_MAX_REQUEST_CHARS: usize = 20;

/// How the engines behind a test server should behave
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub local_fails: bool,
    pub remote_fails: bool,
}

pub struct TestApp {
    pub client: TestClient,
    pub local_tts: Arc<FakeLocalTts>,
    pub google: MockServer,
    root: TempDir,
}

impl TestApp {
    pub fn upload_dir(&self) -> PathBuf {
        self.root.path().join("uploads")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("outputs")
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.root.path().join("scratch")
    }

    /// Number of requests the remote engine received
    pub async fn google_requests(&self) -> usize {
        self.google
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

/// Start a server on an ephemeral port with isolated storage
pub async fn spawn_app(options: AppOptions) -> TestApp {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let scratch_dir = root.path().join("scratch");
    std::fs::create_dir_all(&scratch_dir).expect("Failed to create scratch dir");

    let storage = Arc::new(FileRepository::new(
        root.path().join("uploads"),
        root.path().join("outputs"),
    ));
    storage
        .ensure_directories()
        .await
        .expect("Failed to create storage directories");

    let local_tts = Arc::new(if options.local_fails {
        FakeLocalTts::failing()
    } else {
        FakeLocalTts::new()
    });

    let google = if options.remote_fails {
        create_failing_google_tts().await
    } else {
        create_mock_google_tts().await
    };
    let networked_tts = Arc::new(GoogleTtsRepository::new(
        reqwest::Client::new(),
        GoogleTtsSettings {
            base_url: google.uri(),
            language: "en".to_string(),
            chunk_size: TEST_CHUNK_SIZE,
            max_request_chars: TEST_MAX_REQUEST_CHARS,
            scratch_dir: Some(scratch_dir),
        },
    ));

    let conversion_service = Arc::new(ConversionService::new(
        storage,
        PdfTextExtractor::new(),
        local_tts.clone(),
        networked_tts,
    ));
    let convert_controller = Arc::new(ConvertController::new(conversion_service));
    let app = build_router(convert_controller, TEST_MAX_UPLOAD_BYTES);

    // Start server
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        client: TestClient::new(&base_url),
        local_tts,
        google,
        root,
    }
}

pub struct TestContext {
    pub app: TestApp,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            Self {
                app: spawn_app(AppOptions::default()).await,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Temp directories are removed when TestApp is dropped
        }
    }
}

/// Names of the entries directly inside `dir`
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

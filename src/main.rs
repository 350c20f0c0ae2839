use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use ghotokbari::config::{Settings, StorageBackend};
use ghotokbari::core::MatchSelector;
use ghotokbari::routes::{self, AppState};
use ghotokbari::services::{
    BlobStorage, CloudinaryClient, ObjectStoreClient, ProfileStore, SessionStore, UploadBackend,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Ghotokbari service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the profile store (runs migrations)
    let store = Arc::new(
        ProfileStore::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!(
        "Profile store initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    // Initialize blob storage backends
    let cloudinary = CloudinaryClient::new(
        settings.storage.cloudinary.cloud_name,
        settings.storage.cloudinary.api_key,
        settings.storage.cloudinary.api_secret,
        settings.storage.cloudinary.folder,
    );
    let object_store = ObjectStoreClient::new(
        settings.storage.object_store.base_url,
        settings.storage.object_store.bucket,
        settings.storage.object_store.token,
    );
    let upload_backend = match settings.storage.backend {
        StorageBackend::Cloudinary => UploadBackend::Cloudinary,
        StorageBackend::ObjectStore => UploadBackend::ObjectStore,
    };
    let blob = Arc::new(BlobStorage::new(upload_backend, cloudinary, object_store));

    info!("Blob storage initialized ({:?} uploads)", upload_backend);

    // Initialize the session store
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        settings.session.ttl_secs,
    )));

    info!("Session store initialized (TTL: {}s)", settings.session.ttl_secs);

    // Initialize the match selector
    let selector = Arc::new(Mutex::new(MatchSelector::new()));

    // Build application state
    let app_state = AppState {
        store,
        blob,
        sessions,
        selector,
        cookie_name: settings.session.cookie_name,
        session_ttl_secs: settings.session.ttl_secs,
        max_upload_bytes: settings.upload.max_file_size_bytes,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

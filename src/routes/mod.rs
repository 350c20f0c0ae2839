// Route exports
pub mod auth;
pub mod files;
pub mod matching;
pub mod options;
pub mod profiles;

use crate::core::MatchSelector;
use crate::models::{DatabaseHealthResponse, ErrorResponse};
use crate::services::{BlobStorage, ProfileStore, SessionStore};
use actix_web::http::StatusCode;
use actix_web::{dev, error::ResponseError, web, FromRequest, HttpRequest, HttpResponse, Responder};
use std::future::{ready, Ready};
use std::sync::{Arc, Mutex};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub blob: Arc<BlobStorage>,
    pub sessions: Arc<SessionStore>,
    pub selector: Arc<Mutex<MatchSelector>>,
    pub cookie_name: String,
    pub session_ttl_secs: u64,
    pub max_upload_bytes: usize,
}

/// Rejection for requests without a live admin session
#[derive(Debug)]
pub struct AuthenticationRequired;

impl std::fmt::Display for AuthenticationRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Authentication required")
    }
}

impl ResponseError for AuthenticationRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: "Authentication required".to_string(),
            status_code: 401,
        })
    }
}

/// Extractor gating a handler on a live admin session cookie
#[derive(Debug)]
pub struct AdminSession {
    pub user_id: i32,
    pub token: String,
}

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let session = req.app_data::<web::Data<AppState>>().and_then(|state| {
            let cookie = req.cookie(&state.cookie_name)?;
            let user_id = state.sessions.get(cookie.value())?;
            Some(AdminSession {
                user_id,
                token: cookie.value().to_string(),
            })
        });

        ready(session.ok_or_else(|| AuthenticationRequired.into()))
    }
}

/// Configure all application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(auth::configure)
            .configure(profiles::configure)
            .configure(matching::configure)
            .configure(options::configure)
            .configure(files::configure)
            .route("/health/database", web::get().to(database_health)),
    );
}

/// Database health monitoring endpoint
async fn database_health(state: web::Data<AppState>, _session: AdminSession) -> impl Responder {
    let healthy = state.store.health_check().await.unwrap_or(false);
    let status = if healthy { "healthy" } else { "unhealthy" };

    HttpResponse::Ok().json(DatabaseHealthResponse {
        status: status.to_string(),
        storage_type: "PostgreSQL".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

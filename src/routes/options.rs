use crate::models::{CustomOptionRequest, ErrorResponse, MessageResponse};
use crate::routes::{AdminSession, AppState};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure custom form option routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/custom-options/{field_type}", web::get().to(list_options))
        .route("/custom-options", web::post().to(create_option))
        .route("/custom-options/{id}", web::delete().to(delete_option));
}

/// List stored options for a form field type
///
/// GET /api/custom-options/{fieldType}
async fn list_options(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<String>,
) -> impl Responder {
    let field_type = path.into_inner();

    match state.store.get_custom_options(&field_type).await {
        Ok(options) => HttpResponse::Ok().json(options),
        Err(e) => {
            tracing::error!("Failed to fetch custom options for {}: {}", field_type, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "options_error".to_string(),
                message: "Failed to fetch custom options".to_string(),
                status_code: 500,
            })
        }
    }
}

/// Store a new option
///
/// POST /api/custom-options
async fn create_option(
    state: web::Data<AppState>,
    _session: AdminSession,
    req: web::Json<CustomOptionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .store
        .create_custom_option(&req.field_type, &req.value)
        .await
    {
        Ok(option) => HttpResponse::Created().json(option),
        Err(e) => {
            tracing::error!("Custom option creation error: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "options_error".to_string(),
                message: "Failed to create custom option".to_string(),
                status_code: 400,
            })
        }
    }
}

/// Delete an option by id
///
/// DELETE /api/custom-options/{id}
async fn delete_option(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<i32>,
) -> impl Responder {
    match state.store.delete_custom_option(path.into_inner()).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Custom option deleted successfully")),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: "Custom option not found".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Custom option deletion error: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "options_error".to_string(),
                message: "Failed to delete custom option".to_string(),
                status_code: 500,
            })
        }
    }
}

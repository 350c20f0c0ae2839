use crate::models::{ErrorResponse, Profile};
use crate::routes::{AdminSession, AppState};
use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};

const IMMUTABLE_CACHE: &str = "public, max-age=31536000";

/// Configure file serving routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/files/{key:.*}", web::get().to(serve_object))
        .route("/serve-file/{kind}/{id}", web::get().to(serve_profile_file))
        .route(
            "/profiles/{id}/download-document",
            web::get().to(download_document),
        );
}

/// Content type derived from a filename extension.
fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

fn file_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "not_found".to_string(),
        message: "File not found".to_string(),
        status_code: 404,
    })
}

/// Stream an object-store blob by key
///
/// GET /api/files/{key}
async fn serve_object(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let key = path.into_inner();
    tracing::debug!("File request for: {}", key);

    match state.blob.download_key(&key).await {
        Ok(data) => HttpResponse::Ok()
            .content_type(content_type_for(&key))
            .insert_header((header::CACHE_CONTROL, IMMUTABLE_CACHE))
            .body(data),
        Err(e) => {
            tracing::warn!("Failed to serve file {}: {}", key, e);
            file_not_found()
        }
    }
}

fn file_reference(profile: &Profile, kind: &str) -> Option<(String, String)> {
    match kind {
        "profile-picture" => profile.profile_picture.clone().map(|url| {
            let name = profile
                .profile_picture_original
                .clone()
                .unwrap_or_else(|| format!("profile_{}.jpg", profile.id));
            (url, name)
        }),
        "document" => profile.document.clone().map(|url| {
            let name = profile
                .document_original
                .clone()
                .unwrap_or_else(|| format!("document_{}.pdf", profile.id));
            (url, name)
        }),
        _ => None,
    }
}

/// Serve a profile's picture or document
///
/// GET /api/serve-file/{kind}/{id}
///
/// CDN-hosted files redirect to their delivery URL; object-store files are
/// streamed with a content type derived from the original filename.
async fn serve_profile_file(
    state: web::Data<AppState>,
    path: web::Path<(String, i32)>,
) -> impl Responder {
    let (kind, profile_id) = path.into_inner();

    let profile = match state.store.get_profile(profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: "Profile not found".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile {}: {}", profile_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "file_error".to_string(),
                message: "Failed to serve file".to_string(),
                status_code: 500,
            });
        }
    };

    let Some((url, filename)) = file_reference(&profile, &kind) else {
        return file_not_found();
    };

    if url.contains("cloudinary.com") {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, url))
            .finish();
    }

    match state.blob.download(&url).await {
        Ok(data) => {
            let mut response = HttpResponse::Ok();
            response
                .content_type(content_type_for(&filename))
                .insert_header((header::CACHE_CONTROL, IMMUTABLE_CACHE));

            if kind == "document" {
                response.insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ));
            }

            response.body(data)
        }
        Err(e) => {
            tracing::warn!("Failed to serve {} for profile {}: {}", kind, profile_id, e);
            file_not_found()
        }
    }
}

/// Download a profile's document with its original filename
///
/// GET /api/profiles/{id}/download-document
async fn download_document(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<i32>,
) -> impl Responder {
    let profile_id = path.into_inner();
    tracing::debug!("Download request for profile: {}", profile_id);

    let profile = match state.store.get_profile(profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: "Profile not found".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile {}: {}", profile_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "file_error".to_string(),
                message: "Failed to download document".to_string(),
                status_code: 500,
            });
        }
    };

    let Some(reference) = profile.document.clone() else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: "No document found for this profile".to_string(),
            status_code: 404,
        });
    };

    let filename = profile
        .document_original
        .clone()
        .unwrap_or_else(|| format!("document_{}.pdf", profile.id));

    match state.blob.download(&reference).await {
        Ok(data) => HttpResponse::Ok()
            .content_type(content_type_for(&filename))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ))
            .insert_header((header::CACHE_CONTROL, "no-cache"))
            .body(data),
        Err(e) => {
            tracing::error!(
                "Failed to download document for profile {}: {}",
                profile_id,
                e
            );
            file_not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("photo.png"), "image/png");
        assert_eq!(content_type_for("biodata.pdf"), "application/pdf");
        assert_eq!(content_type_for("biodata.doc"), "application/msword");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}

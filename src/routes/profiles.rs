use crate::models::{ErrorResponse, Gender, MessageResponse, NewProfile, ProfileSearchQuery};
use crate::routes::{AdminSession, AppState};
use crate::services::UploadKind;
use actix_multipart::{Field, Multipart};
use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;
use std::collections::HashMap;
use thiserror::Error;

const PROFILE_PICTURE_FIELD: &str = "profilePicture";
const DOCUMENT_FIELD: &str = "document";

const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Configure profile CRUD routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::get().to(list_profiles))
        .route("/profiles/search", web::get().to(search_profiles))
        .route("/profiles/stats", web::get().to(profile_stats))
        .route("/profiles", web::post().to(create_profile))
        .route("/profiles/{id}", web::patch().to(update_profile))
        .route("/profiles/{id}", web::delete().to(delete_profile));
}

#[derive(Debug, Error)]
enum FormError {
    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("File exceeds the {0} byte upload limit")]
    TooLarge(usize),

    #[error("Only image files are allowed for profile pictures")]
    InvalidPictureType,

    #[error("Only PDF and DOC files are allowed for documents")]
    InvalidDocumentType,

    #[error("Invalid field name: {0}")]
    UnknownFileField(String),

    #[error("Form field {0} is not valid UTF-8")]
    InvalidText(String),
}

struct UploadedFile {
    data: Vec<u8>,
    filename: String,
}

/// Parsed multipart profile form: text fields plus the optional uploads.
struct ProfileForm {
    fields: HashMap<String, String>,
    profile_picture: Option<UploadedFile>,
    document: Option<UploadedFile>,
}

async fn read_field(field: &mut Field, max_bytes: usize) -> Result<Vec<u8>, FormError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| FormError::Multipart(e.to_string()))?;
        if data.len() + chunk.len() > max_bytes {
            return Err(FormError::TooLarge(max_bytes));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn collect_profile_form(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<ProfileForm, FormError> {
    let mut form = ProfileForm {
        fields: HashMap::new(),
        profile_picture: None,
        document: None,
    };

    while let Some(next) = payload.next().await {
        let mut field = next.map_err(|e| FormError::Multipart(e.to_string()))?;

        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let filename = disposition.get_filename().map(|f| f.to_string());
        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let data = read_field(&mut field, max_bytes).await?;

        match filename {
            Some(filename) => match name.as_str() {
                PROFILE_PICTURE_FIELD => {
                    if !content_type.starts_with("image/") {
                        return Err(FormError::InvalidPictureType);
                    }
                    form.profile_picture = Some(UploadedFile { data, filename });
                }
                DOCUMENT_FIELD => {
                    if !DOCUMENT_CONTENT_TYPES.contains(&content_type.as_str()) {
                        return Err(FormError::InvalidDocumentType);
                    }
                    form.document = Some(UploadedFile { data, filename });
                }
                other => return Err(FormError::UnknownFileField(other.to_string())),
            },
            None => {
                let value = String::from_utf8(data).map_err(|_| FormError::InvalidText(name.clone()))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// Build a profile row from the text fields of a multipart form.
fn parse_profile_fields(fields: &HashMap<String, String>) -> Result<NewProfile, String> {
    let required = |key: &str| {
        fields
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| format!("{} is required", key))
    };
    let optional = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();

    let name = required("name")?;
    let height = required("height")?;

    let age: i32 = required("age")?
        .parse()
        .map_err(|_| "age must be a number".to_string())?;
    let birth_year: i32 = required("birthYear")?
        .parse()
        .map_err(|_| "birthYear must be a number".to_string())?;

    let gender = match fields.get("gender").map(String::as_str) {
        Some("Male") => Gender::Male,
        Some("Female") => Gender::Female,
        _ => return Err("gender must be Male or Female".to_string()),
    };

    Ok(NewProfile {
        name,
        age,
        gender,
        profession: optional("profession"),
        qualification: optional("qualification"),
        marital_status: optional("maritalStatus"),
        religion: optional("religion"),
        height,
        birth_year,
        profile_picture: None,
        profile_picture_original: None,
        document: None,
        document_original: None,
    })
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_profile".to_string(),
        message: message.into(),
        status_code: 400,
    })
}

fn server_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "profile_error".to_string(),
        message: message.into(),
        status_code: 500,
    })
}

fn profile_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "not_found".to_string(),
        message: "Profile not found".to_string(),
        status_code: 404,
    })
}

/// List all profiles, newest first
///
/// GET /api/profiles
async fn list_profiles(state: web::Data<AppState>, _session: AdminSession) -> impl Responder {
    match state.store.get_all_profiles().await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => {
            tracing::error!("Failed to fetch profiles: {}", e);
            server_error("Failed to fetch profiles")
        }
    }
}

/// Search profiles by query-string filters
///
/// GET /api/profiles/search?gender=Male&profession=doctor&birthYear=1995
async fn search_profiles(
    state: web::Data<AppState>,
    _session: AdminSession,
    query: web::Query<ProfileSearchQuery>,
) -> impl Responder {
    match state.store.search_profiles(&query).await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => {
            tracing::error!("Failed to search profiles: {}", e);
            server_error("Failed to search profiles")
        }
    }
}

/// Aggregate profile counts
///
/// GET /api/profiles/stats
async fn profile_stats(state: web::Data<AppState>, _session: AdminSession) -> impl Responder {
    match state.store.get_profile_stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            tracing::error!("Failed to fetch profile statistics: {}", e);
            server_error("Failed to fetch profile statistics")
        }
    }
}

/// Create a profile from a multipart form
///
/// POST /api/profiles
///
/// Text fields: name, age, gender, profession, qualification,
/// maritalStatus, religion, height, birthYear.
/// File fields: profilePicture (image), document (PDF/DOC).
async fn create_profile(
    state: web::Data<AppState>,
    _session: AdminSession,
    payload: Multipart,
) -> impl Responder {
    let form = match collect_profile_form(payload, state.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut profile = match parse_profile_fields(&form.fields) {
        Ok(profile) => profile,
        Err(message) => return bad_request(message),
    };

    if let Some(file) = form.profile_picture {
        match state
            .blob
            .upload(file.data, UploadKind::ProfilePicture, &file.filename)
            .await
        {
            Ok(url) => {
                tracing::info!("Profile picture uploaded: {}", url);
                profile.profile_picture = Some(url);
                profile.profile_picture_original = Some(file.filename);
            }
            Err(e) => {
                tracing::error!("Profile picture upload error: {}", e);
                return server_error("Failed to upload profile picture");
            }
        }
    }

    if let Some(file) = form.document {
        match state
            .blob
            .upload(file.data, UploadKind::Document, &file.filename)
            .await
        {
            Ok(url) => {
                tracing::info!("Document uploaded: {}", url);
                profile.document = Some(url);
                profile.document_original = Some(file.filename);
            }
            Err(e) => {
                tracing::error!("Document upload error: {}", e);
                return server_error("Failed to upload document");
            }
        }
    }

    match state.store.create_profile(&profile).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => {
            tracing::error!("Profile creation error: {}", e);
            server_error("Failed to create profile")
        }
    }
}

/// Update a profile from a multipart form
///
/// PATCH /api/profiles/{id}
///
/// File fields not present in the form carry over from the existing row;
/// replaced files have their old blobs deleted best-effort.
async fn update_profile(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<i32>,
    payload: Multipart,
) -> impl Responder {
    let profile_id = path.into_inner();

    let existing = match state.store.get_profile(profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return profile_not_found(),
        Err(e) => {
            tracing::error!("Failed to fetch profile {}: {}", profile_id, e);
            return server_error("Failed to update profile");
        }
    };

    let form = match collect_profile_form(payload, state.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut profile = match parse_profile_fields(&form.fields) {
        Ok(profile) => profile,
        Err(message) => return bad_request(message),
    };

    profile.profile_picture = existing.profile_picture.clone();
    profile.profile_picture_original = existing.profile_picture_original.clone();
    profile.document = existing.document.clone();
    profile.document_original = existing.document_original.clone();

    if let Some(file) = form.profile_picture {
        match state
            .blob
            .upload(file.data, UploadKind::ProfilePicture, &file.filename)
            .await
        {
            Ok(url) => {
                if let Some(old) = &existing.profile_picture {
                    if let Err(e) = state.blob.delete(old).await {
                        tracing::warn!("Failed to delete old profile picture {}: {}", old, e);
                    }
                }
                profile.profile_picture = Some(url);
                profile.profile_picture_original = Some(file.filename);
            }
            Err(e) => {
                tracing::error!("Profile picture upload error: {}", e);
                return server_error("Failed to upload profile picture");
            }
        }
    }

    if let Some(file) = form.document {
        match state
            .blob
            .upload(file.data, UploadKind::Document, &file.filename)
            .await
        {
            Ok(url) => {
                if let Some(old) = &existing.document {
                    if let Err(e) = state.blob.delete(old).await {
                        tracing::warn!("Failed to delete old document {}: {}", old, e);
                    }
                }
                profile.document = Some(url);
                profile.document_original = Some(file.filename);
            }
            Err(e) => {
                tracing::error!("Document upload error: {}", e);
                return server_error("Failed to upload document");
            }
        }
    }

    match state.store.update_profile(profile_id, &profile).await {
        Ok(Some(updated)) => HttpResponse::Ok().json(updated),
        Ok(None) => profile_not_found(),
        Err(e) => {
            tracing::error!("Profile update error: {}", e);
            server_error("Failed to update profile")
        }
    }
}

/// Delete a profile and its stored files
///
/// DELETE /api/profiles/{id}
async fn delete_profile(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<i32>,
) -> impl Responder {
    let profile_id = path.into_inner();

    let profile = match state.store.get_profile(profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return profile_not_found(),
        Err(e) => {
            tracing::error!("Failed to fetch profile {}: {}", profile_id, e);
            return server_error("Failed to delete profile");
        }
    };

    for reference in [&profile.profile_picture, &profile.document]
        .into_iter()
        .flatten()
    {
        match state.blob.delete(reference).await {
            Ok(true) => tracing::info!("Deleted stored file: {}", reference),
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to delete stored file {}: {}", reference, e),
        }
    }

    match state.store.delete_profile(profile_id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Profile deleted successfully")),
        Ok(false) => server_error("Failed to delete profile from database"),
        Err(e) => {
            tracing::error!("Profile deletion error: {}", e);
            server_error("Failed to delete profile")
        }
    }
}

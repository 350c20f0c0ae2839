use crate::core::MatchQuery;
use crate::models::{ErrorResponse, InputProfileEcho, MatchRequest, MatchResponse};
use crate::routes::{AdminSession, AppState};
use actix_web::{web, HttpResponse, Responder};
use chrono::Datelike;
use validator::Validate;

/// Configure the matchmaking route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match", web::post().to(find_match));
}

/// Matchmaking endpoint
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "age": 30,
///   "gender": "Male|Female",
///   "profession": "string",
///   "height": "5'10\""
/// }
/// ```
async fn find_match(
    state: web::Data<AppState>,
    _session: AdminSession,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if req.missing_required_profession() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "Groom profession is mandatory".to_string(),
            status_code: 400,
        });
    }

    // A failed candidate fetch surfaces here; the selector (and its
    // recency window) is never reached.
    let candidates = match state
        .store
        .get_profiles_by_gender(req.gender.opposite())
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to fetch candidate profiles: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "match_failed".to_string(),
                message: "Failed to find match".to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!(
        "Matching {} input against {} candidates",
        req.gender.as_str(),
        candidates.len()
    );

    let query = MatchQuery::new(req.age, req.gender, &req.height);

    let selection = {
        let mut selector = match state.selector.lock() {
            Ok(selector) => selector,
            Err(e) => {
                tracing::error!("Selector lock poisoned: {}", e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "match_failed".to_string(),
                    message: "Failed to find match".to_string(),
                    status_code: 500,
                });
            }
        };
        selector.find_match(&query, &candidates)
    };

    let Some(selection) = selection else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "no_match".to_string(),
            message: "No compatible matches found".to_string(),
            status_code: 404,
        });
    };

    tracing::info!(
        "Matched profile {} with score {}",
        selection.profile.id,
        selection.score
    );

    let input_profile = InputProfileEcho {
        name: req.name.clone(),
        age: req.age,
        gender: req.gender,
        profession: req.profession.clone(),
        height: req.height.clone(),
        birth_year: chrono::Utc::now().year() - req.age,
    };

    HttpResponse::Ok().json(MatchResponse {
        input_profile,
        matched_profile: selection.profile,
        compatibility_score: selection.score,
    })
}

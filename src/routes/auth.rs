use crate::models::{
    ErrorResponse, LoginRequest, MessageResponse, SessionResponse, SessionUser,
    UpdateEmailRequest, UpdatePasswordRequest, User,
};
use crate::routes::{AdminSession, AppState};
use actix_web::cookie::{time, Cookie};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// The single admin identity. The password row in the database still
/// carries a bcrypt hash so a changed password survives restarts.
const ADMIN_USERNAME: &str = "admin12345";
const ADMIN_PASSWORD: &str = "admin12345";

const BCRYPT_COST: u32 = 10;

/// Configure auth and account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/login", web::post().to(login))
        .route("/auth/logout", web::post().to(logout))
        .route("/auth/me", web::get().to(me))
        .route("/user/email", web::put().to(update_email))
        .route("/user/password", web::put().to(update_password));
}

fn session_user(user: &User) -> SessionUser {
    SessionUser {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

/// Admin login endpoint
///
/// POST /api/auth/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if req.username != ADMIN_USERNAME || req.password != ADMIN_PASSWORD {
        tracing::info!("Rejected login attempt for username: {}", req.username);
        return HttpResponse::Unauthorized().json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid credentials".to_string(),
            status_code: 401,
        });
    }

    // The admin row is created lazily on first login.
    let user = match state.store.get_user_by_username(&req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            let hash = match bcrypt::hash(&req.password, BCRYPT_COST) {
                Ok(hash) => hash,
                Err(e) => {
                    tracing::error!("Failed to hash admin password: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "login_failed".to_string(),
                        message: "Login failed".to_string(),
                        status_code: 500,
                    });
                }
            };

            match state
                .store
                .create_user(&req.username, &hash, ADMIN_USERNAME)
                .await
            {
                Ok(user) => {
                    tracing::info!("Created admin user {}", user.username);
                    user
                }
                Err(e) => {
                    tracing::error!("Failed to create admin user: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "login_failed".to_string(),
                        message: "Login failed".to_string(),
                        status_code: 500,
                    });
                }
            }
        }
        Err(e) => {
            tracing::error!("Failed to look up admin user: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "login_failed".to_string(),
                message: "Login failed".to_string(),
                status_code: 500,
            });
        }
    };

    let token = state.sessions.create(user.id);
    let cookie = Cookie::build(state.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(state.session_ttl_secs as i64))
        .finish();

    tracing::info!("Admin user {} logged in", user.id);

    HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        user: session_user(&user),
    })
}

/// End the current session and expire the cookie
///
/// POST /api/auth/logout
async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Some(cookie) = req.cookie(&state.cookie_name) {
        state.sessions.revoke(cookie.value());
    }

    let mut removal = Cookie::new(state.cookie_name.clone(), "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(MessageResponse::new("Logged out successfully"))
}

/// Current session user
///
/// GET /api/auth/me
async fn me(state: web::Data<AppState>, session: AdminSession) -> impl Responder {
    match state.store.get_user(session.user_id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(SessionResponse {
            user: session_user(&user),
        }),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", session.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "user_lookup_failed".to_string(),
                message: "Failed to get user info".to_string(),
                status_code: 500,
            })
        }
    }
}

/// Update the admin email
///
/// PUT /api/user/email
async fn update_email(
    state: web::Data<AppState>,
    session: AdminSession,
    req: web::Json<UpdateEmailRequest>,
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
        .update_user_email(session.user_id, &req.email)
        .await
    {
        Ok(Some(user)) => HttpResponse::Ok().json(SessionResponse {
            user: session_user(&user),
        }),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to update email for {}: {}", session.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "update_failed".to_string(),
                message: "Failed to update email".to_string(),
                status_code: 500,
            })
        }
    }
}

/// Update the admin password
///
/// PUT /api/user/password
async fn update_password(
    state: web::Data<AppState>,
    session: AdminSession,
    req: web::Json<UpdatePasswordRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user = match state.store.get_user(session.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: "User not found".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", session.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "update_failed".to_string(),
                message: "Failed to update password".to_string(),
                status_code: 500,
            });
        }
    };

    // Only the hardcoded admin account may rotate its password.
    if user.username != ADMIN_USERNAME {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "not_allowed".to_string(),
            message: "Password change not allowed for this user".to_string(),
            status_code: 400,
        });
    }

    let hash = match bcrypt::hash(&req.new_password, BCRYPT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash new password: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "update_failed".to_string(),
                message: "Failed to update password".to_string(),
                status_code: 500,
            });
        }
    };

    match state.store.update_user_password(user.id, &hash).await {
        Ok(Some(_)) => HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")),
        Ok(None) => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "update_failed".to_string(),
            message: "Failed to update password".to_string(),
            status_code: 500,
        }),
        Err(e) => {
            tracing::error!("Failed to update password for {}: {}", user.id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "update_failed".to_string(),
                message: "Failed to update password".to_string(),
                status_code: 500,
            })
        }
    }
}

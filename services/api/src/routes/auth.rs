//! Registration, login, and profile handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest};
use crate::state::AppState;
use crate::validation;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Registration attempt for: {}", payload.correo);

    validation::validate_email(&payload.correo).map_err(ApiError::BadRequest)?;
    validation::validate_password(&payload.contrasena).map_err(ApiError::BadRequest)?;

    let user = state.user_repository.create(&payload).await.map_err(|e| {
        error!("Failed to register user: {}", e);
        ApiError::Internal(e)
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log a user in and issue a bearer token
///
/// Unknown email and mismatched password produce the identical 401
/// payload, to avoid account enumeration.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for: {}", payload.correo);

    let user = state
        .user_repository
        .find_by_email(&payload.correo)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::InvalidCredential("Credenciales inválidas".to_string()))?;

    let valid = state
        .user_repository
        .verify_password(&user, &payload.contrasena)
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::Internal(e)
        })?;

    if !valid {
        return Err(ApiError::InvalidCredential(
            "Credenciales inválidas".to_string(),
        ));
    }

    let token = state
        .jwt_service
        .issue(user.id_user, user.admin)
        .map_err(|e| {
            error!("Failed to issue token: {}", e);
            ApiError::Internal(e)
        })?;

    Ok(Json(LoginResponse {
        token,
        user: user.to_login_user(),
    }))
}

/// Read the authenticated user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .user_repository
        .profile(auth_user.id)
        .await
        .map_err(|e| {
            error!("Failed to read profile: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))?;

    Ok(Json(profile))
}

/// Update the authenticated user's profile
///
/// An absent password leaves the stored hash unchanged.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    if let Some(plaintext) = &payload.contrasena {
        validation::validate_password(plaintext).map_err(ApiError::BadRequest)?;
    }

    let profile = state
        .user_repository
        .update_profile(auth_user.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update profile: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))?;

    Ok(Json(profile))
}

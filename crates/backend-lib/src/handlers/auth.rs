// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use metrics::counter;
use payments_common::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role};
use std::sync::Arc;

use crate::auth;
use crate::error::AppError;
use crate::metrics as keys;
use crate::store::{Store, UserRecord};
use crate::validation;
use crate::AppState;

/// `POST /auth/register`
///
/// Gated on the startup-time registration flag before anything else looks
/// at the payload. New credentials get the strong password policy and the
/// default role; there is no way to register as anything but an employee.
pub async fn register<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if !state.settings.registration_enabled {
        return Err(AppError::RegistrationDisabled);
    }

    validation::validate_username(&body.username)?;
    validation::validate_strong_password(&body.password)?;

    // argon2 is CPU-bound; keep it off the request scheduler
    let cost = state.settings.hash_cost.clone();
    let password = body.password;
    let hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, &cost))
        .await
        .map_err(|e| AppError::Internal(format!("hash worker: {e}")))?
        .map_err(|e| AppError::Internal(format!("hashing: {e}")))?;

    let record = UserRecord::new(body.username, hash, Role::Employee);
    state.store.create_user(&record).await?;

    counter!(keys::AUTH_REGISTERED).increment(1);
    tracing::info!(username = %record.username, "user registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { ok: true })))
}

/// `POST /auth/login`
///
/// Unknown username and wrong password return the same error, and the
/// unknown-username path still verifies against a fixed dummy hash so the
/// two failures cost the same.
pub async fn login<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // shape failures at login collapse into the generic credential error;
    // a malformed username or password is just a login that cannot succeed
    if validation::validate_username(&body.username).is_err()
        || validation::validate_login_password(&body.password).is_err()
    {
        counter!(keys::AUTH_LOGIN_FAILED).increment(1);
        return Err(AppError::InvalidCredentials);
    }

    let user = state.store.find_user(&body.username).await?;
    let hash = user
        .as_ref()
        .map_or_else(|| state.dummy_hash.clone(), |u| u.password_hash.clone());

    let password = body.password;
    let verified = tokio::task::spawn_blocking(move || auth::verify_password(&hash, &password))
        .await
        .map_err(|e| AppError::Internal(format!("verify worker: {e}")))?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            counter!(keys::AUTH_LOGIN_FAILED).increment(1);
            tracing::info!("login failed");
            return Err(AppError::InvalidCredentials);
        },
    };

    let token = state
        .tokens
        .issue(&user.id.to_string(), &user.username, user.role, Utc::now())?;

    counter!(keys::AUTH_LOGIN_SUCCESS).increment(1);
    tracing::info!(username = %user.username, "login succeeded");
    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}

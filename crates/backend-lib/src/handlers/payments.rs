// ============================
// crates/backend-lib/src/handlers/payments.rs
// ============================
//! Payment handlers. Every route here sits behind the bearer middleware;
//! field validation runs before any record is touched.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use metrics::counter;
use payments_common::{Payment, PaymentRequest, PaymentStatus};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::AppError;
use crate::metrics as keys;
use crate::store::Store;
use crate::AppState;
use crate::validation;

/// How many records `GET /payments` returns at most
const LIST_LIMIT: usize = 200;

/// `GET /payments` — newest first, capped
pub async fn list<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    claims: Claims,
) -> Result<Json<Vec<Payment>>, AppError> {
    tracing::debug!(actor = %claims.username, "listing payments");
    let payments = state.store.list_payments(LIST_LIMIT).await?;
    Ok(Json(payments))
}

/// `POST /payments` — create a pending payment after validating every field
pub async fn create<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    claims: Claims,
    Json(body): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    validation::validate_account_number(&body.account_number)?;
    validation::validate_amount(&body.amount)?;
    validation::validate_currency(&body.currency)?;
    validation::validate_swift(&body.swift)?;
    validation::validate_payee(&body.payee)?;

    let payment = Payment {
        id: Uuid::new_v4(),
        account_number: body.account_number,
        amount: body.amount,
        currency: body.currency,
        swift: body.swift,
        payee: body.payee,
        status: PaymentStatus::Pending,
        created_at: Utc::now(),
        verified_at: None,
        submitted_at: None,
    };
    state.store.store_payment(&payment).await?;

    counter!(keys::PAYMENT_CREATED).increment(1);
    tracing::info!(actor = %claims.username, payment = %payment.id, "payment created");
    Ok((StatusCode::CREATED, Json(payment)))
}

/// `POST /payments/{id}/verify` — staff marks a pending payment as checked
pub async fn verify<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    claims: Claims,
    Path(id): Path<String>,
) -> Result<Json<Payment>, AppError> {
    let id = parse_id(&id)?;
    let mut payment = state
        .store
        .get_payment(id)
        .await?
        .ok_or(AppError::NotFound)?;

    payment.status = PaymentStatus::Verified;
    payment.verified_at = Some(Utc::now());
    state.store.store_payment(&payment).await?;

    counter!(keys::PAYMENT_VERIFIED).increment(1);
    tracing::info!(actor = %claims.username, payment = %payment.id, "payment verified");
    Ok(Json(payment))
}

/// `POST /payments/{id}/submit` — forward a payment to the SWIFT rail
pub async fn submit<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    claims: Claims,
    Path(id): Path<String>,
) -> Result<Json<Payment>, AppError> {
    let id = parse_id(&id)?;
    let mut payment = state
        .store
        .get_payment(id)
        .await?
        .ok_or(AppError::NotFound)?;

    payment.status = PaymentStatus::Submitted;
    payment.submitted_at = Some(Utc::now());
    state.store.store_payment(&payment).await?;

    counter!(keys::PAYMENT_SUBMITTED).increment(1);
    tracing::info!(actor = %claims.username, payment = %payment.id, "payment submitted");
    Ok(Json(payment))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation { field: "id" })
}

use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::contact::email::render_contact_email;
use crate::contact::validation::{validate_contact, ContactRequest};
use crate::errors::AppError;
use crate::rate_limit::{client_key, enforce};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/contact
///
/// Counts against the contact rate limit before the body is even parsed, so
/// malformed and rejected submissions still use up the allowance.
pub async fn handle_contact(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let key = client_key(
        &headers,
        peer.map(|ConnectInfo(addr)| addr),
        state.config.trust_proxy,
    );
    enforce(state.contact_limiter.as_ref(), &key).await?;

    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let message = validate_contact(&request).map_err(|errors| {
        AppError::Validation(
            errors
                .iter()
                .map(|e| format!("{} {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;

    let mail = render_contact_email(
        &message,
        &state.config.mail_from,
        &state.config.contact_email,
    );
    state.notifier.deliver(&mail).await?;
    info!(id = %message.id, "Contact message delivered");

    Ok(Json(ContactResponse {
        success: true,
        message: "Message sent successfully!".to_string(),
    }))
}

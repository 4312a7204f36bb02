// src/handlers/sanitize.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::sanitize::{MarkupRequest, PolicyResponse, SanitizeHtmlRequest, SanitizedResponse},
    sanitizer::Sanitizer,
};

/// Sanitize markup.
/// Optional `tags`/`attributes` override the configured allow-list for this call.
pub async fn sanitize_html(
    State(sanitizer): State<Sanitizer>,
    Json(payload): Json<SanitizeHtmlRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let allow_list = sanitizer
        .allow_list()
        .with_overrides(payload.tags.as_deref(), payload.attributes.as_deref());

    let output = sanitizer.sanitize_with(&payload.content, &allow_list)?;

    Ok(Json(SanitizedResponse { output }))
}

/// Scrub a CSS declaration list.
pub async fn sanitize_css(
    State(sanitizer): State<Sanitizer>,
    Json(payload): Json<MarkupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let output = sanitizer.sanitize_style(&payload.content)?;
    Ok(Json(SanitizedResponse { output }))
}

pub async fn strip_tags(
    State(sanitizer): State<Sanitizer>,
    Json(payload): Json<MarkupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let output = sanitizer.strip_tags(&payload.content)?;
    Ok(Json(SanitizedResponse { output }))
}

pub async fn strip_links(
    State(sanitizer): State<Sanitizer>,
    Json(payload): Json<MarkupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let output = sanitizer.strip_links(&payload.content)?;
    Ok(Json(SanitizedResponse { output }))
}

/// Publish the active allow-lists and limits.
pub async fn get_policy(State(sanitizer): State<Sanitizer>) -> impl IntoResponse {
    Json(PolicyResponse::from(&sanitizer))
}

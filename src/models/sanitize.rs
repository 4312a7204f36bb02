// src/models/sanitize.rs

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::sanitizer::{
    ALLOWED_CSS_PROPERTIES, AllowListConfig, FORBIDDEN_TAGS, Limits, Sanitizer, URL_SCHEMES,
};

/// DTO for `POST /api/sanitize/html`.
/// `tags` and `attributes` replace the configured allow-list for this call only.
#[derive(Debug, Deserialize, Validate)]
pub struct SanitizeHtmlRequest {
    pub content: String,

    #[validate(length(max = 128), custom(function = validate_names))]
    pub tags: Option<Vec<String>>,

    #[validate(length(max = 128), custom(function = validate_names))]
    pub attributes: Option<Vec<String>>,
}

/// DTO for the single-input endpoints (css, strip-tags, strip-links).
#[derive(Debug, Deserialize)]
pub struct MarkupRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SanitizedResponse {
    pub output: String,
}

/// The active policy, published so callers know the security posture they get.
#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub allow_list: AllowListConfig,
    pub forbidden_tags: &'static [&'static str],
    pub url_schemes: &'static [&'static str],
    pub css_properties: &'static [&'static str],
    pub limits: Limits,
}

impl From<&Sanitizer> for PolicyResponse {
    fn from(sanitizer: &Sanitizer) -> Self {
        Self {
            allow_list: sanitizer.allow_list().clone(),
            forbidden_tags: FORBIDDEN_TAGS,
            url_schemes: URL_SCHEMES,
            css_properties: ALLOWED_CSS_PROPERTIES,
            limits: sanitizer.limits(),
        }
    }
}

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i)[a-z][a-z0-9:-]*$").expect("valid regex"))
}

/// Tag and attribute names must look like names, not markup.
fn validate_names(names: &[String]) -> Result<(), validator::ValidationError> {
    if names.iter().any(|n| n.len() > 64 || !name_regex().is_match(n.trim())) {
        return Err(validator::ValidationError::new("invalid_name"));
    }
    Ok(())
}

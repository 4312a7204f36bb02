// src/sanitizer/mod.rs

//! The HTML/CSS sanitization boundary.
//!
//! A [`Sanitizer`] holds an immutable allow-list and resource [`Limits`].
//! Every operation is a pure function of its input: no state survives a
//! call, so a single instance can be shared across threads and requests.

pub mod allow_list;
pub mod css;
pub mod html;
pub mod links;
pub mod structure;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use allow_list::{
    AllowListConfig, DEFAULT_ATTRIBUTES, DEFAULT_TAGS, FORBIDDEN_TAGS, URL_SCHEMES,
};
pub use css::ALLOWED_CSS_PROPERTIES;
pub use structure::{DEFAULT_MAX_NESTING_DEPTH, DEFAULT_MAX_TAGS};

/// Default upper bound on input size, in bytes (512 KiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 512 * 1024;

/// Errors returned by the sanitizer.
/// Malformed markup is never an error; only input over a resource limit is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    InputTooLarge { len: usize, max: usize },
    TooManyTags { count: usize, max: usize },
    TooDeeplyNested { depth: usize, max: usize },
}

impl fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizeError::InputTooLarge { len, max } => {
                write!(f, "Input of {} bytes exceeds the {} byte limit", len, max)
            }
            SanitizeError::TooManyTags { count, max } => {
                write!(f, "Input has {} tags, more than the limit of {}", count, max)
            }
            SanitizeError::TooDeeplyNested { depth, max } => {
                write!(f, "Input nests {} levels deep, more than the limit of {}", depth, max)
            }
        }
    }
}

impl std::error::Error for SanitizeError {}

/// Resource limits checked before any markup is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limits {
    pub max_input_bytes: usize,
    pub max_tags: usize,
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_tags: DEFAULT_MAX_TAGS,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sanitizer {
    allow_list: Arc<AllowListConfig>,
    limits: Limits,
}

impl Sanitizer {
    pub fn new(allow_list: AllowListConfig) -> Self {
        Self {
            allow_list: Arc::new(allow_list),
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.limits.max_input_bytes = max_input_bytes;
        self
    }

    pub fn allow_list(&self) -> &AllowListConfig {
        &self.allow_list
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn max_input_bytes(&self) -> usize {
        self.limits.max_input_bytes
    }

    /// Sanitize markup with this sanitizer's allow-list.
    pub fn sanitize(&self, input: &str) -> Result<String, SanitizeError> {
        self.sanitize_with(input, &self.allow_list)
    }

    /// Sanitize markup with an explicit allow-list.
    ///
    /// Disallowed tags are unwrapped, forbidden tags are removed with their
    /// content, disallowed attributes and unsafe URLs are dropped.
    pub fn sanitize_with(
        &self,
        input: &str,
        allow_list: &AllowListConfig,
    ) -> Result<String, SanitizeError> {
        self.check_markup(input)?;
        Ok(html::clean_html(input, allow_list))
    }

    /// Keep only the CSS declarations that cannot execute or load unsafe content.
    pub fn sanitize_style(&self, input: &str) -> Result<String, SanitizeError> {
        self.check_len(input)?;
        Ok(css::scrub_style(input))
    }

    /// Remove all tags, returning the text content in document order.
    pub fn strip_tags(&self, input: &str) -> Result<String, SanitizeError> {
        self.check_markup(input)?;
        Ok(html::text_content(input))
    }

    /// Remove `<a>` wrappers while keeping the link text.
    pub fn strip_links(&self, input: &str) -> Result<String, SanitizeError> {
        self.check_markup(input)?;
        Ok(links::unwrap_links(input))
    }

    fn check_len(&self, input: &str) -> Result<(), SanitizeError> {
        let max = self.limits.max_input_bytes;
        if input.len() > max {
            tracing::warn!("Rejecting input of {} bytes (limit {})", input.len(), max);
            return Err(SanitizeError::InputTooLarge {
                len: input.len(),
                max,
            });
        }
        Ok(())
    }

    /// Byte limit plus a linear scan of tag count and nesting depth.
    /// Deep nesting makes tree building quadratic, so it is refused up front.
    fn check_markup(&self, input: &str) -> Result<(), SanitizeError> {
        self.check_len(input)?;

        let shape = structure::scan(input);
        if shape.max_depth > self.limits.max_nesting_depth {
            tracing::warn!(
                "Rejecting input nested {} deep (limit {})",
                shape.max_depth,
                self.limits.max_nesting_depth
            );
            return Err(SanitizeError::TooDeeplyNested {
                depth: shape.max_depth,
                max: self.limits.max_nesting_depth,
            });
        }
        if shape.tags > self.limits.max_tags {
            tracing::warn!(
                "Rejecting input with {} tags (limit {})",
                shape.tags,
                self.limits.max_tags
            );
            return Err(SanitizeError::TooManyTags {
                count: shape.tags,
                max: self.limits.max_tags,
            });
        }
        Ok(())
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(AllowListConfig::default())
    }
}

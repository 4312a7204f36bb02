// src/sanitizer/css.rs

use std::sync::OnceLock;

use regex::Regex;
use url::{ParseError, Url};

/// Properties kept by the style scrubber: colors, fonts, text layout,
/// box sizes and positioning.
pub const ALLOWED_CSS_PROPERTIES: &[&str] = &[
    "azimuth", "bottom", "clear", "color", "cursor", "direction", "display", "elevation", "float",
    "font", "font-family", "font-size", "font-style", "font-variant", "font-weight", "height",
    "left", "letter-spacing", "line-height", "list-style-type", "max-height", "max-width",
    "min-height", "min-width", "opacity", "overflow", "pause", "pause-after", "pause-before",
    "pitch", "pitch-range", "position", "richness", "right", "speak", "speak-header",
    "speak-numeral", "speak-punctuation", "speech-rate", "stress", "text-align",
    "text-decoration", "text-indent", "top", "unicode-bidi", "vertical-align", "voice-family",
    "volume", "white-space", "width", "z-index",
];

/// Shorthand families accepted with any sub-property (`border-top-color`, ...).
const SHORTHAND_PREFIXES: &[&str] = &["background", "border", "margin", "padding"];

const ALLOWED_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla", "url"];

const URL_FUNCTION_SCHEMES: &[&str] = &["http", "https"];

const BANNED_SEQUENCES: &[&str] = &["/*", "\\", "<", ">", "{", "}", "@", "`", "\0"];

const BANNED_WORDS: &[&str] = &["expression", "javascript", "vbscript", "behavior", "-moz-binding"];

fn property_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[a-z][a-z0-9-]*$").expect("valid regex"))
}

fn function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z-]+)\s*\(([^()]*)\)").expect("valid regex"))
}

fn value_chars_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^[a-z0-9\s#%.,!'"+/-]*$"#).expect("valid regex"))
}

/// Filters a CSS declaration list down to declarations that cannot load
/// or execute anything unsafe.
///
/// Kept declarations are re-emitted as `prop: value;` joined by a single
/// space, so scrubbing the output again returns it unchanged.
pub fn scrub_style(input: &str) -> String {
    let mut kept = Vec::new();

    for declaration in input.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }

        match clean_declaration(declaration) {
            Some(clean) => kept.push(clean),
            None => tracing::debug!("Dropping CSS declaration: {:?}", declaration),
        }
    }

    kept.join(" ")
}

fn clean_declaration(declaration: &str) -> Option<String> {
    let (property, value) = declaration.split_once(':')?;

    let property = property.trim().to_ascii_lowercase();
    if !is_allowed_property(&property) {
        return None;
    }

    let value = clean_value(value)?;
    Some(format!("{}: {};", property, value))
}

fn is_allowed_property(property: &str) -> bool {
    if !property_regex().is_match(property) {
        return false;
    }

    ALLOWED_CSS_PROPERTIES.contains(&property)
        || SHORTHAND_PREFIXES.iter().any(|prefix| {
            property == *prefix
                || property
                    .strip_prefix(*prefix)
                    .is_some_and(|rest| rest.starts_with('-'))
        })
}

fn clean_value(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if BANNED_SEQUENCES.iter().any(|seq| value.contains(*seq)) {
        return None;
    }

    let lower = value.to_ascii_lowercase();
    if BANNED_WORDS.iter().any(|word| lower.contains(*word)) {
        return None;
    }

    // Every function call must be allow-listed and every url() target safe.
    for caps in function_regex().captures_iter(&lower) {
        let name = &caps[1];
        if !ALLOWED_FUNCTIONS.contains(&name) {
            return None;
        }
        if name == "url" && !is_safe_url_target(&caps[2]) {
            return None;
        }
    }

    // Anything left after removing the calls is plain keywords and numbers.
    let rest = function_regex().replace_all(&lower, " ");
    if rest.contains('(') || rest.contains(')') {
        return None;
    }
    if rest.matches('\'').count() % 2 != 0 || rest.matches('"').count() % 2 != 0 {
        return None;
    }
    if !value_chars_regex().is_match(&rest) {
        return None;
    }

    Some(value)
}

fn is_safe_url_target(raw: &str) -> bool {
    let target = raw.trim();
    let target = target
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| target.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
        .unwrap_or(target)
        .trim();

    if target.is_empty() || target.contains(['"', '\'']) {
        return false;
    }

    match Url::parse(target) {
        Ok(url) => URL_FUNCTION_SCHEMES.contains(&url.scheme()),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

// src/sanitizer/html.rs

use std::borrow::Cow;
use std::collections::HashSet;

use ammonia::{Builder, UrlRelative};

use super::{
    allow_list::{AllowListConfig, FORBIDDEN_TAGS, URL_SCHEMES},
    css::scrub_style,
};

/// Passes of the cleaner allowed before the output must have settled.
const MAX_CLEAN_PASSES: usize = 3;

/// Clean HTML content against an allow-list using the ammonia library.
///
/// * Tags outside the allow-list are unwrapped: the tag goes, its children stay.
/// * Forbidden tags (`script`, `style`, `iframe`, ...) are removed together
///   with their content.
/// * Attributes outside the allow-list are dropped, URL attributes must use
///   an allowed scheme or be relative, comments are dropped.
/// * An allowed `style` attribute is passed through the style scrubber.
///
/// html5ever does the parsing, so malformed markup is repaired the way a
/// browser would repair it (unclosed tags are closed at end of input) and
/// entity-encoded or mixed-case payloads are decoded before the checks run.
///
/// Unwrapping can leave nesting the parser would never build (`<p>` in `<p>`,
/// `<h2>` in `<h1>`), which parses differently the next time round. The
/// output is cleaned again until it stops changing; markup that has not
/// settled after `MAX_CLEAN_PASSES` is reduced to text.
pub fn clean_html(input: &str, allow_list: &AllowListConfig) -> String {
    let cleaner = cleaner(allow_list);

    let mut current = cleaner.clean(input).to_string();
    for _ in 1..MAX_CLEAN_PASSES {
        let next = cleaner.clean(&current).to_string();
        if next == current {
            return current;
        }
        current = next;
    }

    tracing::warn!(
        "Markup still changing after {} passes, reducing to text",
        MAX_CLEAN_PASSES
    );
    text_content(&current)
}

fn cleaner(allow_list: &AllowListConfig) -> Builder<'_> {
    let tags: HashSet<&str> = allow_list.tags().collect();
    let attributes: HashSet<&str> = allow_list.attributes().collect();
    let scrub_style_attribute = attributes.contains("style");

    let mut builder = Builder::empty();
    builder
        .tags(tags)
        .generic_attributes(attributes)
        .clean_content_tags(forbidden_tags())
        .url_schemes(URL_SCHEMES.iter().copied().collect())
        .url_relative(UrlRelative::PassThrough)
        .link_rel(None)
        .strip_comments(true);

    if scrub_style_attribute {
        builder.attribute_filter(|_element, attribute, value| {
            if attribute != "style" {
                return Some(Cow::Borrowed(value));
            }
            let style = scrub_style(value);
            if style.is_empty() {
                None
            } else {
                Some(Cow::Owned(style))
            }
        });
    }

    builder
}

/// Remove every tag and return the escaped text content.
///
/// Content of forbidden tags is dropped rather than surfaced as text.
pub fn text_content(input: &str) -> String {
    Builder::empty()
        .clean_content_tags(forbidden_tags())
        .strip_comments(true)
        .clean(input)
        .to_string()
}

fn forbidden_tags() -> HashSet<&'static str> {
    FORBIDDEN_TAGS.iter().copied().collect()
}

// src/sanitizer/allow_list.rs

use std::collections::BTreeSet;

use serde::Serialize;

/// Tags allowed by `AllowListConfig::default()`.
///
/// Basic formatting, lists, headings, links and images. Anything able to
/// carry script, plugins or foreign content is excluded.
pub const DEFAULT_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "b", "big", "blockquote", "br", "cite", "code", "dd",
    "del", "dfn", "div", "dl", "dt", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img",
    "ins", "kbd", "li", "ol", "p", "pre", "samp", "small", "span", "strong", "sub", "sup", "tt",
    "ul", "var",
];

/// Attributes allowed on any retained tag by `AllowListConfig::default()`.
pub const DEFAULT_ATTRIBUTES: &[&str] = &[
    "abbr", "alt", "cite", "class", "datetime", "height", "href", "lang", "name", "src", "title",
    "width",
];

/// Tags removed together with everything inside them.
/// These can never be enabled through an `AllowListConfig`.
pub const FORBIDDEN_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "applet", "frame", "frameset", "noscript",
    "template", "svg", "math",
];

/// Schemes accepted in URL attributes (`href`, `src`, ...).
/// Relative URLs are always accepted.
pub const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Typed allow-list of tags and attributes.
///
/// Names are stored lowercase. Construction enforces a floor no caller can
/// lower: forbidden tags and `on*` event handler attributes are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowListConfig {
    tags: BTreeSet<String>,
    attributes: BTreeSet<String>,
}

impl AllowListConfig {
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let tags = normalize(tags)
            .filter(|tag| !FORBIDDEN_TAGS.contains(&tag.as_str()))
            .collect();
        let attributes = normalize(attributes)
            .filter(|attr| !is_event_handler(attr))
            .collect();

        Self { tags, attributes }
    }

    /// No tags and no attributes: every element is unwrapped to its text.
    pub fn none() -> Self {
        Self {
            tags: BTreeSet::new(),
            attributes: BTreeSet::new(),
        }
    }

    /// Returns a copy with the given lists replacing the current ones.
    /// A `None` list keeps the current value.
    pub fn with_overrides(
        &self,
        tags: Option<&[String]>,
        attributes: Option<&[String]>,
    ) -> Self {
        match (tags, attributes) {
            (None, None) => self.clone(),
            (tags, attributes) => Self::new(
                tags.map(|t| t.to_vec())
                    .unwrap_or_else(|| self.tags.iter().cloned().collect()),
                attributes
                    .map(|a| a.to_vec())
                    .unwrap_or_else(|| self.attributes.iter().cloned().collect()),
            ),
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_lowercase())
    }

    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(&attribute.to_ascii_lowercase())
    }
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS, DEFAULT_ATTRIBUTES)
    }
}

fn normalize<I>(names: I) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
}

fn is_event_handler(attribute: &str) -> bool {
    attribute.starts_with("on")
}

// src/sanitizer/links.rs

use lol_html::{RewriteStrSettings, element, rewrite_str};

use super::html::text_content;

/// Unwrap every `<a>` element, keeping its content. Other markup is left as written.
///
/// `lol_html` rewrites the token stream in place instead of rebuilding a
/// tree, so the rest of the document is not reserialized. When the rewriter
/// rejects the input the whole document is reduced to text instead.
pub fn unwrap_links(input: &str) -> String {
    let handlers = vec![element!("a", |el| {
        el.remove_and_keep_content();
        Ok(())
    })];

    rewrite_str(
        input,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .unwrap_or_else(|e| {
        tracing::warn!("Link rewriter rejected input, stripping all tags: {}", e);
        text_content(input)
    })
}

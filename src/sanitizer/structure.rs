// src/sanitizer/structure.rs

/// Deepest estimated nesting accepted by default.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Most start tags accepted in one input by default.
pub const DEFAULT_MAX_TAGS: usize = 20_000;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Shape of a markup input as seen by a single linear scan, without parsing.
///
/// `max_depth` counts start tags minus end tags and ignores implied closes,
/// so it never underestimates what the tree builder will have to hold open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkupShape {
    pub tags: usize,
    pub max_depth: usize,
}

pub fn scan(input: &str) -> MarkupShape {
    let bytes = input.as_bytes();
    let mut shape = MarkupShape::default();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let closing = bytes.get(i + 1) == Some(&b'/');
        let name_start = if closing { i + 2 } else { i + 1 };
        if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
            i += 1;
            continue;
        }

        let mut name_end = name_start;
        while bytes.get(name_end).is_some_and(u8::is_ascii_alphanumeric) {
            name_end += 1;
        }
        let tag_end = bytes[name_end..]
            .iter()
            .position(|&b| b == b'>')
            .map_or(bytes.len(), |p| name_end + p);

        if closing {
            depth = depth.saturating_sub(1);
        } else {
            shape.tags += 1;
            let name = input[name_start..name_end].to_ascii_lowercase();
            let self_closing = tag_end > name_end && bytes[tag_end - 1] == b'/';
            if !VOID_TAGS.contains(&name.as_str()) && !self_closing {
                depth += 1;
                shape.max_depth = shape.max_depth.max(depth);
            }
        }

        i = tag_end + 1;
    }

    shape
}

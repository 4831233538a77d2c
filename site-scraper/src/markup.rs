//! Just enough markup handling for listing and detail pages.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex"));

/// Text content of a fragment: tags removed, entities decoded, untrimmed.
pub fn text_of(fragment: &str) -> String {
    decode_entities(&TAG.replace_all(fragment, ""))
}

pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => numeric_entity(entity),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

/// Any opening, closing or self-closing tag: (`/`?, name, `/`?).
static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*?(/?)>").expect("valid regex")
});

/// Content of the `tag` element whose opening tag ends at `open_end`, up to
/// its matching close tag. Nested elements of the same name are skipped; an
/// unclosed element runs to the end of `html`.
pub fn element_inner<'a>(html: &'a str, tag: &str, open_end: usize) -> &'a str {
    let rest = &html[open_end..];
    let mut depth = 0usize;
    for caps in TAG_TOKEN.captures_iter(rest) {
        if !caps[2].eq_ignore_ascii_case(tag) || !caps[3].is_empty() {
            continue;
        }
        let Some(token) = caps.get(0) else {
            continue;
        };
        if caps[1].is_empty() {
            depth += 1;
        } else if depth == 0 {
            return &rest[..token.start()];
        } else {
            depth -= 1;
        }
    }
    rest
}

/// Inner markup of the first `<tag ...>` element in `html`.
pub fn first_element<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    let open = TAG_TOKEN
        .captures_iter(html)
        .find(|caps| caps[1].is_empty() && caps[3].is_empty() && caps[2].eq_ignore_ascii_case(tag))?;
    Some(element_inner(html, tag, open.get(0)?.end()))
}

/// Value of the first `href` attribute in `html`.
pub fn first_href(html: &str) -> Option<String> {
    static HREF: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?is)<a\s[^>]*href\s*=\s*["']([^"']*)["']"#).expect("valid regex")
    });
    HREF.captures(html).map(|caps| decode_entities(&caps[1]))
}

use std::borrow::Cow;

/// Escapes element content. Only `& < >` are rewritten, so quotes,
/// apostrophes and CJK text appear exactly as written.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    replace_chars(text, &['&', '<', '>'])
}

/// Escapes a value placed inside a double-quoted attribute.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    replace_chars(text, &['&', '<', '>', '"', '\''])
}

fn replace_chars<'a>(text: &'a str, special: &[char]) -> Cow<'a, str> {
    if !text.contains(special) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if special.contains(&'"') => out.push_str("&quot;"),
            '\'' if special.contains(&'\'') => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Returns the value when it holds anything besides whitespace.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Escaped URL for `href`/`src`, or `None` for blank and script URLs.
pub fn url_attr(url: &str) -> Option<Cow<'_, str>> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let scheme: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(11)
        .collect::<String>()
        .to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") {
        tracing::warn!(url = trimmed, "dropping script URL");
        return None;
    }

    Some(escape_attr(trimmed))
}

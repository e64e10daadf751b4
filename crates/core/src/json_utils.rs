//! JSON helpers for model output and response bodies quoted in errors.

/// Strip a markdown code fence wrapped around a JSON payload.
///
/// Models asked for `json_object` output still occasionally answer with
/// `` ```json ... ``` ``. Anything after the opening fence up to the first
/// newline is treated as a language tag and dropped.
#[must_use]
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```").and_then(|s| s.strip_suffix("```")) else {
        return trimmed;
    };
    match inner.split_once('\n') {
        Some((_tag, body)) => body.trim(),
        None => inner.trim(),
    }
}

/// Longest prefix of `s` that fits in `max_len` bytes without splitting a char.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let end = (0..=max_len).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    s.get(..end).unwrap_or_default()
}

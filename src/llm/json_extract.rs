// ABOUTME: Locates the JSON object inside a chat completion's text content
// ABOUTME: Handles bare objects, ```json fences, unmarked fences, and prose-wrapped objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

const FENCE: &str = "```";

/// Return the JSON object text carried by a completion
///
/// Tried in order: the whole content as a bare object, the body of the first
/// fenced block (with or without a `json` tag), then the span from the first
/// `{` to the last `}`. Returns `None` when no candidate looks like an object.
/// The returned slice is not parsed here; callers deserialize it.
#[must_use]
pub fn extract_json_payload(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_object_like(trimmed) {
        return Some(trimmed);
    }

    if let Some(fenced) = fenced_block(trimmed) {
        if is_object_like(fenced) {
            return Some(fenced);
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

fn is_object_like(text: &str) -> bool {
    text.starts_with('{') && text.ends_with('}')
}

/// Body of the first fenced code block, with the language tag stripped
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];

    // The info string runs to the end of the opening line
    let body_start = after_open.find('\n').map_or(0, |nl| {
        let tag = after_open[..nl].trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
            nl + 1
        } else {
            0
        }
    });
    let body = &after_open[body_start..];

    let close = body.find(FENCE)?;
    Some(body[..close].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        let content = "  {\"circuit\": []}\n";
        assert_eq!(extract_json_payload(content), Some("{\"circuit\": []}"));
    }

    #[test]
    fn test_json_fence_with_prose() {
        let content = "Here is your workout:\n```json\n{\"circuit\": [{\"exercise\": \"Burpees\", \"reps\": 10}]}\n```\nEnjoy!";
        assert_eq!(
            extract_json_payload(content),
            Some("{\"circuit\": [{\"exercise\": \"Burpees\", \"reps\": 10}]}")
        );
    }

    #[test]
    fn test_unmarked_fence() {
        let content = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_payload(content), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_fence_with_other_language_falls_back_to_braces() {
        let content = "```js\nconst plan = {\"a\": 1};\n```";
        assert_eq!(extract_json_payload(content), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let content = "Sure! {\"a\": {\"b\": 2}} Let me know if you need more.";
        assert_eq!(extract_json_payload(content), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_nothing_object_like() {
        assert_eq!(extract_json_payload(""), None);
        assert_eq!(extract_json_payload("I cannot help with that."), None);
        assert_eq!(extract_json_payload("} backwards {"), None);
    }
}

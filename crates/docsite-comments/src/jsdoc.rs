use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::model::{RawComment, TagValue};

/// Tag that receives untagged leading text when no explicit one is present.
const SUMMARY_TAG: &str = "description";

/// Parse a doc block (without comment delimiters) into a [`RawComment`].
///
/// Recognized shapes:
/// - `@tag text` with continuation lines until the next tag
/// - `@tag.<lang> text` for one language of a language-keyed value
/// - `@tag {"en-US": "...", "zh-CN": "..."}` for a whole language-keyed value
///
/// A line starting with a bare `@` is malformed; it and its continuation lines
/// are dropped.
pub fn parse_comment_block(raw: &str, source: &Path) -> RawComment {
    let lines = normalize_lines(raw);

    let mut summary_lines = Vec::new();
    let mut entries: Vec<TagEntry> = Vec::new();
    // None while inside a malformed tag, so its continuation is skipped too
    let mut current: Option<usize> = None;
    let mut in_tags = false;

    for line in &lines {
        if let Some(rest) = line.strip_prefix('@') {
            in_tags = true;
            let (tag, payload) = split_tag_payload(rest);
            let (name, language) = split_language(tag);
            if name.is_empty() {
                debug!(source = %source.display(), line = %line, "dropping malformed doc tag");
                current = None;
                continue;
            }
            entries.push(TagEntry {
                name: name.to_string(),
                language: language.map(str::to_string),
                lines: vec![payload.to_string()],
            });
            current = Some(entries.len() - 1);
        } else if in_tags {
            if let Some(idx) = current {
                entries[idx].lines.push(line.clone());
            }
        } else {
            summary_lines.push(line.clone());
        }
    }

    let mut comment = RawComment::new(source);
    let has_description = entries.iter().any(|entry| entry.name == SUMMARY_TAG);
    if !has_description {
        if let Some(summary) = compose_summary(summary_lines) {
            comment
                .tags
                .insert(SUMMARY_TAG.to_string(), TagValue::Text(summary));
        }
    }

    for entry in entries {
        let payload = entry.payload();
        let value = match entry.language {
            Some(language) => {
                let mut values = IndexMap::new();
                values.insert(language, payload);
                TagValue::Localized(values)
            }
            None => parse_localized_object(&payload).unwrap_or(TagValue::Text(payload)),
        };
        merge_tag(&mut comment.tags, entry.name, value);
    }

    comment
}

struct TagEntry {
    name: String,
    language: Option<String>,
    lines: Vec<String>,
}

impl TagEntry {
    fn payload(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

fn merge_tag(tags: &mut IndexMap<String, TagValue>, name: String, value: TagValue) {
    let Some(existing) = tags.get_mut(&name) else {
        tags.insert(name, value);
        return;
    };

    match (existing, value) {
        (TagValue::Text(current), TagValue::Text(next)) => {
            if current.is_empty() {
                *current = next;
            } else if !next.is_empty() {
                current.push('\n');
                current.push_str(&next);
            }
        }
        (TagValue::Localized(current), TagValue::Localized(next)) => {
            for (language, text) in next {
                match current.get_mut(&language) {
                    Some(existing) => {
                        existing.push('\n');
                        existing.push_str(&text);
                    }
                    None => {
                        current.insert(language, text);
                    }
                }
            }
        }
        (slot @ TagValue::Text(_), localized @ TagValue::Localized(_)) => {
            debug!(tag = %name, "language-keyed value replaces plain text");
            *slot = localized;
        }
        (TagValue::Localized(_), TagValue::Text(_)) => {
            debug!(tag = %name, "ignoring plain text for language-keyed tag");
        }
    }
}

/// `{"en-US": "Button", "zh-CN": "按钮"}` → language-keyed value.
fn parse_localized_object(payload: &str) -> Option<TagValue> {
    if !payload.starts_with('{') {
        return None;
    }
    let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(payload).ok()?;
    if parsed.is_empty() {
        return None;
    }
    let mut values = IndexMap::with_capacity(parsed.len());
    for (language, value) in parsed {
        values.insert(language, value.as_str()?.to_string());
    }
    Some(TagValue::Localized(values))
}

fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

fn compose_summary(lines: Vec<String>) -> Option<String> {
    let summary = lines
        .into_iter()
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>();
    if summary.is_empty() {
        None
    } else {
        let joined = summary.join(" ").trim().to_string();
        (!joined.is_empty()).then_some(joined)
    }
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}

fn split_language(tag: &str) -> (&str, Option<&str>) {
    match tag.split_once('.') {
        Some((name, language)) if !language.is_empty() => (name, Some(language)),
        Some((name, _)) => (name, None),
        None => (tag, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> RawComment {
        parse_comment_block(raw, Path::new("demo/basic.tsx"))
    }

    #[test]
    fn leading_text_becomes_description() {
        let comment = parse(
            r#"
             * Basic usage of the button.
             * Spans two lines.
             * @title Basic
            "#,
        );
        assert_eq!(
            comment.get("description"),
            Some(&TagValue::Text(
                "Basic usage of the button. Spans two lines.".to_string()
            ))
        );
        assert_eq!(comment.get("title"), Some(&TagValue::Text("Basic".into())));
    }

    #[test]
    fn explicit_description_wins_over_summary() {
        let comment = parse(
            r#"
             * ignored summary
             * @description Real description
            "#,
        );
        assert_eq!(
            comment.get("description"),
            Some(&TagValue::Text("Real description".into()))
        );
    }

    #[test]
    fn dotted_language_suffix_builds_localized_value() {
        let comment = parse(
            r#"
             * @title.zh-CN 基础用法
             * @title.en-US Basic
            "#,
        );
        let TagValue::Localized(values) = comment.get("title").unwrap() else {
            panic!("expected localized title");
        };
        assert_eq!(values.get("zh-CN").map(String::as_str), Some("基础用法"));
        assert_eq!(values.get("en-US").map(String::as_str), Some("Basic"));
    }

    #[test]
    fn json_payload_builds_localized_value() {
        let comment = parse(r#"* @title {"en-US": "Size", "zh-CN": "尺寸"}"#);
        assert!(matches!(comment.get("title"), Some(TagValue::Localized(_))));
    }

    #[test]
    fn json_with_non_string_values_stays_text() {
        let comment = parse(r#"* @props {"size": 1}"#);
        assert_eq!(
            comment.get("props"),
            Some(&TagValue::Text(r#"{"size": 1}"#.into()))
        );
    }

    #[test]
    fn continuation_lines_are_kept() {
        let comment = parse(
            r#"
             * @example
             * <Button />
             * <Button type="primary" />
             * @file
            "#,
        );
        assert_eq!(
            comment.get("example").and_then(TagValue::as_text),
            Some("<Button />\n<Button type=\"primary\" />")
        );
        assert_eq!(comment.get("file"), Some(&TagValue::Text(String::new())));
    }

    #[test]
    fn malformed_tag_and_its_continuation_are_dropped() {
        let comment = parse(
            r#"
             * @title Ok
             * @ broken
             * still broken
             * @memberof General
            "#,
        );
        assert_eq!(comment.tags.len(), 2);
        assert_eq!(comment.get("title").and_then(TagValue::as_text), Some("Ok"));
        assert_eq!(
            comment.get("memberof").and_then(TagValue::as_text),
            Some("General")
        );
    }

    #[test]
    fn repeated_tags_are_joined() {
        let comment = parse(
            r#"
             * @param size button size
             * @param type button type
            "#,
        );
        assert_eq!(
            comment.get("param").and_then(TagValue::as_text),
            Some("size button size\ntype button type")
        );
    }
}

use std::fs;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};
use tracing::{debug, warn};

use crate::jsdoc::parse_comment_block;
use crate::model::RawComment;

/// Extract every `/** ... */` block of `source`, in source order.
///
/// The source type is inferred from `path` (TSX when it cannot be inferred).
/// Comments are collected even when the program has syntax errors.
pub fn extract_comments(path: impl AsRef<Path>, source: &str) -> Vec<RawComment> {
    let path = path.as_ref();
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::tsx());

    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type).parse();
    if !parsed.errors.is_empty() {
        debug!(
            path = %path.display(),
            errors = parsed.errors.len(),
            "collecting doc comments from a file with syntax errors"
        );
    }

    parsed
        .program
        .comments
        .iter()
        .filter(|comment| comment.is_jsdoc())
        .map(|comment| parse_comment_block(slice_source(source, comment.content_span()), path))
        .collect()
}

/// Read `path` from disk and extract its doc comments.
///
/// An unreadable file yields no comments.
pub fn extract_comments_from_path(path: impl AsRef<Path>) -> Vec<RawComment> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(source) => extract_comments(path, &source),
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read demo source");
            Vec::new()
        }
    }
}

fn slice_source(source: &str, span: Span) -> &str {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagValue;

    #[test]
    fn collects_blocks_in_source_order() {
        let source = r#"
/**
 * @file
 * @title Button
 */
import { Button } from '@arco-design/web-react';

// line comments are ignored
/* plain block comments too */

/**
 * @title Basic
 */
export const Basic = () => <Button>Basic</Button>;

/** @title Size */
export const Size = () => <Button size="mini" />;
"#;
        let comments = extract_comments("demo/index.tsx", source);
        let titles: Vec<_> = comments
            .iter()
            .map(|c| c.get("title").and_then(TagValue::as_text).unwrap_or(""))
            .collect();
        assert_eq!(titles, vec!["Button", "Basic", "Size"]);
        assert!(comments.iter().all(|c| c.source() == Path::new("demo/index.tsx")));
    }

    #[test]
    fn syntax_errors_do_not_lose_comments() {
        let source = "/** @title Broken */\nexport const = ;\n";
        let comments = extract_comments("broken.js", source);
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn source_without_doc_blocks_yields_nothing() {
        assert!(extract_comments("plain.ts", "export const a = 1;\n").is_empty());
        assert!(extract_comments("empty.ts", "").is_empty());
    }

    #[test]
    fn unknown_extension_falls_back_to_tsx() {
        let source = "/** @title Jsx */\nexport const A = () => <div />;\n";
        let comments = extract_comments("demo/index.vue", source);
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn missing_file_yields_empty_sequence() {
        let comments = extract_comments_from_path("/definitely/not/here/index.tsx");
        assert!(comments.is_empty());
    }
}

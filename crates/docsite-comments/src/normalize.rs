use crate::model::{NormalizedComment, RawComment};

/// Canonical spelling of the grouping tag.
pub const MEMBER_OF: &str = "memberOf";

const MEMBER_OF_LOWER: &str = "memberof";

/// Resolve every tag of `comment` for `target`, falling back to `default` and then
/// to an empty string for language-keyed values.
///
/// `@memberof` and `@memberOf` are read as one field and emitted as `memberOf`.
/// When both spellings are present the lowercase one wins.
pub fn normalize(comment: &RawComment, target: &str, default: &str) -> NormalizedComment {
    let member_of = comment
        .get(MEMBER_OF_LOWER)
        .or_else(|| comment.get(MEMBER_OF));

    let mut normalized = NormalizedComment::new();
    for (tag, value) in &comment.tags {
        match tag.as_str() {
            MEMBER_OF | MEMBER_OF_LOWER => {
                if normalized.get(MEMBER_OF).is_none() {
                    let value = member_of.unwrap_or(value);
                    normalized.insert(MEMBER_OF, value.localize(target, default));
                }
            }
            _ => normalized.insert(tag.as_str(), value.localize(target, default)),
        }
    }
    normalized
}

/// Normalize a whole comment sequence, keeping its order.
pub fn normalize_all(comments: &[RawComment], target: &str, default: &str) -> Vec<NormalizedComment> {
    comments
        .iter()
        .map(|comment| normalize(comment, target, default))
        .collect()
}

use std::borrow::Cow;

/// Token generated entries carry until module info is injected.
///
/// Alphanumeric and underscore only, so literal replacement is unambiguous.
pub const PLACEHOLDER: &str = "PLACEHOLDER_MODULE_INFO";

/// Replace every placeholder occurrence in `source` with `encoded`.
///
/// Text without a placeholder is returned borrowed, which makes patching an
/// already patched asset a no-op.
pub fn patch_asset<'a>(source: &'a str, encoded: &str) -> Cow<'a, str> {
    if source.contains(PLACEHOLDER) {
        Cow::Owned(source.replace(PLACEHOLDER, encoded))
    } else {
        Cow::Borrowed(source)
    }
}

pub fn count_placeholders(source: &str) -> usize {
    source.matches(PLACEHOLDER).count()
}

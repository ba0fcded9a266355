#![deny(clippy::all)]
// Demo sources are read straight from disk during extraction
#![allow(clippy::disallowed_methods)]

//! Doc-comment extraction for docsite demo files.
//!
//! This crate provides:
//! - A tag-oriented model of `/** ... */` blocks ([`RawComment`]), where a tag value
//!   may be plain text or keyed by language.
//! - An OXC-backed scanner that yields every doc block of a source file in order.
//! - A normalizer that resolves language-keyed values for one target language.
//!
//! Extraction never fails: unparsable sources and malformed tags simply produce
//! fewer comments.

pub mod extractor;
pub mod jsdoc;
pub mod model;
pub mod normalize;

pub use extractor::{extract_comments, extract_comments_from_path};
pub use jsdoc::parse_comment_block;
pub use model::{NormalizedComment, RawComment, TagValue};
pub use normalize::{MEMBER_OF, normalize, normalize_all};

use std::fs;
use std::path::Path;

use markdown::mdast::Node;
use markdown::{Constructs, ParseOptions};
use tracing::debug;

/// Display title of a document file.
pub trait TitleSource: Send + Sync {
    fn title(&self, path: &Path) -> String;
}

/// First heading of a markdown document, else the file stem.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTitle;

impl MarkdownTitle {
    /// Title of in-memory markdown text.
    pub fn title_of_source(source: &str, mdx: bool) -> Option<String> {
        let options = if mdx {
            ParseOptions::mdx()
        } else {
            ParseOptions {
                constructs: Constructs {
                    frontmatter: true,
                    ..Constructs::gfm()
                },
                ..ParseOptions::gfm()
            }
        };
        let root = markdown::to_mdast(source, &options).ok()?;
        first_heading(&root)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

impl TitleSource for MarkdownTitle {
    fn title(&self, path: &Path) -> String {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        let heading = match extension {
            "md" | "markdown" | "mdx" => match fs::read_to_string(path) {
                Ok(source) => Self::title_of_source(&source, extension == "mdx"),
                Err(error) => {
                    debug!(path = %path.display(), %error, "cannot read document for title");
                    None
                }
            },
            _ => None,
        };
        heading.unwrap_or_else(|| file_stem(path))
    }
}

fn first_heading(node: &Node) -> Option<String> {
    if let Node::Heading(_) = node {
        return Some(node.to_string());
    }
    node.children()?.iter().find_map(first_heading)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

//! Text extraction from free-text resume files

use crate::error::Result;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

const HTML_ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Render Markdown and strip it back to plain lines. Headings stay on lines
/// of their own so section detection still sees them.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(markdown));

    let block_ends = Regex::new(r"(?i)<br\s*/?>|</(?:p|h[1-6]|li)>").expect("Invalid block regex");
    let tags = Regex::new(r"<[^>]*>").expect("Invalid tag regex");

    let with_breaks = block_ends.replace_all(&rendered, "\n");
    let mut text = tags.replace_all(&with_breaks, "").into_owned();
    for (entity, replacement) in HTML_ENTITIES {
        text = text.replace(entity, replacement);
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

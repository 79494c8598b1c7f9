//! Turns a document on disk into a [`Page`] of sections.
//!
//! Headings are located with the format's tree-sitter query. The shallowest heading level present
//! becomes the page's section level; deeper headings stay in the body as sub-headings. Bodies are
//! built by walking the same block tree, registering images and cards page-wide as they appear.

use crate::error::{PageError, PageResult};
use crate::formats::{BlockRole, Format};
use crate::section::{Block, CardKind, CardRef, ImageRef, Page, Section};
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, Tree};

/// A heading found by the format query.
struct Heading {
    level: usize,
    title: String,
    line: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Read and parse a document into a page.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the document has no headings.
pub fn load_page(path: &Path, format: &impl Format) -> PageResult<Page> {
    let source = fs::read_to_string(path).map_err(|e| PageError::io(path, e))?;
    let page = parse_page(&source, format)?;
    tracing::info!(
        "loaded {} with {} sections, {} images, {} cards",
        path.display(),
        page.sections.len(),
        page.images.len(),
        page.cards.len()
    );
    Ok(page)
}

/// Parse document text into a page.
///
/// # Errors
///
/// Returns an error if the grammar or query cannot be set up, parsing fails, or no headings exist.
pub fn parse_page(source: &str, format: &impl Format) -> PageResult<Page> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| PageError::Language(e.to_string()))?;
    let tree = parser.parse(source, None).ok_or(PageError::Parse)?;

    let headings = find_headings(&tree, &language, source, format)?;
    let section_level = headings
        .iter()
        .map(|h| h.level)
        .min()
        .ok_or(PageError::NoSections)?;

    let starts: Vec<&Heading> = headings
        .iter()
        .filter(|h| h.level == section_level)
        .collect();

    let mut found = Vec::new();
    collect_blocks(tree.root_node(), source, format, &mut found);
    let mut found = found.into_iter().peekable();

    let mut page = Page::default();
    for (index, heading) in starts.iter().enumerate() {
        let byte_end = starts
            .get(index + 1)
            .map_or(source.len(), |next| next.byte_start);

        let mut blocks = Vec::new();
        while let Some(item) = found.next_if(|f| f.start < byte_end) {
            // Skips the section's own heading and anything before it
            if item.start >= heading.byte_end {
                page.push_body(item.body, &mut blocks);
            }
        }

        page.sections.push(Section {
            index,
            title: heading.title.clone(),
            level: heading.level,
            line_start: heading.line,
            byte_start: heading.byte_start,
            byte_end,
            blocks,
        });
    }

    Ok(page)
}

fn find_headings(
    tree: &Tree,
    language: &Language,
    source: &str,
    format: &impl Format,
) -> PageResult<Vec<Heading>> {
    let query = Query::new(language, format.section_query())
        .map_err(|e| PageError::Query(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let Some(level) = format.heading_level(node) else {
                continue;
            };
            headings.push(Heading {
                level,
                title: format.heading_title(node, source),
                line: node.start_position().row,
                byte_start: node.start_byte(),
                byte_end: node.end_byte(),
            });
        }
    }
    headings.sort_by_key(|h| h.byte_start);
    tracing::debug!("found {} headings", headings.len());
    Ok(headings)
}

/// Body content found in the tree, not yet numbered into the page.
enum Body {
    Paragraph(String),
    Subheading { level: usize, title: String },
    Images(Vec<ImageRef>),
    Card(CardKind, String),
    Code(Vec<String>),
}

/// Body content and the byte it starts at.
struct Found {
    start: usize,
    body: Body,
}

impl Page {
    fn push_body(&mut self, body: Body, blocks: &mut Vec<Block>) {
        match body {
            Body::Paragraph(text) => blocks.push(Block::Paragraph(text)),
            Body::Subheading { level, title } => blocks.push(Block::Subheading { level, title }),
            Body::Code(lines) => blocks.push(Block::Code(lines)),
            Body::Images(images) => {
                for image in images {
                    blocks.push(Block::Image(self.images.len()));
                    self.images.push(image);
                }
            }
            Body::Card(kind, text) => {
                blocks.push(Block::Card(self.cards.len()));
                self.cards.push(CardRef { kind, text });
            }
        }
    }
}

/// Walk the block tree in document order, collecting body content.
fn collect_blocks(node: Node<'_>, source: &str, format: &impl Format, found: &mut Vec<Found>) {
    let start = node.start_byte();
    match format.block_role(node) {
        BlockRole::Container => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                collect_blocks(child, source, format, found);
            }
        }
        BlockRole::Heading => {
            if let Some(level) = format.heading_level(node) {
                let title = format.heading_title(node, source);
                found.push(Found {
                    start,
                    body: Body::Subheading { level, title },
                });
            }
        }
        BlockRole::Paragraph => {
            let text = flow(&format.block_text(node, source));
            let body = match format.inline_images(&text) {
                Some(images) => Body::Images(images),
                None if text.is_empty() => return,
                None => Body::Paragraph(text),
            };
            found.push(Found { start, body });
        }
        BlockRole::ListItem => {
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            let text: Vec<String> = children
                .iter()
                .filter(|child| format.block_role(**child) == BlockRole::Paragraph)
                .map(|child| flow(&format.block_text(*child, source)))
                .collect();
            let text = text.join(" ");
            if !text.is_empty() {
                found.push(Found {
                    start,
                    body: Body::Card(CardKind::Item, text),
                });
            }
            // Nested lists and code become blocks of their own
            for child in children {
                if format.block_role(child) != BlockRole::Paragraph {
                    collect_blocks(child, source, format, found);
                }
            }
        }
        BlockRole::Quote => {
            let mut parts = Vec::new();
            quote_text(node, source, format, &mut parts);
            let text = parts.join(" ");
            if !text.is_empty() {
                found.push(Found {
                    start,
                    body: Body::Card(CardKind::Bubble, text),
                });
            }
        }
        BlockRole::Code => found.push(Found {
            start,
            body: Body::Code(format.code_lines(node, source)),
        }),
        BlockRole::Ignored => {}
    }
}

/// Gather the text of every paragraph and heading inside a quote.
fn quote_text(node: Node<'_>, source: &str, format: &impl Format, parts: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let text = match format.block_role(child) {
            BlockRole::Paragraph => flow(&format.block_text(child, source)),
            BlockRole::Heading => format.heading_title(child, source),
            BlockRole::Ignored => continue,
            _ => {
                quote_text(child, source, format, parts);
                continue;
            }
        };
        if !text.is_empty() {
            parts.push(text);
        }
    }
}

/// Join wrapped source lines into one line of running text.
fn flow(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;

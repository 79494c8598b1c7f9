//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides the tree-sitter query for parsing markdown documents and extracting
//! section structure from ATX (`#`) and setext (underlined) headings. Block structure comes from
//! the block grammar; the inline grammar is only consulted to spot paragraphs that are images.

use crate::formats::{BlockRole, Format};
use crate::section::ImageRef;
use tree_sitter::{Node, Parser};

/// Tree-sitter queries and block mapping for markdown documents.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn heading_level(&self, node: Node<'_>) -> Option<usize> {
        if !in_outline(node) {
            return None;
        }
        let mut cursor = node.walk();
        let level = node.children(&mut cursor).find_map(|child| match child.kind() {
            "setext_h1_underline" => Some(1),
            "setext_h2_underline" => Some(2),
            kind => kind
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse().ok()),
        });
        level
    }

    fn heading_title(&self, node: Node<'_>, source: &str) -> String {
        let text = node
            .child_by_field_name("heading_content")
            .map(|content| self.block_text(content, source))
            .unwrap_or_default();
        let mut words: Vec<&str> = text.split_whitespace().collect();
        // Optional closing sequence: `## Title ##`
        if node.kind() == "atx_heading" && words.last().is_some_and(|w| w.chars().all(|c| c == '#'))
        {
            words.pop();
        }
        words.join(" ")
    }

    fn block_role(&self, node: Node<'_>) -> BlockRole {
        match node.kind() {
            "document" | "section" | "list" => BlockRole::Container,
            "atx_heading" | "setext_heading" => BlockRole::Heading,
            "paragraph" => BlockRole::Paragraph,
            "list_item" => BlockRole::ListItem,
            "block_quote" => BlockRole::Quote,
            "fenced_code_block" | "indented_code_block" | "pipe_table" => BlockRole::Code,
            _ => BlockRole::Ignored,
        }
    }

    fn block_text(&self, node: Node<'_>, source: &str) -> String {
        let mut text = String::new();
        let mut at = node.start_byte();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "block_continuation" {
                text.push_str(source.get(at..child.start_byte()).unwrap_or_default());
                at = child.end_byte();
            }
        }
        text.push_str(source.get(at..node.end_byte()).unwrap_or_default());
        text
    }

    fn code_lines(&self, node: Node<'_>, source: &str) -> Vec<String> {
        let (text, indent) = match node.kind() {
            "fenced_code_block" => {
                let mut cursor = node.walk();
                let content = node
                    .children(&mut cursor)
                    .find(|child| child.kind() == "code_fence_content");
                let text = content
                    .map(|content| self.block_text(content, source))
                    .unwrap_or_default();
                (text, 0)
            }
            "indented_code_block" => (self.block_text(node, source), 4),
            _ => (self.block_text(node, source), 0),
        };

        let mut lines: Vec<String> = text
            .lines()
            .map(|line| {
                let spaces = line.len() - line.trim_start_matches(' ').len();
                line[spaces.min(indent)..].trim_end().to_string()
            })
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }

    fn inline_images(&self, text: &str) -> Option<Vec<ImageRef>> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_md::INLINE_LANGUAGE.into())
            .ok()?;
        let tree = parser.parse(text, None)?;
        let root = tree.root_node();

        let mut images = Vec::new();
        let mut covered = 0;
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let gap = text.get(covered..child.start_byte())?;
            if child.kind() != "image" || !gap.trim().is_empty() {
                return None;
            }
            images.push(ImageRef {
                alt: child_text(child, "image_description", text),
                src: child_text(child, "link_destination", text),
            });
            covered = child.end_byte();
        }

        if images.is_empty() || !text.get(covered..)?.trim().is_empty() {
            return None;
        }
        Some(images)
    }
}

/// Whether a heading sits in the document outline rather than inside a quote or list item.
fn in_outline(node: Node<'_>) -> bool {
    let mut parent = node.parent();
    while let Some(p) = parent {
        match p.kind() {
            "document" => return true,
            "section" => parent = p.parent(),
            _ => return false,
        }
    }
    false
}

fn child_text(node: Node<'_>, kind: &str, source: &str) -> String {
    let mut cursor = node.walk();
    let child = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == kind);
    child
        .and_then(|child| child.utf8_text(source.as_bytes()).ok())
        .unwrap_or_default()
        .to_string()
}

//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over document formats by providing
//! the tree-sitter grammar, the query that locates headings, and the mapping from parsed nodes
//! to the blocks a section body is made of. Each top-level heading marks the start of a section,
//! and the format decides how deep that heading is.

use crate::section::ImageRef;

pub mod markdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a parsed node contributes to a section body.
pub enum BlockRole {
    /// Holds other blocks; its children are walked in order.
    Container,
    /// A heading.
    Heading,
    /// Running text, possibly nothing but images.
    Paragraph,
    /// A list entry, shown as a card.
    ListItem,
    /// A quotation, shown as a bubble card.
    Quote,
    /// Preformatted text kept line for line.
    Code,
    /// Markup with nothing to show.
    Ignored,
}

/// Grammar and block conventions for one document format.
pub trait Format {
    /// Tree-sitter grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;

    /// Query capturing every heading node as `@heading`.
    fn section_query(&self) -> &str;

    /// Heading depth for a heading node in the document's section outline.
    ///
    /// Returns `None` for nodes that are not headings and for headings nested inside other
    /// blocks such as quotes or list items.
    fn heading_level(&self, node: tree_sitter::Node<'_>) -> Option<usize>;

    /// Heading text for a heading node, without markup.
    fn heading_title(&self, node: tree_sitter::Node<'_>, source: &str) -> String;

    /// Role of a node when building section bodies.
    fn block_role(&self, node: tree_sitter::Node<'_>) -> BlockRole;

    /// Source text of a block with container markers (quote prefixes, list indentation) removed.
    fn block_text(&self, node: tree_sitter::Node<'_>, source: &str) -> String;

    /// Lines of a [`BlockRole::Code`] node, verbatim apart from container markers.
    fn code_lines(&self, node: tree_sitter::Node<'_>, source: &str) -> Vec<String>;

    /// The images in a run of inline text, or `None` unless the text is nothing but images.
    fn inline_images(&self, text: &str) -> Option<Vec<ImageRef>>;
}

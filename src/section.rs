//! Section representation for a document presented as one scrolling page.
//!
//! A section is one top-level region of the page, introduced by a heading. Sections keep their
//! source coordinates for diagnostics and a list of body blocks for layout. Images and cards
//! (list items and quote bubbles) are numbered across the whole page so the visibility-driven
//! effects can track them independently of the section they sit in.

#[derive(Clone, Debug)]
/// One fixed scrollable region of the page, addressed by position index.
pub struct Section {
    /// Position in the ordered sequence of sections.
    pub index: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Heading depth in the source document (1 for `#`).
    pub level: usize,
    /// First source line of the heading (0-based).
    pub line_start: usize,
    /// Byte offset where the heading begins.
    pub byte_start: usize,
    /// Byte offset where the section ends (next section heading or end of file).
    pub byte_end: usize,
    /// Body content in reading order.
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A piece of section body content.
pub enum Block {
    /// Running text, already joined into a single line.
    Paragraph(String),
    /// A heading deeper than the section level.
    Subheading {
        /// Heading depth.
        level: usize,
        /// Heading text.
        title: String,
    },
    /// Index into [`Page::images`].
    Image(usize),
    /// Index into [`Page::cards`].
    Card(usize),
    /// Preformatted lines shown as written.
    Code(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An image referenced by the page.
pub struct ImageRef {
    /// Alternative text shown in place of the image.
    pub alt: String,
    /// Image location as written in the document.
    pub src: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Visual flavour of an animated card.
pub enum CardKind {
    /// A list item.
    Item,
    /// A block quote.
    Bubble,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A card that plays an entrance animation when it first comes into view.
pub struct CardRef {
    /// Whether this is a list item or a quote.
    pub kind: CardKind,
    /// Card text with list or quote markers removed.
    pub text: String,
}

#[derive(Clone, Debug, Default)]
/// A loaded document: sections plus the page-wide element registries.
pub struct Page {
    /// Ordered sections; fixed for the lifetime of the page.
    pub sections: Vec<Section>,
    /// Every image in document order.
    pub images: Vec<ImageRef>,
    /// Every card in document order.
    pub cards: Vec<CardRef>,
}

impl Page {
    #[must_use]
    /// Section titles in order.
    pub fn titles(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.title.clone()).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Measured position of a section in document coordinates.
pub struct SectionGeometry {
    /// Offset of the section's top edge from the top of the document.
    pub top: f64,
    /// Rendered height of the section.
    pub height: f64,
}

impl SectionGeometry {
    #[must_use]
    /// Creates geometry from a top offset and height.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    /// Offset one past the section's bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    /// Whether `y` falls in the half-open range `[top, top + height)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

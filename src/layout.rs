//! Lays a page out into rows, the document coordinate system of the terminal viewport.
//!
//! Every section starts with its heading row and a blank separator, followed by its blocks
//! wrapped to the content width. When sections are full height they are padded so each one fills
//! at least a viewport, which keeps exactly one section under the viewport midpoint at rest.
//! Section geometry is contiguous and non-overlapping by construction.

use crate::section::{Block, CardKind, Page, SectionGeometry};
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a rendered row shows.
pub enum LineKind {
    /// The heading row of a section.
    Heading(usize),
    /// A heading nested inside a section body.
    Subheading,
    /// A row of paragraph text.
    Text,
    /// A row belonging to an image.
    Image(usize),
    /// A row of preformatted text.
    Code,
    /// A row belonging to a card, with whether it is the card's first row.
    Card {
        /// Index into the page's cards.
        card: usize,
        /// Whether this row carries the card marker.
        first: bool,
    },
    /// Spacing or padding.
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A single row of laid-out text.
pub struct LayoutLine {
    /// Role of the row, used for styling and hit testing.
    pub kind: LineKind,
    /// Text of the row, already wrapped.
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Rows occupied by an element.
pub struct ElementSpan {
    /// First row.
    pub top: usize,
    /// Number of rows.
    pub height: usize,
}

#[derive(Clone, Debug, Default)]
/// A page laid out for one width and viewport height.
pub struct PageLayout {
    /// All rows of the page in order.
    pub lines: Vec<LayoutLine>,
    /// Geometry of each section, index-aligned with the page's sections.
    pub sections: Vec<SectionGeometry>,
    /// Rows taken by each image.
    pub images: Vec<ElementSpan>,
    /// Rows taken by each card.
    pub cards: Vec<ElementSpan>,
}

impl PageLayout {
    #[must_use]
    /// Total number of rows.
    pub fn content_height(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Clone, Copy, Debug)]
/// Inputs that determine a layout.
pub struct LayoutOptions {
    /// Columns available for text.
    pub width: usize,
    /// Rows in the viewport, used for full-height padding.
    pub viewport_height: usize,
    /// Pad each section to at least `viewport_height` rows.
    pub full_height_sections: bool,
}

/// Lay out a page into rows.
#[must_use]
pub fn layout_page(page: &Page, options: LayoutOptions) -> PageLayout {
    let width = options.width.max(8);
    let mut layout = PageLayout {
        images: vec![ElementSpan::default(); page.images.len()],
        cards: vec![ElementSpan::default(); page.cards.len()],
        ..PageLayout::default()
    };

    for section in &page.sections {
        let top = layout.lines.len();
        push_wrapped(
            &mut layout.lines,
            &section.title,
            width,
            &LineKind::Heading(section.index),
        );
        push_blank(&mut layout.lines);

        for block in &section.blocks {
            match block {
                Block::Paragraph(text) => {
                    push_wrapped(&mut layout.lines, text, width, &LineKind::Text);
                }
                Block::Subheading { level, title } => {
                    let text = format!("{} {title}", "#".repeat(*level));
                    push_wrapped(&mut layout.lines, &text, width, &LineKind::Subheading);
                }
                Block::Code(code) => {
                    for row in code {
                        layout.lines.push(LayoutLine {
                            kind: LineKind::Code,
                            text: format!("  {row}"),
                        });
                    }
                }
                Block::Image(image) => {
                    let start = layout.lines.len();
                    layout.lines.push(LayoutLine {
                        kind: LineKind::Image(*image),
                        text: String::new(),
                    });
                    if let Some(span) = layout.images.get_mut(*image) {
                        *span = ElementSpan {
                            top: start,
                            height: 1,
                        };
                    }
                }
                Block::Card(card) => {
                    let Some(card_ref) = page.cards.get(*card) else {
                        continue;
                    };
                    let marker = match card_ref.kind {
                        CardKind::Item => "• ",
                        CardKind::Bubble => "│ ",
                    };
                    let start = layout.lines.len();
                    let inner = width.saturating_sub(2).max(1);
                    for (i, row) in wrap(&card_ref.text, inner).into_iter().enumerate() {
                        let prefix = if i == 0 || card_ref.kind == CardKind::Bubble {
                            marker
                        } else {
                            "  "
                        };
                        layout.lines.push(LayoutLine {
                            kind: LineKind::Card {
                                card: *card,
                                first: i == 0,
                            },
                            text: format!("{prefix}{row}"),
                        });
                    }
                    if let Some(span) = layout.cards.get_mut(*card) {
                        *span = ElementSpan {
                            top: start,
                            height: layout.lines.len() - start,
                        };
                    }
                }
            }
            push_blank(&mut layout.lines);
        }

        if options.full_height_sections {
            while layout.lines.len() - top < options.viewport_height {
                push_blank(&mut layout.lines);
            }
        }

        let height = layout.lines.len() - top;
        layout
            .sections
            .push(SectionGeometry::new(to_f64(top), to_f64(height)));
    }

    layout
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(rows: usize) -> f64 {
    rows as f64
}

fn push_blank(lines: &mut Vec<LayoutLine>) {
    lines.push(LayoutLine {
        kind: LineKind::Blank,
        text: String::new(),
    });
}

fn push_wrapped(lines: &mut Vec<LayoutLine>, text: &str, width: usize, kind: &LineKind) {
    for row in wrap(text, width) {
        lines.push(LayoutLine {
            kind: kind.clone(),
            text: row,
        });
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        let gap = usize::from(row_width > 0);

        if row_width + gap + word_width <= width {
            if gap == 1 {
                row.push(' ');
            }
            row.push_str(word);
            row_width += gap + word_width;
            continue;
        }

        if row_width > 0 {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }

        if word_width <= width {
            row.push_str(word);
            row_width = word_width;
        } else {
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if row_width + w > width && row_width > 0 {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(c);
                row_width += w;
            }
        }
    }

    if row_width > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;

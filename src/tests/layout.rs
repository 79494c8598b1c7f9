#![allow(clippy::float_cmp)]

use super::{layout_page, wrap, ElementSpan, LayoutOptions, LineKind};
use crate::formats::markdown::MarkdownFormat;
use crate::input::parse_page;
use crate::section::Page;

fn page_of(bodies: &[(&str, &str)]) -> Page {
    let doc: String = bodies
        .iter()
        .map(|(title, body)| format!("# {title}\n\n{body}\n"))
        .collect();
    parse_page(&doc, &MarkdownFormat).unwrap()
}

fn options(full_height_sections: bool) -> LayoutOptions {
    LayoutOptions {
        width: 40,
        viewport_height: 12,
        full_height_sections,
    }
}

#[test]
fn natural_heights_follow_content() {
    let page = page_of(&[
        ("One", "Some text here\n\n![Alt](a.png)\n\n- item one\n"),
        ("Two", "Short.\n"),
    ]);
    let layout = layout_page(&page, options(false));

    // heading, blank, text, blank, image, blank, card, blank
    assert_eq!(layout.sections[0].top, 0.0);
    assert_eq!(layout.sections[0].height, 8.0);
    assert_eq!(layout.sections[1].top, 8.0);
    assert_eq!(layout.sections[1].height, 4.0);
    assert_eq!(layout.content_height(), 12);

    assert_eq!(layout.images, vec![ElementSpan { top: 4, height: 1 }]);
    assert_eq!(layout.cards, vec![ElementSpan { top: 6, height: 1 }]);
    assert_eq!(layout.lines[0].kind, LineKind::Heading(0));
    assert_eq!(layout.lines[4].kind, LineKind::Image(0));
    assert_eq!(layout.lines[6].text, "• item one");
}

#[test]
fn full_height_sections_fill_the_viewport() {
    let page = page_of(&[("One", "a\n"), ("Two", "b\n"), ("Three", "c\n")]);
    let layout = layout_page(&page, options(true));

    let mut expected_top = 0.0;
    for geometry in &layout.sections {
        assert_eq!(geometry.top, expected_top, "sections are contiguous");
        assert!(geometry.height >= 12.0);
        expected_top = geometry.bottom();
    }
    assert_eq!(expected_top, 36.0);
    assert_eq!(layout.content_height(), 36);
}

#[test]
fn long_cards_wrap_under_their_marker() {
    let text = "> one two three four five six seven eight nine ten eleven twelve\n";
    let page = page_of(&[("Quotes", text)]);
    let layout = layout_page(&page, options(false));

    let span = layout.cards[0];
    assert!(span.height > 1);
    for row in &layout.lines[span.top..span.top + span.height] {
        assert!(row.text.starts_with("│ "));
        assert!(matches!(row.kind, LineKind::Card { card: 0, .. }));
    }
}

#[test]
fn code_rows_are_not_wrapped() {
    let body = "```\nlet total = first_value + second_value + third_value + fourth;\n```\n";
    let page = page_of(&[("Code", body)]);
    let layout = layout_page(&page, options(false));

    assert_eq!(layout.lines[2].kind, LineKind::Code);
    assert_eq!(
        layout.lines[2].text,
        "  let total = first_value + second_value + third_value + fourth;"
    );
    assert_eq!(layout.lines[3].kind, LineKind::Blank);
}

#[test]
fn wrap_breaks_on_words() {
    assert_eq!(wrap("hello world foo", 11), vec!["hello world", "foo"]);
    assert_eq!(wrap("  spaced   out  ", 20), vec!["spaced out"]);
    assert_eq!(wrap("", 10), vec![""]);
}

#[test]
fn wrap_splits_overlong_words() {
    assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
}

#[test]
fn wrap_counts_display_width() {
    // Each CJK character is two columns wide
    assert_eq!(wrap("日本語 です", 6), vec!["日本語", "です"]);
}

use super::{load_page, parse_page};
use crate::error::PageError;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::section::{Block, CardKind, ImageRef};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const DOC: &str = "# Welcome

Intro text
that wraps.

![Cover photo](img/cover.jpg)

## Details

- First wish
- Second wish
  continues here

> A message bubble
> on two lines

# Gallery

![One](one.png)
![Two](two.png \"A title\")

# Messages

Bye.
";

#[test]
fn top_level_headings_become_sections() {
    let page = parse_page(DOC, &MarkdownFormat).unwrap();

    assert_eq!(page.titles(), vec!["Welcome", "Gallery", "Messages"]);
    for (i, section) in page.sections.iter().enumerate() {
        assert_eq!(section.index, i);
        assert_eq!(section.level, 1);
    }
    assert_eq!(page.sections[0].line_start, 0);
    assert_eq!(page.sections[1].byte_start, page.sections[0].byte_end);
    assert_eq!(page.sections[2].byte_end, DOC.len());
}

#[test]
fn bodies_split_into_blocks() {
    let page = parse_page(DOC, &MarkdownFormat).unwrap();

    assert_eq!(
        page.sections[0].blocks,
        vec![
            Block::Paragraph("Intro text that wraps.".to_string()),
            Block::Image(0),
            Block::Subheading {
                level: 2,
                title: "Details".to_string()
            },
            Block::Card(0),
            Block::Card(1),
            Block::Card(2),
        ]
    );
    assert_eq!(page.sections[1].blocks, vec![Block::Image(1), Block::Image(2)]);
    assert_eq!(
        page.sections[2].blocks,
        vec![Block::Paragraph("Bye.".to_string())]
    );

    assert_eq!(page.images.len(), 3);
    assert_eq!(page.images[2].src, "two.png");
    assert_eq!(page.cards[1].text, "Second wish continues here");
    assert_eq!(page.cards[2].kind, CardKind::Bubble);
    assert_eq!(page.cards[2].text, "A message bubble on two lines");
}

#[test]
fn shallowest_heading_level_defines_sections() {
    let doc = "Preface without a heading.\n\n## Alpha\n\nText.\n\n### Deeper\n\n## Beta\n\nMore.\n";
    let page = parse_page(doc, &MarkdownFormat).unwrap();

    assert_eq!(page.titles(), vec!["Alpha", "Beta"]);
    assert_eq!(page.sections[0].level, 2);
    assert!(page.sections[0].blocks.contains(&Block::Subheading {
        level: 3,
        title: "Deeper".to_string()
    }));
}

#[test]
fn document_without_headings_is_rejected() {
    let err = parse_page("just text\n", &MarkdownFormat).unwrap_err();
    assert!(matches!(err, PageError::NoSections));
}

#[test]
fn loads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{DOC}").unwrap();

    let page = load_page(file.path(), &MarkdownFormat).unwrap();
    assert_eq!(page.sections.len(), 3);
}

#[test]
fn missing_file_reports_path() {
    let err = load_page(Path::new("no/such/page.md"), &MarkdownFormat).unwrap_err();
    assert!(matches!(err, PageError::Io { .. }));
    assert!(err.to_string().contains("no/such/page.md"));
}

#[test]
fn fenced_code_is_kept_verbatim() {
    let doc = concat!(
        "# Setup\n\n",
        "```sh\n# install deps\n- not a list\n> not a quote\n```\n\n",
        "# Next\n\nDone.\n",
    );
    let page = parse_page(doc, &MarkdownFormat).unwrap();

    assert_eq!(page.titles(), vec!["Setup", "Next"]);
    assert_eq!(
        page.sections[0].blocks,
        vec![Block::Code(vec![
            "# install deps".to_string(),
            "- not a list".to_string(),
            "> not a quote".to_string(),
        ])]
    );
    assert!(page.cards.is_empty());
}

#[test]
fn headings_inside_quotes_do_not_start_sections() {
    let page = parse_page("# One\n\n> # Quoted\n> text\n\n# Two\n", &MarkdownFormat).unwrap();

    assert_eq!(page.titles(), vec!["One", "Two"]);
    assert_eq!(page.sections[0].blocks, vec![Block::Card(0)]);
    assert_eq!(page.cards[0].kind, CardKind::Bubble);
    assert_eq!(page.cards[0].text, "Quoted text");
}

#[test]
fn nested_list_items_become_separate_cards() {
    let doc = "# List\n\n- outer\n  - inner\n- last\n";
    let page = parse_page(doc, &MarkdownFormat).unwrap();

    let texts: Vec<&str> = page.cards.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["outer", "inner", "last"]);
    assert!(page.cards.iter().all(|c| c.kind == CardKind::Item));
}

#[test]
fn setext_headings_are_sections() {
    let page = parse_page("First\n=====\n\nBody.\n\nSecond\n======\n", &MarkdownFormat).unwrap();
    assert_eq!(page.titles(), vec!["First", "Second"]);
    assert_eq!(
        page.sections[0].blocks,
        vec![Block::Paragraph("Body.".to_string())]
    );
}

#[test]
fn closing_hashes_are_dropped_from_titles() {
    let page = parse_page("# Notes on C# ##\n\ntext\n", &MarkdownFormat).unwrap();
    assert_eq!(page.titles(), vec!["Notes on C#"]);
}

#[test]
fn only_image_paragraphs_become_images() {
    let format = MarkdownFormat;
    assert_eq!(
        format.inline_images("![A cat](cat.png)"),
        Some(vec![ImageRef {
            alt: "A cat".to_string(),
            src: "cat.png".to_string()
        }])
    );
    assert_eq!(
        format.inline_images("![](x.png)").map(|images| images[0].alt.clone()),
        Some(String::new())
    );
    assert_eq!(format.inline_images("see ![a](b.png)"), None);
    assert_eq!(format.inline_images("plain words"), None);
}

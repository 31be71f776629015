//! Helpers for building small PDF documents with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A line of text placed on a page: `(font, size, x, y, text)` where font is
/// `"F1"` (regular) or `"F2"` (bold) and y is PDF user space (bottom-up).
pub type Line<'a> = (&'a str, i64, i64, i64, &'a str);

/// Build a PDF whose pages contain the given lines, returning its bytes.
pub fn build_pdf(pages: &[Vec<Line<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for &(font, size, x, y, text) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

const BODY: &str = "Revenue grew steadily across all regions during the reporting period.";
const FOOTERS: [&str; 3] = ["1", "2", "3"];

/// A three-page report: bold title, numbered sections, body text and a
/// page-number footer on every page.
pub fn sample_report() -> Vec<u8> {
    let mut pages = Vec::new();
    for page in 1..=3 {
        let mut lines: Vec<Line<'_>> = Vec::new();
        match page {
            1 => {
                lines.push(("F2", 24, 72, 720, "Annual Report"));
                lines.push(("F1", 14, 72, 660, "1. Introduction"));
                lines.push(("F1", 12, 72, 630, "1.1 Background"));
            }
            2 => lines.push(("F1", 14, 72, 720, "2. Methods")),
            _ => lines.push(("F2", 10, 72, 720, "Key findings")),
        }
        for i in 0..8 {
            lines.push(("F1", 10, 72, 560 - i * 14, BODY));
        }
        lines.push(("F1", 9, 300, 30, FOOTERS[page as usize - 1]));
        pages.push(lines);
    }
    build_pdf(&pages)
}

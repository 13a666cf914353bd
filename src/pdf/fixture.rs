//! In-memory PDFs for tests.

use lopdf::{dictionary, Document, Object, Stream};

/// Build a PDF with `pages` pages, each showing "Page N". Pages hang off an
/// intermediate `Pages` node that carries their `Resources`, and the root
/// node carries the `MediaBox`, so both are inherited.
pub fn sample_pdf(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_pages_id = doc.new_object_id();
    let mid_pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::with_capacity(pages);
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td (Page {n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(mid_pages_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        mid_pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => Object::Reference(root_pages_id),
            "Kids" => kids,
            "Count" => Object::Integer(pages as i64),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(font_id),
                },
            },
        }),
    );
    doc.objects.insert(
        root_pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(mid_pages_id)],
            "Count" => Object::Integer(pages as i64),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(root_pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

/// The "Page N" label of every page, in page order.
pub fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let content = doc.get_page_content(id).unwrap_or_default();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').map_or(0, |i| i + 1);
            let end = text.find(')').unwrap_or(text.len());
            text[start..end].to_string()
        })
        .collect()
}

/// Serialized form of [`sample_pdf`].
pub fn sample_pdf_bytes(pages: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    sample_pdf(pages)
        .save_to(&mut buf)
        .expect("serialize sample PDF");
    buf
}

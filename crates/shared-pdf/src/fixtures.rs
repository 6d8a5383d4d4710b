//! Generated PDFs for tests
//!
//! Builds small single-font documents with `lopdf` so tests never depend on
//! binary files checked into the repository.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Lines of a short residential lease used across test suites
pub const LEASE_LINES: [&str; 8] = [
    "RESIDENTIAL LEASE AGREEMENT",
    "This Lease is made between Sunrise Properties LLC (Landlord) and Jane Doe (Tenant).",
    "1. Term. The lease term is twelve months beginning January 1.",
    "2. Rent. Tenant shall pay rent of 1,850 dollars on the first day of each month.",
    "3. Deposit. Tenant shall pay a security deposit equal to two months of rent.",
    "4. Late Fees. A late fee of 15 percent applies to rent paid after the fifth day.",
    "5. Termination. Landlord may terminate this lease upon seven days written notice.",
    "6. Governing Law. This lease is governed by the laws of the State of Florida.",
];

/// A one-page lease with enough text to pass extraction checks
pub fn sample_lease_pdf() -> Vec<u8> {
    pdf_with_pages(&[&LEASE_LINES])
}

/// A one-page PDF whose content stream draws nothing
pub fn blank_pdf() -> Vec<u8> {
    pdf_with_pages(&[&[]])
}

/// Build a PDF with one page per entry, each page showing the given lines
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|lines| add_page(&mut doc, pages_id, resources_id, lines).into())
        .collect();
    let count = kids.len() as i64;

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .expect("writing a generated PDF to memory cannot fail");
    bytes
}

fn add_page(doc: &mut Document, pages_id: ObjectId, resources_id: ObjectId, lines: &[&str]) -> ObjectId {
    let mut operations = Vec::new();
    if !lines.is_empty() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
        operations.push(Operation::new("TL", vec![16.into()]));
        operations.push(Operation::new("Td", vec![50.into(), 740.into()]));
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encoding a content stream cannot fail"),
    ));

    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    })
}

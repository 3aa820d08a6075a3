use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use salesdoc::brand::{BrandMark, BrandSource, Branding};
use salesdoc::model::{Customer, DocumentKind, DocumentRequest, LineItem, OrderRow};
use salesdoc::{fonts, generate, layout, pricing};

fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn invoice_request() -> DocumentRequest {
    DocumentRequest::new(DocumentKind::Invoice)
        .with_customer(Customer::new("cu-01", "O'Brien & Sons, Ltd."))
        .with_company_name("OBrien Hardware Stores")
        .with_line_item(LineItem::new("Safety Gloves", 100.0).with_quantity(2))
        .with_line_item(LineItem::new("Gumboots", 50.0).with_quantity(1))
        .with_discount_percent(10.0)
        .with_issue_date(issue_date())
}

fn report_request(orders: usize) -> DocumentRequest {
    let mut request =
        DocumentRequest::new(DocumentKind::PostOfficeReport).with_issue_date(issue_date());
    for index in 0..orders {
        request = request.with_order(
            OrderRow::new(format!("or-{index}"), format!("Customer {index}"), 1_000.0)
                .with_order_date(issue_date())
                .with_delivery_address("12 Plantation Road, Avissawella, Western Province"),
        );
    }
    request
}

fn skip(test: &str) {
    eprintln!(
        "Skipping {test}: bundled fonts missing. Set {} or copy the Roboto family into assets/fonts.",
        fonts::FONTS_DIR_VAR
    );
}

fn render_fixed_invoice() -> Vec<u8> {
    let request = invoice_request();
    let totals = pricing::compute_totals(request.line_items(), request.discount_percent());
    layout::render(&request, &totals, Some("INV-4821"), &BrandMark::Unavailable)
        .expect("render fixed invoice")
}

/// Blanks the payload of a `/Tag(...)`-style segment so timestamps and
/// random identifiers do not affect the hash.
fn blank_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
    let mut from = 0;
    while let Some(position) = find(data, tag, from) {
        let mut cursor = position + tag.len();
        while cursor < data.len() && data[cursor] != terminator {
            if !matches!(data[cursor], b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                data[cursor] = b'0';
            }
            cursor += 1;
        }
        from = cursor;
    }
}

/// Blanks the text between a pair of XML tags in embedded XMP metadata.
fn blank_between(data: &mut [u8], open: &[u8], close: &[u8]) {
    let mut from = 0;
    while let Some(start) = find(data, open, from) {
        let content = start + open.len();
        let Some(end) = find(data, close, content) else {
            break;
        };
        for byte in &mut data[content..end] {
            if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                *byte = b'0';
            }
        }
        from = end + close.len();
    }
}

fn find(data: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.len() > data.len().saturating_sub(from) {
        return None;
    }
    data[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|position| position + from)
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let mut data = bytes.to_vec();
    blank_segment(&mut data, b"/CreationDate(", b')');
    blank_segment(&mut data, b"/ModDate(", b')');
    blank_segment(&mut data, b"/Producer(", b')');
    blank_segment(&mut data, b"/ID[", b']');
    blank_between(&mut data, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    blank_between(&mut data, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    blank_between(&mut data, b"<xmp:MetadataDate>", b"</xmp:MetadataDate>");
    blank_between(&mut data, b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>");
    blank_between(&mut data, b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>");
    blank_between(&mut data, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    Sha256::digest(&data).into()
}

#[test]
fn empty_line_items_are_rejected_without_fonts() {
    // Precondition checks run before any font or layout work, so this must
    // fail the same way on machines without the font assets.
    let request = DocumentRequest::new(DocumentKind::Invoice)
        .with_customer(Customer::new("cu-01", "Acme"));

    let err = generate(&request, &Branding::none()).unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn generated_invoice_has_reference_and_safe_filename() {
    if !fonts::fonts_available() {
        skip("generated_invoice_has_reference_and_safe_filename");
        return;
    }

    let document = generate(&invoice_request(), &Branding::none()).expect("generate invoice");

    let reference = document.reference.as_deref().expect("invoice reference");
    assert!(reference.starts_with("INV-"));
    assert_eq!(reference.len(), 8);

    assert!(document.filename.starts_with(&format!("Invoice_{reference}_2024-01-15_")));
    assert!(document.filename.ends_with("OBrien Sons Ltd.pdf"));
    assert!(document.bytes.starts_with(b"%PDF"));
}

#[test]
fn unavailable_brand_mark_still_renders() {
    if !fonts::fonts_available() {
        skip("unavailable_brand_mark_still_renders");
        return;
    }

    let branding = Branding::with_mark(BrandSource::Path("no/such/logo.png".into()));
    let document = generate(&invoice_request(), &branding).expect("generate with text fallback");
    assert!(!document.bytes.is_empty());
}

#[test]
fn quotation_renders_without_quantities() {
    if !fonts::fonts_available() {
        skip("quotation_renders_without_quantities");
        return;
    }

    let request = DocumentRequest::new(DocumentKind::Quotation)
        .with_customer(Customer::new("cu-02", "Ceylon Estates"))
        .with_line_item(LineItem::new("Safety Boots", 6750.0))
        .with_issue_date(issue_date());

    let document = generate(&request, &Branding::none()).expect("generate quotation");
    assert!(document.reference.as_deref().unwrap().starts_with("QU-"));
    assert!(document.filename.starts_with("Quotation_QU-"));
}

#[test]
fn report_paginates_large_order_lists() {
    if !fonts::fonts_available() {
        skip("report_paginates_large_order_lists");
        return;
    }

    let small = generate(&report_request(3), &Branding::none()).expect("small report");
    let large = generate(&report_request(80), &Branding::none()).expect("large report");

    assert!(small.reference.is_none());
    assert!(large.filename.starts_with("Akila_Post_Report_"));
    // 80 rows cannot fit on one A4 page, so the large report must carry
    // strictly more content.
    assert!(large.bytes.len() > small.bytes.len());
}

#[test]
fn overlong_address_rows_are_clamped_to_one_page() {
    if !fonts::fonts_available() {
        skip("overlong_address_rows_are_clamped_to_one_page");
        return;
    }

    // An address that wraps to more lines than fit on an A4 page must not
    // stall pagination; generation has to terminate and yield a document.
    let address = "12 Plantation Road, Avissawella, Western Province, ".repeat(80);
    let request = DocumentRequest::new(DocumentKind::PostOfficeReport)
        .with_issue_date(issue_date())
        .with_order(
            OrderRow::new("or-1", "Ceylon Estates", 1_000.0)
                .with_order_date(issue_date())
                .with_delivery_address(address),
        )
        .with_order(OrderRow::new("or-2", "Acme", 500.0).with_order_date(issue_date()));

    let document = generate(&request, &Branding::none()).expect("clamped report");
    assert!(document.bytes.starts_with(b"%PDF"));
}

#[test]
fn rendering_is_deterministic() {
    if !fonts::fonts_available() {
        skip("rendering_is_deterministic");
        return;
    }

    let first = render_fixed_invoice();
    let second = render_fixed_invoice();

    assert_eq!(first.len(), second.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first),
        normalized_hash(&second),
        "renders must be identical after metadata normalization"
    );
}

//! Safe output filename construction.

use chrono::NaiveDate;

use crate::format::format_iso_date;
use crate::model::DocumentKind;

/// Reduces a recipient name to a filesystem-safe token.
///
/// Keeps only ASCII letters, digits and spaces, collapses interior runs of
/// whitespace to single spaces and trims the ends.  The operation is
/// idempotent: sanitizing an already-sanitized name is a no-op.
pub fn sanitize_recipient(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds the suggested filename for an invoice or quotation, e.g.
/// `Invoice_INV-4821_2024-01-15_OBrien Sons Ltd.pdf`.
pub fn document_filename(
    kind: DocumentKind,
    reference: &str,
    issue_date: NaiveDate,
    recipient_name: &str,
) -> String {
    format!(
        "{}_{}_{}_{}.pdf",
        kind.filename_token().unwrap_or_default(),
        reference,
        format_iso_date(issue_date),
        sanitize_recipient(recipient_name)
    )
}

/// Builds the timestamp-keyed filename for a dispatch report, which has no
/// single recipient or reference code.
pub fn report_filename(timestamp_millis: i64) -> String {
    format!("Akila_Post_Report_{timestamp_millis}.pdf")
}

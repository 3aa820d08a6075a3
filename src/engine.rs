//! Document generation orchestration.
//!
//! One `generate` call runs synchronously to completion: precondition
//! checks, pricing, reference minting, layout, filename.  The engine holds
//! no state between invocations, so retrying a failed generation is simply
//! calling again.

use chrono::Utc;
use log::info;

use crate::brand::Branding;
use crate::error::EngineError;
use crate::model::{DocumentKind, DocumentRequest, GeneratedDocument};
use crate::{filename, layout, pricing, reference};

/// Generates the requested document and hands back the downloadable
/// artifact.
///
/// Precondition failures are returned before any layout work begins; an
/// unavailable brand image degrades to a text mark and still succeeds.
pub fn generate(
    request: &DocumentRequest,
    branding: &Branding,
) -> Result<GeneratedDocument, EngineError> {
    validate(request)?;

    let kind = request.kind();
    let discount_percent = if kind == DocumentKind::Invoice {
        request.discount_percent()
    } else {
        0.0
    };
    let pricing = pricing::compute_totals(request.line_items(), discount_percent);
    let reference = reference::reference_code(kind);
    let mark = branding.resolve();

    info!(
        "generating {kind} ({} line items, {} orders)",
        request.line_items().len(),
        request.orders().len()
    );
    let bytes = layout::render(request, &pricing, reference.as_deref(), &mark)?;

    let filename = match kind {
        DocumentKind::PostOfficeReport => {
            filename::report_filename(Utc::now().timestamp_millis())
        }
        _ => filename::document_filename(
            kind,
            reference.as_deref().unwrap_or_default(),
            request.issue_date(),
            request
                .customer()
                .map(|customer| customer.name.as_str())
                .unwrap_or_default(),
        ),
    };

    Ok(GeneratedDocument {
        bytes,
        filename,
        reference,
    })
}

fn validate(request: &DocumentRequest) -> Result<(), EngineError> {
    match request.kind() {
        DocumentKind::Invoice | DocumentKind::Quotation => {
            if request.customer().is_none() {
                return Err(EngineError::MissingRecipient(request.kind()));
            }
            if request.line_items().is_empty() {
                return Err(EngineError::EmptyLineItems(request.kind()));
            }
        }
        DocumentKind::PostOfficeReport => {
            if request.orders().is_empty() {
                return Err(EngineError::EmptyOrderSelection);
            }
        }
    }
    Ok(())
}

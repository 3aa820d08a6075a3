//! Error taxonomy for the document engine.
//!
//! Precondition failures are detected before any layout work starts, so a
//! caller can surface them as blocking messages without worrying about a
//! half-rendered document.  Rendering failures (missing fonts, page overflow
//! in a reserved region) are wrapped from the underlying `genpdf` error.
//! An unavailable brand image is deliberately *not* an error: the renderer
//! recovers with a text mark and generation succeeds.

use thiserror::Error;

use crate::model::DocumentKind;

/// Errors surfaced by [`crate::engine::generate`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// No recipient was selected for an invoice or quotation.
    #[error("no recipient selected for the {0}")]
    MissingRecipient(DocumentKind),

    /// An invoice or quotation was requested with an empty line-item list.
    #[error("at least one line item is required for the {0}")]
    EmptyLineItems(DocumentKind),

    /// A dispatch report was requested without any selected orders.
    #[error("at least one order must be selected for the dispatch report")]
    EmptyOrderSelection,

    /// The PDF backend failed, e.g. because the bundled fonts are missing.
    #[error("failed to render the document: {0}")]
    Render(#[from] genpdf::error::Error),
}

impl EngineError {
    /// Returns true for failures that are rejected before rendering begins.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, EngineError::Render(_))
    }
}

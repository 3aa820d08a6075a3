//! Pricing and PDF generation engine for sales documents.
//!
//! Given a customer, priced line items and optional adjustments, the engine
//! deterministically computes monetary totals and renders a fixed-layout
//! financial document: an invoice, a quotation, or a post office dispatch
//! report.  The caller resolves all catalog/customer/order data up front
//! and receives back a binary PDF plus a safe suggested filename; the
//! engine performs no I/O of its own besides reading font and brand assets
//! and keeps no state between calls.

pub mod brand;
pub mod elements;
pub mod engine;
pub mod error;
pub mod filename;
pub mod fonts;
pub mod format;
pub mod layout;
pub mod model;
pub mod pricing;
pub mod reference;
pub mod theme;

pub use brand::{BrandMark, BrandSource, Branding};
pub use engine::generate;
pub use error::EngineError;
pub use model::{
    CatalogItem, Customer, DocumentKind, DocumentRequest, GeneratedDocument, LineItem, OrderRow,
};
pub use pricing::PricingResult;

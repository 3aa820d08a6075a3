//! Data structures describing a document generation request.
//!
//! The types in this module are plain values: the engine constructs nothing
//! ahead of time and retains nothing afterwards.  Callers resolve customers,
//! catalog items and pending orders through their own data layer, then hand
//! the already-resolved values over in a [`DocumentRequest`].

use std::fmt;

use chrono::{Local, NaiveDate};

/// The kind of document to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// An itemised invoice with quantities and a payable grand total.
    Invoice,
    /// A per-unit price quotation without quantities.
    Quotation,
    /// A dispatch manifest listing selected pending orders for mailing.
    PostOfficeReport,
}

impl DocumentKind {
    /// Large title printed in the document's meta block, if the kind has one.
    pub fn title(self) -> Option<&'static str> {
        match self {
            DocumentKind::Invoice => Some("INVOICE"),
            DocumentKind::Quotation => Some("QUOTATION"),
            DocumentKind::PostOfficeReport => None,
        }
    }

    /// Prefix of the printed reference code. Reports carry no reference.
    pub fn reference_prefix(self) -> Option<&'static str> {
        match self {
            DocumentKind::Invoice => Some("INV"),
            DocumentKind::Quotation => Some("QU"),
            DocumentKind::PostOfficeReport => None,
        }
    }

    /// Calendar-day offset from the issue date to the due/expiry date.
    pub fn horizon_days(self) -> Option<i64> {
        match self {
            DocumentKind::Invoice => Some(30),
            DocumentKind::Quotation => Some(7),
            DocumentKind::PostOfficeReport => None,
        }
    }

    /// Whether line items of this kind carry a quantity column.
    pub fn uses_quantity(self) -> bool {
        matches!(self, DocumentKind::Invoice)
    }

    /// Capitalised token leading invoice and quotation filenames.  Reports
    /// are keyed by a generation timestamp instead and have no token.
    pub fn filename_token(self) -> Option<&'static str> {
        match self {
            DocumentKind::Invoice => Some("Invoice"),
            DocumentKind::Quotation => Some("Quotation"),
            DocumentKind::PostOfficeReport => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quotation => "quotation",
            DocumentKind::PostOfficeReport => "post office report",
        };
        f.write_str(name)
    }
}

/// A customer already resolved by the caller's data layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub name: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A catalog item with its list price, resolved by the caller's data layer.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// One priced row on an invoice or quotation.
///
/// The display name and unit price are frozen at selection time; later
/// catalog edits do not affect an already-built line item.  The unit price
/// stays user-editable through [`LineItem::with_unit_price`].
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    item_id: Option<String>,
    name: String,
    unit_price: f64,
    quantity: Option<u32>,
}

impl LineItem {
    /// Creates a line item with an explicit name and unit price.
    pub fn new(name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            item_id: None,
            name: name.into(),
            unit_price,
            quantity: None,
        }
    }

    /// Creates a line item from a catalog selection, freezing its name and
    /// list price.
    pub fn from_catalog(item: &CatalogItem) -> Self {
        Self {
            item_id: Some(item.id.clone()),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: None,
        }
    }

    /// Overrides the unit price and returns the updated line item.
    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Sets a quantity and returns the updated line item.  Quotations leave
    /// the quantity unset and are priced per unit.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Quantity of the row; an unset quantity counts as 1.
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}

/// One pending order printed on the dispatch report.
///
/// The delivery address is typed in manually at generation time and is never
/// stored by the engine; a missing address prints as "Not Specified".
#[derive(Clone, Debug, PartialEq)]
pub struct OrderRow {
    pub order_id: String,
    pub order_date: Option<NaiveDate>,
    pub customer_name: String,
    pub delivery_address: Option<String>,
    pub final_amount: f64,
}

impl OrderRow {
    pub fn new(
        order_id: impl Into<String>,
        customer_name: impl Into<String>,
        final_amount: f64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            order_date: None,
            customer_name: customer_name.into(),
            delivery_address: None,
            final_amount,
        }
    }

    pub fn with_order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    pub fn with_delivery_address(mut self, address: impl Into<String>) -> Self {
        self.delivery_address = Some(address.into());
        self
    }
}

/// The engine's single input aggregate.
#[derive(Clone, Debug)]
pub struct DocumentRequest {
    kind: DocumentKind,
    customer: Option<Customer>,
    company_name: Option<String>,
    line_items: Vec<LineItem>,
    discount_percent: f64,
    issue_date: NaiveDate,
    orders: Vec<OrderRow>,
}

impl DocumentRequest {
    /// Creates a request issued today with no recipient or content.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            customer: None,
            company_name: None,
            line_items: Vec::new(),
            discount_percent: 0.0,
            issue_date: Local::now().date_naive(),
            orders: Vec::new(),
        }
    }

    /// Sets the recipient and returns the updated request.
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Sets the optional company line printed under the recipient name.
    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Appends a line item; insertion order is display order.
    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    /// Extends the request with multiple line items.
    pub fn with_line_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = LineItem>,
    {
        self.line_items.extend(items);
        self
    }

    /// Sets the discount percentage (0-100).  Only invoices apply it.
    pub fn with_discount_percent(mut self, discount_percent: f64) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    /// Overrides the issue date (defaults to today).
    pub fn with_issue_date(mut self, issue_date: NaiveDate) -> Self {
        self.issue_date = issue_date;
        self
    }

    /// Appends a pending order for the dispatch report.
    pub fn with_order(mut self, order: OrderRow) -> Self {
        self.orders.push(order);
        self
    }

    /// Extends the request with multiple pending orders.
    pub fn with_orders<I>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = OrderRow>,
    {
        self.orders.extend(orders);
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn orders(&self) -> &[OrderRow] {
        &self.orders
    }
}

/// The binary artifact handed back to the caller.
///
/// The engine never retains it; persisting or transmitting the bytes is the
/// caller's responsibility.
#[derive(Clone, Debug)]
pub struct GeneratedDocument {
    /// Serialized PDF content.
    pub bytes: Vec<u8>,
    /// Suggested output filename, safe for any common filesystem.
    pub filename: String,
    /// The minted reference code, when the kind carries one.
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_freezes_catalog_values() {
        let catalog = CatalogItem::new("it-1", "Safety Gloves", 450.0);
        let line = LineItem::from_catalog(&catalog).with_quantity(3);

        assert_eq!(line.item_id(), Some("it-1"));
        assert_eq!(line.name(), "Safety Gloves");
        assert_eq!(line.unit_price(), 450.0);
        assert_eq!(line.quantity(), 3);
    }

    #[test]
    fn unset_quantity_counts_as_one() {
        let line = LineItem::new("Helmet", 1200.0);
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn kind_properties_match_document_rules() {
        assert_eq!(DocumentKind::Invoice.reference_prefix(), Some("INV"));
        assert_eq!(DocumentKind::Quotation.reference_prefix(), Some("QU"));
        assert_eq!(DocumentKind::PostOfficeReport.reference_prefix(), None);

        assert_eq!(DocumentKind::Invoice.horizon_days(), Some(30));
        assert_eq!(DocumentKind::Quotation.horizon_days(), Some(7));
        assert!(DocumentKind::Invoice.uses_quantity());
        assert!(!DocumentKind::Quotation.uses_quantity());

        assert_eq!(DocumentKind::Invoice.filename_token(), Some("Invoice"));
        assert_eq!(DocumentKind::Quotation.filename_token(), Some("Quotation"));
        assert_eq!(DocumentKind::PostOfficeReport.filename_token(), None);
    }

    #[test]
    fn request_preserves_line_item_order() {
        let request = DocumentRequest::new(DocumentKind::Invoice)
            .with_line_item(LineItem::new("First", 10.0))
            .with_line_item(LineItem::new("Second", 20.0));

        let names: Vec<_> = request.line_items().iter().map(LineItem::name).collect();
        assert_eq!(names, ["First", "Second"]);
    }
}

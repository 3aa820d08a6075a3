//! Fixed-layout page composition for each document kind.
//!
//! The visual protocol is a fixed ordered set of regions: header, sender
//! block, meta block, recipient box, line-item table, totals, footer
//! content and a brand-colour footer band.  The band is reserved on every
//! page through a [`genpdf::PageDecorator`], so report tables that overflow
//! onto further pages keep the frame.

use genpdf::elements::{Break, Paragraph};
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Context, Element, Margins, PageDecorator, PaperSize};

use crate::brand::BrandMark;
use crate::elements::{
    fill_rect, mm, mm_f64, print_line, text_width, CellAlign, ColumnSpec, DocumentHeader,
    GrandTotal, MetaRow, RecipientBox, ReportHeader, ShadedTable,
};
use crate::fonts;
use crate::format::{format_currency, format_display_date, horizon_date};
use crate::model::{DocumentKind, DocumentRequest};
use crate::pricing::{sanitize_amount, PricingResult};
use crate::theme;

const FOOTER_BAND_MM: f64 = 15.0;
const BAND_CONTENT_GAP_MM: f64 = 6.0;

/// Page decorator applying the content margins and painting the footer
/// band with centred inverted contact text on every page.
pub struct PageFrame {
    margins: Margins,
    band_text: String,
    band_fill: Color,
}

impl PageFrame {
    pub fn new(band_text: impl Into<String>, band_fill: Color) -> Self {
        Self {
            margins: Margins::trbl(12, 14, 0, 14),
            band_text: band_text.into(),
            band_fill,
        }
    }
}

impl PageDecorator for PageFrame {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let page = area.size();
        let band_top = mm_f64(page.height) - FOOTER_BAND_MM;
        fill_rect(&area, 0.0, band_top, mm_f64(page.width), FOOTER_BAND_MM, self.band_fill);

        let band_style = style.and(Style::new().bold().with_font_size(11).with_color(theme::WHITE));
        let x = (page.width - text_width(context, &self.band_text, band_style)) / 2.0;
        print_line(&area, context, x, band_top + 4.5, &self.band_text, band_style)?;

        area.add_margins(self.margins);
        let available = area.size().height;
        area.set_height(available - mm(FOOTER_BAND_MM + BAND_CONTENT_GAP_MM));
        Ok(area)
    }
}

fn base_document(title: &str, frame: PageFrame) -> Result<genpdf::Document, Error> {
    let family = fonts::document_font_family()?;
    let mut document = genpdf::Document::new(family);
    document.set_title(title);
    document.set_paper_size(PaperSize::A4);
    document.set_page_decorator(frame);
    Ok(document)
}

/// Renders the requested document into PDF bytes.
///
/// Preconditions (recipient present, non-empty content) are the engine's
/// responsibility and must hold before this is called.
pub fn render(
    request: &DocumentRequest,
    pricing: &PricingResult,
    reference: Option<&str>,
    mark: &BrandMark,
) -> Result<Vec<u8>, Error> {
    match request.kind() {
        DocumentKind::Invoice | DocumentKind::Quotation => {
            render_priced(request, pricing, reference.unwrap_or_default(), mark)
        }
        DocumentKind::PostOfficeReport => render_report(request),
    }
}

fn render_priced(
    request: &DocumentRequest,
    pricing: &PricingResult,
    reference: &str,
    mark: &BrandMark,
) -> Result<Vec<u8>, Error> {
    let kind = request.kind();
    let title = kind.title().unwrap_or_default();
    let mut document = base_document(
        &format!("{title} {reference}"),
        PageFrame::new(theme::FOOTER_CONTACT, theme::THEME),
    )?;

    let mut meta = vec![MetaRow::new(
        "Date:",
        format_display_date(request.issue_date()),
    )];
    if let Some(horizon) = horizon_date(kind, request.issue_date()) {
        let label = match kind {
            DocumentKind::Invoice => "Due Date:",
            _ => "Expiry Date:",
        };
        meta.push(MetaRow::new(label, format_display_date(horizon)));
    }
    let reference_label = match kind {
        DocumentKind::Invoice => "Invoice No:",
        _ => "Quotation No:",
    };
    meta.push(MetaRow::attention(reference_label, reference));

    let brand_image = match mark {
        BrandMark::Loaded(image) => Some(image.clone()),
        BrandMark::Unavailable => None,
    };
    document.push(DocumentHeader::new(title, brand_image, meta));

    let recipient_label = match kind {
        DocumentKind::Invoice => "Invoice To:",
        _ => "Quotation For:",
    };
    let customer_name = request
        .customer()
        .map(|customer| customer.name.clone())
        .unwrap_or_else(|| "Customer Name".to_owned());
    document.push(RecipientBox::new(
        recipient_label,
        customer_name,
        request.company_name().map(str::to_owned),
    ));
    document.push(Break::new(1.5));

    document.push(line_item_table(request));
    document.push(Break::new(1.0));
    document.push(GrandTotal::new(
        "Grand Total:",
        format!("LKR {}", format_currency(pricing.final_amount)),
    ));
    document.push(Break::new(2.0));

    document.push(
        Paragraph::new(format!("This is a system generated {kind}."))
            .styled(Style::new().italic().with_font_size(9).with_color(theme::ATTENTION)),
    );
    document.push(Break::new(0.5));
    document.push(
        Paragraph::new(theme::CATALOG_PARAGRAPH)
            .styled(Style::new().bold().with_font_size(9).with_color(theme::CATALOG_TEXT)),
    );
    document.push(Break::new(1.0));
    let closing = match kind {
        DocumentKind::Invoice => theme::CLOSING_INVOICE,
        _ => theme::CLOSING_QUOTATION,
    };
    document.push(
        Paragraph::new(closing)
            .styled(Style::new().bold().with_font_size(10).with_color(theme::THEME)),
    );

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

fn line_item_table(request: &DocumentRequest) -> ShadedTable {
    match request.kind() {
        DocumentKind::Invoice => {
            let columns = vec![
                ColumnSpec::weighted(1.0),
                ColumnSpec::fixed(35.0).aligned(CellAlign::Right),
                ColumnSpec::fixed(20.0).aligned(CellAlign::Center),
                ColumnSpec::fixed(40.0).aligned(CellAlign::Right).bold(),
            ];
            let mut table = ShadedTable::new(
                columns,
                vec!["Description", "Unit Price", "Qty", "Total (LKR)"],
            );
            for item in request.line_items() {
                let price = sanitize_amount(item.unit_price());
                let quantity = item.quantity();
                let total = price * f64::from(quantity);
                table.push_row(vec![
                    item.name().to_owned(),
                    format_currency(price),
                    quantity.to_string(),
                    format_currency(total),
                ]);
            }
            table
        }
        _ => {
            let columns = vec![
                ColumnSpec::weighted(1.0),
                ColumnSpec::fixed(50.0).aligned(CellAlign::Right).bold(),
            ];
            let mut table =
                ShadedTable::new(columns, vec!["Description", "Unit Price (LKR)"]);
            for item in request.line_items() {
                table.push_row(vec![
                    item.name().to_owned(),
                    format_currency(sanitize_amount(item.unit_price())),
                ]);
            }
            table
        }
    }
}

fn render_report(request: &DocumentRequest) -> Result<Vec<u8>, Error> {
    let mut document = base_document(
        "Post Office Dispatch Report",
        PageFrame::new(theme::REPORT_FOOTER, theme::REPORT_THEME),
    )?;

    document.push(ReportHeader::new(format!(
        "Report Date: {}",
        format_display_date(request.issue_date())
    )));
    document.push(Break::new(1.0));

    let columns = vec![
        ColumnSpec::fixed(12.0).aligned(CellAlign::Center),
        ColumnSpec::fixed(25.0),
        ColumnSpec::fixed(45.0),
        ColumnSpec::weighted(1.0),
        ColumnSpec::fixed(35.0).aligned(CellAlign::Right).bold(),
    ];
    let mut table = ShadedTable::new(
        columns,
        vec!["No", "Date", "Customer Name", "Delivery Address", "Amount"],
    )
    .with_palette(theme::REPORT_THEME, theme::REPORT_STRIPE)
    .with_body_font_size(9);

    for (index, order) in request.orders().iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            order
                .order_date
                .map(format_display_date)
                .unwrap_or_else(|| "N/A".to_owned()),
            order.customer_name.clone(),
            order
                .delivery_address
                .clone()
                .filter(|address| !address.trim().is_empty())
                .unwrap_or_else(|| "Not Specified".to_owned()),
            format!("Rs. {}", format_currency(sanitize_amount(order.final_amount))),
        ]);
    }
    document.push(table);
    document.push(Break::new(1.5));

    document.push(
        Paragraph::new(theme::REPORT_DISCLAIMER)
            .aligned(Alignment::Center)
            .styled(Style::new().italic().with_font_size(9).with_color(theme::FOOTNOTE_GRAY)),
    );

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

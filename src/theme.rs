//! Brand palette and fixed document copy.
//!
//! Every generated document uses the same sender identity and colour scheme,
//! so the values live here as constants instead of being threaded through the
//! request model.

use genpdf::style::Color;

/// Deep royal blue used for rules, titles and the footer band.
pub const THEME: Color = Color::Rgb(26, 35, 126);
/// Light grey fill behind the recipient box.
pub const ACCENT: Color = Color::Rgb(243, 244, 246);
/// Muted grey for secondary labels and sender contact lines.
pub const GRAY_TEXT: Color = Color::Rgb(75, 85, 99);
/// Attention red used for reference codes and the grand total.
pub const ATTENTION: Color = Color::Rgb(220, 38, 38);
/// Default body text colour inside tables.
pub const BODY_TEXT: Color = Color::Rgb(51, 51, 51);
/// Alternating row tint for invoice and quotation tables.
pub const STRIPE: Color = Color::Rgb(248, 249, 250);
/// Header blue used by the dispatch report.
pub const REPORT_THEME: Color = Color::Rgb(20, 83, 136);
/// Alternating row tint for the dispatch report table.
pub const REPORT_STRIPE: Color = Color::Rgb(240, 245, 250);
/// Inverted text colour on filled backgrounds.
pub const WHITE: Color = Color::Rgb(255, 255, 255);
/// Grey for the report's centred disclaimer line.
pub const FOOTNOTE_GRAY: Color = Color::Rgb(120, 120, 120);
/// Dark grey for the catalog paragraph.
pub const CATALOG_TEXT: Color = Color::Rgb(55, 65, 81);

pub const COMPANY_NAME: &str = "AKILA SUPPLIERS";
pub const COMPANY_CONTACT_LINES: [&str; 3] = [
    "No. 75/1, Niripola",
    "Hanwella, Sri Lanka",
    "Contact No: +94 71 700 90 59",
];
/// Short text mark printed when the brand image is unavailable.
pub const BRAND_FALLBACK: &str = "AKILA";
pub const SYSTEM_STRAPLINE: &str = "SALES MANAGEMENT SYSTEM";
pub const FOOTER_CONTACT: &str = "Akila Suppliers  |  071 700 90 59";
pub const REPORT_FOOTER: &str = "AKILA SUPPLIERS - SALES MANAGEMENT SYSTEM";
pub const REPORT_DISCLAIMER: &str =
    "This is a system-generated report by Akila Suppliers Sales System.";
pub const CLOSING_INVOICE: &str = "Thank you for your business!";
pub const CLOSING_QUOTATION: &str = "Looking forward to hearing from you.";
pub const CATALOG_PARAGRAPH: &str = "We are a trusted supplier for over 5 years, providing Safety \
    Gloves (Cotton, Rubber, Disposable), Safety Boots, Gumboots, Helmets, Goggles, Aprons, Face \
    Masks, Disposable Caps, Ear Muffs, Raincoats, Safety Harnesses, Rubber Bands, Cello Tape, \
    Surgical gloves and many more safety items.";

use std::error::Error;
use std::io::Cursor;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use salesdoc::brand::{BrandSource, Branding};
use salesdoc::model::{
    CatalogItem, Customer, DocumentKind, DocumentRequest, LineItem, OrderRow,
};

/// Renders a sample document of each kind for visual inspection.
///
/// Fonts must be present under `assets/fonts` relative to the crate or
/// provided via the `SALESDOC_FONTS_DIR` environment variable.
#[derive(Parser)]
#[command(author, version, about = "Generate sample sales documents")]
struct Cli {
    /// Directory the generated PDF is written to.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sample itemised invoice.
    Invoice,
    /// Render a sample per-unit quotation.
    Quotation,
    /// Render a sample post office dispatch report.
    #[command(name = "report", aliases = ["post-report"])]
    Report,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let request = match cli.command {
        Commands::Invoice => sample_invoice(),
        Commands::Quotation => sample_quotation(),
        Commands::Report => sample_report(),
    };

    let branding = Branding::with_mark(BrandSource::Bytes(placeholder_logo()?));
    let document = salesdoc::generate(&request, &branding)?;

    let path = cli.out.join(&document.filename);
    std::fs::write(&path, &document.bytes)?;
    println!("Generated {} ({} bytes)", path.display(), document.bytes.len());
    Ok(())
}

fn sample_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("it-01", "Safety Gloves (Cotton)", 450.0),
        CatalogItem::new("it-02", "Safety Boots", 6750.0),
        CatalogItem::new("it-03", "Ear Muffs", 1250.0),
    ]
}

fn sample_invoice() -> DocumentRequest {
    let catalog = sample_catalog();
    DocumentRequest::new(DocumentKind::Invoice)
        .with_customer(Customer::new("cu-01", "O'Brien & Sons, Ltd."))
        .with_company_name("OBrien Hardware Stores")
        .with_line_item(LineItem::from_catalog(&catalog[0]).with_quantity(24))
        .with_line_item(LineItem::from_catalog(&catalog[1]).with_quantity(2))
        .with_line_item(LineItem::from_catalog(&catalog[2]).with_quantity(6))
        .with_discount_percent(10.0)
}

fn sample_quotation() -> DocumentRequest {
    let catalog = sample_catalog();
    DocumentRequest::new(DocumentKind::Quotation)
        .with_customer(Customer::new("cu-02", "Ceylon Estates"))
        .with_line_items(catalog.iter().map(LineItem::from_catalog))
}

fn sample_report() -> DocumentRequest {
    let date = chrono::Local::now().date_naive();
    DocumentRequest::new(DocumentKind::PostOfficeReport)
        .with_order(
            OrderRow::new("or-101", "Ceylon Estates", 18_450.0)
                .with_order_date(date)
                .with_delivery_address("12 Plantation Road, Avissawella"),
        )
        .with_order(
            OrderRow::new("or-102", "O'Brien & Sons, Ltd.", 9_925.5).with_order_date(date),
        )
        .with_order(
            OrderRow::new("or-103", "Lanka Industrial Supplies", 64_000.0)
                .with_order_date(date)
                .with_delivery_address("Warehouse 4, Export Processing Zone, Biyagama"),
        )
}

/// Solid-colour stand-in for the real brand image.
fn placeholder_logo() -> Result<Vec<u8>, Box<dyn Error>> {
    let pixels = image::ImageBuffer::from_pixel(160, 160, image::Rgb([26u8, 35, 126]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels).write_to(&mut bytes, image::ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

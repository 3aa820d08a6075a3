//! Custom element implementations built on top of `genpdf` primitives.
//!
//! The fixed document regions (header band, recipient box, shaded tables,
//! grand total) need filled backgrounds and absolutely positioned text that
//! the upstream crate does not ship with, so they are implemented here as
//! `genpdf::Element` types that draw through `Area::draw_line` and
//! `Area::text_section`.

use genpdf::elements::Image;
use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Context, Element, Mm, Position, RenderResult, Scale, Size};
use image::GenericImageView;

use crate::theme;

const MM_PER_INCH: f64 = 25.4;
/// DPI assumed by `genpdf` when sizing raster images.
const IMAGE_DPI: f64 = 300.0;
/// Vertical distance between the strokes used to fill a region.
const FILL_STROKE_STEP_MM: f64 = 0.25;
/// Printed width of the brand image in the header.
const BRAND_IMAGE_WIDTH_MM: f64 = 25.0;

pub(crate) fn mm(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_f64(value: Mm) -> f64 {
    let value: printpdf::Mm = value.into();
    value.0
}

/// Fills a rectangle by drawing tightly stacked horizontal strokes.
///
/// `genpdf` exposes no fill primitive, only stroked lines, so solid regions
/// are built from strokes spaced closer than the default line thickness.
pub(crate) fn fill_rect(
    area: &render::Area<'_>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
) {
    let mut offset = 0.0;
    while offset <= height {
        area.draw_line(
            vec![
                Position::new(mm(x), mm(y + offset)),
                Position::new(mm(x + width), mm(y + offset)),
            ],
            Style::new().with_color(color),
        );
        offset += FILL_STROKE_STEP_MM;
    }
}

/// Measures the rendered width of `text` in the given style.
pub(crate) fn text_width(context: &Context, text: &str, style: Style) -> Mm {
    StyledString::new(text.to_owned(), style).width(&context.font_cache)
}

/// Prints a single line of text at an offset within `area`.
pub(crate) fn print_line(
    area: &render::Area<'_>,
    context: &Context,
    x: Mm,
    y: f64,
    text: &str,
    style: Style,
) -> Result<(), Error> {
    let mut text_area = area.clone();
    text_area.add_offset(Position::new(x, mm(y)));
    if let Some(mut section) = text_area.text_section(&context.font_cache, Position::new(0, 0), style)
    {
        section.print_str(text, style)?;
    }
    Ok(())
}

/// Greedy word wrap against a maximum width, measured through the font cache.
///
/// Words longer than the limit are placed on their own line rather than
/// split mid-word.
pub(crate) fn wrap_text(
    text: &str,
    style: Style,
    font_cache: &genpdf::fonts::FontCache,
    max_width: Mm,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty()
            || StyledString::new(candidate.clone(), style).width(font_cache) <= max_width
        {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_owned();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// A horizontal rule spanning the full width of the content area.
pub struct HorizontalRule {
    color: Color,
    thickness_mm: f64,
}

impl HorizontalRule {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            thickness_mm: 0.5,
        }
    }

    pub fn with_thickness(mut self, thickness_mm: f64) -> Self {
        self.thickness_mm = thickness_mm;
        self
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let width = area.size().width;
        fill_rect(&area, 0.0, 0.0, mm_f64(width), self.thickness_mm, self.color);

        let mut result = RenderResult::default();
        result.size = Size::new(width, mm(self.thickness_mm + 1.0));
        Ok(result)
    }
}

/// One label/value pair in the document meta block.
pub struct MetaRow {
    label: String,
    value: String,
    attention: bool,
}

impl MetaRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            attention: false,
        }
    }

    /// Renders the value in the attention colour (used for reference codes).
    pub fn attention(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            attention: true,
        }
    }
}

/// Header region for invoices and quotations: top rule, brand mark, sender
/// contact block, large kind title and right-aligned meta rows.
///
/// When no brand image is available the short text mark is printed in the
/// same position instead; the rest of the region is unaffected.
pub struct DocumentHeader {
    title: String,
    brand_image: Option<image::DynamicImage>,
    meta: Vec<MetaRow>,
}

const HEADER_HEIGHT_MM: f64 = 62.0;
const LOGO_TOP_MM: f64 = 6.0;
const SENDER_NAME_TOP_MM: f64 = 38.0;
const META_TOP_MM: f64 = 28.0;
const META_ROW_STEP_MM: f64 = 6.0;
const META_LABEL_INSET_MM: f64 = 61.0;

impl DocumentHeader {
    pub fn new(
        title: impl Into<String>,
        brand_image: Option<image::DynamicImage>,
        meta: Vec<MetaRow>,
    ) -> Self {
        Self {
            title: title.into(),
            brand_image,
            meta,
        }
    }

    fn render_brand(
        &self,
        context: &Context,
        area: &render::Area<'_>,
        style: Style,
    ) -> Result<(), Error> {
        match &self.brand_image {
            Some(brand) => {
                let (px_width, _) = brand.dimensions();
                let natural_width_mm = MM_PER_INCH * f64::from(px_width) / IMAGE_DPI;
                let scale = if natural_width_mm > f64::EPSILON {
                    BRAND_IMAGE_WIDTH_MM / natural_width_mm
                } else {
                    1.0
                };

                let mut element = Image::from_dynamic_image(brand.clone())?;
                element.set_scale(Scale::new(scale, scale));
                let mut logo_area = area.clone();
                logo_area.add_offset(Position::new(0, mm(LOGO_TOP_MM)));
                element.render(context, logo_area, style)?;
            }
            None => {
                let mark_style = Style::new().bold().with_font_size(10).with_color(theme::THEME);
                print_line(area, context, mm(0.0), 14.0, theme::BRAND_FALLBACK, mark_style)?;
            }
        }
        Ok(())
    }
}

impl Element for DocumentHeader {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let width = area.size().width;

        HorizontalRule::new(theme::THEME)
            .with_thickness(1.2)
            .render(context, area.clone(), style)?;
        self.render_brand(context, &area, style)?;

        let sender_name_style = Style::new().bold().with_font_size(16).with_color(theme::THEME);
        print_line(
            &area,
            context,
            mm(0.0),
            SENDER_NAME_TOP_MM,
            theme::COMPANY_NAME,
            sender_name_style,
        )?;

        let contact_style = Style::new().with_font_size(10).with_color(theme::GRAY_TEXT);
        for (index, line) in theme::COMPANY_CONTACT_LINES.iter().enumerate() {
            let y = SENDER_NAME_TOP_MM + 7.0 + 5.0 * index as f64;
            print_line(&area, context, mm(0.0), y, line, contact_style)?;
        }

        let title_style = Style::new().bold().with_font_size(28).with_color(theme::THEME);
        let title_x = width - text_width(context, &self.title, title_style);
        print_line(&area, context, title_x, 6.0, &self.title, title_style)?;

        let label_style = Style::new().bold().with_font_size(10).with_color(theme::GRAY_TEXT);
        for (index, row) in self.meta.iter().enumerate() {
            let y = META_TOP_MM + META_ROW_STEP_MM * index as f64;
            let label_x = width - mm(META_LABEL_INSET_MM);
            print_line(&area, context, label_x, y, &row.label, label_style)?;

            let value_color = if row.attention {
                theme::ATTENTION
            } else {
                theme::GRAY_TEXT
            };
            let value_style = Style::new().with_font_size(10).with_color(value_color);
            let value_x = width - text_width(context, &row.value, value_style);
            print_line(&area, context, value_x, y, &row.value, value_style)?;
        }

        let mut result = RenderResult::default();
        result.size = Size::new(width, mm(HEADER_HEIGHT_MM));
        Ok(result)
    }
}

/// Filled box holding the recipient label, customer name and optional
/// company line.
pub struct RecipientBox {
    label: String,
    name: String,
    company: Option<String>,
}

const RECIPIENT_BOX_WIDTH_MM: f64 = 100.0;
const RECIPIENT_BOX_HEIGHT_MM: f64 = 24.0;

impl RecipientBox {
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        company: Option<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            company,
        }
    }
}

impl Element for RecipientBox {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        fill_rect(
            &area,
            0.0,
            0.0,
            RECIPIENT_BOX_WIDTH_MM,
            RECIPIENT_BOX_HEIGHT_MM,
            theme::ACCENT,
        );

        let label_style = Style::new().bold().with_font_size(10).with_color(theme::THEME);
        print_line(&area, context, mm(4.0), 3.0, &self.label, label_style)?;

        let text_style = Style::new().with_font_size(10).with_color(Color::Rgb(0, 0, 0));
        print_line(&area, context, mm(4.0), 9.5, &self.name, text_style)?;
        if let Some(company) = &self.company {
            print_line(&area, context, mm(4.0), 15.5, company, text_style)?;
        }

        let mut result = RenderResult::default();
        result.size = Size::new(area.size().width, mm(RECIPIENT_BOX_HEIGHT_MM + 2.0));
        Ok(result)
    }
}

/// Header region for the dispatch report: brand name, strapline, a
/// right-aligned report date and a thin rule.
pub struct ReportHeader {
    date_line: String,
}

impl ReportHeader {
    pub fn new(date_line: impl Into<String>) -> Self {
        Self {
            date_line: date_line.into(),
        }
    }
}

impl Element for ReportHeader {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let width = area.size().width;

        let name_style = Style::new().bold().with_font_size(22).with_color(theme::REPORT_THEME);
        print_line(&area, context, mm(0.0), 0.0, theme::COMPANY_NAME, name_style)?;

        let sub_style = Style::new().with_font_size(10).with_color(theme::GRAY_TEXT);
        print_line(&area, context, mm(0.0), 9.5, theme::SYSTEM_STRAPLINE, sub_style)?;

        let date_x = width - text_width(context, &self.date_line, sub_style);
        print_line(&area, context, date_x, 9.5, &self.date_line, sub_style)?;

        fill_rect(&area, 0.0, 15.0, mm_f64(width), 0.5, theme::REPORT_THEME);

        let mut result = RenderResult::default();
        result.size = Size::new(width, mm(19.0));
        Ok(result)
    }
}

/// Horizontal alignment of text within a table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug)]
enum ColumnWidth {
    Fixed(f64),
    Weighted(f64),
}

/// Layout of a single table column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    width: ColumnWidth,
    align: CellAlign,
    bold: bool,
}

impl ColumnSpec {
    /// Column with a fixed width in millimetres.
    pub fn fixed(width_mm: f64) -> Self {
        Self {
            width: ColumnWidth::Fixed(width_mm),
            align: CellAlign::Left,
            bold: false,
        }
    }

    /// Column that takes a weighted share of the remaining width.
    pub fn weighted(weight: f64) -> Self {
        Self {
            width: ColumnWidth::Weighted(weight),
            align: CellAlign::Left,
            bold: false,
        }
    }

    pub fn aligned(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }

    /// Renders the column's body cells in bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A table with an inverted header row and alternating body row tint.
///
/// The element paginates itself: when the remaining page height is
/// exhausted it reports `has_more` and continues from the next row on the
/// following page, repeating the header row there.
pub struct ShadedTable {
    columns: Vec<ColumnSpec>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    head_fill: Color,
    stripe: Color,
    head_style: Style,
    body_style: Style,
    padding_mm: f64,
    next_row: usize,
}

impl ShadedTable {
    pub fn new(columns: Vec<ColumnSpec>, header: Vec<&str>) -> Self {
        Self {
            columns,
            header: header.into_iter().map(str::to_owned).collect(),
            rows: Vec::new(),
            head_fill: theme::THEME,
            stripe: theme::STRIPE,
            head_style: Style::new().bold().with_font_size(10).with_color(theme::WHITE),
            body_style: Style::new().with_font_size(10).with_color(theme::BODY_TEXT),
            padding_mm: 2.5,
            next_row: 0,
        }
    }

    /// Overrides the header fill and body stripe colours.
    pub fn with_palette(mut self, head_fill: Color, stripe: Color) -> Self {
        self.head_fill = head_fill;
        self.stripe = stripe;
        self
    }

    pub fn with_body_font_size(mut self, font_size: u8) -> Self {
        self.body_style = self.body_style.with_font_size(font_size);
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    fn column_widths(&self, total_mm: f64) -> Vec<f64> {
        let fixed_sum: f64 = self
            .columns
            .iter()
            .map(|column| match column.width {
                ColumnWidth::Fixed(width) => width,
                ColumnWidth::Weighted(_) => 0.0,
            })
            .sum();
        let weight_sum: f64 = self
            .columns
            .iter()
            .map(|column| match column.width {
                ColumnWidth::Fixed(_) => 0.0,
                ColumnWidth::Weighted(weight) => weight,
            })
            .sum();
        let remaining = (total_mm - fixed_sum).max(0.0);

        self.columns
            .iter()
            .map(|column| match column.width {
                ColumnWidth::Fixed(width) => width,
                ColumnWidth::Weighted(weight) => remaining * weight / weight_sum.max(f64::EPSILON),
            })
            .collect()
    }

    fn cell_style(&self, base: Style, column: &ColumnSpec) -> Style {
        let mut style = base.and(self.body_style);
        if column.bold {
            style.set_bold();
        }
        style
    }

    /// Wraps every cell of a row and returns the lines plus the row height.
    fn measure_row(
        &self,
        context: &Context,
        base: Style,
        widths: &[f64],
        cells: &[String],
    ) -> (Vec<Vec<String>>, f64) {
        let line_height = mm_f64(base.and(self.body_style).line_height(&context.font_cache));
        let mut wrapped = Vec::with_capacity(cells.len());
        let mut max_lines = 1;

        for ((cell, column), width) in cells.iter().zip(&self.columns).zip(widths) {
            let style = self.cell_style(base, column);
            let max_width = mm((width - 2.0 * self.padding_mm).max(1.0));
            let lines = wrap_text(cell, style, &context.font_cache, max_width);
            max_lines = max_lines.max(lines.len());
            wrapped.push(lines);
        }

        let height = line_height * max_lines as f64 + 2.0 * self.padding_mm;
        (wrapped, height)
    }
}

impl Element for ShadedTable {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let total_width = mm_f64(area.size().width);
        let area_height = mm_f64(area.size().height);
        let widths = self.column_widths(total_width);

        let head_style = style.and(self.head_style);
        let body_line_height = mm_f64(style.and(self.body_style).line_height(&context.font_cache));
        let head_line_height = mm_f64(head_style.line_height(&context.font_cache));
        let head_height = head_line_height + 2.0 * self.padding_mm;

        let mut result = RenderResult::default();

        // Require room for the header plus at least one single-line row.
        if area_height < head_height + body_line_height + 2.0 * self.padding_mm {
            result.has_more = self.next_row < self.rows.len();
            return Ok(result);
        }

        fill_rect(&area, 0.0, 0.0, total_width, head_height, self.head_fill);
        let mut column_x = 0.0;
        for ((cell, column), width) in self.header.iter().zip(&self.columns).zip(&widths) {
            let x = aligned_x(context, cell, head_style, column.align, column_x, *width, self.padding_mm);
            print_line(&area, context, mm(x), self.padding_mm, cell, head_style)?;
            column_x += width;
        }

        let mut y = head_height;
        let mut rendered_through = self.rows.len();

        for index in self.next_row..self.rows.len() {
            let (mut wrapped, mut row_height) = {
                let row = &self.rows[index];
                self.measure_row(context, style, &widths, row)
            };

            if y + row_height > area_height {
                if index > self.next_row {
                    rendered_through = index;
                    result.has_more = true;
                    break;
                }

                // The first row of a page slice must always be emitted, or a
                // row taller than a whole page would repeat forever. Clamp it
                // to the lines that fit.
                let available = area_height - y - 2.0 * self.padding_mm;
                let max_lines = ((available / body_line_height).floor() as usize).max(1);
                for lines in &mut wrapped {
                    lines.truncate(max_lines);
                }
                row_height = body_line_height * max_lines as f64 + 2.0 * self.padding_mm;
            }

            if index % 2 == 1 {
                fill_rect(&area, 0.0, y, total_width, row_height, self.stripe);
            }

            let mut column_x = 0.0;
            for ((lines, column), width) in wrapped.iter().zip(&self.columns).zip(&widths) {
                let cell_style = self.cell_style(style, column);
                for (line_index, line) in lines.iter().enumerate() {
                    let x = aligned_x(
                        context,
                        line,
                        cell_style,
                        column.align,
                        column_x,
                        *width,
                        self.padding_mm,
                    );
                    let line_y = y + self.padding_mm + body_line_height * line_index as f64;
                    print_line(&area, context, mm(x), line_y, line, cell_style)?;
                }
                column_x += width;
            }

            y += row_height;
        }

        self.next_row = rendered_through;
        result.size = Size::new(area.size().width, mm(y));
        Ok(result)
    }
}

fn aligned_x(
    context: &Context,
    text: &str,
    style: Style,
    align: CellAlign,
    column_x: f64,
    column_width: f64,
    padding_mm: f64,
) -> f64 {
    match align {
        CellAlign::Left => column_x + padding_mm,
        CellAlign::Center => {
            column_x + (column_width - mm_f64(text_width(context, text, style))) / 2.0
        }
        CellAlign::Right => {
            column_x + column_width - padding_mm - mm_f64(text_width(context, text, style))
        }
    }
}

/// Right-aligned grand total line with a double underline beneath the
/// amount.
pub struct GrandTotal {
    label: String,
    amount: String,
}

impl GrandTotal {
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }
}

impl Element for GrandTotal {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let width = area.size().width;
        let label_style = style.and(Style::new().bold().with_font_size(12).with_color(theme::THEME));
        let amount_style =
            style.and(Style::new().bold().with_font_size(14).with_color(theme::ATTENTION));

        let amount_width = text_width(context, &self.amount, amount_style);
        let label_width = text_width(context, &self.label, label_style);
        let amount_x = width - amount_width;
        let label_x = amount_x - mm(4.0) - label_width;

        print_line(&area, context, label_x, 1.0, &self.label, label_style)?;
        print_line(&area, context, amount_x, 0.0, &self.amount, amount_style)?;

        let glyph_height = mm_f64(
            amount_style
                .font(&context.font_cache)
                .glyph_height(amount_style.font_size()),
        );
        for offset in [0.8, 1.6] {
            area.draw_line(
                vec![
                    Position::new(amount_x, mm(glyph_height + offset)),
                    Position::new(width, mm(glyph_height + offset)),
                ],
                Style::new().with_color(theme::ATTENTION),
            );
        }

        let mut result = RenderResult::default();
        let line_height = amount_style.line_height(&context.font_cache);
        result.size = Size::new(width, line_height + mm(2.5));
        Ok(result)
    }
}

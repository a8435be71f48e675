mod content;
mod geometry;
pub(crate) mod layout;
mod paginate;
pub(crate) mod table;
mod writer;

use crate::format::parse_datetime;
use crate::model::{Margins, PageDimensions, ReportResult, Template, TextOptions};

use content::{Frame, PageHeading};
use paginate::{TEXT_FONT_SIZE, TableRows, WrappedLines, paginate};
use table::TableLayout;

pub use geometry::page_dimensions;

const PRODUCER: &str = "report-pdf";

fn frame_for(dims: PageDimensions, margins: Margins) -> Frame {
    Frame {
        left: margins.left,
        right: dims.width - margins.right,
        top: dims.height - margins.top,
        bottom: margins.bottom,
    }
}

/// Generation date for the heading: `metadata.generatedAt` when present,
/// otherwise the current local time.
fn generated_label(report: &ReportResult) -> String {
    match report.metadata.get("generatedAt") {
        Some(serde_json::Value::String(s)) => match parse_datetime(s) {
            Some(dt) => dt.format("%m/%d/%Y %H:%M").to_string(),
            None => s.clone(),
        },
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
            .map(|dt| dt.format("%m/%d/%Y %H:%M").to_string())
            .unwrap_or_else(|| n.to_string()),
        _ => chrono::Local::now().format("%m/%d/%Y %H:%M").to_string(),
    }
}

fn table_source<'a>(
    report: &'a ReportResult,
    template: &'a Template,
    generated: &'a str,
) -> (PageDimensions, TableRows<'a>) {
    let dims = page_dimensions(template.page_size(), template.orientation());
    let frame = frame_for(dims, template.margins());
    let def = &report.definition;

    let heading = PageHeading {
        header: template.header.as_deref(),
        title: &def.title,
        subtitle: def.subtitle.as_deref(),
        generated,
        record_count: report.data.len(),
    };
    let table = TableLayout::new(&def.columns, frame.left, frame.width());
    log::debug!(
        "Page {}x{}pt, content width {}pt, column widths {:?}",
        dims.width,
        dims.height,
        frame.width(),
        table.widths
    );
    let footer = template
        .footer
        .clone()
        .unwrap_or_else(|| format!("{PRODUCER} - {}", def.title));

    let source = TableRows::new(
        heading,
        table,
        frame,
        &report.data,
        report.totals.as_ref(),
        footer,
    );
    (dims, source)
}

pub fn render_report(report: &ReportResult, template: Option<&Template>) -> Vec<u8> {
    let t0 = std::time::Instant::now();
    let default_template = Template::default();
    let template = template.unwrap_or(&default_template);
    let generated = generated_label(report);

    let (dims, mut source) = table_source(report, template, &generated);
    let pages = paginate(&mut source);
    let t_layout = t0.elapsed();

    let bytes = writer::assemble(dims, &pages);
    let t_assembly = t0.elapsed();

    log::debug!(
        "Report phases: layout={:.1}ms, assembly={:.1}ms ({} rows, {} pages)",
        t_layout.as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        report.data.len(),
        pages.len(),
    );
    bytes
}

/// Data rows that fit on one page for this report and template.
pub fn row_capacity(report: &ReportResult, template: Option<&Template>) -> usize {
    let default_template = Template::default();
    let template = template.unwrap_or(&default_template);
    let (_, source) = table_source(report, template, "");
    source.capacity()
}

pub fn render_text(text: &str, options: Option<&TextOptions>) -> Vec<u8> {
    let options = options.copied().unwrap_or_default();
    let dims = page_dimensions(options.page_size(), options.orientation());
    let frame = frame_for(dims, Margins::default());

    let lines = layout::wrap_text(text, frame.width(), TEXT_FONT_SIZE);
    log::debug!("Wrapped {} chars into {} lines", text.len(), lines.len());
    let mut source = WrappedLines::new(lines, frame);
    let pages = paginate(&mut source);

    writer::assemble(dims, &pages)
}

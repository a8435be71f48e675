mod error;
mod fonts;
mod format;
mod markup;
mod model;
mod pdf;

pub use error::Error;
pub use format::format_value;
pub use markup::{TextContent, parse_markup_text};
pub use model::{
    Alignment, ColumnFormat, Margins, Orientation, PageDimensions, PageSize, Record,
    ReportColumn, ReportDefinition, ReportResult, Template, TextOptions,
};
pub use pdf::layout::{align_x, truncate, wrap_text};
pub use pdf::page_dimensions;
pub use pdf::table::{MIN_FLEX_WIDTH, column_widths};

use std::path::Path;
use std::time::Instant;

/// Render a tabular report to a complete PDF document.
pub fn generate_report_pdf(report: &ReportResult, template: Option<&Template>) -> Vec<u8> {
    pdf::render_report(report, template)
}

/// Render text-bearing content as wrapped, paginated plain text.
pub fn generate_text_pdf<T: TextContent + ?Sized>(
    source: &T,
    options: Option<&TextOptions>,
) -> Vec<u8> {
    let text = source.text_content();
    pdf::render_text(&text, options)
}

/// Number of data rows that fit on each page of this report.
pub fn table_row_capacity(report: &ReportResult, template: Option<&Template>) -> usize {
    pdf::row_capacity(report, template)
}

#[cfg(feature = "async")]
pub async fn generate_report_pdf_async(
    report: &ReportResult,
    template: Option<&Template>,
) -> Vec<u8> {
    generate_report_pdf(report, template)
}

#[cfg(feature = "async")]
pub async fn generate_text_pdf_async<T: TextContent + ?Sized>(
    source: &T,
    options: Option<&TextOptions>,
) -> Vec<u8> {
    generate_text_pdf(source, options)
}

/// Render with `render` and write the bytes to `output`, logging phase timings.
fn write_timed(render: impl FnOnce() -> Vec<u8>, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let bytes = render();
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

pub fn write_report_pdf(
    report: &ReportResult,
    template: Option<&Template>,
    output: &Path,
) -> Result<(), Error> {
    write_timed(|| generate_report_pdf(report, template), output)
}

pub fn write_text_pdf<T: TextContent + ?Sized>(
    source: &T,
    options: Option<&TextOptions>,
    output: &Path,
) -> Result<(), Error> {
    write_timed(|| generate_text_pdf(source, options), output)
}

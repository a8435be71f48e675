use crate::fonts::Font;
use crate::format::format_value;
use crate::model::{Record, ReportColumn};

use super::content::Content;
use super::layout::{align_x, truncate};

pub(crate) const TABLE_FONT_SIZE: f32 = 9.0;
pub(crate) const ROW_HEIGHT: f32 = 16.0;
/// Floor for columns without a fixed width.
pub const MIN_FLEX_WIDTH: f32 = 40.0;

const TOTALS_LABEL: &str = "TOTALS";
/// Baseline offset of cell text above the bottom edge of its row.
const TEXT_RISE: f32 = 4.5;

/// Allocate column widths. Fixed widths are kept; the remaining content width
/// is split evenly across the flexible columns, never below `MIN_FLEX_WIDTH`.
/// Fixed widths are not clamped, so the sum may exceed `content_width`.
pub fn column_widths(columns: &[ReportColumn], content_width: f32) -> Vec<f32> {
    let fixed_sum: f32 = columns.iter().filter_map(|c| c.width).sum();
    let flex_count = columns.iter().filter(|c| c.width.is_none()).count();
    let flex_width = if flex_count > 0 {
        ((content_width - fixed_sum) / flex_count as f32).max(MIN_FLEX_WIDTH)
    } else {
        0.0
    };
    if fixed_sum > content_width {
        log::debug!(
            "Fixed column widths {fixed_sum:.1}pt exceed content width {content_width:.1}pt"
        );
    }
    columns
        .iter()
        .map(|c| c.width.unwrap_or(flex_width))
        .collect()
}

/// Column geometry resolved once per document.
pub(crate) struct TableLayout<'a> {
    pub(crate) columns: &'a [ReportColumn],
    pub(crate) widths: Vec<f32>,
    pub(crate) left: f32,
}

impl<'a> TableLayout<'a> {
    pub(crate) fn new(columns: &'a [ReportColumn], left: f32, content_width: f32) -> Self {
        Self {
            columns,
            widths: column_widths(columns, content_width),
            left,
        }
    }

    /// Right edge of the last column (may overflow the content area).
    pub(crate) fn right(&self) -> f32 {
        self.left + self.widths.iter().sum::<f32>()
    }

    /// Draw one row of cells whose bottom edge sits at `y`.
    fn draw_cells(
        &self,
        content: &mut Content,
        font: Font,
        y: f32,
        texts: impl IntoIterator<Item = (usize, String)>,
    ) {
        let mut xs = Vec::with_capacity(self.widths.len());
        let mut x = self.left;
        for w in &self.widths {
            xs.push(x);
            x += w;
        }
        for (i, text) in texts {
            if text.is_empty() {
                continue;
            }
            let col = &self.columns[i];
            let width = self.widths[i];
            let shown = truncate(&text, width, TABLE_FONT_SIZE);
            let x = align_x(&shown, xs[i], width, col.align, TABLE_FONT_SIZE);
            content.text(font, TABLE_FONT_SIZE, x, y + TEXT_RISE, &shown);
        }
    }

    /// Column labels in bold followed by a rule. Returns the cursor below the rule.
    pub(crate) fn draw_header(&self, content: &mut Content, y: f32) -> f32 {
        let y = y - ROW_HEIGHT;
        let labels = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.label.clone()));
        self.draw_cells(content, Font::Bold, y, labels);
        content.rule(self.left, self.right(), y);
        y
    }

    pub(crate) fn draw_row(&self, content: &mut Content, y: f32, row: &Record) -> f32 {
        let y = y - ROW_HEIGHT;
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (i, format_value(row.get(&c.field), c.format)));
        self.draw_cells(content, Font::Regular, y, cells);
        y
    }

    /// Rule followed by the totals row in bold.
    pub(crate) fn draw_totals(&self, content: &mut Content, y: f32, totals: &Record) -> f32 {
        content.rule(self.left, self.right(), y);
        let y = y - ROW_HEIGHT;
        let cells = totals_cells(self.columns, totals).into_iter().enumerate();
        self.draw_cells(content, Font::Bold, y, cells);
        y
    }
}

/// Cell texts for the totals row. Columns with a total show it formatted; the
/// first column without one carries the `TOTALS` label.
pub(crate) fn totals_cells(columns: &[ReportColumn], totals: &Record) -> Vec<String> {
    let label_at = columns.iter().position(|c| !totals.contains_key(&c.field));
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if Some(i) == label_at {
                TOTALS_LABEL.to_string()
            } else {
                totals
                    .get(&c.field)
                    .map(|v| format_value(Some(v), c.format))
                    .unwrap_or_default()
            }
        })
        .collect()
}

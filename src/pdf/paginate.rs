use crate::fonts::Font;
use crate::model::Record;

use super::content::{Content, Frame, PageHeading, draw_footer};
use super::table::{ROW_HEIGHT, TableLayout};

pub(crate) const TEXT_FONT_SIZE: f32 = 10.0;
pub(crate) const TEXT_LINE_HEIGHT: f32 = 14.0;

/// Produces page content one page at a time, keeping its own cursor between pages.
pub(crate) trait PageSource {
    /// Draw one page. Returns `true` while another page is needed.
    fn draw_page(&mut self, content: &mut Content, page_number: usize) -> bool;
}

/// Drive a source until it is exhausted. Always yields at least one page.
pub(crate) fn paginate(source: &mut impl PageSource) -> Vec<Vec<u8>> {
    let mut pages = Vec::new();
    loop {
        let mut content = Content::new();
        let more = source.draw_page(&mut content, pages.len() + 1);
        pages.push(content.finish());
        if !more {
            break;
        }
    }
    pages
}

/// Number of steps of `step` points that fit between `y` and `floor`.
fn steps_above(mut y: f32, floor: f32, step: f32) -> usize {
    let mut n = 0;
    while y - step >= floor {
        y -= step;
        n += 1;
    }
    n
}

/// Table pages: heading, repeated column header, as many rows as fit, then the
/// totals row on the page that consumed the last row if it still fits there.
pub(crate) struct TableRows<'a> {
    heading: PageHeading<'a>,
    table: TableLayout<'a>,
    frame: Frame,
    rows: &'a [Record],
    totals: Option<&'a Record>,
    footer: String,
    cursor: usize,
    totals_attempted: bool,
}

impl<'a> TableRows<'a> {
    pub(crate) fn new(
        heading: PageHeading<'a>,
        table: TableLayout<'a>,
        frame: Frame,
        rows: &'a [Record],
        totals: Option<&'a Record>,
        footer: String,
    ) -> Self {
        Self {
            heading,
            table,
            frame,
            rows,
            totals,
            footer,
            cursor: 0,
            totals_attempted: false,
        }
    }

    fn draw_fixed(&self, content: &mut Content) -> f32 {
        let y = self.heading.draw(content, &self.frame);
        self.table.draw_header(content, y)
    }

    /// Data rows that fit below the fixed heading and column header.
    pub(crate) fn capacity(&self) -> usize {
        let y = self.draw_fixed(&mut Content::new());
        steps_above(y, self.frame.floor(), ROW_HEIGHT)
    }
}

impl PageSource for TableRows<'_> {
    fn draw_page(&mut self, content: &mut Content, page_number: usize) -> bool {
        let floor = self.frame.floor();
        let mut y = self.draw_fixed(content);

        let start = self.cursor;
        while self.cursor < self.rows.len() {
            if y - ROW_HEIGHT < floor {
                if self.cursor > start {
                    break;
                }
                log::warn!("Page {page_number} has no room for a table row; drawing one anyway");
            }
            y = self.table.draw_row(content, y, &self.rows[self.cursor]);
            self.cursor += 1;
        }
        log::debug!(
            "Page {page_number}: rows {}..{} of {}",
            start,
            self.cursor,
            self.rows.len()
        );

        if self.cursor == self.rows.len() && !self.totals_attempted {
            if let Some(totals) = self.totals {
                self.totals_attempted = true;
                if y - ROW_HEIGHT >= floor {
                    self.table.draw_totals(content, y, totals);
                } else {
                    // Not carried to a new page.
                    log::debug!("Page {page_number}: no room left for totals row, dropped");
                }
            }
        }

        draw_footer(content, &self.frame, Some(self.footer.as_str()), page_number);
        self.cursor < self.rows.len()
    }
}

/// Plain-text pages: pre-wrapped lines flowed by line count, page number footer only.
pub(crate) struct WrappedLines {
    lines: Vec<String>,
    frame: Frame,
    cursor: usize,
}

impl WrappedLines {
    pub(crate) fn new(lines: Vec<String>, frame: Frame) -> Self {
        Self {
            lines,
            frame,
            cursor: 0,
        }
    }
}

impl PageSource for WrappedLines {
    fn draw_page(&mut self, content: &mut Content, page_number: usize) -> bool {
        let floor = self.frame.floor();
        let mut y = self.frame.top;

        let start = self.cursor;
        while self.cursor < self.lines.len() {
            if y - TEXT_LINE_HEIGHT < floor {
                if self.cursor > start {
                    break;
                }
                log::warn!("Page {page_number} has no room for a text line; drawing one anyway");
            }
            y -= TEXT_LINE_HEIGHT;
            let line = &self.lines[self.cursor];
            if !line.is_empty() {
                content.text(Font::Regular, TEXT_FONT_SIZE, self.frame.left, y, line);
            }
            self.cursor += 1;
        }

        draw_footer(content, &self.frame, None, page_number);
        self.cursor < self.lines.len()
    }
}

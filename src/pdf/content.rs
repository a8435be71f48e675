use crate::fonts::{Font, encode_literal, text_width};

/// Reserved band above the bottom margin that only the footer may use.
pub(crate) const FOOTER_SPACE: f32 = 30.0;

const HEADER_SIZE: f32 = 8.0;
const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 11.0;
const META_SIZE: f32 = 8.0;
const FOOTER_SIZE: f32 = 8.0;
const RULE_WIDTH: f32 = 0.5;

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// One page's instruction list, one operator group per line.
#[derive(Default)]
pub(crate) struct Content {
    buf: Vec<u8>,
}

impl Content {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, line: &[u8]) {
        self.buf.extend_from_slice(line);
        self.buf.push(b'\n');
    }

    pub(crate) fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let mut line = format!(
            "BT /{} {} Tf {} {} Td (",
            font.resource_name(),
            num(size),
            num(x),
            num(y)
        )
        .into_bytes();
        line.extend_from_slice(&encode_literal(text));
        line.extend_from_slice(b") Tj ET");
        self.op(&line);
    }

    /// Horizontal line from `x1` to `x2` at height `y`.
    pub(crate) fn rule(&mut self, x1: f32, x2: f32, y: f32) {
        let line = format!(
            "{} w {} {} m {} {} l S",
            num(RULE_WIDTH),
            num(x1),
            num(y),
            num(x2),
            num(y)
        );
        self.op(line.as_bytes());
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Horizontal extent and vertical limits shared by everything drawn on a page.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
}

impl Frame {
    pub(crate) fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Lowest y a body line may occupy.
    pub(crate) fn floor(&self) -> f32 {
        self.bottom + FOOTER_SPACE
    }
}

/// Text repeated at the top of every report page.
pub(crate) struct PageHeading<'a> {
    pub(crate) header: Option<&'a str>,
    pub(crate) title: &'a str,
    pub(crate) subtitle: Option<&'a str>,
    pub(crate) generated: &'a str,
    pub(crate) record_count: usize,
}

impl PageHeading<'_> {
    /// Draw the heading block from the top of the frame; returns the cursor below the rule.
    pub(crate) fn draw(&self, content: &mut Content, frame: &Frame) -> f32 {
        let mut y = frame.top;
        if let Some(header) = self.header {
            y -= HEADER_SIZE;
            content.text(Font::Regular, HEADER_SIZE, frame.left, y, header);
            y -= 8.0;
        }
        y -= TITLE_SIZE;
        content.text(Font::Bold, TITLE_SIZE, frame.left, y, self.title);
        y -= 6.0;
        if let Some(subtitle) = self.subtitle {
            y -= SUBTITLE_SIZE;
            content.text(Font::Regular, SUBTITLE_SIZE, frame.left, y, subtitle);
            y -= 4.0;
        }
        y -= META_SIZE + 4.0;
        let meta = format!(
            "Generated: {} | Records: {}",
            self.generated, self.record_count
        );
        content.text(Font::Regular, META_SIZE, frame.left, y, &meta);
        y -= 6.0;
        content.rule(frame.left, frame.right, y);
        y - 4.0
    }
}

/// Footer line: optional text on the left, page number on the right.
pub(crate) fn draw_footer(
    content: &mut Content,
    frame: &Frame,
    text: Option<&str>,
    page_number: usize,
) {
    let y = frame.bottom + (FOOTER_SPACE - FOOTER_SIZE) / 2.0;
    if let Some(text) = text {
        content.text(Font::Regular, FOOTER_SIZE, frame.left, y, text);
    }
    let label = format!("Page {page_number}");
    let x = frame.right - text_width(&label, FOOTER_SIZE);
    content.text(Font::Regular, FOOTER_SIZE, x, y, &label);
}

//! Object table and byte-exact serialization.
//!
//! Objects are addressed by their 1-based position in the table. Slots 1 and 2
//! (catalog and page tree) are reserved empty up front and patched once every
//! page object exists. Serialization folds the table into an [`Accumulator`]
//! that records each object's start offset for the cross-reference table.

use crate::fonts::Font;
use crate::model::PageDimensions;

pub(crate) const CATALOG_ID: usize = 1;
pub(crate) const PAGE_TREE_ID: usize = 2;

const HEADER: &[u8] = b"%PDF-1.4";
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3";

pub(crate) struct ObjectTable {
    slots: Vec<Vec<u8>>,
}

impl ObjectTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Vec::new(), Vec::new()],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn push(&mut self, body: impl Into<Vec<u8>>) -> usize {
        self.slots.push(body.into());
        self.slots.len()
    }

    /// Append a stream object whose `/Length` is the exact byte length of `data`.
    pub(crate) fn push_stream(&mut self, data: &[u8]) -> usize {
        let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.push(body)
    }

    pub(crate) fn patch(&mut self, id: usize, body: impl Into<Vec<u8>>) {
        self.slots[id - 1] = body.into();
    }

    fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.slots.iter().enumerate().map(|(i, b)| (i + 1, b.as_slice()))
    }
}

/// Output buffer plus the start offset of every object written so far.
/// Each step consumes the accumulator and hands back the advanced one.
pub(crate) struct Accumulator {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl Accumulator {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::new(),
            offsets: Vec::new(),
        }
        .line(HEADER)
        .line(BINARY_MARKER)
    }

    /// Current byte offset, i.e. where the next line will start.
    pub(crate) fn offset(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn line(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self.buf.push(b'\n');
        self
    }

    pub(crate) fn object(mut self, id: usize, body: &[u8]) -> Self {
        debug_assert_eq!(id, self.offsets.len() + 1, "objects must be written in id order");
        self.offsets.push(self.offset());
        self.line(format!("{id} 0 obj").as_bytes())
            .line(body)
            .line(b"endobj")
    }

    /// Cross-reference table, trailer and end marker.
    pub(crate) fn finish(self) -> Vec<u8> {
        let xref_at = self.offset();
        let size = self.offsets.len() + 1;
        let entries: Vec<String> = self
            .offsets
            .iter()
            .map(|off| format!("{off:010} 00000 n "))
            .collect();
        let acc = self
            .line(b"xref")
            .line(format!("0 {size}").as_bytes())
            .line(b"0000000000 65535 f ");
        let acc = entries.iter().fold(acc, |acc, e| acc.line(e.as_bytes()));
        acc.line(b"trailer")
            .line(format!("<< /Size {size} /Root {CATALOG_ID} 0 R >>").as_bytes())
            .line(b"startxref")
            .line(xref_at.to_string().as_bytes())
            .line(b"%%EOF")
            .buf
    }
}

fn serialize(table: &ObjectTable) -> Vec<u8> {
    table
        .iter()
        .fold(Accumulator::new(), |acc, (id, body)| acc.object(id, body))
        .finish()
}

fn page_dictionary(dims: PageDimensions, contents: usize, fonts: &[(Font, usize)]) -> String {
    let font_refs: Vec<String> = fonts
        .iter()
        .map(|(font, id)| format!("/{} {id} 0 R", font.resource_name()))
        .collect();
    format!(
        "<< /Type /Page /Parent {PAGE_TREE_ID} 0 R /MediaBox [0 0 {} {}] \
         /Resources << /Font << {} >> >> /Contents {contents} 0 R >>",
        dims.width,
        dims.height,
        font_refs.join(" ")
    )
}

/// Build the whole document from finished page content streams.
pub(crate) fn assemble(dims: PageDimensions, pages: &[Vec<u8>]) -> Vec<u8> {
    let mut table = ObjectTable::new();
    let fonts: Vec<(Font, usize)> = Font::ALL
        .iter()
        .map(|&font| (font, table.push(font.dictionary())))
        .collect();

    let mut page_ids = Vec::with_capacity(pages.len());
    for stream in pages {
        let contents = table.push_stream(stream);
        page_ids.push(table.push(page_dictionary(dims, contents, &fonts)));
    }

    table.patch(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {PAGE_TREE_ID} 0 R >>"),
    );
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
    table.patch(
        PAGE_TREE_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        ),
    );

    log::debug!("Assembled {} objects for {} pages", table.len(), page_ids.len());
    serialize(&table)
}

#![allow(dead_code)]

use report_pdf::{Record, ReportResult};
use serde_json::{Value, json};

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record must be a JSON object")
}

/// Build a report from JSON pieces; metadata gets a fixed timestamp.
pub fn report(columns: Value, rows: Vec<Value>, totals: Option<Value>) -> ReportResult {
    serde_json::from_value(json!({
        "definition": { "title": "Quarterly Summary", "columns": columns },
        "data": rows,
        "totals": totals,
        "metadata": { "generatedAt": "2024-06-30T12:00:00Z" },
    }))
    .expect("valid report json")
}

/// `n` rows over the three scenario columns.
pub fn numbered_report(n: usize, with_totals: bool) -> ReportResult {
    let rows = (0..n)
        .map(|i| json!({ "name": format!("Row {i}"), "amount": i as f64 * 10.5, "pct": 0.1 }))
        .collect();
    report(
        json!([
            { "field": "name", "label": "Name" },
            { "field": "amount", "label": "Amount", "format": "currency", "align": "right" },
            { "field": "pct", "label": "Share", "format": "percentage", "align": "right" },
        ]),
        rows,
        with_totals.then(|| json!({ "amount": 1.0 })),
    )
}

pub struct Structure {
    pub object_count: usize,
    /// Page content stream bodies, in page order.
    pub pages: Vec<String>,
}

/// Check every structural invariant of the container and return the page streams.
pub fn check_structure(pdf: &[u8]) -> Structure {
    assert!(pdf.starts_with(b"%PDF-1.4\n%"), "header signature");
    assert!(pdf.ends_with(b"%%EOF\n"), "end marker");

    let sx = rfind(pdf, b"startxref\n").expect("startxref");
    let tail = String::from_utf8_lossy(&pdf[sx..]).to_string();
    let xref_at: usize = tail.lines().nth(1).and_then(|l| l.parse().ok()).expect("xref offset");
    assert!(pdf[xref_at..].starts_with(b"xref\n"), "startxref points at xref keyword");

    let xref = String::from_utf8_lossy(&pdf[xref_at..sx]).to_string();
    let mut lines = xref.lines();
    assert_eq!(lines.next(), Some("xref"));
    let size: usize = lines
        .next()
        .and_then(|l| l.strip_prefix("0 "))
        .and_then(|n| n.parse().ok())
        .expect("xref subsection header");
    assert_eq!(lines.next(), Some("0000000000 65535 f "));

    let mut offsets = Vec::new();
    for line in lines.by_ref() {
        if line == "trailer" {
            break;
        }
        assert_eq!(line.len(), 19, "fixed-width xref entry: {line:?}");
        assert!(line.ends_with(" 00000 n "));
        offsets.push(line[..10].parse::<usize>().expect("offset digits"));
    }
    assert_eq!(size, offsets.len() + 1);
    assert_eq!(
        lines.next().map(str::to_string),
        Some(format!("<< /Size {size} /Root 1 0 R >>"))
    );

    for (i, &off) in offsets.iter().enumerate() {
        let decl = format!("{} 0 obj\n", i + 1);
        assert!(pdf[off..].starts_with(decl.as_bytes()), "xref entry for object {}", i + 1);
        assert!(off == 0 || pdf[off - 1] == b'\n', "object {} starts a line", i + 1);
    }

    let catalog = &pdf[offsets[0]..offsets[1]];
    assert!(catalog.starts_with(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n"));

    let mut pages = Vec::new();
    let mut kids = Vec::new();
    let mut id = 5;
    while id <= offsets.len() {
        let stream_obj = &pdf[offsets[id - 1]..];
        let len_at = find(stream_obj, b"<< /Length ", 0).expect("stream dictionary");
        let start = find(stream_obj, b" >>\nstream\n", len_at).expect("stream keyword");
        let declared: usize = String::from_utf8_lossy(&stream_obj[len_at + 11..start])
            .parse()
            .expect("length value");
        let body_at = start + b" >>\nstream\n".len();
        assert!(
            stream_obj[body_at + declared..].starts_with(b"\nendstream\nendobj\n"),
            "object {id} /Length matches its stream"
        );
        pages.push(String::from_utf8_lossy(&stream_obj[body_at..body_at + declared]).to_string());

        let page_obj = String::from_utf8_lossy(&pdf[offsets[id]..]).to_string();
        assert!(page_obj.starts_with(&format!("{} 0 obj\n<< /Type /Page /Parent 2 0 R", id + 1)));
        assert!(page_obj.contains(&format!("/Contents {id} 0 R")));
        kids.push(format!("{} 0 R", id + 1));
        id += 2;
    }

    let tree = String::from_utf8_lossy(&pdf[offsets[1]..offsets[2]]).to_string();
    let expected = format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        kids.len()
    );
    assert_eq!(tree, expected);

    Structure {
        object_count: offsets.len(),
        pages,
    }
}

/// Strings drawn with `Tj` in one content stream, unescaped.
pub fn shown_text(stream: &str) -> Vec<String> {
    stream
        .lines()
        .filter_map(|l| {
            let start = l.find(" Td (")? + 5;
            let end = l.rfind(") Tj ET")?;
            Some(l[start..end].to_string())
        })
        .map(|s| s.replace("\\(", "(").replace("\\)", ")").replace("\\\\", "\\"))
        .collect()
}

/// Text ops in bold (table header and totals cells).
pub fn bold_text(stream: &str) -> Vec<String> {
    stream
        .lines()
        .filter(|l| l.starts_with("BT /F2 9 Tf"))
        .flat_map(|l| shown_text(l))
        .collect()
}

mod common;

use common::{bold_text, check_structure, record, report, shown_text};
use report_pdf::{
    Alignment, ColumnFormat, ReportColumn, ReportDefinition, ReportResult, Template,
    generate_report_pdf,
};
use serde_json::json;

fn scenario() -> ReportResult {
    report(
        json!([
            { "field": "name", "label": "Name" },
            { "field": "amount", "label": "Amount", "format": "currency" },
            { "field": "pct", "label": "Pct", "format": "percentage" },
        ]),
        vec![
            json!({ "name": "A", "amount": 1234.5, "pct": 0.2 }),
            json!({ "name": "B", "amount": -10, "pct": 1 }),
        ],
        Some(json!({ "amount": 1224.5 })),
    )
}

#[test]
fn formatted_rows_and_totals() {
    let _ = env_logger::try_init();
    let pdf = generate_report_pdf(&scenario(), None);
    let s = check_structure(&pdf);
    assert_eq!(s.pages.len(), 1);

    let text = shown_text(&s.pages[0]);
    let a = text.iter().position(|t| t == "A").expect("row A");
    assert_eq!(&text[a..a + 3], ["A", "$1,234.50", "20.0%"]);
    let b = text.iter().position(|t| t == "B").expect("row B");
    assert_eq!(&text[b..b + 3], ["B", "-$10.00", "100.0%"]);

    assert_eq!(
        bold_text(&s.pages[0]),
        vec!["Name", "Amount", "Pct", "TOTALS", "$1,224.50"]
    );
}

#[test]
fn heading_lines() {
    let _ = env_logger::try_init();
    let s = check_structure(&generate_report_pdf(&scenario(), None));
    let text = shown_text(&s.pages[0]);
    assert_eq!(text[0], "Quarterly Summary");
    assert_eq!(text[1], "Generated: 06/30/2024 12:00 | Records: 2");
    assert!(text.contains(&"report-pdf - Quarterly Summary".to_string()));
    assert!(s.pages[0].contains("BT /F2 16 Tf 40 726 Td (Quarterly Summary) Tj ET"));
}

fn generated_line(report: &ReportResult) -> String {
    let s = check_structure(&generate_report_pdf(report, None));
    shown_text(&s.pages[0])[1].clone()
}

#[test]
fn unparseable_generation_date_is_shown_verbatim() {
    let _ = env_logger::try_init();
    let mut report = scenario();
    report
        .metadata
        .insert("generatedAt".into(), json!("end of quarter"));
    assert_eq!(
        generated_line(&report),
        "Generated: end of quarter | Records: 2"
    );
}

#[test]
fn numeric_generation_date_is_epoch_millis() {
    let _ = env_logger::try_init();
    let mut report = scenario();
    report.metadata.insert("generatedAt".into(), json!(0));
    assert_eq!(
        generated_line(&report),
        "Generated: 01/01/1970 00:00 | Records: 2"
    );

    report
        .metadata
        .insert("generatedAt".into(), json!(1_719_748_800_000_i64));
    assert_eq!(
        generated_line(&report),
        "Generated: 06/30/2024 12:00 | Records: 2"
    );
}

#[test]
fn missing_generation_date_uses_current_time() {
    let _ = env_logger::try_init();
    let mut report = scenario();
    report.metadata.remove("generatedAt");
    let line = generated_line(&report);
    let stamp = line
        .strip_prefix("Generated: ")
        .and_then(|rest| rest.strip_suffix(" | Records: 2"))
        .expect("generated line shape");
    // MM/DD/YYYY HH:MM
    let bytes = stamp.as_bytes();
    assert_eq!(bytes.len(), 16, "{stamp}");
    for (i, b) in bytes.iter().enumerate() {
        match i {
            2 | 5 => assert_eq!(*b, b'/', "{stamp}"),
            10 => assert_eq!(*b, b' ', "{stamp}"),
            13 => assert_eq!(*b, b':', "{stamp}"),
            _ => assert!(b.is_ascii_digit(), "{stamp}"),
        }
    }
}

#[test]
fn template_footer_replaces_default() {
    let _ = env_logger::try_init();
    let template = Template {
        footer: Some("Acme Corp (internal)".into()),
        ..Template::default()
    };
    let s = check_structure(&generate_report_pdf(&scenario(), Some(&template)));
    let text = shown_text(&s.pages[0]);
    assert!(text.contains(&"Acme Corp (internal)".to_string()));
    assert!(!text.iter().any(|t| t.starts_with("report-pdf")));
    assert!(s.pages[0].contains("(Acme Corp \\(internal\\)) Tj ET"));
}

#[test]
fn cells_are_truncated_and_right_aligned() {
    let _ = env_logger::try_init();
    let report = ReportResult {
        definition: ReportDefinition {
            title: "Widths".into(),
            subtitle: None,
            columns: vec![
                ReportColumn::new("memo", "Memo").width(60.0),
                ReportColumn::new("qty", "Qty")
                    .width(60.0)
                    .format(ColumnFormat::Number)
                    .align(Alignment::Right),
            ],
        },
        data: vec![record(json!({ "memo": "Accounts receivable", "qty": 12345 }))],
        totals: None,
        metadata: record(json!({ "generatedAt": "2024-01-02" })),
    };
    let s = check_structure(&generate_report_pdf(&report, None));
    let page = &s.pages[0];
    // 60pt cell at 9pt holds 11 characters
    assert!(page.contains("(Accounts ..) Tj ET"));
    // right edge 40 + 120, minus padding and 6 * 4.5pt of text
    assert!(page.contains("BT /F1 9 Tf 129 670.5 Td (12,345) Tj ET"), "{page}");
}

#[test]
fn missing_fields_and_nulls_render_empty() {
    let _ = env_logger::try_init();
    let report = report(
        json!([
            { "field": "name", "label": "Name" },
            { "field": "when", "label": "When", "format": "date" },
        ]),
        vec![json!({ "name": null, "when": "2023-11-05" }), json!({ "name": "only" })],
        None,
    );
    let s = check_structure(&generate_report_pdf(&report, None));
    let text = shown_text(&s.pages[0]);
    assert!(text.contains(&"11/05/2023".to_string()));
    assert!(text.contains(&"only".to_string()));
    assert_eq!(s.pages[0].matches("Td () Tj").count(), 0);
}

#[test]
fn zero_columns_still_produce_a_document() {
    let _ = env_logger::try_init();
    let report = report(json!([]), vec![json!({ "x": 1 })], None);
    let s = check_structure(&generate_report_pdf(&report, None));
    assert_eq!(s.pages.len(), 1);
    assert!(bold_text(&s.pages[0]).is_empty());
}

#[test]
fn report_loads_from_json_with_defaults() {
    let _ = env_logger::try_init();
    let report: ReportResult = serde_json::from_value(json!({
        "definition": {
            "title": "T",
            "columns": [{ "field": "f", "label": "F", "format": "sparkline", "align": "center" }]
        },
        "data": [{ "f": 2.5 }]
    }))
    .expect("report json");
    assert_eq!(report.definition.columns[0].format, ColumnFormat::Plain);
    assert_eq!(report.definition.columns[0].align, Alignment::Center);
    assert!(report.totals.is_none());

    let s = check_structure(&generate_report_pdf(&report, None));
    assert!(shown_text(&s.pages[0]).contains(&"2.5".to_string()));
}

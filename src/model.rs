use serde::Deserialize;
use serde_json::{Map, Value};

/// A row record, totals mapping or metadata mapping: field name -> value.
pub type Record = Map<String, Value>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    #[default]
    None,
    Currency,
    Percentage,
    Number,
    Date,
    /// Any format key this renderer does not know; rendered as the plain value.
    #[serde(other)]
    Plain,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportColumn {
    pub field: String,
    pub label: String,
    #[serde(default)]
    pub format: ColumnFormat,
    /// Fixed width in points. Columns without one share the remaining width.
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub align: Alignment,
}

impl ReportColumn {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            format: ColumnFormat::None,
            width: None,
            align: Alignment::Left,
        }
    }

    pub fn format(mut self, format: ColumnFormat) -> Self {
        self.format = format;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportDefinition {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub columns: Vec<ReportColumn>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportResult {
    pub definition: ReportDefinition,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub totals: Option<Record>,
    #[serde(default)]
    pub metadata: Record,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl PageSize {
    /// Resolve a page-size key; unknown keys fall back to letter.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "a4" => PageSize::A4,
            "legal" => PageSize::Legal,
            "tabloid" => PageSize::Tabloid,
            _ => PageSize::Letter,
        }
    }
}

// Lenient so templates carrying an unknown `pageSize` still load as letter.
impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(PageSize::from_key(&key))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 40.0,
            bottom: 50.0,
            left: 40.0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub page_size: Option<PageSize>,
    #[serde(default)]
    pub margins: Option<Margins>,
}

impl Template {
    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size.unwrap_or_default()
    }

    pub fn margins(&self) -> Margins {
        self.margins.unwrap_or_default()
    }
}

/// Options for the plain-text pipeline.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub page_size: Option<PageSize>,
}

impl TextOptions {
    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size.unwrap_or_default()
    }
}

/// Resolved page size in points, orientation applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

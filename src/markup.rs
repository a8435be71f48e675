use crate::error::Error;

/// Anything that can be flattened to one run of text for the plain-text pipeline.
pub trait TextContent {
    fn text_content(&self) -> String;
}

impl TextContent for str {
    fn text_content(&self) -> String {
        self.to_string()
    }
}

impl TextContent for String {
    fn text_content(&self) -> String {
        self.clone()
    }
}

/// Concatenation of every descendant text node, like DOM `textContent`.
impl TextContent for roxmltree::Node<'_, '_> {
    fn text_content(&self) -> String {
        self.descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }
}

impl TextContent for roxmltree::Document<'_> {
    fn text_content(&self) -> String {
        self.root_element().text_content()
    }
}

/// Parse an XHTML (or any XML) fragment and flatten it to text.
pub fn parse_markup_text(src: &str) -> Result<String, Error> {
    let xml = roxmltree::Document::parse(src)?;
    Ok(xml.text_content())
}

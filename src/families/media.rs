//! Image rule: `<img>`.
//!
//! Receipts can print the company logo and nothing else. Images are never
//! dropped silently: unsupported sources leave a comment and a warning.

use crate::node::Element;
use crate::xml::XmlLine;

use super::Context;

/// Template expression resolving the document's logo.
pub const COMPANY_LOGO: &str = r#"{{ doc.company_logo or "" }}"#;

/// Check if an image source looks like the company logo.
pub fn is_logo_source(src: &str) -> bool {
    let src = src.to_lowercase();
    src.contains("logo") || src.contains("company")
}

pub fn convert_image(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let src = elem.get_attr("src").unwrap_or_default();

    if is_logo_source(src) {
        cx.report.info("Detected logo image - added logo element");
        return vec![
            XmlLine::comment(indent, "Company logo"),
            XmlLine::image(indent, COMPANY_LOGO),
        ];
    }

    cx.report.warn(format!(
        "Image detected: {} - Thermal printer XML has limited image support",
        cx.vault.restore(src)
    ));
    vec![XmlLine::comment(indent, format!("Image: {src} (not supported)"))]
}

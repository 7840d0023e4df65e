//! End-to-end: HTML print format → thermal XML → validation → preview.

use thermal_xml::{
    ConvertError, ConvertRequest, ConverterConfig, InMemoryFormats, NoSchema, PreviewConfig,
    PrintFormat, StaticSchema, convert_html, convert_print_format, render_preview,
    validate_xml_template,
};

const RECEIPT: &str = r#"
<div class="text-center">
  <h2>{{ doc.company }}</h2>
  <p>Invoice: <b>{{ doc.name }}</b></p>
</div>
<hr>
<table>
  <tr><th>Item</th><th>Qty</th><th>Amount</th></tr>
  {% for item in doc.items %}
  <tr><td>{{ item.item_name }}</td><td>{{ item.qty }}</td><td>{{ item.amount }}</td></tr>
  {% endfor %}
</table>
<p style="text-align: right"><strong>Total: {{ doc.grand_total }}</strong></p>
<p>Fish &amp; Chips</p>
"#;

fn pos_schema() -> StaticSchema {
    StaticSchema::new().with_schema(
        "POS Invoice",
        ["company", "grand_total", "items", "item_name", "qty", "amount"],
    )
}

#[test]
fn test_heading_scenario() {
    let out = convert_html("<h2>Total</h2>");
    assert!(out.xml_template.contains(r#"<line><text align="center" bold="true">Total</text></line>"#));
    assert!(out.xml_template.contains(r#"{{ separator("=") }}"#));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_paragraph_scenario() {
    let out = convert_html("<p>Hello {{ doc.name }}</p>");
    assert!(out.xml_template.contains("<line><text>Hello {{ doc.name }}</text></line>"));
    assert!(out.info.contains(&"Total Jinja blocks preserved: 1".to_string()));
}

#[test]
fn test_mismatched_block_scenario() {
    let template = "<output><ticket>{% if x %}<line/>{% endfor %}</ticket></output>";
    let result = validate_xml_template(template, None, &NoSchema);
    assert!(!result.valid);
    assert!(result.errors.iter().all(|e| e.starts_with("Unmatched Jinja blocks")));
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_receipt_converts_and_validates() {
    let out = convert_html(RECEIPT);
    let xml = &out.xml_template;

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<text align="center" bold="true">{{ doc.company }}</text>"#));
    assert!(xml.contains(r#"<text align="left" length="14" bold="true">{{ truncate(Item, 14) }}</text>"#));
    // statements between rows have no line to live on
    assert!(!xml.contains("{% for"));
    assert!(xml.contains("Fish &amp; Chips"));
    assert!(!xml.contains("___JINJA_BLOCK_"));

    let result = validate_xml_template(xml, Some("POS Invoice"), &pos_schema());
    assert!(result.valid, "{:?}", result.errors);
    assert!(result.info.contains(&"XML structure is well-formed".to_string()));
}

#[test]
fn test_table_rows_fit_line_width() {
    for cells in 1..=8 {
        let row: String = (0..cells).map(|i| format!("<td>c{i}</td>")).collect();
        let out = convert_html(&format!("<table><tr>{row}</tr></table>"));
        let total: usize = out
            .xml_template
            .split("length=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next()?.parse::<usize>().ok())
            .sum();
        assert!(total <= 42, "{cells} cells use {total} columns");

        let result = validate_xml_template(&out.xml_template, None, &NoSchema);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }
}

#[test]
fn test_warnings_never_fail_validation() {
    let template = r#"<output><ticket>
<line><text length="30">{{ doc.missing }}</text><text length="30">x</text></line>
</ticket></output>"#;
    let result = validate_xml_template(template, Some("POS Invoice"), &pos_schema());
    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert_eq!(
        result.warnings,
        [
            "Field 'missing' not found in POS Invoice",
            "Line 1: Total width 60 exceeds 42 characters",
        ]
    );
}

#[test]
fn test_illegal_attribute_fails_validation() {
    let template = r#"<output><ticket><line><text bold="yes">x</text></line></ticket></output>"#;
    let result = validate_xml_template(template, None, &NoSchema);
    assert!(!result.valid);
    assert_eq!(result.errors, ["Invalid bold value 'yes'. Must be 'true' or 'false'"]);
}

#[test]
fn test_print_format_request() {
    let formats = InMemoryFormats::new()
        .with_format(
            PrintFormat::new("POS Receipt")
                .with_doc_type("POS Invoice")
                .with_html(RECEIPT),
        )
        .with_format(PrintFormat::new("Standard").standard());
    let config = ConverterConfig::default();

    let out = convert_print_format(&ConvertRequest::from_format("POS Receipt"), &formats, &config)
        .unwrap();
    assert_eq!(out.info[0], "Converted from Print Format: POS Receipt");

    let err = convert_print_format(&ConvertRequest::from_format("Standard"), &formats, &config)
        .unwrap_err();
    assert!(matches!(err, ConvertError::StandardFormat(_)));

    let err = convert_print_format(&ConvertRequest::default(), &formats, &config).unwrap_err();
    assert!(matches!(err, ConvertError::MissingSource));
}

#[test]
fn test_preview_of_static_ticket() {
    let out = convert_html("<h2>Shop</h2><p>Tea &amp; cake</p>");
    let xml = out.xml_template.replace(r#"{{ separator("=") }}"#, "=====");
    let html = render_preview(&xml, &PreviewConfig::default());
    assert!(html.contains("font-weight:bold;'>Shop</span>"));
    assert!(html.contains(">Tea &amp; cake</span>"));
}

#[cfg(feature = "render")]
#[test]
fn test_render_converted_template() {
    let out = convert_html("<h2>{{ doc.company }}</h2><p>{{ doc.customer }}</p>");
    let doc = serde_json::json!({"company": "Cafe", "customer": "Fish & Chips"});
    let xml = thermal_xml::render_template(&out.xml_template, &doc).unwrap();

    assert!(xml.contains(r#"<text align="center" bold="true">Cafe</text>"#));
    assert!(xml.contains(&format!("<text>{}</text>", "=".repeat(42))));
    assert!(xml.contains("<text>Fish &amp; Chips</text>"));

    let result = validate_xml_template(&xml, None, &NoSchema);
    assert!(result.valid, "{:?}", result.errors);
    assert!(render_preview(&xml, &PreviewConfig::default()).contains("Cafe"));
}

//! Pass 6: attribute value legality.

use std::sync::LazyLock;

use regex::Regex;

use crate::report::Report;

pub const VALID_ALIGN: &[&str] = &["left", "right", "center"];
pub const VALID_BOOL: &[&str] = &["true", "false"];
pub const VALID_SIZE: &[&str] = &["0", "1", "2", "3"];
pub const VALID_BARCODE_TYPE: &[&str] = &["EAN13", "CODE128", "EAN8", "UPCA", "UPCE"];

static ALIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"align="([^"]+)""#).expect("align pattern"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"bold="([^"]+)""#).expect("bold pattern"));
static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"underline="([^"]+)""#).expect("underline pattern"));
static LINE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<line[^>]*size="([^"]+)""#).expect("size pattern"));
static BARCODE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<barcode[^>]*type="([^"]+)""#).expect("barcode pattern"));

/// Values computed at render time: `{{` followed later by `}}`.
pub fn is_expression(value: &str) -> bool {
    value
        .strip_prefix("{{")
        .is_some_and(|rest| rest.contains("}}"))
}

/// One attribute rule: where values are found and which are legal.
struct Rule {
    pattern: &'static LazyLock<Regex>,
    allowed: &'static [&'static str],
    message: fn(&str) -> String,
}

fn rules() -> [Rule; 5] {
    [
        Rule {
            pattern: &ALIGN,
            allowed: VALID_ALIGN,
            message: |v| format!("Invalid align value '{v}'. Must be one of: {}", VALID_ALIGN.join(", ")),
        },
        Rule {
            pattern: &BOLD,
            allowed: VALID_BOOL,
            message: |v| format!("Invalid bold value '{v}'. Must be 'true' or 'false'"),
        },
        Rule {
            pattern: &UNDERLINE,
            allowed: VALID_BOOL,
            message: |v| format!("Invalid underline value '{v}'. Must be 'true' or 'false'"),
        },
        Rule {
            pattern: &LINE_SIZE,
            allowed: VALID_SIZE,
            message: |v| format!("Invalid size value '{v}'. Must be one of: {}", VALID_SIZE.join(", ")),
        },
        Rule {
            pattern: &BARCODE_TYPE,
            allowed: VALID_BARCODE_TYPE,
            message: |v| {
                format!("Invalid barcode type '{v}'. Must be one of: {}", VALID_BARCODE_TYPE.join(", "))
            },
        },
    ]
}

pub(crate) fn check(template: &str, report: &mut Report) {
    let mark = report.mark();
    for rule in rules() {
        for caps in rule.pattern.captures_iter(template) {
            let value = &caps[1];
            if !rule.allowed.contains(&value) && !is_expression(value) {
                report.error((rule.message)(value));
            }
        }
    }
    if report.clean_since(mark) {
        report.info("Attribute values are valid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_attributes() {
        let mut report = Report::new();
        check(
            r#"<line size="2"><text align="center" bold="{{ 'true' if x else 'false' }}">a</text></line><barcode type="EAN13">1</barcode>"#,
            &mut report,
        );
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.info, ["Attribute values are valid"]);
    }

    #[test]
    fn test_invalid_attributes() {
        let mut report = Report::new();
        check(
            r#"<line size="9"><text align="middle" underline="yes">a</text></line><barcode type="QR">1</barcode>"#,
            &mut report,
        );
        assert_eq!(
            report.errors,
            [
                "Invalid align value 'middle'. Must be one of: left, right, center",
                "Invalid underline value 'yes'. Must be 'true' or 'false'",
                "Invalid size value '9'. Must be one of: 0, 1, 2, 3",
                "Invalid barcode type 'QR'. Must be one of: EAN13, CODE128, EAN8, UPCA, UPCE",
            ]
        );
    }

    #[test]
    fn test_is_expression() {
        assert!(is_expression("{{ doc.align }}"));
        assert!(!is_expression("{{ broken"));
        assert!(!is_expression("x {{ y }}"));
    }
}

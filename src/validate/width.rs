//! Pass 5: width budget.

use std::sync::LazyLock;

use regex::Regex;

use crate::report::Report;

static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"length="(\d+)""#).expect("length pattern"));
static LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<line[^>]*>(.*?)</line>").expect("line pattern"));
static TEXT_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<text[^>]*length="(\d+)""#).expect("text length pattern"));

/// Digits too long for `u64` count as infinitely wide.
fn parse_width(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

pub(crate) fn check(template: &str, line_width: usize, report: &mut Report) {
    let budget = line_width as u64;
    let mark = report.mark();

    for caps in LENGTH.captures_iter(template) {
        if parse_width(&caps[1]) > budget {
            report.warn(format!(
                "Character width {} exceeds standard printer width ({line_width})",
                &caps[1]
            ));
        }
    }

    for (i, line) in LINE.captures_iter(template).enumerate() {
        let mut widths = TEXT_LENGTH
            .captures_iter(&line[1])
            .map(|caps| parse_width(&caps[1]))
            .peekable();
        if widths.peek().is_none() {
            continue;
        }
        let total = widths.fold(0u64, u64::saturating_add);
        if total > budget {
            report.warn(format!(
                "Line {}: Total width {total} exceeds {line_width} characters",
                i + 1
            ));
        }
    }

    if report.clean_since(mark) {
        report.info("Character widths are within limits");
    }
}

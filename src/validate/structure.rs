//! Pass 2: required ticket structure.

use crate::report::Report;

/// Elements every ticket template must contain.
pub const REQUIRED_ELEMENTS: &[&str] = &["output", "ticket"];

pub(crate) fn check(template: &str, report: &mut Report) {
    for element in REQUIRED_ELEMENTS {
        if !template.contains(&format!("<{element}")) {
            report.error(format!("Missing required element: <{element}>"));
        }
    }

    if template.contains("<output>") && template.contains("</output>") {
        report.info("Required print format elements present");
    }
}

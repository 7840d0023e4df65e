//! Pass 3: templating balance.
//!
//! Block keywords are paired per keyword (`if` with `endif`, `for` with
//! `endfor`, ...). An assignment `{% set x = ... %}` has no closer and is
//! not counted. Delimiter totals (`{{`/`}}`, `{%`/`%}`) are checked apart.

use std::sync::LazyLock;

use regex::Regex;

use crate::report::Report;

/// Keywords that open a block closed by `end<keyword>`.
pub const BLOCK_KEYWORDS: &[&str] = &["if", "for", "block", "macro", "call", "filter", "set", "trans"];

static BLOCK_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%-?\s*(if|for|block|macro|call|filter|set|trans)\s").expect("block open pattern")
});
static BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%-?\s*end(if|for|block|macro|call|filter|set|trans)\s*-?%\}")
        .expect("block close pattern")
});

/// Opening and closing counts of one block keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: &'static str,
    pub open: usize,
    pub close: usize,
}

/// Balance counts for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub blocks: Vec<KeywordCount>,
    pub vars_open: usize,
    pub vars_close: usize,
    pub tags_open: usize,
    pub tags_close: usize,
}

impl Balance {
    pub fn of(template: &str) -> Self {
        let mut blocks: Vec<KeywordCount> = BLOCK_KEYWORDS
            .iter()
            .map(|&keyword| KeywordCount {
                keyword,
                open: 0,
                close: 0,
            })
            .collect();

        for caps in BLOCK_OPEN.captures_iter(template) {
            let keyword = &caps[1];
            let end = caps.get(0).map_or(0, |m| m.end());
            if keyword == "set" && is_assignment(&template[end..]) {
                continue;
            }
            if let Some(count) = blocks.iter_mut().find(|c| c.keyword == keyword) {
                count.open += 1;
            }
        }
        for caps in BLOCK_CLOSE.captures_iter(template) {
            if let Some(count) = blocks.iter_mut().find(|c| c.keyword == &caps[1]) {
                count.close += 1;
            }
        }

        Self {
            blocks,
            vars_open: template.matches("{{").count(),
            vars_close: template.matches("}}").count(),
            tags_open: template.matches("{%").count(),
            tags_close: template.matches("%}").count(),
        }
    }

    /// Error messages, empty when balanced.
    pub fn errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .blocks
            .iter()
            .filter(|c| c.open != c.close)
            .map(|c| {
                format!(
                    "Unmatched Jinja blocks: {} opening tags, {} closing tags",
                    c.open, c.close
                )
            })
            .collect();
        if self.vars_open != self.vars_close {
            errors.push(format!(
                "Unclosed Jinja variables: {} opening, {} closing",
                self.vars_open, self.vars_close
            ));
        }
        if self.tags_open != self.tags_close {
            errors.push(format!(
                "Unclosed Jinja blocks: {} opening, {} closing",
                self.tags_open, self.tags_close
            ));
        }
        errors
    }
}

/// `{% set x = 1 %}`: the rest of the tag holds an `=` before `%}`.
fn is_assignment(rest: &str) -> bool {
    let tag = rest.find("%}").map_or(rest, |end| &rest[..end]);
    tag.contains('=')
}

pub(crate) fn check(template: &str, report: &mut Report) {
    let errors = Balance::of(template).errors();
    if errors.is_empty() {
        report.info("Jinja syntax is valid");
    } else {
        errors.into_iter().for_each(|e| report.error(e));
    }
}

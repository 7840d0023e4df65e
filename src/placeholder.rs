//! Placeholder vault: hides templating fragments from the markup parser.
//!
//! Every `{%...%}`, `{{...}}` and `{#...#}` fragment is swapped for an opaque
//! token before parsing and swapped back after the XML is assembled.
//!
//! # Flow
//!
//! ```text
//! raw markup
//!     │
//!     ▼ Vault::extract()   (statements, then expressions, then comments)
//! placeholder-safe markup ──▶ parse + convert ──▶ assembled XML
//!                                                     │
//!                                                     ▼ Vault::restore()
//!                                               XML + templating
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::TokenShape;

// =============================================================================
// Fragment patterns
// =============================================================================

/// Kind of templating fragment held by the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// `{% ... %}`
    Statement,
    /// `{{ ... }}`
    Expression,
    /// `{# ... #}`
    Comment,
}

impl FragmentKind {
    /// Extraction order.
    pub const ORDER: [FragmentKind; 3] = [Self::Statement, Self::Expression, Self::Comment];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Statement => &STATEMENT,
            Self::Expression => &EXPRESSION,
            Self::Comment => &COMMENT,
        }
    }
}

static STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{%.*?%\}").expect("statement pattern"));
static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("expression pattern"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{#.*?#\}").expect("comment pattern"));

// =============================================================================
// Vault
// =============================================================================

/// One extracted fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub token: String,
    pub fragment: String,
    pub kind: FragmentKind,
}

/// Token to fragment mapping for a single conversion.
#[derive(Debug, Clone)]
pub struct Vault {
    shape: TokenShape,
    entries: Vec<Entry>,
}

impl Vault {
    /// Create a vault whose tokens cannot collide with `raw`.
    ///
    /// When `raw` already contains the prefix of `shape`, the prefix is
    /// widened (`___JINJA_BLOCK_X_`, `___JINJA_BLOCK_X_X_`, ...) until it
    /// no longer occurs.
    pub fn new(shape: &TokenShape, raw: &str) -> Self {
        let mut shape = shape.clone();
        while !shape.prefix.is_empty() && raw.contains(shape.prefix.as_ref()) {
            shape.prefix = format!("{}X_", shape.prefix).into();
        }
        Self {
            shape,
            entries: Vec::new(),
        }
    }

    /// Effective token shape (possibly widened).
    pub fn shape(&self) -> &TokenShape {
        &self.shape
    }

    /// Number of fragments extracted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extracted entries in token order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Fragment stored for `token`.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.fragment.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Extract / restore
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace every templating fragment in `raw` with a fresh token.
    ///
    /// Each class is matched against the current buffer, so identical
    /// fragments at different positions get distinct tokens.
    pub fn extract(&mut self, raw: &str) -> String {
        let mut buffer = raw.to_string();
        for kind in FragmentKind::ORDER {
            let before = self.entries.len();
            buffer = self.extract_kind(&buffer, kind);
            debug!(?kind, count = self.entries.len() - before, "extracted fragments");
        }
        buffer
    }

    fn extract_kind(&mut self, buffer: &str, kind: FragmentKind) -> String {
        let mut out = String::with_capacity(buffer.len());
        let mut last = 0;
        for found in kind.pattern().find_iter(buffer) {
            out.push_str(&buffer[last..found.start()]);
            let token = self.shape.token(self.entries.len());
            out.push_str(&token);
            self.entries.push(Entry {
                token,
                fragment: found.as_str().to_string(),
                kind,
            });
            last = found.end();
        }
        out.push_str(&buffer[last..]);
        out
    }

    /// Substitute every token in `text` with its fragment.
    ///
    /// Newest entries first: a fragment extracted later may contain the
    /// token of an earlier one (a comment wrapping an expression).
    pub fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for entry in self.entries.iter().rev() {
            if out.contains(&entry.token) {
                out = out.replace(&entry.token, &entry.fragment);
            }
        }
        out
    }

    /// Byte ranges of the tokens of this vault's shape occurring in `text`.
    pub fn token_spans<'t>(&self, text: &'t str) -> TokenSpans<'_, 't> {
        TokenSpans {
            shape: &self.shape,
            text,
            pos: 0,
        }
    }

    /// Check if `text` still contains a token of this vault's shape.
    pub fn has_tokens(&self, text: &str) -> bool {
        self.token_spans(text).next().is_some()
    }
}

// =============================================================================
// TokenSpans
// =============================================================================

/// Iterator over `prefix + digits + suffix` spans, ascending and disjoint.
#[derive(Debug)]
pub struct TokenSpans<'v, 't> {
    shape: &'v TokenShape,
    text: &'t str,
    pos: usize,
}

impl Iterator for TokenSpans<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let prefix = self.shape.prefix.as_ref();
        let suffix = self.shape.suffix.as_ref();
        if prefix.is_empty() {
            return None;
        }

        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let offset = rest.find(prefix)?;
            let start = self.pos + offset;
            let after_prefix = start + prefix.len();
            let digits = self.text[after_prefix..]
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
            let end = after_prefix + digits;
            if digits > 0 && self.text[end..].starts_with(suffix) {
                self.pos = end + suffix.len();
                return Some(start..self.pos);
            }
            self.pos = after_prefix;
        }
        None
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_for(raw: &str) -> Vault {
        Vault::new(&TokenShape::JINJA_BLOCK, raw)
    }

    #[test]
    fn test_class_order() {
        let raw = "{{ a }} {# c #} {% if x %}";
        let mut vault = vault_for(raw);
        let safe = vault.extract(raw);

        assert_eq!(safe, "___JINJA_BLOCK_1___ ___JINJA_BLOCK_2___ ___JINJA_BLOCK_0___");
        assert_eq!(vault.get("___JINJA_BLOCK_0___"), Some("{% if x %}"));
        assert_eq!(vault.entries()[1].kind, FragmentKind::Expression);
        assert_eq!(vault.restore(&safe), raw);
    }

    #[test]
    fn test_multiline_non_greedy() {
        let raw = "<p>{{\n  doc.name\n}}</p><p>{{ doc.total }}</p>";
        let mut vault = vault_for(raw);
        let safe = vault.extract(raw);

        assert_eq!(vault.len(), 2);
        assert_eq!(vault.entries()[0].fragment, "{{\n  doc.name\n}}");
        assert!(!safe.contains("{{"));
    }

    #[test]
    fn test_duplicate_fragments_get_own_tokens() {
        let raw = "{{ x }}|{{ x }}";
        let mut vault = vault_for(raw);
        let safe = vault.extract(raw);

        assert_eq!(safe, "___JINJA_BLOCK_0___|___JINJA_BLOCK_1___");
        assert_eq!(vault.restore(&safe), raw);
    }

    #[test]
    fn test_comment_wrapping_expression() {
        let raw = "{# old: {{ doc.x }} #}";
        let mut vault = vault_for(raw);
        let safe = vault.extract(raw);

        assert_eq!(vault.len(), 2);
        assert_eq!(vault.entries()[1].fragment, "{# old: ___JINJA_BLOCK_0___ #}");
        assert_eq!(vault.restore(&safe), raw);
    }

    #[test]
    fn test_prefix_widened_on_collision() {
        let raw = "literal ___JINJA_BLOCK_0___ and {{ y }}";
        let mut vault = vault_for(raw);
        let safe = vault.extract(raw);

        assert_eq!(vault.shape().prefix, "___JINJA_BLOCK_X_");
        assert!(safe.contains("___JINJA_BLOCK_0___"));
        assert_eq!(vault.restore(&safe), raw);
    }

    #[test]
    fn test_token_spans() {
        let vault = vault_for("");
        let text = "a ___JINJA_BLOCK_12___b___JINJA_BLOCK_x___ ___JINJA_BLOCK_3___";
        let spans: Vec<_> = vault.token_spans(text).map(|r| &text[r]).collect();
        assert_eq!(spans, ["___JINJA_BLOCK_12___", "___JINJA_BLOCK_3___"]);
        assert!(!vault.has_tokens("plain"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn piece() -> impl Strategy<Value = String> {
            prop_oneof![
                "[a-z <>&]{0,6}",
                "[a-z ]{0,4}".prop_map(|s| format!("{{{{ {s} }}}}")),
                "[a-z ]{0,4}".prop_map(|s| format!("{{% {s} %}}")),
                "[a-z ]{0,4}".prop_map(|s| format!("{{# {s} #}}")),
            ]
        }

        proptest! {
            #[test]
            fn test_round_trip(pieces in proptest::collection::vec(piece(), 0..12)) {
                let raw = pieces.concat();
                let mut vault = vault_for(&raw);
                let safe = vault.extract(&raw);

                let hidden = !safe.contains("{{") && !safe.contains("{%") && !safe.contains("{#");
                prop_assert!(hidden);
                let restored = vault.restore(&safe);
                prop_assert_eq!(&restored, &raw);
                prop_assert!(!vault.has_tokens(&restored));
            }
        }
    }
}

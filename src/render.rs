//! Rendering XML+Jinja templates against a document.
//!
//! The environment carries the receipt helpers every converted template
//! relies on (`truncate`, `separator`, `format_money`, `format_date`, ...).
//! Money and dates use one fixed layout (`1,234.50`, `31-12-2025`). Output is
//! HTML-escaped, which is also valid XML escaping, so document values such
//! as `Fish & Chips` cannot break the ticket markup.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use minijinja::value::{Kwargs, Value};
use minijinja::{AutoEscape, Environment, Error, State, context};

use crate::config::LINE_WIDTH;
use crate::error::RenderError;

// =============================================================================
// Helpers
// =============================================================================

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Cut to `width` characters, or pad with spaces on the right.
pub fn truncate(s: &str, width: usize) -> String {
    pad_left(s, width)
}

/// Left-justify: pad on the right to `width`, cut to `width`.
pub fn pad_left(s: &str, width: usize) -> String {
    let len = char_len(s);
    if len >= width {
        return take_chars(s, width);
    }
    format!("{s}{}", " ".repeat(width - len))
}

/// Right-justify: pad on the left to `width`, cut to `width`.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = char_len(s);
    if len >= width {
        return take_chars(s, width);
    }
    format!("{}{s}", " ".repeat(width - len))
}

/// Center in `width`; an odd margin puts the extra space on the right
/// unless `width` is odd too.
pub fn pad_center(s: &str, width: usize) -> String {
    let len = char_len(s);
    if len >= width {
        return take_chars(s, width);
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{s}{}", " ".repeat(left), " ".repeat(margin - left))
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Lenient number conversion; anything unparseable is zero.
fn to_float(value: &Value) -> f64 {
    match value.as_str() {
        Some(s) => s.trim().parse().unwrap_or(0.0),
        None => f64::try_from(value.clone()).unwrap_or(0.0),
    }
}

fn text(value: &Value) -> String {
    if value.is_none() || value.is_undefined() {
        String::new()
    } else {
        value.to_string()
    }
}

fn is_blank(value: &Value) -> bool {
    value.is_none() || value.is_undefined() || value.as_str().is_some_and(str::is_empty)
}

// ─────────────────────────────────────────────────────────────────────────────
// Money
// ─────────────────────────────────────────────────────────────────────────────

/// Two decimals with `,` thousands grouping: `-1234.5` is `-1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{cents}")
}

/// Amount prefixed by its currency code when there is one.
pub fn format_currency(amount: f64, currency: Option<&str>) -> String {
    match currency.filter(|c| !c.is_empty()) {
        Some(code) => format!("{code} {}", format_amount(amount)),
        None => format_amount(amount),
    }
}

/// `format_money(x)` takes the currency from `doc.currency`.
fn format_money(state: &State, value: Value) -> String {
    let currency = state
        .lookup("doc")
        .and_then(|doc| doc.get_attr("currency").ok())
        .filter(|c| !is_blank(c))
        .map(|c| c.to_string());
    format_currency(to_float(&value), currency.as_deref())
}

// ─────────────────────────────────────────────────────────────────────────────
// Dates
// ─────────────────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%d-%m-%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

/// `2025-12-31` (or a datetime) as `31-12-2025`; unparseable input unchanged.
pub fn format_date(s: &str) -> String {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(s).map(|dt| dt.date()))
        .map_or_else(|| s.to_string(), |d| d.format(DATE_FORMAT).to_string())
}

/// `2025-12-31 09:05:00.123` as `31-12-2025 09:05:00`.
pub fn format_datetime(s: &str) -> String {
    let s = s.trim();
    parse_datetime(s).map_or_else(
        || format_date(s),
        |dt| dt.format(&format!("{DATE_FORMAT} {TIME_FORMAT}")).to_string(),
    )
}

/// `09:05:00.123456` (or a datetime) as `09:05:00`.
pub fn format_time(s: &str) -> String {
    let s = s.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
        .or_else(|| parse_datetime(s).map(|dt| dt.time()))
        .map_or_else(|| s.to_string(), |t| t.format(TIME_FORMAT).to_string())
}

fn date_helper(format: fn(&str) -> String) -> impl Fn(Value) -> String {
    move |value| {
        if is_blank(&value) {
            String::new()
        } else {
            format(&text(&value))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Numbers
// ─────────────────────────────────────────────────────────────────────────────

fn abs(value: Value) -> Value {
    match i64::try_from(value.clone()) {
        Ok(n) if value.as_str().is_none() => Value::from(n.saturating_abs()),
        _ => Value::from(to_float(&value).abs()),
    }
}

/// Half-to-even rounding; an integer without `digits`, a float with them.
fn round(value: Value, digits: Option<i32>) -> Value {
    let x = to_float(&value);
    match digits {
        None => Value::from(x.round_ties_even() as i64),
        Some(digits) => {
            let scale = 10f64.powi(digits);
            Value::from((x * scale).round_ties_even() / scale)
        }
    }
}

fn separator(ch: Option<String>, width: Option<usize>, kwargs: Kwargs) -> Result<String, Error> {
    let ch = kwargs.get::<Option<String>>("char")?.or(ch);
    let width = kwargs.get::<Option<usize>>("width")?.or(width);
    kwargs.assert_all_used()?;
    Ok(ch.as_deref().unwrap_or("-").repeat(width.unwrap_or(LINE_WIDTH)))
}

// =============================================================================
// Environment
// =============================================================================

/// Environment with the receipt helpers registered as globals.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    env.add_function("truncate", |s: Value, w: usize| truncate(&text(&s), w));
    env.add_function("pad_left", |s: Value, w: usize| pad_left(&text(&s), w));
    env.add_function("pad_right", |s: Value, w: usize| pad_right(&text(&s), w));
    env.add_function("pad_center", |s: Value, w: usize| pad_center(&text(&s), w));
    env.add_function("separator", separator);
    env.add_function("blank_line", String::new);
    env.add_function("format_qty", |x: Value| format!("{:.2}", to_float(&x)));
    env.add_function("upper", |s: Value| text(&s).to_uppercase());
    env.add_function("lower", |s: Value| text(&s).to_lowercase());
    env.add_function("title", |s: Value| title_case(&text(&s)));
    env.add_function("format_money", format_money);
    env.add_function("format_currency", |x: Value, currency: Option<String>| {
        format_currency(to_float(&x), currency.as_deref())
    });
    env.add_function("format_date", date_helper(format_date));
    env.add_function("format_datetime", date_helper(format_datetime));
    env.add_function("format_time", date_helper(format_time));
    env.add_function("abs", abs);
    env.add_function("round", round);
    env.add_function("int", |x: Value| to_float(&x).trunc() as i64);
    env.add_function("float", |x: Value| to_float(&x));
    env.add_function("_", |s: Value| text(&s));
    env
}

/// Render `template` with `doc` bound as `doc`.
pub fn render_template(template: &str, doc: &serde_json::Value) -> Result<String, RenderError> {
    let env = environment();
    let tmpl = env.template_from_str(template)?;
    Ok(tmpl.render(context! { doc => Value::from_serialize(doc) })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_padding_helpers() {
        assert_eq!(truncate("Espresso", 4), "Espr");
        assert_eq!(truncate("Tea", 5), "Tea  ");
        assert_eq!(pad_right("9.00", 6), "  9.00");
        assert_eq!(pad_center("ab", 5), "  ab ");
        assert_eq!(pad_center("abc", 6), " abc  ");
        assert_eq!(pad_center("abcdef", 3), "abc");
        assert_eq!(title_case("hello WORLD-wide"), "Hello World-Wide");
    }

    #[test]
    fn test_render_helpers() {
        let doc = json!({"customer": "Fish & Chips", "qty": "2", "items": [{"item_name": "Tea"}]});
        let out = render_template(
            r#"<text>{{ upper(doc.customer) }}</text>{{ separator("=", 5) }}|{{ separator(width=3) }}|{{ blank_line() }}|{{ format_qty(doc.qty) }}{% for item in doc.items %}[{{ truncate(item.item_name, 5) }}]{% endfor %}"#,
            &doc,
        )
        .unwrap();
        assert_eq!(out, "<text>FISH &amp; CHIPS</text>=====|---||2.00[Tea  ]");
    }

    #[test]
    fn test_money_and_dates() {
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(-1234567.891), "-1,234,567.89");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_currency(9.0, Some("EUR")), "EUR 9.00");
        assert_eq!(format_date("2025-12-31"), "31-12-2025");
        assert_eq!(format_datetime("2025-12-31 09:05:00.123"), "31-12-2025 09:05:00");
        assert_eq!(format_time("09:05:00.123456"), "09:05:00");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_render_receipt_helpers() {
        let doc = json!({
            "currency": "USD",
            "grand_total": 1234.5,
            "posting_date": "2025-12-31",
            "posting_time": "09:05:00.000001",
            "discount": -2,
            "qty": "2.7",
        });
        let out = render_template(
            "{{ format_money(doc.grand_total) }}|{{ format_currency(doc.grand_total) }}|\
             {{ format_date(doc.posting_date) }} {{ format_time(doc.posting_time) }}|\
             {{ format_datetime(doc.missing) }}|{{ abs(doc.discount) }}|{{ round(2.5) }}|\
             {{ round(doc.grand_total, 0) }}|{{ int(doc.qty) }}|{{ float(doc.qty) }}|{{ _(\"Total\") }}",
            &doc,
        )
        .unwrap();
        assert_eq!(out, "USD 1,234.50|1,234.50|31-12-2025 09:05:00||2|2|1234.0|2|2.7|Total");
    }

    #[test]
    fn test_default_separator_width() {
        let out = render_template(r#"{{ separator() }}"#, &json!({})).unwrap();
        assert_eq!(out.len(), LINE_WIDTH);
    }

    #[test]
    fn test_render_error() {
        assert!(render_template("{% if %}", &json!({})).is_err());
    }
}

//! Parsing of the four-label text layout the model is instructed to answer in:
//!
//! ```text
//! PRICE: 150.25
//! CHANGE: +1.50%
//! ANALYSIS: Two or three sentences.
//! DETAILS: - Markdown bullets
//! - running to the end of the text
//! ```
//!
//! Each label is looked up independently. A missing label falls back to a default and
//! never fails the whole parse.

use crate::schema::ParsedFields;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

pub const PRICE_FALLBACK: &str = "N/A";
pub const CHANGE_FALLBACK: &str = "0.00%";
pub const ANALYSIS_FALLBACK: &str = "Analysis not available.";

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PRICE:\s*([0-9.,]+)").expect("price pattern"));
static CHANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CHANGE:\s*([+\-]?[0-9]+\.?[0-9]*%?)").expect("change pattern")
});
static ANALYSIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)ANALYSIS:\s*(.*?)(?:DETAILS:|\z)").expect("analysis pattern")
});
static DETAILS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)DETAILS:\s*(.*)").expect("details pattern"));
static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+\-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+\-]?[0-9]+)?")
        .expect("float pattern")
});

/// Turns the model's free text into [`ParsedFields`].
///
/// Implement this to swap the labeled-text layout for a stricter format without
/// touching the rest of the pipeline.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, text: &str) -> ParsedFields;
}

/// The `PRICE:` / `CHANGE:` / `ANALYSIS:` / `DETAILS:` layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledFieldExtractor;

impl FieldExtractor for LabeledFieldExtractor {
    fn extract(&self, text: &str) -> ParsedFields {
        extract_fields(text)
    }
}

pub fn extract_fields(text: &str) -> ParsedFields {
    let price_text = capture(&PRICE_RE, text).unwrap_or_else(|| {
        debug!("Response has no PRICE field, using '{}'", PRICE_FALLBACK);
        PRICE_FALLBACK.to_string()
    });

    let change_text = capture(&CHANGE_RE, text).unwrap_or_else(|| {
        debug!("Response has no CHANGE field, using '{}'", CHANGE_FALLBACK);
        CHANGE_FALLBACK.to_string()
    });

    let summary_text = capture(&ANALYSIS_RE, text)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| {
            debug!("Response has no ANALYSIS field");
            ANALYSIS_FALLBACK.to_string()
        });

    let details_text = capture(&DETAILS_RE, text)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    ParsedFields {
        price_text,
        change_text,
        summary_text,
        details_text,
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Numeric price with thousands separators removed. `NaN` if there is no number.
pub fn parse_price(price_text: &str) -> f64 {
    parse_leading_float(&price_text.replace(',', ""))
}

/// Numeric percentage with the `%` suffix removed. `NaN` if there is no number.
pub fn parse_change(change_text: &str) -> f64 {
    parse_leading_float(&change_text.replacen('%', "", 1))
}

/// Reads the longest numeric prefix, so `"1.2.3"` is `1.2` and `"N/A"` is `NaN`.
fn parse_leading_float(raw: &str) -> f64 {
    LEADING_FLOAT_RE
        .find(raw)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

impl ParsedFields {
    pub fn price_value(&self) -> f64 {
        parse_price(&self.price_text)
    }

    pub fn change_value(&self) -> f64 {
        parse_change(&self.change_text)
    }
}

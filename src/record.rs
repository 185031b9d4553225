use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// One diamond listing, flattened and typed. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diamond {
    pub carat: f64,
    pub clarity: String,
    pub color: String,
    pub culet: String,
    pub cut: String,
    pub date: String,
    pub depth: f64,
    pub fluorescence: String,
    pub id: String,
    #[serde(rename = "lxwRatio")]
    pub lxw_ratio: f64,
    pub polish: String,
    pub price: u64,
    #[serde(rename = "shapeName")]
    pub shape_name: String,
    pub symmetry: String,
    pub table: f64,
}

/// Maps one raw search-grid record onto a [`Diamond`].
///
/// The grid wraps almost every scalar in a one-element array (`"carat": ["1.01"]`),
/// `cut` is wrapped as `[{"label": ..}]` and `id` is the only bare value.
pub fn normalize(raw: &Value) -> Result<Diamond> {
    Ok(Diamond {
        carat: float_field(raw, "carat")?,
        clarity: text_field(raw, "clarity")?,
        color: text_field(raw, "color")?,
        culet: text_field(raw, "culet")?,
        cut: cut_label(raw)?,
        date: text_field(raw, "date")?,
        depth: float_field(raw, "depth")?,
        fluorescence: text_field(raw, "fluorescence")?,
        id: id_field(raw)?,
        lxw_ratio: float_field(raw, "lxwRatio")?,
        polish: text_field(raw, "polish")?,
        price: parse_price(&text_field(raw, "price")?)?,
        shape_name: text_field(raw, "shapeName")?,
        symmetry: text_field(raw, "symmetry")?,
        table: float_field(raw, "table")?,
    })
}

/// Parses a currency string such as `"$1,234.00"` into whole currency units.
///
/// A single leading currency symbol and any thousands separators are dropped, the
/// fractional part is truncated: `"$0.50"` is `0`.
pub fn parse_price(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let amount = match chars.next() {
        Some(c) if is_currency_symbol(c) => chars.as_str(),
        _ => trimmed,
    };
    let amount = amount.replace(',', "");

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount.as_str(), ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(Error::malformed("price", format!("`{raw}` is not a currency amount")));
    }
    if whole.is_empty() {
        return Ok(0);
    }
    whole
        .parse()
        .map_err(|e| Error::malformed("price", format!("`{raw}`: {e}")))
}

/// Signs, letters and separators are never taken for a currency symbol.
fn is_currency_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '+' | '.' | ',')
}

/// Returns the first element of an array-wrapped field.
fn unwrap_field<'a>(raw: &'a Value, field: &'static str) -> Result<&'a Value> {
    match raw.get(field) {
        None | Some(Value::Null) => Err(Error::malformed(field, "missing")),
        Some(Value::Array(items)) => items
            .first()
            .ok_or_else(|| Error::malformed(field, "empty array")),
        Some(other) => Err(Error::malformed(field, format!("expected an array, got {other}"))),
    }
}

fn text_field(raw: &Value, field: &'static str) -> Result<String> {
    match unwrap_field(raw, field)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::malformed(field, format!("expected text, got {other}"))),
    }
}

fn float_field(raw: &Value, field: &'static str) -> Result<f64> {
    let value = match unwrap_field(raw, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::malformed(field, "not a number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(Error::malformed(field, format!("{value} is out of range")));
    }
    Ok(value)
}

fn cut_label(raw: &Value) -> Result<String> {
    unwrap_field(raw, "cut")?
        .get("label")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::malformed("cut", "missing label"))
}

fn id_field(raw: &Value) -> Result<String> {
    match raw.get("id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(Error::malformed("id", "expected text or number")),
        None => Err(Error::malformed("id", "missing")),
    }
}

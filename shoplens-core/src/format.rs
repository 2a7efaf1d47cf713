//! Display formatting for metrics: localized currency and plain numbers.

use serde::{Deserialize, Serialize};

/// Rendering of an undefined metric.
pub const NOT_AVAILABLE: &str = "n/a";

/// Most fraction digits a currency renders; larger configured values are clamped.
pub const MAX_CURRENCY_DECIMALS: u32 = 9;

/// Currency layout: `{symbol} {grouped integer}{decimal separator}{fraction}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub decimals: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

impl CurrencyFormat {
    /// Brazilian real, pt_BR layout: `R$ 1.234,56`.
    pub fn brl() -> Self {
        Self {
            symbol: "R$".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
            decimals: 2,
        }
    }

    /// Australian dollar in es_CO layout: `AU$ 1.234,56`.
    pub fn aud_es_co() -> Self {
        Self {
            symbol: "AU$".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
            decimals: 2,
        }
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return NOT_AVAILABLE.to_string();
        }
        let decimals = self.decimals.min(MAX_CURRENCY_DECIMALS);
        let scale = 10u64.checked_pow(decimals).unwrap_or(1);
        let scaled = (value.abs() * scale as f64).round() as u64;
        let int_part = scaled / scale;
        let frac_part = scaled % scale;

        let mut out = String::new();
        if value < 0.0 && scaled > 0 {
            out.push('-');
        }
        if !self.symbol.is_empty() {
            out.push_str(&self.symbol);
            out.push(' ');
        }
        out.push_str(&group_thousands(int_part, &self.thousands_separator));
        if decimals > 0 {
            out.push_str(&self.decimal_separator);
            out.push_str(&format!("{:0width$}", frac_part, width = decimals as usize));
        }
        out
    }

    pub fn format_opt(&self, value: Option<f64>) -> String {
        value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| self.format(v))
    }
}

/// Plain number rounded to `decimals` places.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.prec$}", value, prec = decimals)
}

pub fn format_number_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format_number(v, decimals))
}

/// Group digits in threes: `1234567` → `1.234.567` with `"."`.
pub fn group_thousands(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

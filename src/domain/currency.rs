//! Currencies and display formatting.
//!
//! Formatting rules live in a single table keyed by currency code so that
//! every renderer formats money the same way.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Idr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        self.format().code
    }

    pub fn format(&self) -> &'static CurrencyFormat {
        match self {
            Currency::Usd => &FORMATS[0],
            Currency::Idr => &FORMATS[1],
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Display rules for one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: &'static str,
    pub prefix: &'static str,
    pub fraction_digits: usize,
    pub group_separator: char,
    pub decimal_separator: char,
}

pub static FORMATS: [CurrencyFormat; 2] = [
    CurrencyFormat {
        code: "USD",
        prefix: "$",
        fraction_digits: 2,
        group_separator: ',',
        decimal_separator: '.',
    },
    CurrencyFormat {
        code: "IDR",
        prefix: "Rp ",
        fraction_digits: 0,
        group_separator: '.',
        decimal_separator: ',',
    },
];

impl CurrencyFormat {
    /// `$33,710.25`, `Rp 4.937.500`, `-$12.34`.
    pub fn money(&self, amount: f64) -> String {
        self.money_with_digits(amount, self.fraction_digits)
    }

    fn money_with_digits(&self, amount: f64, digits: usize) -> String {
        let (negative, body) =
            number_body(amount, digits, self.group_separator, self.decimal_separator);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{body}", self.prefix)
    }

    /// `+$792.95` for non-negative amounts, `-$5.00` otherwise.
    pub fn signed_money(&self, amount: f64) -> String {
        let plain = self.money(amount);
        if plain.starts_with('-') {
            plain
        } else {
            format!("+{plain}")
        }
    }
}

pub fn format_money(amount: f64, currency: Currency) -> String {
    currency.format().money(amount)
}

pub fn format_signed_money(amount: f64, currency: Currency) -> String {
    currency.format().signed_money(amount)
}

/// Secondary whole-dollar figure shown beneath IDR amounts: `~$311`.
pub fn format_usd_equivalent(usd: f64) -> String {
    format!("~{}", Currency::Usd.format().money_with_digits(usd, 0))
}

/// Signed percent with two digits: `+2.34%`, `-1.12%`.
pub fn format_signed_percent(pct: f64) -> String {
    let (negative, body) = number_body(pct, 2, ',', '.');
    let sign = if negative { "-" } else { "+" };
    format!("{sign}{body}%")
}

/// Portfolio change percent; the not-applicable case renders as a neutral `0.00%`.
pub fn format_change_percent(pct: Option<f64>) -> String {
    match pct {
        Some(p) if p.is_finite() => format_signed_percent(p),
        _ => "0.00%".to_string(),
    }
}

/// Allocation share with one digit: `99.1%`. Undefined shares render as `0.0%`.
pub fn format_allocation(pct: Option<f64>) -> String {
    let value = pct.filter(|p| p.is_finite()).unwrap_or(0.0);
    let (negative, body) = number_body(value, 1, ',', '.');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{body}%")
}

/// Held quantity with grouping and up to three fraction digits: `0.5`, `1,000`.
pub fn format_quantity(amount: f64) -> String {
    let (negative, body) = number_body(amount, 3, ',', '.');
    let trimmed = if body.contains('.') {
        body.trim_end_matches('0').trim_end_matches('.')
    } else {
        body.as_str()
    };
    let sign = if negative { "-" } else { "" };
    format!("{sign}{trimmed}")
}

/// Returns whether the rounded value is negative, and the grouped digits
/// without sign. Non-finite input is treated as zero.
fn number_body(value: f64, digits: usize, group: char, decimal: char) -> (bool, String) {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", digits, value.abs());
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut body = group_thousands(int_part, group);
    if let Some(frac) = frac_part {
        body.push(decimal);
        body.push_str(frac);
    }
    (negative, body)
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

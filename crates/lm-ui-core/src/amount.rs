//! Payment amount rule: `0 < amount <= balance`.

/// True iff `0 < amount <= balance`. NaN on either side is rejected.
pub fn validate_payment_amount(amount: f64, balance: f64) -> bool {
    amount > 0.0 && amount <= balance
}

/// Parses the longest leading decimal number, the way `parseFloat` reads
/// `"12.5abc"` as `12.5`. Exponents are not recognised.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, ch) in s.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

/// Legacy ceiling scrape from rendered help text ("Outstanding: $12.50").
/// Everything but digits and dots is stripped; unparsable text yields `0.0`,
/// which makes every amount invalid.
pub fn ceiling_from_help_text(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_leading_number(&digits).unwrap_or(0.0)
}

/// Amount-vs-balance rule bound to one field of a guarded form.
#[derive(Clone, Debug, PartialEq)]
pub struct AmountRule {
    pub field_id: String,
    pub max: f64,
}

impl AmountRule {
    pub fn new(field_id: impl Into<String>, max: f64) -> Self {
        Self {
            field_id: field_id.into(),
            max,
        }
    }

    /// Blank or non-numeric input counts as `0`, which is rejected.
    pub fn parse(raw: &str) -> f64 {
        parse_leading_number(raw).unwrap_or(0.0)
    }

    pub fn accepts(&self, raw: &str) -> bool {
        validate_payment_amount(Self::parse(raw), self.max)
    }
}

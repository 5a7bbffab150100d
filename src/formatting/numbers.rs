//! Number rendering for display values: thousands separators, fixed
//! decimals and half-to-even rounding.

/// Round `value` to `decimals` places, ties to even at the scaled value.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Insert `,` every three digits of an unsigned digit string.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Fixed-point rendering with thousands separators: `1234.56, 1` → `1,234.6`.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let negative = value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Integer count with thousands separators.
pub fn format_count(count: usize) -> String {
    group_digits(&count.to_string())
}

/// Dollar amount with a leading `$`: `-5.0, 2` → `$-5.00`.
pub fn format_currency(value: f64, decimals: usize) -> String {
    format!("${}", format_decimal(value, decimals))
}

/// Percentage in percentage units: `43.62, 1` → `43.6%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_decimal(value, decimals))
}

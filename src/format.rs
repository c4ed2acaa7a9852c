//! Price formatting with Spanish (Spain) conventions.
//!
//! Output matches what `Intl.NumberFormat('es-ES', { style: 'currency' })`
//! produces for the currencies the storefront sells in: `,` as the decimal
//! separator, `.` grouping only once the integer part reaches five digits, and
//! the symbol after a non-breaking space.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

pub const DEFAULT_CURRENCY: &str = "EUR";

const NBSP: char = '\u{a0}';

/// Format `amount` in `currency` (ISO 4217 code, `EUR` when blank).
#[must_use]
pub fn format_price(amount: f64, currency: &str) -> String {
    let code = match currency.trim() {
        "" => DEFAULT_CURRENCY.to_owned(),
        other => other.to_ascii_uppercase(),
    };
    let digits = fraction_digits(&code);
    let amount = if amount.is_finite() { amount } else { 0.0 };

    let (int_part, frac_part) = round_half_away(amount.abs(), digits);
    let is_zero = int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0');

    let mut out = String::new();
    if amount < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(&frac_part);
    }
    out.push(NBSP);
    out.push_str(symbol(&code));
    out
}

/// Round the shortest decimal form of `abs` to `digits` places, ties away
/// from zero. Returns the integer and fraction digit strings.
///
/// Works on the decimal text rather than the binary value: `1.005` is stored
/// as `1.00499...` but is displayed (and rounded) as `1.005`.
fn round_half_away(abs: f64, digits: usize) -> (String, String) {
    let text = abs.to_string();
    let (int_text, frac_text) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut kept: Vec<u8> = int_text.bytes().collect();
    let frac = frac_text.as_bytes();
    kept.extend((0..digits).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(digits).is_some_and(|&next| next >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let frac_part = String::from_utf8_lossy(&kept[split..]).into_owned();
    kept.truncate(split);
    (String::from_utf8_lossy(&kept).into_owned(), frac_part)
}

fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "CLP" => 0,
        _ => 2,
    }
}

fn symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "US$",
        other => other,
    }
}

/// Insert `.` every three digits, but only for five or more digits.
fn group_thousands(int_part: &str) -> String {
    if int_part.len() < 5 {
        return int_part.to_owned();
    }
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

use super::*;

#[test]
fn formats_euros_by_default() {
    assert_eq!(format_price(12.5, ""), "12,50\u{a0}€");
    assert_eq!(format_price(0.0, DEFAULT_CURRENCY), "0,00\u{a0}€");
}

#[test]
fn four_digit_amounts_are_not_grouped() {
    assert_eq!(format_price(1234.56, "EUR"), "1234,56\u{a0}€");
}

#[test]
fn five_digit_amounts_are_grouped() {
    assert_eq!(format_price(12345.6, "EUR"), "12.345,60\u{a0}€");
    assert_eq!(format_price(1_234_567.0, "EUR"), "1.234.567,00\u{a0}€");
}

#[test]
fn negative_amounts_carry_leading_minus() {
    assert_eq!(format_price(-3.2, "EUR"), "-3,20\u{a0}€");
}

#[test]
fn negative_amount_rounding_to_zero_has_no_sign() {
    assert_eq!(format_price(-0.001, "EUR"), "0,00\u{a0}€");
}

#[test]
fn currency_code_is_case_insensitive() {
    assert_eq!(format_price(5.0, "usd"), "5,00\u{a0}US$");
}

#[test]
fn unknown_currency_uses_its_code() {
    assert_eq!(format_price(5.0, "CHF"), "5,00\u{a0}CHF");
}

#[test]
fn zero_decimal_currencies_drop_fraction() {
    assert_eq!(format_price(1500.4, "JPY"), "1500\u{a0}JPY");
    assert_eq!(format_price(15000.0, "JPY"), "15.000\u{a0}JPY");
}

#[test]
fn exact_ties_round_away_from_zero() {
    assert_eq!(format_price(0.125, "EUR"), "0,13\u{a0}€");
    assert_eq!(format_price(-0.125, "EUR"), "-0,13\u{a0}€");
    assert_eq!(format_price(2.5, "JPY"), "3\u{a0}JPY");
}

#[test]
fn rounding_follows_displayed_digits() {
    assert_eq!(format_price(1.005, "EUR"), "1,01\u{a0}€");
    assert_eq!(format_price(1.004, "EUR"), "1,00\u{a0}€");
}

#[test]
fn rounding_carries_into_integer_part() {
    assert_eq!(format_price(9.995, "EUR"), "10,00\u{a0}€");
    assert_eq!(format_price(9999.999, "EUR"), "10.000,00\u{a0}€");
    assert_eq!(format_price(99.5, "JPY"), "100\u{a0}JPY");
}

#[test]
fn non_finite_amounts_format_as_zero() {
    assert_eq!(format_price(f64::NAN, "EUR"), "0,00\u{a0}€");
    assert_eq!(format_price(f64::INFINITY, "EUR"), "0,00\u{a0}€");
}

#[test]
fn group_thousands_boundaries() {
    assert_eq!(group_thousands("9999"), "9999");
    assert_eq!(group_thousands("10000"), "10.000");
    assert_eq!(group_thousands("100000"), "100.000");
}

#[test]
fn round_half_away_pads_short_fractions() {
    assert_eq!(round_half_away(7.0, 2), ("7".to_owned(), "00".to_owned()));
    assert_eq!(round_half_away(7.1, 2), ("7".to_owned(), "10".to_owned()));
    assert_eq!(round_half_away(7.1, 0), ("7".to_owned(), String::new()));
}

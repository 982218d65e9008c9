//! Integer-centavo money and fixed-locale BRL text.
//!
//! Money never passes through a float at rest. The only float in this module is
//! the transient one inside [`parse_brl`], which mirrors how amounts typed into
//! forms were always interpreted.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Non-negative amount in centavos (1/100 BRL).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Centavos(u64);

impl ValueObject for Centavos {}

impl Centavos {
    pub const ZERO: Centavos = Centavos(0);

    pub const fn new(centavos: u64) -> Self {
        Self(centavos)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Centavos) -> Option<Centavos> {
        self.0.checked_add(other.0).map(Centavos)
    }

    /// Sum of all amounts, or `None` on overflow.
    pub fn checked_sum<I>(amounts: I) -> Option<Centavos>
    where
        I: IntoIterator<Item = Centavos>,
    {
        amounts
            .into_iter()
            .try_fold(Centavos::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Plain dot-decimal reais with exactly two places (`295000 -> "2950.00"`).
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl From<u64> for Centavos {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Centavos> for u64 {
    fn from(value: Centavos) -> Self {
        value.0
    }
}

impl core::fmt::Display for Centavos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&format_brl(*self))
    }
}

/// Format as Brazilian reais: `285000 -> "R$ 2.850,00"`.
pub fn format_brl(amount: Centavos) -> String {
    format!("R$ {}", to_brl_input(amount))
}

/// Format for a pre-filled form input, without the currency prefix:
/// `285000 -> "2.850,00"`.
pub fn to_brl_input(amount: Centavos) -> String {
    let reais = amount.value() / 100;
    let cents = amount.value() % 100;
    format!("{},{:02}", group_thousands(reais), cents)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parse a user-typed amount into centavos.
///
/// Accepts `"2850"`, `"2850.00"`, `"2850,50"` and `"2.850,00"`. When a comma is
/// present, dots are thousands separators and the comma is the decimal mark;
/// otherwise the text is read as a dot-decimal number. Returns `None` for
/// empty, unparsable, negative or non-finite input.
pub fn parse_brl(text: &str) -> Option<Centavos> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };

    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    // Half-to-even, matching how form input has always been rounded.
    let scaled = (value * 100.0).round_ties_even();
    // `u64::MAX as f64` rounds up to 2^64, which does not fit.
    if scaled >= u64::MAX as f64 {
        return None;
    }
    Some(Centavos(scaled as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn format_brl_uses_fixed_brazilian_separators() {
        assert_eq!(format_brl(Centavos::new(0)), "R$ 0,00");
        assert_eq!(format_brl(Centavos::new(1)), "R$ 0,01");
        assert_eq!(format_brl(Centavos::new(150)), "R$ 1,50");
        assert_eq!(format_brl(Centavos::new(10_000)), "R$ 100,00");
        assert_eq!(format_brl(Centavos::new(285_000)), "R$ 2.850,00");
        assert_eq!(format_brl(Centavos::new(1_500_000)), "R$ 15.000,00");
        assert_eq!(format_brl(Centavos::new(123_456_789)), "R$ 1.234.567,89");
    }

    #[test]
    fn display_matches_format_brl() {
        assert_eq!(Centavos::new(285_000).to_string(), "R$ 2.850,00");
    }

    #[test]
    fn brl_input_omits_currency_prefix() {
        assert_eq!(to_brl_input(Centavos::new(285_000)), "2.850,00");
        assert_eq!(to_brl_input(Centavos::ZERO), "0,00");
    }

    #[test]
    fn decimal_string_is_dot_separated_two_places() {
        assert_eq!(Centavos::new(295_000).to_decimal_string(), "2950.00");
        assert_eq!(Centavos::new(15_050).to_decimal_string(), "150.50");
        assert_eq!(Centavos::new(7).to_decimal_string(), "0.07");
    }

    #[test]
    fn parse_brl_accepts_both_notations() {
        assert_eq!(parse_brl("2.850,00"), Some(Centavos::new(285_000)));
        assert_eq!(parse_brl("2850.00"), Some(Centavos::new(285_000)));
        assert_eq!(parse_brl("2850"), Some(Centavos::new(285_000)));
        assert_eq!(parse_brl("2850,50"), Some(Centavos::new(285_050)));
        assert_eq!(parse_brl("1.50"), Some(Centavos::new(150)));
        assert_eq!(parse_brl("  100  "), Some(Centavos::new(10_000)));
        assert_eq!(parse_brl("0"), Some(Centavos::ZERO));
    }

    #[test]
    fn parse_brl_signals_invalid_input() {
        assert_eq!(parse_brl(""), None);
        assert_eq!(parse_brl("   "), None);
        assert_eq!(parse_brl("abc"), None);
        assert_eq!(parse_brl("not a number"), None);
        assert_eq!(parse_brl("1.234.56"), None);
        assert_eq!(parse_brl("-5"), None);
        assert_eq!(parse_brl("inf"), None);
        assert_eq!(parse_brl("NaN"), None);
    }

    #[test]
    fn parse_brl_rejects_amounts_beyond_u64() {
        // 184467440737095516 * 100 is exactly 2^64 as a float.
        assert_eq!(parse_brl("184467440737095516"), None);
        assert_eq!(parse_brl("1e18"), None);
        assert_eq!(
            parse_brl("1.000.000.000,00"),
            Some(Centavos::new(100_000_000_000))
        );
    }

    #[test]
    fn checked_sum_detects_overflow() {
        let amounts = [Centavos::new(u64::MAX), Centavos::new(1)];
        assert_eq!(Centavos::checked_sum(amounts), None);
        assert_eq!(
            Centavos::checked_sum([Centavos::new(100), Centavos::new(250)]),
            Some(Centavos::new(350))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: the form-input rendering parses back to the same amount.
        #[test]
        fn brl_input_parses_back(centavos in 0u64..10_000_000_000u64) {
            let amount = Centavos::new(centavos);
            prop_assert_eq!(parse_brl(&to_brl_input(amount)), Some(amount));
        }
    }
}

use regex::Regex;
use std::sync::OnceLock;

/// A non-negative amount with two decimal places, held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(i64);

impl Money {
    /// At most 10 digits in total, 2 of them after the decimal point.
    pub const MAX_DIGITS: usize = 10;
    pub const DECIMAL_PLACES: usize = 2;

    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[must_use]
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// # Errors
    ///
    /// Will return `Err` with a user-facing message if the input is not a
    /// non-negative decimal that fits the digit limits
    ///
    /// # Panics
    ///
    /// Will panic if the regex is invalid
    pub fn parse(input: &str) -> Result<Self, String> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^(\d+)(?:[.,](\d+))?$")
                .expect("Invalid regex pattern - this is a programming error")
        });

        let input = input.trim();
        let caps = re
            .captures(input)
            .ok_or_else(|| "Introduzca un número.".to_string())?;

        let whole = caps.get(1).map_or("", |m| m.as_str()).trim_start_matches('0');
        let fraction = caps.get(2).map_or("", |m| m.as_str());

        if fraction.len() > Self::DECIMAL_PLACES {
            return Err(format!(
                "Asegúrese de que no haya más de {} decimales.",
                Self::DECIMAL_PLACES
            ));
        }
        if whole.len() > Self::MAX_DIGITS - Self::DECIMAL_PLACES {
            return Err(format!(
                "Asegúrese de que no haya más de {} dígitos antes del punto decimal.",
                Self::MAX_DIGITS - Self::DECIMAL_PLACES
            ));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| "Introduzca un número.".to_string())?
        };
        let mut cents_part: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| "Introduzca un número.".to_string())?
        };
        if fraction.len() == 1 {
            cents_part *= 10;
        }

        Ok(Money(whole * 100 + cents_part))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(Money::parse("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse("12.5").unwrap().cents(), 1250);
        assert_eq!(Money::parse("0.07").unwrap().cents(), 7);
        assert_eq!(Money::parse(" 99999999.99 ").unwrap().cents(), 9_999_999_999);
        assert_eq!(Money::parse("3,25").unwrap().cents(), 325);
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("-1").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("123456789").is_err());
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(1250).to_string(), "12.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
    }
}

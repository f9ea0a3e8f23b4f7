//! Rounding modes and output formatting for fixed-point rendering.

/// Direction used when an exact rational value has to become an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Away from zero.
    Up,
    /// Towards zero.
    Down,
    /// Towards positive infinity.
    Ceil,
    /// Towards negative infinity.
    Floor,
    /// To nearest, ties away from zero.
    #[default]
    HalfUp,
    /// To nearest, ties towards zero.
    HalfDown,
    /// To nearest, ties to the even neighbour.
    HalfEven,
}

/// Separators used by [`Fraction::to_fixed`](super::fraction::Fraction::to_fixed).
///
/// The default has no digit-group separator, so the output can be fed back
/// into an amount parser unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFormat {
    pub group_separator: Option<char>,
    pub group_size: usize,
    pub decimal_separator: char,
}

impl Default for FixedFormat {
    fn default() -> Self {
        Self {
            group_separator: None,
            group_size: 3,
            decimal_separator: '.',
        }
    }
}

impl FixedFormat {
    pub fn grouped(separator: char) -> Self {
        Self {
            group_separator: Some(separator),
            ..Self::default()
        }
    }

    pub(crate) fn group_digits(&self, digits: &str) -> String {
        let separator = match self.group_separator {
            Some(separator) if self.group_size > 0 => separator,
            _ => return digits.to_string(),
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / self.group_size);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % self.group_size == 0 {
                out.push(separator);
            }
            out.push(digit);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rounding_is_half_up() {
        assert_eq!(Rounding::default(), Rounding::HalfUp);
    }

    #[test]
    fn no_separator_by_default() {
        assert_eq!(FixedFormat::default().group_digits("1234567"), "1234567");
    }

    #[test]
    fn groups_from_the_right() {
        let format = FixedFormat::grouped(',');
        assert_eq!(format.group_digits("1234567"), "1,234,567");
        assert_eq!(format.group_digits("123456"), "123,456");
        assert_eq!(format.group_digits("12"), "12");
    }
}

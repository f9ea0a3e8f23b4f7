use super::error::{Result, RouterError};
use super::rounding::{FixedFormat, Rounding};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Exact rational number backed by arbitrary precision integers.
///
/// Fractions are never reduced implicitly: `2/4` keeps its numerator and
/// denominator. Equality and ordering use cross-multiplication, so `2/4`
/// still compares equal to `1/2`.
#[derive(Clone, Debug)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

/// Single conversion point for the operands of fraction arithmetic.
///
/// Integers become `n/1`; fractions pass through untouched.
pub trait IntoFraction {
    fn into_fraction(self) -> Fraction;
}

impl IntoFraction for Fraction {
    fn into_fraction(self) -> Fraction {
        self
    }
}

impl IntoFraction for &Fraction {
    fn into_fraction(self) -> Fraction {
        self.clone()
    }
}

impl IntoFraction for &BigInt {
    fn into_fraction(self) -> Fraction {
        Fraction::from_integer(self.clone())
    }
}

impl IntoFraction for &BigUint {
    fn into_fraction(self) -> Fraction {
        Fraction::from_integer(BigInt::from(self.clone()))
    }
}

macro_rules! impl_into_fraction {
    ($($t:ty),*) => {
        $(
            impl IntoFraction for $t {
                fn into_fraction(self) -> Fraction {
                    Fraction::from_integer(self)
                }
            }
        )*
    };
}

impl_into_fraction!(BigInt, BigUint, i32, i64, u32, u64, u128, usize);

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

impl Fraction {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(RouterError::InvalidArgument(
                "fraction denominator cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            numerator: numerator.into(),
            denominator,
        })
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    /// `value / 10^decimals`.
    pub fn from_scaled(value: impl Into<BigInt>, decimals: u8) -> Self {
        Self {
            numerator: value.into(),
            denominator: pow10(u32::from(decimals)),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.numerator.is_zero() && self.numerator.is_negative() != self.denominator.is_negative()
    }

    /// Integer part of `numerator / denominator`, truncated towards zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    pub fn invert(&self) -> Result<Self> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn add(&self, other: impl IntoFraction) -> Self {
        let other = other.into_fraction();
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator + &other.numerator,
                denominator: other.denominator,
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn subtract(&self, other: impl IntoFraction) -> Self {
        let other = other.into_fraction();
        if self.denominator == other.denominator {
            return Self {
                numerator: &self.numerator - &other.numerator,
                denominator: other.denominator,
            };
        }
        Self {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn multiply(&self, other: impl IntoFraction) -> Self {
        let other = other.into_fraction();
        Self {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    /// Fails with [`RouterError::InvalidArgument`] when `other` is zero.
    pub fn divide(&self, other: impl IntoFraction) -> Result<Self> {
        let other = other.into_fraction();
        Self::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    pub fn less_than(&self, other: impl IntoFraction) -> bool {
        self.compare(&other.into_fraction()) == Ordering::Less
    }

    pub fn equals(&self, other: impl IntoFraction) -> bool {
        self.compare(&other.into_fraction()) == Ordering::Equal
    }

    pub fn greater_than(&self, other: impl IntoFraction) -> bool {
        self.compare(&other.into_fraction()) == Ordering::Greater
    }

    /// Compares `a/b` with `c/d` as `a·d` against `c·b`.
    pub fn compare(&self, other: &Fraction) -> Ordering {
        let left = &self.numerator * &other.denominator;
        let right = &other.numerator * &self.denominator;
        let ordering = left.cmp(&right);
        // a·d < c·b only implies a/b < c/d when b·d is positive
        if self.denominator.is_negative() != other.denominator.is_negative() {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Lowest terms with a positive denominator.
    pub fn reduced(&self) -> Self {
        let (mut numerator, mut denominator) = self.signed_parts();
        let divisor = gcd(numerator.abs(), denominator.clone());
        if !divisor.is_zero() && !divisor.is_one() {
            numerator /= &divisor;
            denominator /= &divisor;
        }
        Self {
            numerator,
            denominator,
        }
    }

    /// The value rounded to an integer in the given direction.
    pub fn div_rounded(&self, rounding: Rounding) -> BigInt {
        let (numerator, denominator) = self.signed_parts();
        let truncated = &numerator / &denominator;
        let remainder = &numerator - &truncated * &denominator;
        if remainder.is_zero() {
            return truncated;
        }

        let negative = numerator.is_negative();
        let half = (remainder.abs() * BigInt::from(2u32)).cmp(&denominator);
        let away_from_zero = match rounding {
            Rounding::Up => true,
            Rounding::Down => false,
            Rounding::Ceil => !negative,
            Rounding::Floor => negative,
            Rounding::HalfUp => half != Ordering::Less,
            Rounding::HalfDown => half == Ordering::Greater,
            Rounding::HalfEven => match half {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => !(&truncated % BigInt::from(2u32)).is_zero(),
            },
        };

        match (away_from_zero, negative) {
            (false, _) => truncated,
            (true, false) => truncated + BigInt::one(),
            (true, true) => truncated - BigInt::one(),
        }
    }

    /// Renders the value with exactly `decimals` fractional digits.
    pub fn to_fixed(&self, decimals: i32, rounding: Rounding, format: &FixedFormat) -> Result<String> {
        if decimals < 0 {
            return Err(RouterError::InvalidArgument(format!("{decimals} is negative")));
        }
        let decimals = decimals.unsigned_abs();
        let scaled = Self {
            numerator: &self.numerator * pow10(decimals),
            denominator: self.denominator.clone(),
        }
        .div_rounded(rounding);

        let width = decimals as usize;
        let mut digits = scaled.magnitude().to_string();
        if digits.len() <= width {
            digits = format!("{}{}", "0".repeat(width + 1 - digits.len()), digits);
        }
        let (integer_part, fractional_part) = digits.split_at(digits.len() - width);

        let mut out = String::new();
        if scaled.is_negative() {
            out.push('-');
        }
        out.push_str(&format.group_digits(integer_part));
        if width > 0 {
            out.push(format.decimal_separator);
            out.push_str(fractional_part);
        }
        Ok(out)
    }

    /// Shorthand for half-up rounding without digit grouping.
    pub fn to_fixed_string(&self, decimals: i32) -> Result<String> {
        self.to_fixed(decimals, Rounding::HalfUp, &FixedFormat::default())
    }

    fn signed_parts(&self) -> (BigInt, BigInt) {
        if self.denominator.is_negative() {
            (-&self.numerator, -&self.denominator)
        } else {
            (self.numerator.clone(), self.denominator.clone())
        }
    }
}

fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<'a> Add<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn add(self, other: &'a Fraction) -> Fraction {
        Fraction::add(self, other)
    }
}

impl<'a> Sub<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn sub(self, other: &'a Fraction) -> Fraction {
        Fraction::subtract(self, other)
    }
}

impl<'a> Mul<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn mul(self, other: &'a Fraction) -> Fraction {
        Fraction::multiply(self, other)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Accepts integers (`"42"`), ratios (`"3/1000"`) and decimals (`"-1.25"`).
impl FromStr for Fraction {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((numerator, denominator)) = s.split_once('/') {
            return Self::new(parse_integer(numerator)?, parse_integer(denominator)?);
        }
        parse_decimal(s)
    }
}

fn parse_integer(s: &str) -> Result<BigInt> {
    let s = s.trim();
    if s.is_empty() || !s.trim_start_matches(['-', '+']).chars().all(|c| c.is_ascii_digit()) {
        return Err(RouterError::InvalidArgument(format!("`{s}` is not an integer")));
    }
    BigInt::from_str(s).map_err(|_| RouterError::InvalidArgument(format!("`{s}` is not an integer")))
}

fn parse_decimal(s: &str) -> Result<Fraction> {
    let invalid = || RouterError::InvalidArgument(format!("`{s}` is not a decimal number"));
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (integer_part, fractional_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if integer_part.is_empty() && fractional_part.is_empty() {
        return Err(invalid());
    }
    if !integer_part
        .chars()
        .chain(fractional_part.chars())
        .all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let digits = format!("{integer_part}{fractional_part}");
    let mut numerator = BigInt::from_str(&digits).map_err(|_| invalid())?;
    if negative {
        numerator = -numerator;
    }
    let exponent = u32::try_from(fractional_part.len()).map_err(|_| invalid())?;
    Ok(Fraction {
        numerator,
        denominator: pow10(exponent),
    })
}

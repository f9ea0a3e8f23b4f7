use super::error::{Result, RouterError};
use super::fraction::Fraction;
use super::rounding::{FixedFormat, Rounding};
use super::token::Token;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw amount in atomic units, not yet tied to a token.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wei(BigUint);

impl Wei {
    pub fn new(value: impl Into<BigUint>) -> Self {
        Self(value.into())
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl FromStr for Wei {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(RouterError::InvalidArgument(format!("`{s}` is not a wei amount")));
        }
        BigUint::from_str(s)
            .map(Self)
            .map_err(|_| RouterError::InvalidArgument(format!("`{s}` is not a wei amount")))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of a specific token, stored in atomic units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAmount {
    token: Token,
    raw: BigUint,
}

impl TokenAmount {
    pub fn from_wei(token: Token, wei: Wei) -> Self {
        Self {
            token,
            raw: wei.into_inner(),
        }
    }

    pub fn from_raw(token: Token, raw: impl Into<BigUint>) -> Self {
        Self {
            token,
            raw: raw.into(),
        }
    }

    pub fn zero(token: Token) -> Self {
        Self::from_raw(token, BigUint::zero())
    }

    /// Parses a human decimal such as `"1.5"` into atomic units.
    ///
    /// More fractional digits than the token supports is an error rather
    /// than a silent truncation.
    pub fn from_token_str(token: Token, value: &str) -> Result<Self> {
        let value = value.trim();
        let invalid = |reason: &str| {
            RouterError::InvalidArgument(format!("`{value}` is not a valid {token} amount: {reason}"))
        };

        let (integer_part, fractional_part) = value.split_once('.').unwrap_or((value, ""));
        if integer_part.is_empty() && fractional_part.is_empty() {
            return Err(invalid("empty"));
        }
        if !integer_part
            .chars()
            .chain(fractional_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected an unsigned decimal"));
        }
        let decimals = usize::from(token.decimals());
        if fractional_part.len() > decimals {
            return Err(invalid("too many fractional digits"));
        }

        let digits = format!(
            "{integer_part}{fractional_part}{}",
            "0".repeat(decimals - fractional_part.len())
        );
        let raw = BigUint::from_str(&digits).map_err(|_| invalid("expected an unsigned decimal"))?;
        Ok(Self { token, raw })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn raw(&self) -> &BigUint {
        &self.raw
    }

    pub fn wei(&self) -> Wei {
        Wei(self.raw.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// `raw / 10^decimals`.
    pub fn as_fraction(&self) -> Fraction {
        Fraction::from_scaled(self.raw.clone(), self.token.decimals())
    }

    /// Exact human-readable value, trailing zeros trimmed.
    pub fn to_token(&self) -> String {
        let digits = self.raw.to_string();
        let decimals = usize::from(self.token.decimals());
        if decimals == 0 {
            return digits;
        }
        let padded = if digits.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (integer_part, fractional_part) = padded.split_at(padded.len() - decimals);
        let fractional_part = fractional_part.trim_end_matches('0');
        if fractional_part.is_empty() {
            integer_part.to_string()
        } else {
            format!("{integer_part}.{fractional_part}")
        }
    }

    /// Human-readable value at a chosen precision.
    pub fn to_fixed(&self, decimals: i32, rounding: Rounding) -> Result<String> {
        self.as_fraction()
            .to_fixed(decimals, rounding, &FixedFormat::default())
    }

    pub fn checked_add(&self, other: &TokenAmount) -> Result<TokenAmount> {
        self.ensure_same_token(other)?;
        Ok(Self::from_raw(self.token.clone(), &self.raw + &other.raw))
    }

    pub fn checked_sub(&self, other: &TokenAmount) -> Result<TokenAmount> {
        self.ensure_same_token(other)?;
        if other.raw > self.raw {
            return Err(RouterError::InvalidArgument(format!(
                "cannot subtract {} from {}",
                other, self
            )));
        }
        Ok(Self::from_raw(self.token.clone(), &self.raw - &other.raw))
    }

    fn ensure_same_token(&self, other: &TokenAmount) -> Result<()> {
        if self.token != other.token {
            return Err(RouterError::TokenMismatch {
                expected: self.token.to_string(),
                actual: other.token.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_token(), self.token)
    }
}

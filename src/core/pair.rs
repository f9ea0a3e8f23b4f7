use super::amount::TokenAmount;
use super::error::{Result, RouterError};
use super::fraction::Fraction;
use super::rounding::Rounding;
use super::token::Token;
use super::tokens_pair::{TokenType, TokensPair};
use num_bigint::BigInt;

/// Unordered identity of a pair: both token addresses, sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &Token, b: &Token) -> Self {
        if a.address() <= b.address() {
            Self(a.address().to_string(), b.address().to_string())
        } else {
            Self(b.address().to_string(), a.address().to_string())
        }
    }
}

/// A constant-product pool snapshot: two reserves and a swap fee.
#[derive(Clone, Debug)]
pub struct Pair {
    reserves: TokensPair<TokenAmount>,
    fee: Fraction,
    address: Option<String>,
}

impl Pair {
    /// Fails if both reserves hold the same token or the fee is outside `[0, 1)`.
    pub fn new(reserve_a: TokenAmount, reserve_b: TokenAmount, fee: Fraction) -> Result<Self> {
        if reserve_a.token() == reserve_b.token() {
            return Err(RouterError::InvalidArgument(format!(
                "pair reserves must hold two distinct tokens, got {} twice",
                reserve_a.token()
            )));
        }
        if fee.is_negative() || !fee.less_than(1u32) {
            return Err(RouterError::InvalidArgument(format!(
                "fee {fee} is outside [0, 1)"
            )));
        }
        Ok(Self {
            reserves: TokensPair::new(reserve_a, reserve_b),
            fee,
            address: None,
        })
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn fee(&self) -> &Fraction {
        &self.fee
    }

    pub fn reserves(&self) -> &TokensPair<TokenAmount> {
        &self.reserves
    }

    pub fn tokens(&self) -> TokensPair<&Token> {
        TokensPair::new(self.reserves.token_a.token(), self.reserves.token_b.token())
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.reserves.token_a.token(), self.reserves.token_b.token())
    }

    pub fn involves(&self, token: &Token) -> bool {
        self.reserves.position(|reserve| reserve.token() == token).is_some()
    }

    /// The counterpart of `token` in this pair.
    pub fn other(&self, token: &Token) -> Result<&Token> {
        let side = self.side_of(token)?;
        Ok(self.reserves.get(side.mirror()).token())
    }

    pub fn reserve_of(&self, token: &Token) -> Result<&TokenAmount> {
        let side = self.side_of(token)?;
        Ok(self.reserves.get(side))
    }

    /// A pair with an empty reserve cannot be routed through.
    pub fn is_tradeable(&self) -> bool {
        !self.reserves.token_a.is_zero() && !self.reserves.token_b.is_zero()
    }

    /// Units of the other token per unit of `token`, in atomic units:
    /// `other_reserve / this_reserve`.
    pub fn price_of(&self, token: &Token) -> Result<Fraction> {
        let side = self.side_of(token)?;
        let this_reserve = self.reserves.get(side);
        let other_reserve = self.reserves.get(side.mirror());
        if this_reserve.is_zero() {
            return Err(self.insufficient_reserves());
        }
        Fraction::new(
            BigInt::from(other_reserve.raw().clone()),
            BigInt::from(this_reserve.raw().clone()),
        )
    }

    /// Output of selling `input` into the pool, rounded down:
    ///
    /// `out = reserve_out · in·(1 − fee) / (reserve_in + in·(1 − fee))`
    pub fn get_output_amount(&self, input: &TokenAmount) -> Result<TokenAmount> {
        let side = self.side_of(input.token())?;
        let reserve_in = self.reserves.get(side);
        let reserve_out = self.reserves.get(side.mirror());
        if !self.is_tradeable() {
            return Err(self.insufficient_reserves());
        }

        let input_after_fee = self.fee_complement().multiply(input.raw());
        let numerator = input_after_fee.multiply(reserve_out.raw());
        let denominator = input_after_fee.add(reserve_in.raw());
        let output = numerator.divide(denominator)?.div_rounded(Rounding::Floor);

        let output = output
            .to_biguint()
            .ok_or_else(|| self.insufficient_reserves())?;
        if &output >= reserve_out.raw() {
            return Err(self.insufficient_reserves());
        }
        Ok(TokenAmount::from_raw(reserve_out.token().clone(), output))
    }

    /// Input required to buy `output` from the pool, rounded up so the
    /// swap never comes out short:
    ///
    /// `in = reserve_in · out / ((reserve_out − out) · (1 − fee))`
    pub fn get_input_amount(&self, output: &TokenAmount) -> Result<TokenAmount> {
        let side = self.side_of(output.token())?;
        let reserve_out = self.reserves.get(side);
        let reserve_in = self.reserves.get(side.mirror());
        if !self.is_tradeable() || output.raw() >= reserve_out.raw() {
            return Err(self.insufficient_reserves());
        }

        let numerator = Fraction::from_integer(reserve_in.raw().clone()).multiply(output.raw());
        let denominator = Fraction::from_integer(reserve_out.raw() - output.raw())
            .multiply(self.fee_complement());
        let input = numerator.divide(denominator)?.div_rounded(Rounding::Ceil);

        let input = input
            .to_biguint()
            .ok_or_else(|| self.insufficient_reserves())?;
        Ok(TokenAmount::from_raw(reserve_in.token().clone(), input))
    }

    /// Address if known, otherwise `SYMBOL_A/SYMBOL_B`.
    pub fn label(&self) -> String {
        match &self.address {
            Some(address) => address.clone(),
            None => format!(
                "{}/{}",
                self.reserves.token_a.token(),
                self.reserves.token_b.token()
            ),
        }
    }

    fn side_of(&self, token: &Token) -> Result<TokenType> {
        self.reserves
            .position(|reserve| reserve.token() == token)
            .ok_or_else(|| RouterError::TokenMismatch {
                expected: format!(
                    "{} or {}",
                    self.reserves.token_a.token(),
                    self.reserves.token_b.token()
                ),
                actual: token.to_string(),
            })
    }

    fn fee_complement(&self) -> Fraction {
        Fraction::one().subtract(&self.fee)
    }

    fn insufficient_reserves(&self) -> RouterError {
        RouterError::InsufficientReserves { pair: self.label() }
    }
}

use super::amount::TokenAmount;
use super::error::{Result, RouterError};
use super::fraction::Fraction;
use super::pair::Pair;
use super::token::Token;

/// An acyclic chain of pairs leading from `input` to `output`.
///
/// Pairs are borrowed from the caller's snapshot, so every candidate route
/// evaluated in one search shares the same reserves.
#[derive(Clone, Debug)]
pub struct Route<'a> {
    pairs: Vec<&'a Pair>,
    path: Vec<Token>,
    input: Token,
    output: Token,
}

impl<'a> Route<'a> {
    pub fn new(pairs: Vec<&'a Pair>, input: Token, output: Token) -> Result<Self> {
        if pairs.is_empty() {
            return Err(RouterError::InvalidRoute("route has no pairs".to_string()));
        }

        let mut path = vec![input.clone()];
        for pair in &pairs {
            let current = &path[path.len() - 1];
            let next = pair.other(current).map_err(|_| {
                RouterError::InvalidRoute(format!(
                    "pair {} does not connect to {}",
                    pair.label(),
                    current
                ))
            })?;
            if path.contains(next) {
                return Err(RouterError::InvalidRoute(format!(
                    "token {next} is visited twice"
                )));
            }
            path.push(next.clone());
        }

        if path[path.len() - 1] != output {
            return Err(RouterError::InvalidRoute(format!(
                "path ends at {} instead of {}",
                path[path.len() - 1],
                output
            )));
        }

        Ok(Self {
            pairs,
            path,
            input,
            output,
        })
    }

    pub fn pairs(&self) -> &[&'a Pair] {
        &self.pairs
    }

    /// Every token visited, `input` first and `output` last.
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Token {
        &self.input
    }

    pub fn output(&self) -> &Token {
        &self.output
    }

    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    /// Product of every hop's price, in atomic units of output per atomic
    /// unit of input. Ignores slippage.
    pub fn mid_price(&self) -> Result<Fraction> {
        self.pairs
            .iter()
            .zip(&self.path)
            .try_fold(Fraction::one(), |price, (pair, token)| -> Result<Fraction> {
                Ok(price.multiply(pair.price_of(token)?))
            })
    }

    /// Amounts at every token of the path, `input` first.
    ///
    /// An amount of the input token is an exact-input trade and is pushed
    /// forward through `get_output_amount`. An amount of the output token is
    /// an exact-output trade and is pulled backward through
    /// `get_input_amount`.
    pub fn amounts_along(&self, amount: &TokenAmount) -> Result<Vec<TokenAmount>> {
        if amount.token() == &self.input {
            self.amounts_out(amount)
        } else if amount.token() == &self.output {
            self.amounts_in(amount)
        } else {
            Err(RouterError::TokenMismatch {
                expected: format!("{} or {}", self.input, self.output),
                actual: amount.token().to_string(),
            })
        }
    }

    pub fn amounts_out(&self, input: &TokenAmount) -> Result<Vec<TokenAmount>> {
        if input.token() != &self.input {
            return Err(RouterError::TokenMismatch {
                expected: self.input.to_string(),
                actual: input.token().to_string(),
            });
        }
        let mut amounts = Vec::with_capacity(self.pairs.len() + 1);
        amounts.push(input.clone());
        for pair in &self.pairs {
            let next = pair.get_output_amount(&amounts[amounts.len() - 1])?;
            amounts.push(next);
        }
        Ok(amounts)
    }

    pub fn amounts_in(&self, output: &TokenAmount) -> Result<Vec<TokenAmount>> {
        if output.token() != &self.output {
            return Err(RouterError::TokenMismatch {
                expected: self.output.to_string(),
                actual: output.token().to_string(),
            });
        }
        let mut amounts = Vec::with_capacity(self.pairs.len() + 1);
        amounts.push(output.clone());
        for pair in self.pairs.iter().rev() {
            let previous = pair.get_input_amount(&amounts[amounts.len() - 1])?;
            amounts.push(previous);
        }
        amounts.reverse();
        Ok(amounts)
    }

    /// Realized rate of a trade in whole tokens: output over input.
    pub fn execution_price(&self, amounts: &[TokenAmount]) -> Result<Fraction> {
        let (input, output) = self.endpoints(amounts)?;
        output.as_fraction().divide(input.as_fraction())
    }

    /// Shortfall of the realized output against the mid-price quote, as a
    /// fraction of the quote.
    pub fn price_impact(&self, amounts: &[TokenAmount]) -> Result<Fraction> {
        let (input, output) = self.endpoints(amounts)?;
        let quoted = self.mid_price()?.multiply(input.raw());
        quoted.subtract(output.raw()).divide(quoted)
    }

    fn endpoints<'b>(&self, amounts: &'b [TokenAmount]) -> Result<(&'b TokenAmount, &'b TokenAmount)> {
        match (amounts.first(), amounts.last()) {
            (Some(input), Some(output))
                if amounts.len() == self.path.len()
                    && input.token() == &self.input
                    && output.token() == &self.output =>
            {
                Ok((input, output))
            }
            _ => Err(RouterError::InvalidArgument(format!(
                "expected {} amounts from {} to {}, got {}",
                self.path.len(),
                self.input,
                self.output,
                amounts.len()
            ))),
        }
    }
}

use super::amount::TokenAmount;
use super::constants::DEFAULT_MAX_HOPS;
use super::error::{Result, RouterError};
use super::pair::Pair;
use super::route::Route;
use super::token::Token;
use super::token_graph::PairGraph;
use std::cmp::Ordering;
use tracing::debug;

/// Outcome of a best-route search. `Empty` means no liquidity connects the
/// two tokens for the requested size; it is not an error.
#[derive(Clone, Debug)]
pub enum SwapRoute<'a> {
    Empty,
    Exist {
        route: Route<'a>,
        /// Amounts at every token of the route, input first.
        amounts: Vec<TokenAmount>,
    },
}

impl<'a> SwapRoute<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn route(&self) -> Option<&Route<'a>> {
        match self {
            Self::Empty => None,
            Self::Exist { route, .. } => Some(route),
        }
    }

    pub fn amounts(&self) -> Option<&[TokenAmount]> {
        match self {
            Self::Empty => None,
            Self::Exist { amounts, .. } => Some(amounts),
        }
    }
}

/// Searches a pair snapshot for the route with the best realized rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteFinder {
    max_hops: usize,
}

impl Default for RouteFinder {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

struct Candidate<'a> {
    route: Route<'a>,
    amounts: Vec<TokenAmount>,
}

impl Candidate<'_> {
    fn input(&self) -> &TokenAmount {
        &self.amounts[0]
    }

    fn output(&self) -> &TokenAmount {
        &self.amounts[self.amounts.len() - 1]
    }

    // Exact input wants more output, exact output wants less input; equal
    // results go to the shorter route.
    fn beats(&self, other: &Self, exact_input: bool) -> bool {
        let ordering = if exact_input {
            self.output().raw().cmp(other.output().raw())
        } else {
            other.input().raw().cmp(self.input().raw())
        };
        match ordering {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.route.hops() < other.route.hops(),
        }
    }
}

impl RouteFinder {
    pub fn new(max_hops: usize) -> Result<Self> {
        if max_hops == 0 {
            return Err(RouterError::InvalidArgument(
                "max_hops must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_hops })
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Picks the best route from `input_token` to `output_token`.
    ///
    /// `amount` in the input token asks for the largest output; `amount` in
    /// the output token asks for the smallest required input. Candidates a
    /// pair cannot fill are dropped.
    pub fn from_best_rate<'a>(
        &self,
        pairs: &'a [Pair],
        input_token: &Token,
        output_token: &Token,
        amount: &TokenAmount,
    ) -> Result<SwapRoute<'a>> {
        if input_token == output_token {
            return Err(RouterError::InvalidArgument(format!(
                "cannot route {input_token} to itself"
            )));
        }
        let exact_input = if amount.token() == input_token {
            true
        } else if amount.token() == output_token {
            false
        } else {
            return Err(RouterError::TokenMismatch {
                expected: format!("{input_token} or {output_token}"),
                actual: amount.token().to_string(),
            });
        };

        let graph = PairGraph::from_pairs(pairs);
        let mut best: Option<Candidate<'a>> = None;
        for path in graph.find_paths(input_token, output_token, self.max_hops) {
            let route = Route::new(path, input_token.clone(), output_token.clone())?;
            let amounts = match route.amounts_along(amount) {
                Ok(amounts) => amounts,
                Err(RouterError::InsufficientReserves { pair }) => {
                    debug!(hops = route.hops(), %pair, "dropping candidate route");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let candidate = Candidate { route, amounts };
            if best
                .as_ref()
                .map_or(true, |current| candidate.beats(current, exact_input))
            {
                best = Some(candidate);
            }
        }

        match best {
            Some(candidate) => {
                debug!(
                    hops = candidate.route.hops(),
                    input = %candidate.input(),
                    output = %candidate.output(),
                    "best route selected"
                );
                Ok(SwapRoute::Exist {
                    route: candidate.route,
                    amounts: candidate.amounts,
                })
            }
            None => {
                debug!(%input_token, %output_token, "no route found");
                Ok(SwapRoute::Empty)
            }
        }
    }
}

/// [`RouteFinder::from_best_rate`] with the default hop limit.
pub fn from_best_rate<'a>(
    pairs: &'a [Pair],
    input_token: &Token,
    output_token: &Token,
    amount: &TokenAmount,
) -> Result<SwapRoute<'a>> {
    RouteFinder::default().from_best_rate(pairs, input_token, output_token, amount)
}

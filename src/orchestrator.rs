use super::core::{
    FixedFormat, Route, Rounding, SwapRoute, TokenAmount, TokenType, TokensPair,
};
use super::snapshot::Snapshot;
use super::types::{DexConfig, QuoteRequest, QuoteResponse, RouteHop, RouteQuote};
use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum QuoteError {
    /// The request itself is wrong; nothing was routed.
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn bad_request(message: impl Into<String>) -> QuoteError {
    QuoteError::BadRequest(message.into())
}

pub fn validate_request(snapshot: &Snapshot, request: &QuoteRequest) -> Result<(), QuoteError> {
    let sell = request.sell_token_address.trim();
    let buy = request.buy_token_address.trim();
    if sell.is_empty() || buy.is_empty() {
        return Err(bad_request("Buy and Sell Token addresses cannot be empty"));
    }
    if sell == buy {
        return Err(bad_request("Buy and Sell Token addresses must differ"));
    }
    if snapshot.token(sell).is_none() || snapshot.token(buy).is_none() {
        return Err(bad_request("Unsupported token address"));
    }
    match (&request.sell_amount, &request.buy_amount) {
        (Some(_), Some(_)) => Err(bad_request("Only one of Sell Amount and Buy Amount can be set")),
        (None, None) => Err(bad_request("Sell Amount or Buy Amount is mandatory")),
        _ => Ok(()),
    }
}

pub fn load_snapshot(config: &DexConfig) -> Result<Snapshot> {
    let fee = config.fee()?;
    Snapshot::load(config.token_file_path(), config.pair_file_path(), &fee)
}

/// Routes a quote request against `snapshot`.
///
/// `sellAmount` asks how much of the buy token the trade returns; `buyAmount`
/// asks how much of the sell token it costs.
pub fn get_quote(
    config: &DexConfig,
    snapshot: &Snapshot,
    request: &QuoteRequest,
) -> Result<QuoteResponse, QuoteError> {
    validate_request(snapshot, request)?;

    let tokens = TokensPair::new(
        request.sell_token_address.trim(),
        request.buy_token_address.trim(),
    )
    .map(|address| snapshot.token(address).cloned())
    .transpose()
    .ok_or_else(|| bad_request("Unsupported token address"))?;

    let requested = TokensPair::new(request.sell_amount.as_deref(), request.buy_amount.as_deref());
    let side = requested
        .position(Option::is_some)
        .ok_or_else(|| bad_request("Sell Amount or Buy Amount is mandatory"))?;
    let value = requested.get(side).unwrap_or_default();
    let amount = TokenAmount::from_token_str(tokens.get(side).clone(), value)
        .map_err(|err| bad_request(err.to_string()))?;
    if amount.is_zero() {
        return Err(bad_request("Amount must be greater than zero"));
    }

    let finder = config.finder()?;
    let swap = finder
        .from_best_rate(snapshot.pairs(), &tokens.token_a, &tokens.token_b, &amount)
        .context("Route search failed")?;

    match swap {
        SwapRoute::Empty => {
            info!(sell = %tokens.token_a, buy = %tokens.token_b, "no route for quote");
            Ok(QuoteResponse::Empty)
        }
        SwapRoute::Exist { route, amounts } => {
            let quote = render_route(config, &route, &amounts, side)?;
            info!(
                sell = %tokens.token_a,
                buy = %tokens.token_b,
                hops = route.hops(),
                sell_amount = %quote.sell_amount,
                buy_amount = %quote.buy_amount,
                "quote served"
            );
            Ok(QuoteResponse::Exist { route: quote })
        }
    }
}

fn render_route(
    config: &DexConfig,
    route: &Route<'_>,
    amounts: &[TokenAmount],
    given: TokenType,
) -> Result<RouteQuote> {
    let (Some(input), Some(output)) = (amounts.first(), amounts.last()) else {
        anyhow::bail!("Route returned no amounts");
    };
    let decimals = i32::try_from(config.display_decimals).context("display_decimals is too large")?;

    // The computed side is rounded against the trader
    let (sell_amount, buy_amount) = match given {
        TokenType::TokenA => (input.to_token(), output.to_fixed(decimals, Rounding::Down)?),
        TokenType::TokenB => (input.to_fixed(decimals, Rounding::Up)?, output.to_token()),
    };

    let mid_price = route
        .mid_price()?
        .multiply(input.token().scale())
        .divide(output.token().scale())?;
    let execution_price = route.execution_price(amounts)?;
    let price_impact = route.price_impact(amounts)?.multiply(100u32);
    debug!(%mid_price, %execution_price, %price_impact, "priced route");

    let format = FixedFormat::default();
    Ok(RouteQuote {
        sell_token_address: input.token().address().to_string(),
        buy_token_address: output.token().address().to_string(),
        sell_amount,
        buy_amount,
        sell_amount_wei: input.wei().to_string(),
        buy_amount_wei: output.wei().to_string(),
        mid_price: mid_price.to_fixed(decimals, Rounding::HalfUp, &format)?,
        execution_price: execution_price.to_fixed(decimals, Rounding::HalfUp, &format)?,
        price_impact: price_impact.to_fixed(2, Rounding::HalfUp, &format)?,
        hops: render_hops(route, amounts),
    })
}

fn render_hops(route: &Route<'_>, amounts: &[TokenAmount]) -> Vec<RouteHop> {
    route
        .pairs()
        .iter()
        .zip(route.path().windows(2))
        .zip(amounts.windows(2))
        .map(|((pair, tokens), amounts)| {
            let (token_in, token_out) = (&tokens[0], &tokens[1]);
            RouteHop {
                pair_address: pair.address().map(str::to_string),
                token_in: token_in.address().to_string(),
                token_out: token_out.address().to_string(),
                token_in_symbol: token_in.symbol().to_string(),
                token_out_symbol: token_out.symbol().to_string(),
                amount_in_wei: amounts[0].wei().to_string(),
                amount_out_wei: amounts[1].wei().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fraction, Pair, Token};

    fn snapshot() -> Snapshot {
        let eth = Token::new("0xeth", "ETH", 18);
        let usdc = Token::new("0xusdc", "USDC", 6);
        let dai = Token::new("0xdai", "DAI", 18);
        let fee = Fraction::new(3, 1000).unwrap();
        let pairs = vec![
            Pair::new(
                TokenAmount::from_token_str(eth.clone(), "100").unwrap(),
                TokenAmount::from_token_str(usdc.clone(), "200000").unwrap(),
                fee.clone(),
            )
            .unwrap()
            .with_address("0xp1"),
            Pair::new(
                TokenAmount::from_token_str(usdc.clone(), "0").unwrap(),
                TokenAmount::from_token_str(dai.clone(), "1000").unwrap(),
                fee,
            )
            .unwrap()
            .with_address("0xp2"),
        ];
        Snapshot::new(vec![eth, usdc, dai], pairs)
    }

    fn request(sell: &str, buy: &str, sell_amount: Option<&str>, buy_amount: Option<&str>) -> QuoteRequest {
        QuoteRequest {
            sell_token_address: sell.to_string(),
            buy_token_address: buy.to_string(),
            sell_amount: sell_amount.map(str::to_string),
            buy_amount: buy_amount.map(str::to_string),
        }
    }

    #[test]
    fn validation_rejects_bad_requests() {
        let snapshot = snapshot();
        for bad in [
            request("", "0xusdc", Some("1"), None),
            request("0xeth", "0xeth", Some("1"), None),
            request("0xeth", "0xnope", Some("1"), None),
            request("0xeth", "0xusdc", None, None),
            request("0xeth", "0xusdc", Some("1"), Some("1")),
        ] {
            assert!(matches!(
                validate_request(&snapshot, &bad),
                Err(QuoteError::BadRequest(_))
            ));
        }
        assert!(validate_request(&snapshot, &request("0xeth", "0xusdc", Some("1"), None)).is_ok());
    }

    #[test]
    fn exact_input_quote() {
        let config = DexConfig::default();
        let response = get_quote(&config, &snapshot(), &request("0xeth", "0xusdc", Some("1"), None)).unwrap();
        let QuoteResponse::Exist { route } = response else {
            panic!("expected a route");
        };
        assert_eq!(route.sell_amount, "1");
        assert_eq!(route.sell_amount_wei, "1000000000000000000");
        assert_eq!(route.hops.len(), 1);
        assert_eq!(route.hops[0].pair_address.as_deref(), Some("0xp1"));
        assert_eq!(route.mid_price, "2000.00000");
        // 200000·0.997/(100+0.997) ≈ 1974.32
        assert!(route.buy_amount.starts_with("1974.3"));
    }

    #[test]
    fn exact_output_quote() {
        let config = DexConfig::default();
        let response = get_quote(&config, &snapshot(), &request("0xeth", "0xusdc", None, Some("2000"))).unwrap();
        let QuoteResponse::Exist { route } = response else {
            panic!("expected a route");
        };
        assert_eq!(route.buy_amount, "2000");
        assert_eq!(route.buy_amount_wei, "2000000000");
        assert!(route.sell_amount.starts_with("1.01"));
    }

    #[test]
    fn empty_pool_gives_empty_quote() {
        let config = DexConfig::default();
        let response = get_quote(&config, &snapshot(), &request("0xusdc", "0xdai", Some("1"), None)).unwrap();
        assert_eq!(response, QuoteResponse::Empty);
    }

    #[test]
    fn zero_and_malformed_amounts_are_bad_requests() {
        let config = DexConfig::default();
        let snapshot = snapshot();
        assert!(matches!(
            get_quote(&config, &snapshot, &request("0xeth", "0xusdc", Some("0"), None)),
            Err(QuoteError::BadRequest(_))
        ));
        assert!(matches!(
            get_quote(&config, &snapshot, &request("0xeth", "0xusdc", None, Some("1.0000001"))),
            Err(QuoteError::BadRequest(_))
        ));
    }
}

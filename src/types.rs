use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Service configuration, stored as TOML.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DexConfig {
    pub working_dir: String,
    pub token_file: String,
    pub pair_file: String,
    /// Pool swap fee as a fraction string, e.g. `"3/1000"`.
    pub fee: String,
    pub max_hops: usize,
    /// Fractional digits used for the computed side of a quote.
    pub display_decimals: u32,
    pub listen_addr: String,
}

/// Quote request. Exactly one of `sell_amount` / `buy_amount` must be set;
/// amounts are human decimal strings in the token's own units.
#[derive(Serialize, Deserialize, ToSchema, IntoParams, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuoteRequest {
    #[schema(example = "0x53c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8")]
    pub sell_token_address: String,

    #[schema(example = "0x4718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d")]
    pub buy_token_address: String,

    #[schema(example = "1.5", nullable = true)]
    pub sell_amount: Option<String>,

    #[schema(example = "2106.9", nullable = true)]
    pub buy_amount: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuoteResponse {
    /// No liquidity connects the two tokens for this size.
    Empty,
    Exist { route: RouteQuote },
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuote {
    pub sell_token_address: String,
    pub buy_token_address: String,
    /// Human-readable amounts; the side that was computed is rounded to
    /// `display_decimals` against the trader.
    pub sell_amount: String,
    pub buy_amount: String,
    pub sell_amount_wei: String,
    pub buy_amount_wei: String,
    /// Whole buy tokens per whole sell token, before slippage.
    pub mid_price: String,
    /// Whole buy tokens per whole sell token for this trade.
    pub execution_price: String,
    /// Percentage of output lost to slippage and fees against the mid price.
    pub price_impact: String,
    pub hops: Vec<RouteHop>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteHop {
    pub pair_address: Option<String>,
    pub token_in: String,
    pub token_out: String,
    pub token_in_symbol: String,
    pub token_out_symbol: String,
    pub amount_in_wei: String,
    pub amount_out_wei: String,
}

use dex_router::core::{RouteFinder, SwapRoute, TokenAmount};
use dex_router::orchestrator::{get_quote, load_snapshot, QuoteError};
use dex_router::snapshot::Snapshot;
use dex_router::types::{DexConfig, QuoteRequest, QuoteResponse};
use num_bigint::BigUint;
use std::path::Path;

const ETH: &str = "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
const USDC: &str = "0x53c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8";
const DAI: &str = "0x5574eb6b8789a91466f902c380d978e472db68170ff82a5b650b95a58ddf4ad";
const STRK: &str = "0x4718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d";

fn test_config() -> DexConfig {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/working_dir");
    DexConfig {
        working_dir: dir.to_string_lossy().into_owned(),
        ..DexConfig::default()
    }
}

fn test_snapshot(config: &DexConfig) -> Snapshot {
    load_snapshot(config).unwrap()
}

fn sell(sell_token: &str, buy_token: &str, amount: &str) -> QuoteRequest {
    QuoteRequest {
        sell_token_address: sell_token.to_string(),
        buy_token_address: buy_token.to_string(),
        sell_amount: Some(amount.to_string()),
        buy_amount: None,
    }
}

fn buy(sell_token: &str, buy_token: &str, amount: &str) -> QuoteRequest {
    QuoteRequest {
        sell_token_address: sell_token.to_string(),
        buy_token_address: buy_token.to_string(),
        sell_amount: None,
        buy_amount: Some(amount.to_string()),
    }
}

#[test]
fn loads_snapshot_from_working_dir() {
    let config = test_config();
    let snapshot = test_snapshot(&config);
    assert_eq!(snapshot.tokens().count(), 4);
    assert_eq!(snapshot.pairs().len(), 4);
    assert_eq!(snapshot.token(USDC).unwrap().symbol(), "USDC");
}

#[test]
fn get_quotes_given_amount_in() {
    let config = test_config();
    let snapshot = test_snapshot(&config);

    let response = get_quote(&config, &snapshot, &sell(ETH, USDC, "1")).unwrap();
    let QuoteResponse::Exist { route } = response else {
        panic!("expected a route from ETH to USDC");
    };
    assert_eq!(route.sell_token_address, ETH);
    assert_eq!(route.buy_token_address, USDC);
    assert_eq!(route.sell_amount, "1");
    assert_eq!(route.hops.len(), 1);
    assert_eq!(route.hops[0].pair_address.as_deref(), Some("0x1001"));
    assert_eq!(route.hops[0].token_in_symbol, "ETH");
    assert_eq!(route.hops[0].token_out_symbol, "USDC");
    assert!(route.buy_amount.starts_with("1974.3"));

    let out: BigUint = route.buy_amount_wei.parse().unwrap();
    assert!(out < BigUint::from(2_000_000_000u64));
}

#[test]
fn get_quotes_given_amount_out() {
    let config = test_config();
    let snapshot = test_snapshot(&config);

    let response = get_quote(&config, &snapshot, &buy(ETH, USDC, "2000")).unwrap();
    let QuoteResponse::Exist { route } = response else {
        panic!("expected a route from ETH to USDC");
    };
    assert_eq!(route.buy_amount, "2000");
    assert_eq!(route.buy_amount_wei, "2000000000");
    assert!(route.sell_amount.starts_with("1.01"));

    // selling what the quote asks for yields at least the requested amount
    let back = get_quote(&config, &snapshot, &sell(ETH, USDC, &route.sell_amount)).unwrap();
    let QuoteResponse::Exist { route: back } = back else {
        panic!("expected a route from ETH to USDC");
    };
    let received: BigUint = back.buy_amount_wei.parse().unwrap();
    assert!(received >= BigUint::from(2_000_000_000u64));
}

#[test]
fn drained_pair_gives_empty_quote() {
    let config = test_config();
    let snapshot = test_snapshot(&config);
    let response = get_quote(&config, &snapshot, &sell(STRK, USDC, "1")).unwrap();
    assert_eq!(response, QuoteResponse::Empty);
}

#[test]
fn invalid_requests_are_bad_requests() {
    let config = test_config();
    let snapshot = test_snapshot(&config);

    for request in [
        sell("0xdead", USDC, "1"),
        sell(ETH, ETH, "1"),
        sell(ETH, USDC, "one"),
        sell(ETH, USDC, "0"),
        QuoteRequest {
            sell_token_address: ETH.to_string(),
            buy_token_address: USDC.to_string(),
            ..QuoteRequest::default()
        },
    ] {
        assert!(matches!(
            get_quote(&config, &snapshot, &request),
            Err(QuoteError::BadRequest(_))
        ));
    }
}

#[test]
fn quote_json_shape() {
    let config = test_config();
    let snapshot = test_snapshot(&config);

    let empty = serde_json::to_value(QuoteResponse::Empty).unwrap();
    assert_eq!(empty, serde_json::json!({ "kind": "empty" }));

    let response = get_quote(&config, &snapshot, &sell(DAI, USDC, "100")).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["kind"], "exist");
    assert_eq!(value["route"]["sellAmount"], "100");
    assert!(value["route"]["hops"].is_array());
    assert!(value["route"]["priceImpact"].is_string());
}

#[test]
fn finder_routes_around_missing_pairs() {
    let config = test_config();
    let snapshot = test_snapshot(&config);
    let eth = snapshot.token(ETH).unwrap();
    let usdc = snapshot.token(USDC).unwrap();

    // without the direct ETH/USDC pair the trade has to go through DAI
    let pairs: Vec<_> = snapshot
        .pairs()
        .iter()
        .filter(|pair| pair.address() != Some("0x1001"))
        .cloned()
        .collect();
    let amount = TokenAmount::from_token_str(eth.clone(), "1").unwrap();
    let result = RouteFinder::default()
        .from_best_rate(&pairs, eth, usdc, &amount)
        .unwrap();
    let SwapRoute::Exist { route, amounts } = result else {
        panic!("expected a route through DAI");
    };
    assert_eq!(route.hops(), 2);
    assert_eq!(route.path()[1].symbol(), "DAI");
    assert_eq!(amounts.len(), 3);

    let single_hop = RouteFinder::new(1).unwrap();
    assert!(single_hop
        .from_best_rate(&pairs, eth, usdc, &amount)
        .unwrap()
        .is_empty());
}

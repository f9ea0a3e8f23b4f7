//! Exact-arithmetic routing core: fractions, token amounts, constant-product
//! pairs, routes and the best-route search. Everything here is pure and
//! synchronous.

pub mod amount;
pub mod constants;
pub mod error;
pub mod fraction;
pub mod pair;
pub mod rounding;
pub mod route;
pub mod route_finder;
pub mod token;
pub mod token_graph;
pub mod tokens_pair;

pub use amount::{TokenAmount, Wei};
pub use error::{Result, RouterError};
pub use fraction::{Fraction, IntoFraction};
pub use pair::{Pair, PairKey};
pub use rounding::{FixedFormat, Rounding};
pub use route::Route;
pub use route_finder::{from_best_rate, RouteFinder, SwapRoute};
pub use token::Token;
pub use tokens_pair::{TokenType, TokensPair};

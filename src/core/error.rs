use thiserror::Error;

/// Failures raised by the routing core.
///
/// "No route" is not an error: the finder reports it as
/// [`SwapRoute::Empty`](super::route_finder::SwapRoute::Empty).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Malformed construction input, e.g. a zero denominator or a negative
    /// decimal count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Arithmetic attempted across amounts of different tokens.
    #[error("token mismatch: expected {expected}, got {actual}")]
    TokenMismatch { expected: String, actual: String },

    /// The pair cannot satisfy the requested trade size.
    #[error("insufficient reserves in pair {pair}")]
    InsufficientReserves { pair: String },

    /// A path of pairs that is empty, disconnected or cyclic.
    #[error("invalid route: {0}")]
    InvalidRoute(String),
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;

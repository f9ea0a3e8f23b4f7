use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A token known to the router.
///
/// Identity is the address alone; symbol and decimals are metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    address: String,
    symbol: String,
    decimals: u8,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// `10^decimals`, the number of atomic units in one whole token.
    pub fn scale(&self) -> BigUint {
        BigUint::from(10u32).pow(u32::from(self.decimals))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

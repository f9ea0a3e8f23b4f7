use serde::{Deserialize, Serialize};

/// Selects one leg of a two-token trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    TokenA,
    TokenB,
}

impl TokenType {
    /// The opposite leg.
    pub fn mirror(self) -> Self {
        match self {
            Self::TokenA => Self::TokenB,
            Self::TokenB => Self::TokenA,
        }
    }
}

/// Two named slots, one per leg of a trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokensPair<T> {
    pub token_a: T,
    pub token_b: T,
}

impl<T> TokensPair<T> {
    pub fn new(token_a: T, token_b: T) -> Self {
        Self { token_a, token_b }
    }

    pub fn get(&self, which: TokenType) -> &T {
        match which {
            TokenType::TokenA => &self.token_a,
            TokenType::TokenB => &self.token_b,
        }
    }

    pub fn get_mut(&mut self, which: TokenType) -> &mut T {
        match which {
            TokenType::TokenA => &mut self.token_a,
            TokenType::TokenB => &mut self.token_b,
        }
    }

    pub fn as_ref(&self) -> TokensPair<&T> {
        TokensPair {
            token_a: &self.token_a,
            token_b: &self.token_b,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TokensPair<U> {
        TokensPair {
            token_a: f(self.token_a),
            token_b: f(self.token_b),
        }
    }

    /// Which slot holds a value matching `predicate`, checking `token_a` first.
    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<TokenType> {
        if predicate(&self.token_a) {
            Some(TokenType::TokenA)
        } else if predicate(&self.token_b) {
            Some(TokenType::TokenB)
        } else {
            None
        }
    }

    pub fn into_tuple(self) -> (T, T) {
        (self.token_a, self.token_b)
    }
}

impl<T> TokensPair<Option<T>> {
    /// `Some` only when both slots are filled.
    pub fn transpose(self) -> Option<TokensPair<T>> {
        match (self.token_a, self.token_b) {
            (Some(token_a), Some(token_b)) => Some(TokensPair { token_a, token_b }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_flips_side() {
        assert_eq!(TokenType::TokenA.mirror(), TokenType::TokenB);
        assert_eq!(TokenType::TokenB.mirror(), TokenType::TokenA);
    }

    #[test]
    fn get_by_type() {
        let mut pair = TokensPair::new("a", "b");
        assert_eq!(*pair.get(TokenType::TokenA), "a");
        assert_eq!(*pair.get(TokenType::TokenB), "b");
        *pair.get_mut(TokenType::TokenB) = "c";
        assert_eq!(pair.token_b, "c");
    }

    #[test]
    fn map_and_position() {
        let pair = TokensPair::new(1, 2).map(|x| x * 10);
        assert_eq!(pair.into_tuple(), (10, 20));
        assert_eq!(pair.position(|x| *x == 20), Some(TokenType::TokenB));
        assert_eq!(pair.position(|x| *x == 30), None);
    }

    #[test]
    fn transpose_requires_both() {
        assert_eq!(
            TokensPair::new(Some(1), Some(2)).transpose(),
            Some(TokensPair::new(1, 2))
        );
        assert_eq!(TokensPair::new(Some(1), None).transpose(), None);
    }
}

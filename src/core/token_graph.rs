use super::pair::Pair;
use super::token::Token;
use std::collections::HashMap;

/// Undirected graph over tokens whose edges are tradeable pairs.
#[derive(Debug)]
pub struct PairGraph<'a> {
    pairs: &'a [Pair],
    edges: HashMap<String, Vec<usize>>,
}

impl<'a> PairGraph<'a> {
    /// Pairs with an empty reserve are left out of the graph.
    pub fn from_pairs(pairs: &'a [Pair]) -> Self {
        let mut graph = Self {
            pairs,
            edges: HashMap::new(),
        };
        for (index, pair) in pairs.iter().enumerate() {
            if pair.is_tradeable() {
                graph.add_edge(pair, index);
            }
        }
        graph
    }

    // Register the pair under both of its tokens since the graph is undirected
    fn add_edge(&mut self, pair: &Pair, index: usize) {
        let tokens = pair.tokens();
        self.edges
            .entry(tokens.token_a.address().to_string())
            .or_default()
            .push(index);
        self.edges
            .entry(tokens.token_b.address().to_string())
            .or_default()
            .push(index);
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.edges.contains_key(token.address())
    }

    /// Every acyclic path of at most `max_hops` pairs from `start` to
    /// `target`, in depth-first order following the input slice.
    pub fn find_paths(&self, start: &Token, target: &Token, max_hops: usize) -> Vec<Vec<&'a Pair>> {
        let mut all_paths = Vec::new();
        if start == target || !self.contains(start) || !self.contains(target) {
            return all_paths;
        }

        let mut visited = vec![start];
        let mut current_path = Vec::new();
        self.dfs(
            start,
            target,
            max_hops,
            &mut visited,
            &mut current_path,
            &mut all_paths,
        );
        all_paths
    }

    fn dfs<'t>(
        &self,
        current: &'t Token,
        target: &Token,
        max_hops: usize,
        visited: &mut Vec<&'t Token>,
        current_path: &mut Vec<&'a Pair>,
        all_paths: &mut Vec<Vec<&'a Pair>>,
    ) where
        'a: 't,
    {
        if current == target {
            all_paths.push(current_path.clone());
            return;
        }
        if current_path.len() >= max_hops {
            return;
        }

        let Some(neighbors) = self.edges.get(current.address()) else {
            return;
        };
        let pairs = self.pairs;
        for &index in neighbors {
            let pair = &pairs[index];
            let Ok(next) = pair.other(current) else {
                continue;
            };
            if visited.contains(&next) {
                continue;
            }

            visited.push(next);
            current_path.push(pair);
            self.dfs(next, target, max_hops, visited, current_path, all_paths);
            current_path.pop();
            visited.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::amount::TokenAmount;
    use crate::core::fraction::Fraction;

    fn token(address: &str) -> Token {
        Token::new(address, address.trim_start_matches("0x"), 18)
    }

    fn pair(a: &Token, b: &Token, reserve: u64) -> Pair {
        Pair::new(
            TokenAmount::from_raw(a.clone(), reserve),
            TokenAmount::from_raw(b.clone(), reserve),
            Fraction::new(3, 1000).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn finds_direct_and_multi_hop_paths() {
        let (a, b, c) = (token("0x0a"), token("0x0b"), token("0x0c"));
        let pairs = vec![pair(&a, &b, 100), pair(&a, &c, 100), pair(&c, &b, 100)];
        let graph = PairGraph::from_pairs(&pairs);

        let paths = graph.find_paths(&a, &b, 3);
        let lengths: Vec<usize> = paths.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![1, 2]);
    }

    #[test]
    fn respects_hop_limit() {
        let (a, b, c, d) = (token("0x0a"), token("0x0b"), token("0x0c"), token("0x0d"));
        let pairs = vec![pair(&a, &b, 100), pair(&b, &c, 100), pair(&c, &d, 100)];
        let graph = PairGraph::from_pairs(&pairs);

        assert_eq!(graph.find_paths(&a, &d, 3).len(), 1);
        assert!(graph.find_paths(&a, &d, 2).is_empty());
    }

    #[test]
    fn skips_empty_pairs() {
        let (a, b) = (token("0x0a"), token("0x0b"));
        let pairs = vec![pair(&a, &b, 0)];
        let graph = PairGraph::from_pairs(&pairs);
        assert!(!graph.contains(&a));
        assert!(graph.find_paths(&a, &b, 3).is_empty());
    }

    #[test]
    fn never_revisits_a_token() {
        let (a, b, c) = (token("0x0a"), token("0x0b"), token("0x0c"));
        let pairs = vec![pair(&a, &b, 100), pair(&b, &c, 100), pair(&c, &a, 100)];
        let graph = PairGraph::from_pairs(&pairs);
        for path in graph.find_paths(&a, &c, 5) {
            assert!(path.len() <= 2);
        }
    }
}

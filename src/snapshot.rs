//! Point-in-time view of the tokens and pair reserves the router works on,
//! read from CSV files.
//!
//! `tokens.csv`: `address,symbol,decimals`
//! `pairs.csv`: `address,token_a,token_b,reserve_a,reserve_b` (atomic units)

use super::core::{Fraction, Pair, PairKey, Token, TokenAmount};
use anyhow::{anyhow, Context, Result};
use num_bigint::BigUint;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct TokenRecord {
    address: String,
    symbol: String,
    decimals: u8,
}

#[derive(Debug, Deserialize)]
struct PairRecord {
    address: String,
    token_a: String,
    token_b: String,
    reserve_a: String,
    reserve_b: String,
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tokens: HashMap<String, Token>,
    pairs: Vec<Pair>,
}

impl Snapshot {
    pub fn new(tokens: Vec<Token>, pairs: Vec<Pair>) -> Self {
        let tokens = tokens
            .into_iter()
            .map(|token| (token.address().to_string(), token))
            .collect();
        Self { tokens, pairs }
    }

    pub fn load<P: AsRef<Path>>(token_file: P, pair_file: P, fee: &Fraction) -> Result<Self> {
        let token_file = token_file.as_ref();
        let pair_file = pair_file.as_ref();
        let tokens = File::open(token_file)
            .with_context(|| format!("Couldn't open token file {}", token_file.display()))?;
        let pairs = File::open(pair_file)
            .with_context(|| format!("Couldn't open pair file {}", pair_file.display()))?;
        let snapshot = Self::from_readers(tokens, pairs, fee)?;
        info!(
            tokens = snapshot.tokens.len(),
            pairs = snapshot.pairs.len(),
            "loaded pair snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_readers<T: Read, R: Read>(tokens: T, pairs: R, fee: &Fraction) -> Result<Self> {
        let tokens = read_tokens(tokens)?;
        let pairs = read_pairs(pairs, &tokens, fee)?;
        Ok(Self { tokens, pairs })
    }

    pub fn token(&self, address: &str) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn read_tokens<R: Read>(reader: R) -> Result<HashMap<String, Token>> {
    let mut tokens = HashMap::new();
    for record in csv_reader(reader).deserialize::<TokenRecord>() {
        let record = record.context("Malformed token record")?;
        let token = Token::new(record.address.clone(), record.symbol, record.decimals);
        if tokens.insert(record.address.clone(), token).is_some() {
            return Err(anyhow!("Token {} is listed twice", record.address));
        }
    }
    Ok(tokens)
}

fn read_pairs<R: Read>(
    reader: R,
    tokens: &HashMap<String, Token>,
    fee: &Fraction,
) -> Result<Vec<Pair>> {
    let mut pairs = Vec::new();
    let mut seen: HashSet<PairKey> = HashSet::new();
    for record in csv_reader(reader).deserialize::<PairRecord>() {
        let record = record.context("Malformed pair record")?;
        let (Some(token_a), Some(token_b)) =
            (tokens.get(&record.token_a), tokens.get(&record.token_b))
        else {
            warn!(pair = %record.address, "skipping pair with an unknown token");
            continue;
        };

        let reserve_a = parse_reserve(&record.reserve_a, &record.address)?;
        let reserve_b = parse_reserve(&record.reserve_b, &record.address)?;
        let pair = Pair::new(
            TokenAmount::from_raw(token_a.clone(), reserve_a),
            TokenAmount::from_raw(token_b.clone(), reserve_b),
            fee.clone(),
        )
        .with_context(|| format!("Invalid pair {}", record.address))?
        .with_address(record.address.clone());

        if !seen.insert(pair.key()) {
            warn!(pair = %record.address, "skipping duplicate pair for the same tokens");
            continue;
        }
        pairs.push(pair);
    }
    Ok(pairs)
}

fn parse_reserve(value: &str, pair: &str) -> Result<BigUint> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Invalid reserve `{value}` for pair {pair}"));
    }
    BigUint::from_str(value).with_context(|| format!("Invalid reserve `{value}` for pair {pair}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &str = "address,symbol,decimals\n0x0a,AAA,18\n0x0b,BBB,6\n";

    fn fee() -> Fraction {
        Fraction::new(3, 1000).unwrap()
    }

    #[test]
    fn reads_tokens_and_pairs() {
        let pairs = "address,token_a,token_b,reserve_a,reserve_b\n0xp1, 0x0a, 0x0b, 1000, 2000\n";
        let snapshot = Snapshot::from_readers(TOKENS.as_bytes(), pairs.as_bytes(), &fee()).unwrap();
        assert_eq!(snapshot.token("0x0b").unwrap().decimals(), 6);
        assert_eq!(snapshot.pairs().len(), 1);
        assert_eq!(snapshot.pairs()[0].address(), Some("0xp1"));
    }

    #[test]
    fn skips_unknown_tokens_and_duplicates() {
        let pairs = "address,token_a,token_b,reserve_a,reserve_b\n\
                     0xp1,0x0a,0x0b,1,1\n\
                     0xp2,0x0a,0x0c,1,1\n\
                     0xp3,0x0b,0x0a,5,5\n";
        let snapshot = Snapshot::from_readers(TOKENS.as_bytes(), pairs.as_bytes(), &fee()).unwrap();
        assert_eq!(snapshot.pairs().len(), 1);
    }

    #[test]
    fn rejects_bad_reserves() {
        let pairs = "address,token_a,token_b,reserve_a,reserve_b\n0xp1,0x0a,0x0b,-1,1\n";
        assert!(Snapshot::from_readers(TOKENS.as_bytes(), pairs.as_bytes(), &fee()).is_err());
    }

    #[test]
    fn rejects_duplicate_tokens() {
        let tokens = "address,symbol,decimals\n0x0a,AAA,18\n0x0a,AAB,18\n";
        let pairs = "address,token_a,token_b,reserve_a,reserve_b\n";
        assert!(Snapshot::from_readers(tokens.as_bytes(), pairs.as_bytes(), &fee()).is_err());
    }
}

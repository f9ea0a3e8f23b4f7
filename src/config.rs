use super::core::constants::{DEFAULT_FEE, DEFAULT_MAX_HOPS};
use super::core::{Fraction, RouteFinder};
use super::types::DexConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            working_dir: "working_dir".to_string(),
            token_file: "tokens.csv".to_string(),
            pair_file: "pairs.csv".to_string(),
            fee: DEFAULT_FEE.to_string(),
            max_hops: DEFAULT_MAX_HOPS,
            display_decimals: 5,
            listen_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl DexConfig {
    // Helper method to load from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let config: Self = confy::load_path(&path)
            .with_context(|| format!("Couldn't load config from {}", path.display()))?;
        Ok(config)
    }

    pub fn token_file_path(&self) -> PathBuf {
        Path::new(&self.working_dir).join(&self.token_file)
    }

    pub fn pair_file_path(&self) -> PathBuf {
        Path::new(&self.working_dir).join(&self.pair_file)
    }

    pub fn fee(&self) -> Result<Fraction> {
        self.fee
            .parse::<Fraction>()
            .with_context(|| format!("Invalid fee `{}` in config", self.fee))
    }

    pub fn finder(&self) -> Result<RouteFinder> {
        RouteFinder::new(self.max_hops).context("Invalid max_hops in config")
    }
}

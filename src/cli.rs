use clap::Parser;

use crate::config::ScanConfig;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    pub simulate: bool,

    #[arg(long)]
    pub once: bool,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, value_delimiter = ',')]
    pub pairs: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub timeframes: Vec<String>,
}

impl Args {
    /// Flag wins, then the platform PORT variable, then 8080.
    pub fn health_port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(DEFAULT_PORT)
    }

    /// Scan grid from the flags, default lists where none were given.
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        if !self.pairs.is_empty() {
            config.pairs = self.pairs.clone();
        }
        if !self.timeframes.is_empty() {
            config.timeframes = self.timeframes.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_lists_override_the_defaults() {
        let args = Args::parse_from([
            "divbot",
            "--pairs",
            "BTC/USDT,DOGE/USDT",
            "--timeframes",
            "1h",
        ]);
        let config = args.scan_config();
        assert_eq!(config.pairs, vec!["BTC/USDT", "DOGE/USDT"]);
        assert_eq!(config.timeframes, vec!["1h"]);
        assert_eq!(config.fetch_limit, 200);
    }

    #[test]
    fn defaults_survive_when_no_lists_are_given() {
        let args = Args::parse_from(["divbot", "--simulate"]);
        assert!(args.simulate);
        assert!(!args.once);
        let config = args.scan_config();
        assert_eq!(config.grid_size(), 35);
    }

    #[test]
    fn explicit_port_beats_the_fallback() {
        let args = Args::parse_from(["divbot", "--port", "9000"]);
        assert_eq!(args.health_port(), 9000);
    }
}

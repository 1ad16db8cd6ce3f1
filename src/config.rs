use std::time::Duration;

/// Pairs watched when none are given on the command line.
pub const DEFAULT_PAIRS: [&str; 7] = [
    "BTC/USDT",
    "ETH/USDT",
    "SOL/USDT",
    "BNB/USDT",
    "XRP/USDT",
    "PAXG/USDT",
    "DOT/USDT",
];

/// Timeframes swept for every pair, shortest first.
pub const DEFAULT_TIMEFRAMES: [&str; 5] = ["15m", "30m", "1h", "4h", "1d"];

/// Scan grid and pacing for the background scanner.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Pairs swept in order, exchange notation like `BTC/USDT`.
    pub pairs: Vec<String>,
    /// Timeframes swept per pair.
    pub timeframes: Vec<String>,
    /// Candles requested per fetch.
    pub fetch_limit: usize,
    /// Neighbors on each side a swing extremum must clear.
    pub swing_window: usize,
    /// Minimum strength a signal needs to pass the emission gate.
    pub min_strength: u32,
    /// Pause between grid keys, keeps the exchange rate limiter happy.
    pub key_delay: Duration,
    /// Pause after a completed sweep.
    pub sweep_delay: Duration,
    /// Back-off after a sweep that produced nothing but errors.
    pub error_cooldown: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
            timeframes: DEFAULT_TIMEFRAMES.iter().map(|t| t.to_string()).collect(),
            fetch_limit: 200,
            swing_window: 5,
            min_strength: 5,
            key_delay: Duration::from_secs(1),
            sweep_delay: Duration::from_secs(60),
            error_cooldown: Duration::from_secs(60),
        }
    }
}

impl ScanConfig {
    /// Number of (pair, timeframe) keys in one sweep.
    pub fn grid_size(&self) -> usize {
        self.pairs.len() * self.timeframes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_covers_every_pair_and_timeframe() {
        let config = ScanConfig::default();
        assert_eq!(config.grid_size(), 35);
        assert_eq!(config.pairs[0], "BTC/USDT");
        assert_eq!(config.timeframes[4], "1d");
    }
}

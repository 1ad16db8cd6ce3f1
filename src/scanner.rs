use std::sync::Arc;

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::config::ScanConfig;
use crate::detect::{self, should_emit, SignalStore};
use crate::exchange::{CandleSource, FetchError};
use crate::notify::{Notifier, NotifyError};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Counters for one sweep over the grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    /// Keys that were fetched and checked.
    pub scanned: usize,
    /// Keys that errored and were skipped.
    pub failed: usize,
    /// Alerts that actually went out.
    pub emitted: usize,
}

/// Sweeps every (pair, timeframe) key in order, detects divergences and
/// pushes the survivors of the emission gate to the notifier.
pub struct Scanner {
    source: Arc<dyn CandleSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn SignalStore>,
    config: ScanConfig,
}

impl Scanner {
    pub fn new(
        source: Arc<dyn CandleSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn SignalStore>,
        config: ScanConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
            config,
        }
    }

    /// Scans forever. A sweep where every key failed backs off for the
    /// error cooldown instead of the normal sweep delay.
    pub async fn run(&self) {
        info!(
            "divergence scanner started: {} pairs x {} timeframes",
            self.config.pairs.len(),
            self.config.timeframes.len()
        );
        loop {
            let stats = self.run_once().await;
            if stats.scanned == 0 && stats.failed > 0 {
                error!("sweep failed on all {} keys, cooling down", stats.failed);
                tokio::time::sleep(self.config.error_cooldown).await;
            } else {
                tokio::time::sleep(self.config.sweep_delay).await;
            }
        }
    }

    /// One pass over the whole grid. Per-key failures are logged and
    /// skipped so one bad symbol cannot stall the rest of the sweep.
    pub async fn run_once(&self) -> SweepStats {
        let mut stats = SweepStats::default();
        for pair in &self.config.pairs {
            for timeframe in &self.config.timeframes {
                match self.scan_key(pair, timeframe).await {
                    Ok(emitted) => {
                        stats.scanned += 1;
                        if emitted {
                            stats.emitted += 1;
                        }
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!("[{pair} {timeframe}] scan failed: {e}");
                    }
                }
                tokio::time::sleep(self.config.key_delay).await;
            }
        }
        if stats.emitted > 0 {
            info!(
                "sweep done: {} keys scanned, {} alerts",
                stats.scanned, stats.emitted
            );
        } else {
            debug!("sweep done: {} keys scanned, no alerts", stats.scanned);
        }
        stats
    }

    async fn scan_key(&self, pair: &str, timeframe: &str) -> Result<bool, ScanError> {
        let candles = self
            .source
            .fetch_candles(pair, timeframe, self.config.fetch_limit)
            .await?;
        debug!("[{pair} {timeframe}] {} candles fetched", candles.len());

        let Some(signal) = detect::detect(pair, timeframe, &candles, self.config.swing_window)
        else {
            return Ok(false);
        };
        info!(
            "[{pair} {timeframe}] {} strength {} ({})",
            signal.kind,
            signal.strength,
            signal.reasons.join(", ")
        );

        // Claim the key before sending. A failed delivery does not retry
        // until the signal flips direction.
        if !should_emit(self.store.as_ref(), &signal, self.config.min_strength) {
            debug!("[{pair} {timeframe}] emission gate closed");
            return Ok(false);
        }

        self.notifier.notify(&signal.report()).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::MemorySignalStore;
    use crate::exchange::SimulatedSource;
    use crate::notify::LogNotifier;
    use std::time::Duration;

    #[tokio::test]
    async fn sweep_covers_the_whole_grid() {
        let config = ScanConfig {
            pairs: vec!["BTC/USDT".to_string(), "ETH/USDT".to_string()],
            timeframes: vec!["1h".to_string(), "4h".to_string()],
            key_delay: Duration::ZERO,
            ..ScanConfig::default()
        };
        let scanner = Scanner::new(
            Arc::new(SimulatedSource::new(7)),
            Arc::new(LogNotifier),
            Arc::new(MemorySignalStore::new()),
            config,
        );

        let stats = scanner.run_once().await;
        assert_eq!(stats.scanned, 4);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn bad_timeframes_fail_without_stopping_the_sweep() {
        let config = ScanConfig {
            pairs: vec!["BTC/USDT".to_string()],
            timeframes: vec!["bogus".to_string(), "1h".to_string()],
            key_delay: Duration::ZERO,
            ..ScanConfig::default()
        };
        let scanner = Scanner::new(
            Arc::new(SimulatedSource::new(7)),
            Arc::new(LogNotifier),
            Arc::new(MemorySignalStore::new()),
            config,
        );

        let stats = scanner.run_once().await;
        assert_eq!(stats.scanned, 1);
        assert_eq!(stats.failed, 1);
    }
}

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use divbot::{
    cli::Args,
    detect::MemorySignalStore,
    exchange::{BinanceClient, CandleSource, SimulatedSource},
    health::HealthServer,
    notify::{LogNotifier, Notifier, TelegramNotifier},
    scanner::Scanner,
};
use log::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.scan_config();

    let source: Arc<dyn CandleSource> = if args.simulate {
        info!("scanning the exchange simulator instead of Binance");
        Arc::new(SimulatedSource::new(42))
    } else {
        Arc::new(BinanceClient::new()?)
    };

    let notifier: Arc<dyn Notifier> = if args.simulate {
        Arc::new(LogNotifier)
    } else {
        let token = std::env::var("TELEGRAM_TOKEN")
            .context("TELEGRAM_TOKEN must be set (or pass --simulate)")?;
        let telegram = Arc::new(TelegramNotifier::new(token)?);
        let poller = Arc::clone(&telegram);
        tokio::spawn(async move { poller.poll_commands().await });
        telegram
    };

    let health = HealthServer::new(args.health_port());
    tokio::spawn(async move {
        if let Err(e) = health.run().await {
            error!("health server exited: {e}");
        }
    });

    let scanner = Scanner::new(
        source,
        notifier,
        Arc::new(MemorySignalStore::new()),
        config,
    );

    if args.once {
        let stats = scanner.run_once().await;
        info!(
            "single sweep: {} scanned, {} failed, {} alerts",
            stats.scanned, stats.failed, stats.emitted
        );
    } else {
        scanner.run().await;
    }
    Ok(())
}

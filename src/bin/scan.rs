use clap::Parser;
use divbot::{
    detect,
    exchange::{BinanceClient, CandleSource, SimulatedSource},
    notify::format_report,
};

/// One-shot divergence check for a single pair and timeframe. Prints what
/// the scanner would alert on, without dedup or delivery.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct ScanArgs {
    pair: String,

    #[arg(short, long, default_value = "1h")]
    timeframe: String,

    #[arg(long, default_value_t = 200)]
    limit: usize,

    #[arg(long, default_value_t = 5)]
    window: usize,

    #[arg(long)]
    simulate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = ScanArgs::parse();
    let source: Box<dyn CandleSource> = if args.simulate {
        Box::new(SimulatedSource::new(42))
    } else {
        Box::new(BinanceClient::new()?)
    };

    let candles = source
        .fetch_candles(&args.pair, &args.timeframe, args.limit)
        .await?;
    println!(
        "{} candles for {} {}",
        candles.len(),
        args.pair,
        args.timeframe
    );

    match detect::detect(&args.pair, &args.timeframe, &candles, args.window) {
        Some(signal) => println!("{}", format_report(&signal.report())),
        None => println!("no divergence on the latest swings"),
    }
    Ok(())
}

pub mod candle;
pub mod signal;

pub use candle::Candle;
pub use signal::{DivergenceSignal, SignalKind, SignalReport, MAX_DISPLAY_STRENGTH};

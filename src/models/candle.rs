/// One OHLCV bar. `timestamp` is the bar open time in milliseconds since
/// epoch. Sequences are ordered strictly ascending with no duplicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

//! Shared building blocks for the Binance REST engine.
//!
//! - [`BinanceEnvironment`]: production/testnet endpoint selection
//! - [`ClientConfig`]: immutable per-client transport and response settings
//! - [`init_logging`]: `tracing` subscriber setup for binaries
//! - [`timestamp_ms`]: wall-clock milliseconds used for request signing

mod config;
mod environment;
mod logging;

pub use config::{ClientConfig, ConfigError};
pub use environment::{BinanceEnvironment, ParseEnvironmentError};
pub use logging::init_logging;

/// Current Unix time in milliseconds.
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_ms_is_millisecond_epoch() {
        let ts = timestamp_ms();
        // 2020-01-01T00:00:00Z in milliseconds
        assert!(ts > 1_577_836_800_000);
        assert!(ts < 10_000_000_000_000);
    }
}

//! Public spot market-data endpoints.
//!
//! Thin wrappers that validate their arguments, assemble a [`ParameterMap`]
//! and dispatch through [`BinanceRestClient::query`]. Optional endpoint
//! arguments (`limit`, `startTime`, `windowSize`, ...) go in `extra`.

use serde_json::Value;

use crate::client::BinanceRestClient;
use crate::error::{BinanceError, BinanceResult};
use crate::params::ParameterMap;
use crate::response::ApiResponse;
use crate::validation::{
    check_required_parameter, check_required_parameters, check_symbol_exclusive,
};

fn with_extra(mut params: ParameterMap, extra: Option<ParameterMap>) -> ParameterMap {
    if let Some(extra) = extra {
        params.extend(extra);
    }
    params
}

fn symbol_params(symbol: Option<&str>, symbols: Option<&[&str]>) -> BinanceResult<ParameterMap> {
    check_symbol_exclusive(symbol, symbols)?;
    Ok(ParameterMap::new()
        .with("symbol", symbol)
        .with_list("symbols", symbols.map(|s| s.iter().copied())))
}

impl BinanceRestClient {
    /// GET /api/v3/ping
    pub async fn ping(&self) -> BinanceResult<ApiResponse> {
        self.query("/api/v3/ping", None).await
    }

    /// GET /api/v3/time
    pub async fn time(&self) -> BinanceResult<ApiResponse> {
        self.query("/api/v3/time", None).await
    }

    /// GET /api/v3/exchangeInfo
    ///
    /// At most one of `symbol`, `symbols` and `permissions` may be given.
    pub async fn exchange_info(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        permissions: Option<&[&str]>,
    ) -> BinanceResult<ApiResponse> {
        check_symbol_exclusive(symbol, symbols)?;

        let has_permissions = permissions.is_some_and(|p| !p.is_empty());
        let has_symbol = symbol.is_some_and(|s| !s.is_empty());
        let has_symbols = symbols.is_some_and(|s| !s.is_empty());
        if has_permissions && (has_symbol || has_symbols) {
            return Err(BinanceError::ParameterArgumentConflict(
                "permissions cannot be sent together with symbol or symbols.".to_string(),
            ));
        }

        let params = symbol_params(symbol, symbols)?
            .with_list("permissions", permissions.map(|p| p.iter().copied()));
        self.query("/api/v3/exchangeInfo", Some(params)).await
    }

    /// GET /api/v3/depth
    ///
    /// `extra`: `limit` (default 100, max 5000).
    pub async fn depth(&self, symbol: &str, extra: Option<ParameterMap>) -> BinanceResult<ApiResponse> {
        check_required_parameter(&Value::from(symbol), "symbol")?;
        let params = with_extra(ParameterMap::new().with("symbol", symbol), extra);
        self.query("/api/v3/depth", Some(params)).await
    }

    /// GET /api/v3/trades
    pub async fn trades(&self, symbol: &str, extra: Option<ParameterMap>) -> BinanceResult<ApiResponse> {
        check_required_parameter(&Value::from(symbol), "symbol")?;
        let params = with_extra(ParameterMap::new().with("symbol", symbol), extra);
        self.query("/api/v3/trades", Some(params)).await
    }

    /// GET /api/v3/historicalTrades
    ///
    /// `extra`: `limit`, `fromId`.
    pub async fn historical_trades(
        &self,
        symbol: &str,
        extra: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        check_required_parameter(&Value::from(symbol), "symbol")?;
        let params = with_extra(ParameterMap::new().with("symbol", symbol), extra);
        self.query("/api/v3/historicalTrades", Some(params)).await
    }

    /// GET /api/v3/aggTrades
    ///
    /// `extra`: `fromId`, `startTime`, `endTime`, `limit`.
    pub async fn agg_trades(&self, symbol: &str, extra: Option<ParameterMap>) -> BinanceResult<ApiResponse> {
        check_required_parameter(&Value::from(symbol), "symbol")?;
        let params = with_extra(ParameterMap::new().with("symbol", symbol), extra);
        self.query("/api/v3/aggTrades", Some(params)).await
    }

    /// GET /api/v3/klines
    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        extra: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let params = kline_params(symbol, interval, extra)?;
        self.query("/api/v3/klines", Some(params)).await
    }

    /// GET /api/v3/uiKlines
    pub async fn ui_klines(
        &self,
        symbol: &str,
        interval: &str,
        extra: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let params = kline_params(symbol, interval, extra)?;
        self.query("/api/v3/uiKlines", Some(params)).await
    }

    /// GET /api/v3/avgPrice
    pub async fn avg_price(&self, symbol: &str) -> BinanceResult<ApiResponse> {
        check_required_parameter(&Value::from(symbol), "symbol")?;
        let params = ParameterMap::new().with("symbol", symbol);
        self.query("/api/v3/avgPrice", Some(params)).await
    }

    /// GET /api/v3/ticker/24hr
    ///
    /// `extra`: `type` (FULL or MINI).
    pub async fn ticker_24hr(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        extra: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let params = with_extra(symbol_params(symbol, symbols)?, extra);
        self.query("/api/v3/ticker/24hr", Some(params)).await
    }

    /// GET /api/v3/ticker/tradingDay
    ///
    /// `extra`: `timeZone`, `type`.
    pub async fn trading_day_ticker(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        extra: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let params = with_extra(symbol_params(symbol, symbols)?, extra);
        self.query("/api/v3/ticker/tradingDay", Some(params)).await
    }

    /// GET /api/v3/ticker/price
    pub async fn ticker_price(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
    ) -> BinanceResult<ApiResponse> {
        let params = symbol_params(symbol, symbols)?;
        self.query("/api/v3/ticker/price", Some(params)).await
    }

    /// GET /api/v3/ticker/bookTicker
    pub async fn book_ticker(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
    ) -> BinanceResult<ApiResponse> {
        let params = symbol_params(symbol, symbols)?;
        self.query("/api/v3/ticker/bookTicker", Some(params)).await
    }

    /// GET /api/v3/ticker
    ///
    /// `extra`: `windowSize` (default 1d), `type`.
    pub async fn rolling_window_ticker(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        extra: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let params = with_extra(symbol_params(symbol, symbols)?, extra);
        self.query("/api/v3/ticker", Some(params)).await
    }
}

fn kline_params(
    symbol: &str,
    interval: &str,
    extra: Option<ParameterMap>,
) -> BinanceResult<ParameterMap> {
    check_required_parameters(&[
        (Value::from(symbol), "symbol"),
        (Value::from(interval), "interval"),
    ])?;
    Ok(with_extra(
        ParameterMap::new()
            .with("symbol", symbol)
            .with("interval", interval),
        extra,
    ))
}

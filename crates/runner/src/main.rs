use auth::ApiCredentials;
use binance_rest::{
    ApiResponse, BinanceError, BinanceRestClient, DepthResponse, ParameterMap, ServerTimeResponse,
    TracingObserver,
};
use common::ClientConfig;
use tracing::{error, info, warn};

/// Order book levels requested per symbol.
const DEPTH_LIMIT: u32 = 5;

#[tokio::main]
async fn main() {
    common::init_logging();

    if let Err(e) = run().await {
        error!(error = %e, "Run failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let symbols = std::env::args().skip(1).collect::<Vec<_>>();

    let config = ClientConfig::from_env()?;
    let credentials = ApiCredentials::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "No credentials configured, using public endpoints only");
        ApiCredentials::anonymous()
    });

    info!(base_url = config.base_url(), symbols = ?symbols, "Starting REST probe");

    let client = BinanceRestClient::new(credentials, config)?.with_observer(TracingObserver);

    client.ping().await?;
    info!("Ping OK");

    let time: ServerTimeResponse = client.time().await?.json()?;
    info!(server_time = time.server_time, "Server time");

    for symbol in &symbols {
        match depth(&client, symbol).await {
            Ok(response) => print_depth(symbol, &response)?,
            Err(e) => error!(
                symbol = %symbol,
                error = %e,
                kind = ?e.kind(),
                timeout = e.is_timeout(),
                rejected_locally = e.is_parameter_error(),
                "Depth request failed"
            ),
        }
    }

    Ok(())
}

async fn depth(client: &BinanceRestClient, symbol: &str) -> Result<ApiResponse, BinanceError> {
    let extra = ParameterMap::new().with("limit", DEPTH_LIMIT);
    client.depth(symbol, Some(extra)).await
}

fn print_depth(symbol: &str, response: &ApiResponse) -> Result<(), BinanceError> {
    if let Some(usage) = response.limit_usage() {
        info!(symbol = %symbol, usage = ?usage, "Limit usage");
    }

    let depth: DepthResponse = response.json()?;
    let best_bid = depth.bids.first().map(|l| l.price());
    let best_ask = depth.asks.first().map(|l| l.price());
    info!(
        symbol = %symbol,
        last_update_id = depth.last_update_id,
        best_bid = ?best_bid,
        best_ask = ?best_ask,
        "Depth snapshot"
    );

    if let Some(body) = response.data().as_json() {
        println!("{}", serde_json::to_string_pretty(body)?);
    }
    Ok(())
}

use std::sync::Arc;

use pushpop::broker::Broker;
use pushpop::config::load_config;
use pushpop::transport::http;
use pushpop::utils::logging;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("info");

    let config = load_config().expect("Failed to load configuration");
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let broker = Arc::new(Broker::with_settings(&config.broker));

    if let Err(e) = http::serve(&addr, &config, broker).await {
        error!("Server failed: {e}");
    }
}

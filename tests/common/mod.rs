//! Shared helpers for client integration tests

use cryptocompare_sdk::{ClientConfig, CryptoCompare};
use wiremock::MockServer;

/// Starts a mock server standing in for both API hosts
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server for min-api and legacy endpoints
pub fn client_for(server: &MockServer) -> CryptoCompare {
    client_with_config(server, ClientConfig::default())
}

/// Same as [`client_for`], starting from a caller-supplied config
pub fn client_with_config(server: &MockServer, config: ClientConfig) -> CryptoCompare {
    let config = config
        .with_api_url(server.uri())
        .with_legacy_api_url(server.uri());
    CryptoCompare::with_config(config).expect("client should build")
}

/// One historical bar in the API's wire shape
#[allow(dead_code)]
pub fn bar(time: i64, close: f64) -> serde_json::Value {
    serde_json::json!({
        "time": time,
        "open": close,
        "high": close,
        "low": close,
        "close": close,
        "volumefrom": 1.0,
        "volumeto": close
    })
}

//! # CryptoCompare SDK
//!
//! Async client for the CryptoCompare market-data API: spot prices, historical
//! OHLC series, coin and exchange metadata, mining data and news.
//!
//! Every response is checked for the API's embedded error envelope before it
//! reaches the caller, so a call either returns data or fails with
//! [`ClientError::Api`].
//!
//! ## Usage
//!
//! ```no_run
//! use cryptocompare_sdk::{CryptoCompare, HistoricalQuery, Period};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CryptoCompare::new()?;
//!
//! // Spot prices, symbols are upper-cased for you
//! let prices = client.get_price(&["btc", "eth"], &["usd", "eur"], None).await?;
//! println!("BTC/USD: {}", prices["BTC"]["USD"]);
//!
//! // Last 24 hourly bars
//! let bars = client
//!     .get_historical("ETH", "USD", &HistoricalQuery::new(Period::Hour).with_limit(24))
//!     .await?;
//! for bar in bars {
//!     println!("{} close={}", bar.time, bar.close);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`ClientConfig`] holds the application name sent as `extraParams` on every
//! request, the base URLs and the request timeout. Defaults live in
//! [`constants`]; [`ClientConfig::from_env`] reads `CRYPTOCOMPARE_*` overrides.
//!
//! ## Error Handling
//!
//! ```no_run
//! use cryptocompare_sdk::{ClientError, CryptoCompare};
//!
//! # async fn example(client: CryptoCompare) {
//! match client.get_top_pairs("XZSDFE", None).await {
//!     Ok(pairs) => println!("{}", pairs),
//!     Err(ClientError::Api(err)) => println!("API refused: {}", err),
//!     Err(e) => eprintln!("Request failed: {}", e),
//! }
//! # }
//! ```
//!
//! ## Historical pagination
//!
//! ```text
//! history_pages(ETH/USD)
//!     ↓  toTs = None         → bars [t0 .. tN]
//!     ↓  toTs = t0 - 1       → bars [..]
//!     ↓  API error envelope  → stream ends
//! ```

pub mod classifier;
pub mod client;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod history;
pub mod params;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use classifier::check_response;
pub use client::CryptoCompare;
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, Result};
pub use params::{join_symbols, SymbolList};
pub use transport::{HttpTransport, ReqwestTransport};
pub use types::{Before, CoinId, HistoricalBar, HistoricalQuery, NewsQuery, Period};

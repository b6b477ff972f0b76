//! CryptoCompare API client
//!
//! Every public operation normalizes its arguments into [`RequestParams`] and
//! hands them, together with a static [`EndpointSpec`], to one dispatch path.

use crate::{
    classifier::check_response,
    config::ClientConfig,
    endpoint::{self, EndpointSpec, Host, RequestParams},
    error::{ApiError, ClientError, Result},
    params::{join_list, join_symbols, to_unix_seconds, SymbolList},
    transport::{HttpTransport, ReqwestTransport},
    types::{CoinId, HistoricalBar, HistoricalQuery, NewsQuery},
};
use serde_json::Value;
use std::sync::Arc;

/// Client for the CryptoCompare market-data API
///
/// Cheap to clone and safe to share between tasks; it holds no per-call state.
///
/// # Example
/// ```no_run
/// use cryptocompare_sdk::CryptoCompare;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CryptoCompare::new()?;
/// let prices = client.get_price(&["btc", "eth"], "usd", None).await?;
/// println!("BTC: ${}", prices["BTC"]["USD"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CryptoCompare {
    transport: Arc<dyn HttpTransport>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for CryptoCompare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoCompare")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CryptoCompare {
    /// Creates a client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client configured from `CRYPTOCOMPARE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Creates a client with a custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Returns the configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues one request and returns the selected part of the checked body
    pub async fn dispatch(&self, spec: &EndpointSpec, params: RequestParams) -> Result<Value> {
        let base_url = match spec.host {
            Host::MinApi => &self.config.api_url,
            Host::Legacy => &self.config.legacy_api_url,
        };
        let url = spec.build_url(base_url, &params, self.config.app_name.as_deref())?;
        tracing::debug!(endpoint = spec.name, url = %url, "Requesting CryptoCompare endpoint");

        let text = self.transport.get(&url).await?;
        let body: Value = serde_json::from_str(&text)?;

        if let Err(err) = check_response(&body) {
            tracing::warn!(
                endpoint = spec.name,
                message = err.message().unwrap_or_default(),
                "CryptoCompare returned an error envelope"
            );
            return Err(err.into());
        }

        spec.extract.apply(body)
    }

    /// Lists all coins, keyed by symbol
    pub async fn get_coin_list(&self) -> Result<Value> {
        self.dispatch(&endpoint::COIN_LIST, RequestParams::new())
            .await
    }

    /// Lists all exchanges and the pairs they trade
    pub async fn get_exchange_list(&self) -> Result<Value> {
        self.dispatch(&endpoint::EXCHANGE_LIST, RequestParams::new())
            .await
    }

    /// Current prices for every base/quote combination
    ///
    /// The result is keyed by upper-cased base symbol, then quote symbol.
    pub async fn get_price<F, T>(&self, fsyms: &F, tsyms: &T, exchange: Option<&str>) -> Result<Value>
    where
        F: SymbolList + ?Sized,
        T: SymbolList + ?Sized,
    {
        let params = RequestParams::new()
            .set("fsyms", join_symbols(fsyms))
            .set("tsyms", join_symbols(tsyms))
            .set_opt("e", exchange);
        self.dispatch(&endpoint::PRICE_MULTI, params).await
    }

    /// Current prices of one base symbol, keyed by quote symbol
    pub async fn get_single_price<T>(&self, fsym: &str, tsyms: &T) -> Result<Value>
    where
        T: SymbolList + ?Sized,
    {
        let params = RequestParams::new()
            .set("fsym", join_symbols(fsym))
            .set("tsyms", join_symbols(tsyms));
        self.dispatch(&endpoint::PRICE_SINGLE, params).await
    }

    /// Full ticker data (`RAW` and `DISPLAY`) for every base/quote combination
    pub async fn get_symbols_full_data<F, T>(
        &self,
        fsyms: &F,
        tsyms: &T,
        exchange: Option<&str>,
    ) -> Result<Value>
    where
        F: SymbolList + ?Sized,
        T: SymbolList + ?Sized,
    {
        let params = RequestParams::new()
            .set("fsyms", join_symbols(fsyms))
            .set("tsyms", join_symbols(tsyms))
            .set_opt("e", exchange);
        self.dispatch(&endpoint::PRICE_MULTI_FULL, params).await
    }

    /// Volume-weighted average price of a pair across the given exchanges
    ///
    /// The aggregated price sits under `RAW.PRICE` in the returned body.
    pub async fn get_generate_custom_average<E>(
        &self,
        fsym: &str,
        tsym: &str,
        exchanges: &E,
    ) -> Result<Value>
    where
        E: SymbolList + ?Sized,
    {
        let tokens = exchanges.tokens();
        if tokens.is_empty() || tokens.iter().any(|e| e.is_empty()) {
            return Err(ClientError::invalid_request(
                "custom average needs a non-empty name for every exchange",
            ));
        }

        let params = RequestParams::new()
            .set("fsym", join_symbols(fsym))
            .set("tsym", join_symbols(tsym))
            .set("e", join_list(exchanges));
        self.dispatch(&endpoint::GENERATE_AVG, params).await
    }

    /// Historical OHLC bars for a pair, oldest first
    ///
    /// When the API has nothing left for the requested window this returns
    /// [`ClientError::Api`], never an empty list. See
    /// [`history_pages`](Self::history_pages) for a stream that turns that
    /// signal into a normal end.
    pub async fn get_historical(
        &self,
        fsym: &str,
        tsym: &str,
        query: &HistoricalQuery,
    ) -> Result<Vec<HistoricalBar>> {
        let params = RequestParams::new()
            .set("fsym", join_symbols(fsym))
            .set("tsym", join_symbols(tsym))
            .set_opt("limit", query.limit.filter(|n| *n != 0))
            .set_opt("e", query.exchange.as_deref())
            .set_opt("toTs", query.to_ts.filter(|ts| *ts != 0))
            .with_period(query.period);

        let data = self.dispatch(&endpoint::HISTORICAL, params).await?;
        let bars: Vec<HistoricalBar> = serde_json::from_value(data)?;
        if bars.is_empty() {
            return Err(ApiError::with_message("no historical data for the requested window").into());
        }

        tracing::debug!(
            count = bars.len(),
            period = %query.period,
            "Fetched historical bars"
        );
        Ok(bars)
    }

    /// Snapshot of a pair across all exchanges
    pub async fn get_coin_snapshot(&self, fsym: &str, tsym: &str) -> Result<Value> {
        let params = RequestParams::new()
            .set("fsym", join_symbols(fsym))
            .set("tsym", join_symbols(tsym));
        self.dispatch(&endpoint::COIN_SNAPSHOT, params).await
    }

    /// Full coin profile by CryptoCompare id (e.g. `1182` for BTC)
    pub async fn get_coin_snapshot_full_by_id(&self, coin_id: impl Into<CoinId>) -> Result<Value> {
        let params = RequestParams::new().set("id", coin_id.into().to_string());
        self.dispatch(&endpoint::COIN_SNAPSHOT_FULL_BY_ID, params)
            .await
    }

    /// Social media statistics by CryptoCompare id
    pub async fn get_social_stats(&self, coin_id: impl Into<CoinId>) -> Result<Value> {
        let params = RequestParams::new().set("id", coin_id.into().to_string());
        self.dispatch(&endpoint::SOCIAL_STATS, params).await
    }

    /// Cloud mining contracts
    pub async fn get_mining_contracts(&self) -> Result<Value> {
        self.dispatch(&endpoint::MINING_CONTRACTS, RequestParams::new())
            .await
    }

    /// Mining hardware
    pub async fn get_mining_equipment(&self) -> Result<Value> {
        self.dispatch(&endpoint::MINING_EQUIPMENT, RequestParams::new())
            .await
    }

    /// Exchanges with the most volume for a pair
    pub async fn get_top_exchanges(&self, fsym: &str, tsym: &str, limit: Option<u32>) -> Result<Value> {
        let params = RequestParams::new()
            .set("fsym", join_symbols(fsym))
            .set("tsym", join_symbols(tsym))
            .set_opt("limit", limit.filter(|n| *n != 0));
        self.dispatch(&endpoint::TOP_EXCHANGES, params).await
    }

    /// Quote symbols with the most volume for a base symbol
    pub async fn get_top_pairs(&self, fsym: &str, limit: Option<u32>) -> Result<Value> {
        let params = RequestParams::new()
            .set("fsym", join_symbols(fsym))
            .set_opt("limit", limit.filter(|n| *n != 0));
        self.dispatch(&endpoint::TOP_PAIRS, params).await
    }

    /// News feed providers
    pub async fn get_news_providers(&self) -> Result<Value> {
        self.dispatch(&endpoint::NEWS_PROVIDERS, RequestParams::new())
            .await
    }

    /// Latest news articles, optionally filtered
    pub async fn get_latest_news(&self, query: &NewsQuery) -> Result<Value> {
        let params = RequestParams::new()
            .set_opt("feeds", query.feeds.as_deref())
            .set_opt("lTs", to_unix_seconds(query.before.as_ref()).filter(|ts| *ts != 0))
            .set_opt("lang", query.lang.as_deref());
        self.dispatch(&endpoint::LATEST_NEWS, params).await
    }
}

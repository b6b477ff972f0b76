//! Constants for the CryptoCompare client
//!
//! Compile-time defaults live here. Anything a caller may need to override at
//! runtime is mirrored in [`ClientConfig`](crate::config::ClientConfig).

/// Base URL of the min-api host serving prices, history, tops and news
pub const MIN_API_URL: &str = "https://min-api.cryptocompare.com";

/// Base URL of the legacy www host serving snapshots, social stats and mining data
pub const LEGACY_API_URL: &str = "https://www.cryptocompare.com";

/// `Type` values below this denote error classes in a response envelope.
///
/// Values at or above it are informational/success classes.
pub const ERROR_TYPE_THRESHOLD: i64 = 100;

/// HTTP request timeout (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "cryptocompare-sdk/0.1.0";

/// Page size used by the history stream when the caller sets no limit
pub const DEFAULT_HISTORY_PAGE_LIMIT: u32 = 2000;

/// Query key carrying the application name on every request
pub const EXTRA_PARAMS_KEY: &str = "extraParams";

/// Environment variable holding the application name
pub const ENV_APP_NAME: &str = "CRYPTOCOMPARE_APP_NAME";

/// Environment variable overriding [`MIN_API_URL`]
pub const ENV_API_URL: &str = "CRYPTOCOMPARE_API_URL";

/// Environment variable overriding [`LEGACY_API_URL`]
pub const ENV_LEGACY_API_URL: &str = "CRYPTOCOMPARE_LEGACY_API_URL";

/// Environment variable overriding [`REQUEST_TIMEOUT_SECS`]
pub const ENV_TIMEOUT_SECS: &str = "CRYPTOCOMPARE_TIMEOUT_SECS";

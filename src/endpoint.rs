//! Static endpoint table and URL assembly
//!
//! Each remote endpoint is described once by an [`EndpointSpec`]. The client
//! feeds that description and the call's [`RequestParams`] through a single
//! dispatch path.

use crate::{
    constants::EXTRA_PARAMS_KEY,
    error::{ClientError, Result},
    params::optional_fragment,
    types::Period,
};
use serde_json::Value;

/// Placeholder in a path template replaced by the [`Period`] segment
const PERIOD_PLACEHOLDER: &str = "{period}";

/// Which API host serves an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// `min-api.cryptocompare.com`
    MinApi,
    /// `www.cryptocompare.com`
    Legacy,
}

/// Which part of a successful body is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    Whole,
    Field(&'static str),
}

impl Extract {
    /// Applies the selector to a body that already passed the classifier
    pub fn apply(&self, body: Value) -> Result<Value> {
        match self {
            Extract::Whole => Ok(body),
            Extract::Field(name) => match body {
                Value::Object(mut map) => map.remove(*name).ok_or_else(|| {
                    ClientError::invalid_response(format!("missing `{}` field", name))
                }),
                other => Err(ClientError::invalid_response(format!(
                    "expected an object with `{}`, got {}",
                    name,
                    json_kind(&other)
                ))),
            },
        }
    }
}

/// One query key in template order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    pub key: &'static str,
    pub required: bool,
}

const fn required(key: &'static str) -> QueryParam {
    QueryParam {
        key,
        required: true,
    }
}

const fn optional(key: &'static str) -> QueryParam {
    QueryParam {
        key,
        required: false,
    }
}

/// Static description of one remote endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub host: Host,
    /// Path relative to the host, may contain `{period}`
    pub path: &'static str,
    pub query: &'static [QueryParam],
    pub extract: Extract,
}

pub const COIN_LIST: EndpointSpec = EndpointSpec {
    name: "coin_list",
    host: Host::MinApi,
    path: "data/all/coinlist",
    query: &[],
    extract: Extract::Field("Data"),
};

pub const EXCHANGE_LIST: EndpointSpec = EndpointSpec {
    name: "exchange_list",
    host: Host::MinApi,
    path: "data/all/exchanges",
    query: &[],
    extract: Extract::Whole,
};

pub const PRICE_MULTI: EndpointSpec = EndpointSpec {
    name: "price_multi",
    host: Host::MinApi,
    path: "data/pricemulti",
    query: &[required("fsyms"), required("tsyms"), optional("e")],
    extract: Extract::Whole,
};

pub const PRICE_SINGLE: EndpointSpec = EndpointSpec {
    name: "price_single",
    host: Host::MinApi,
    path: "data/price",
    query: &[required("fsym"), required("tsyms")],
    extract: Extract::Whole,
};

pub const PRICE_MULTI_FULL: EndpointSpec = EndpointSpec {
    name: "price_multi_full",
    host: Host::MinApi,
    path: "data/pricemultifull",
    query: &[required("fsyms"), required("tsyms"), optional("e")],
    extract: Extract::Whole,
};

pub const GENERATE_AVG: EndpointSpec = EndpointSpec {
    name: "generate_avg",
    host: Host::MinApi,
    path: "data/generateAvg",
    query: &[required("fsym"), required("tsym"), required("e")],
    extract: Extract::Whole,
};

pub const HISTORICAL: EndpointSpec = EndpointSpec {
    name: "historical",
    host: Host::MinApi,
    path: "data/histo{period}",
    query: &[
        required("fsym"),
        required("tsym"),
        optional("limit"),
        optional("e"),
        optional("toTs"),
    ],
    extract: Extract::Field("Data"),
};

pub const COIN_SNAPSHOT: EndpointSpec = EndpointSpec {
    name: "coin_snapshot",
    host: Host::Legacy,
    path: "api/data/coinsnapshot/",
    query: &[required("fsym"), required("tsym")],
    extract: Extract::Field("Data"),
};

pub const COIN_SNAPSHOT_FULL_BY_ID: EndpointSpec = EndpointSpec {
    name: "coin_snapshot_full_by_id",
    host: Host::Legacy,
    path: "api/data/coinsnapshotfullbyid/",
    query: &[required("id")],
    extract: Extract::Field("Data"),
};

pub const SOCIAL_STATS: EndpointSpec = EndpointSpec {
    name: "social_stats",
    host: Host::Legacy,
    path: "api/data/socialstats/",
    query: &[required("id")],
    extract: Extract::Field("Data"),
};

pub const MINING_CONTRACTS: EndpointSpec = EndpointSpec {
    name: "mining_contracts",
    host: Host::Legacy,
    path: "api/data/miningcontracts",
    query: &[],
    extract: Extract::Field("MiningData"),
};

pub const MINING_EQUIPMENT: EndpointSpec = EndpointSpec {
    name: "mining_equipment",
    host: Host::Legacy,
    path: "api/data/miningequipment",
    query: &[],
    extract: Extract::Field("MiningData"),
};

pub const TOP_EXCHANGES: EndpointSpec = EndpointSpec {
    name: "top_exchanges",
    host: Host::MinApi,
    path: "data/top/exchanges",
    query: &[required("fsym"), required("tsym"), optional("limit")],
    extract: Extract::Field("Data"),
};

pub const TOP_PAIRS: EndpointSpec = EndpointSpec {
    name: "top_pairs",
    host: Host::MinApi,
    path: "data/top/pairs",
    query: &[required("fsym"), optional("limit")],
    extract: Extract::Field("Data"),
};

pub const NEWS_PROVIDERS: EndpointSpec = EndpointSpec {
    name: "news_providers",
    host: Host::MinApi,
    path: "data/news/providers",
    query: &[],
    extract: Extract::Whole,
};

pub const LATEST_NEWS: EndpointSpec = EndpointSpec {
    name: "latest_news",
    host: Host::MinApi,
    path: "data/news/",
    query: &[optional("feeds"), optional("lTs"), optional("lang")],
    extract: Extract::Whole,
};

/// Every endpoint the client knows about
pub const ENDPOINTS: &[EndpointSpec] = &[
    COIN_LIST,
    EXCHANGE_LIST,
    PRICE_MULTI,
    PRICE_SINGLE,
    PRICE_MULTI_FULL,
    GENERATE_AVG,
    HISTORICAL,
    COIN_SNAPSHOT,
    COIN_SNAPSHOT_FULL_BY_ID,
    SOCIAL_STATS,
    MINING_CONTRACTS,
    MINING_EQUIPMENT,
    TOP_EXCHANGES,
    TOP_PAIRS,
    NEWS_PROVIDERS,
    LATEST_NEWS,
];

/// Normalized values for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    values: Vec<(&'static str, String)>,
    period: Option<Period>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a query value, replacing any earlier one for the same key
    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.values.iter().position(|(k, _)| *k == key) {
            Some(idx) => self.values[idx].1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    /// Sets a query value only when one is given
    pub fn set_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v.to_string()),
            None => self,
        }
    }

    /// Sets the path period selector
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl EndpointSpec {
    /// Builds the full request URL
    ///
    /// Query keys follow the declared order. Absent optional values are left
    /// out; absent required values are rejected. `extraParams` goes last.
    pub fn build_url(
        &self,
        base_url: &str,
        params: &RequestParams,
        app_name: Option<&str>,
    ) -> Result<String> {
        let path = if self.path.contains(PERIOD_PLACEHOLDER) {
            let period = params.period.ok_or_else(|| {
                ClientError::invalid_request(format!("{} requires a period", self.name))
            })?;
            self.path.replace(PERIOD_PLACEHOLDER, period.as_str())
        } else {
            self.path.to_string()
        };

        let mut query = String::new();
        for param in self.query {
            let fragment = optional_fragment(param.key, params.get(param.key));
            if fragment.is_empty() && param.required {
                return Err(ClientError::invalid_request(format!(
                    "{} requires `{}`",
                    self.name, param.key
                )));
            }
            query.push_str(&fragment);
        }
        query.push_str(&optional_fragment(EXTRA_PARAMS_KEY, app_name));

        let base_url = base_url.trim_end_matches('/');
        match query.strip_prefix('&') {
            Some(query) => Ok(format!("{}/{}?{}", base_url, path, query)),
            None => Ok(format!("{}/{}", base_url, path)),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    const BASE: &str = "https://min-api.cryptocompare.com";

    #[test]
    fn test_endpoint_names_are_unique() {
        let names: HashSet<_> = ENDPOINTS.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), ENDPOINTS.len());
    }

    #[test]
    fn test_price_url_keeps_template_order() {
        let params = RequestParams::new()
            .set("tsyms", "USD")
            .set("fsyms", "BTC");
        let url = PRICE_MULTI.build_url(BASE, &params, None).unwrap();
        assert_eq!(url, "https://min-api.cryptocompare.com/data/pricemulti?fsyms=BTC&tsyms=USD");
    }

    #[test]
    fn test_optional_values_and_extra_params() {
        let params = RequestParams::new()
            .set("fsyms", "BTC,ETH")
            .set("tsyms", "USD")
            .set_opt("e", Some("Kraken"));
        let url = PRICE_MULTI.build_url(BASE, &params, Some("my_app")).unwrap();
        assert_eq!(
            url,
            "https://min-api.cryptocompare.com/data/pricemulti?fsyms=BTC,ETH&tsyms=USD&e=Kraken&extraParams=my_app"
        );
    }

    #[test]
    fn test_missing_required_value_is_rejected() {
        let params = RequestParams::new().set("fsyms", "BTC");
        let err = PRICE_MULTI.build_url(BASE, &params, None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));

        let params = RequestParams::new().set("fsym", "BTC").set("tsym", "USD").set("e", "");
        assert!(GENERATE_AVG.build_url(BASE, &params, None).is_err());
    }

    #[test]
    fn test_historical_path_uses_period() {
        let params = RequestParams::new()
            .set("fsym", "ETH")
            .set("tsym", "USD")
            .set_opt("limit", Some(100))
            .set_opt::<i64>("toTs", None)
            .with_period(Period::Minute);
        let url = HISTORICAL.build_url(BASE, &params, None).unwrap();
        assert_eq!(
            url,
            "https://min-api.cryptocompare.com/data/histominute?fsym=ETH&tsym=USD&limit=100"
        );

        let no_period = RequestParams::new().set("fsym", "ETH").set("tsym", "USD");
        assert!(HISTORICAL.build_url(BASE, &no_period, None).is_err());
    }

    #[test]
    fn test_no_query_leaves_bare_path() {
        let url = NEWS_PROVIDERS
            .build_url(BASE, &RequestParams::new(), None)
            .unwrap();
        assert_eq!(url, "https://min-api.cryptocompare.com/data/news/providers");

        let url = LATEST_NEWS
            .build_url(BASE, &RequestParams::new().set("lang", "PT"), None)
            .unwrap();
        assert_eq!(url, "https://min-api.cryptocompare.com/data/news/?lang=PT");
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let params = RequestParams::new().set("limit", "1").set("limit", "2");
        assert_eq!(params.get("limit"), Some("2"));
    }

    #[test]
    fn test_extract_field() {
        let value = Extract::Field("MiningData")
            .apply(json!({"MiningData": [{"id": 1}]}))
            .unwrap();
        assert_eq!(value, json!([{"id": 1}]));

        let body = json!({"BTC": {"USD": 50000.0}});
        assert_eq!(Extract::Whole.apply(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_extract_missing_field_is_invalid_response() {
        let err = Extract::Field("Data").apply(json!({"Other": 1})).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));

        let err = Extract::Field("Data").apply(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}

//! Paged access to historical data
//!
//! The historical endpoint caps how many bars one call returns. Walking further
//! back means repeating the call with an earlier `toTs` until the API answers
//! with an error envelope. [`CryptoCompare::history_pages`] wraps that loop in
//! a stream that ends normally once the API runs out of data.

use crate::{
    client::CryptoCompare,
    constants::DEFAULT_HISTORY_PAGE_LIMIT,
    error::{ClientError, Result},
    types::{HistoricalBar, HistoricalQuery},
};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

#[derive(Debug, Clone, Copy)]
enum PageCursor {
    Next { to_ts: Option<i64>, first: bool },
    Done,
}

impl CryptoCompare {
    /// Streams historical pages from newest to oldest
    ///
    /// Each page is oldest first. The next page ends one second before the
    /// oldest bar of the previous one, so pages never overlap.
    ///
    /// An API error on a follow-up page is the exhaustion signal and ends the
    /// stream without an item. An API error on the first page, and any
    /// transport or decoding failure, is yielded and then ends the stream.
    pub fn history_pages<'a>(
        &'a self,
        fsym: &str,
        tsym: &str,
        query: HistoricalQuery,
    ) -> BoxStream<'a, Result<Vec<HistoricalBar>>> {
        let fsym = fsym.to_string();
        let tsym = tsym.to_string();
        let query = match query.limit {
            Some(_) => query,
            None => query.with_limit(DEFAULT_HISTORY_PAGE_LIMIT),
        };
        let start = PageCursor::Next {
            to_ts: query.to_ts,
            first: true,
        };

        stream::unfold(start, move |cursor| {
            let fsym = fsym.clone();
            let tsym = tsym.clone();
            let mut page_query = query.clone();

            async move {
                let PageCursor::Next { to_ts, first } = cursor else {
                    return None;
                };
                page_query.to_ts = to_ts;

                match self.get_historical(&fsym, &tsym, &page_query).await {
                    Ok(bars) => {
                        let oldest = bars.first().map(|bar| bar.time).unwrap_or_default();
                        let next_to_ts = oldest - 1;
                        tracing::debug!(
                            oldest,
                            count = bars.len(),
                            "Fetched history page"
                        );

                        // API ignored the cursor; this page repeats bars already yielded
                        if matches!(to_ts, Some(prev) if next_to_ts >= prev) {
                            tracing::debug!(oldest, "History cursor did not advance");
                            return None;
                        }

                        let next = PageCursor::Next {
                            to_ts: Some(next_to_ts),
                            first: false,
                        };
                        Some((Ok(bars), next))
                    }
                    Err(ClientError::Api(err)) if !first => {
                        tracing::debug!(message = err.message().unwrap_or_default(), "History exhausted");
                        None
                    }
                    Err(err) => Some((Err(err), PageCursor::Done)),
                }
            }
        })
        .boxed()
    }

    /// Downloads every available bar up to `query.to_ts` (or now)
    ///
    /// Returns one series ordered oldest first.
    pub async fn fetch_full_history(
        &self,
        fsym: &str,
        tsym: &str,
        query: HistoricalQuery,
    ) -> Result<Vec<HistoricalBar>> {
        let pages: Vec<Vec<HistoricalBar>> = self
            .history_pages(fsym, tsym, query)
            .try_collect()
            .await?;

        Ok(pages.into_iter().rev().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ClientConfig, transport::mock::MockTransport, types::Period};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn bars(times: &[i64]) -> Value {
        let data: Vec<Value> = times
            .iter()
            .map(|t| json!({"time": t, "open": 1.0, "high": 1.0, "low": 1.0, "close": *t as f64}))
            .collect();
        json!({"Response": "Success", "Type": 100, "Data": data})
    }

    fn client_with(mock: &MockTransport) -> CryptoCompare {
        CryptoCompare::with_transport(ClientConfig::default(), Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_pages_stop_on_exhaustion() {
        let mock = MockTransport::new();
        mock.push_json(bars(&[300, 360]));
        mock.push_json(json!({"Response": "Error", "Type": 1}));
        let client = client_with(&mock);

        let pages: Vec<_> = client
            .history_pages("ETH", "USD", HistoricalQuery::new(Period::Minute).with_limit(2))
            .collect()
            .await;

        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_ok());

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].ends_with("/data/histominute?fsym=ETH&tsym=USD&limit=2"));
        assert!(requests[1].ends_with("&limit=2&toTs=299"));
    }

    #[tokio::test]
    async fn test_full_history_is_oldest_first() {
        let mock = MockTransport::new();
        mock.push_json(bars(&[300, 360]));
        mock.push_json(bars(&[180, 240]));
        mock.push_json(json!({"Response": "Error", "Message": "no more data"}));
        let client = client_with(&mock);

        let series = client
            .fetch_full_history("eth", "usd", HistoricalQuery::new(Period::Minute))
            .await
            .unwrap();

        let times: Vec<i64> = series.iter().map(|b| b.time).collect();
        assert_eq!(times, vec![180, 240, 300, 360]);
        assert!(mock.requests()[0].contains(&format!("limit={}", DEFAULT_HISTORY_PAGE_LIMIT)));
    }

    #[tokio::test]
    async fn test_first_page_api_error_is_yielded() {
        let mock = MockTransport::new();
        mock.push_json(json!({"Response": "Error", "Message": "pair not found"}));
        let client = client_with(&mock);

        let err = client
            .fetch_full_history("XXX", "YYY", HistoricalQuery::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.as_api_error().and_then(|e| e.message()),
            Some("pair not found")
        );
    }

    #[tokio::test]
    async fn test_transport_fault_mid_stream_is_yielded() {
        let mock = MockTransport::new();
        mock.push_json(bars(&[300]));
        mock.push_error(ClientError::Http {
            status: 502,
            body: String::new(),
        });
        let client = client_with(&mock);

        let pages: Vec<_> = client
            .history_pages("ETH", "USD", HistoricalQuery::default())
            .collect()
            .await;

        assert_eq!(pages.len(), 2);
        assert!(matches!(pages[1], Err(ClientError::Http { status: 502, .. })));
    }

    #[tokio::test]
    async fn test_stalled_cursor_stops() {
        let mock = MockTransport::new();
        mock.push_json(bars(&[300]));
        mock.push_json(bars(&[300]));
        let client = client_with(&mock);

        let pages: Vec<_> = client
            .history_pages("ETH", "USD", HistoricalQuery::default())
            .collect()
            .await;

        assert_eq!(pages.len(), 1);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_stalled_cursor_does_not_duplicate_bars() {
        let mock = MockTransport::new();
        mock.push_json(bars(&[300]));
        mock.push_json(bars(&[300]));
        let client = client_with(&mock);

        let series = client
            .fetch_full_history("ETH", "USD", HistoricalQuery::default())
            .await
            .unwrap();

        let times: Vec<i64> = series.iter().map(|b| b.time).collect();
        assert_eq!(times, vec![300]);
    }
}

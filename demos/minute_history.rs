//! Downloads every available minute bar for a pair
//!
//! The API only serves a limited window per call, so this walks backwards page
//! by page until the API reports there is nothing older.
//!
//! ```text
//! RUST_LOG=cryptocompare_sdk=debug cargo run --example minute_history -- ETH USD
//! ```

use chrono::DateTime;
use cryptocompare_sdk::{CryptoCompare, HistoricalQuery, Period};
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let base = args.next().unwrap_or_else(|| "ETH".to_string());
    let quote = args.next().unwrap_or_else(|| "USD".to_string());

    let client = CryptoCompare::from_env()?;
    let mut pages = client.history_pages(&base, &quote, HistoricalQuery::new(Period::Minute));

    let mut points = Vec::new();
    while let Some(page) = pages.next().await {
        let mut page = page?;
        if let Some(oldest) = page.first() {
            println!("Got historical data from {} ({} points)", oldest.time, page.len());
        }
        page.append(&mut points);
        points = page;
    }

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        println!("No data for {}/{}", base, quote);
        return Ok(());
    };

    let span = |t: i64| {
        DateTime::from_timestamp(t, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| t.to_string())
    };
    println!(
        "{} minute closes for {}/{} from {} to {}",
        points.len(),
        base,
        quote,
        span(first.time),
        span(last.time)
    );
    let min = points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);
    println!("close range: {:.2} .. {:.2}", min, max);

    Ok(())
}

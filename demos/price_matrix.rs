//! Prints a cross-rate matrix for a handful of coins and fiat currencies

use cryptocompare_sdk::CryptoCompare;
use tracing_subscriber::EnvFilter;

const COINS: &[&str] = &["BTC", "LTC", "ETH", "BCH", "USD", "EUR"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = CryptoCompare::from_env()?;
    let prices = client.get_price(COINS, COINS, None).await?;

    print!("\t");
    for coin in COINS {
        print!("{}\t", coin);
    }

    for base in COINS {
        print!("\n{}\t", base);
        for quote in COINS {
            match prices[*base][*quote].as_f64() {
                Some(rate) => print!("{:7.2}\t", rate),
                None => print!("{:>7}\t", "-"),
            }
        }
    }
    println!();

    Ok(())
}

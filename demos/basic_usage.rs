use fapix::core::config::ExchangeConfig;
use fapix::fapi::build_client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Public market data needs no credentials
    let client = build_client(ExchangeConfig::read_only())?;

    println!("=== Server Time ===");
    match client.market.server_time().await {
        Ok(time) => println!("{}", time),
        Err(e) => eprintln!("Failed to get server time: {}", e),
    }

    println!("\n=== Mark Price / Funding ===");
    match client.market.mark_price("BTCUSDT").await {
        Ok(mark) => println!("{}", mark),
        Err(e) => eprintln!("Failed to get mark price: {}", e),
    }

    println!("\n=== Funding Rate History (last 5) ===");
    match client
        .market
        .funding_rates("BTCUSDT", Some(5), None, None)
        .await
    {
        Ok(rates) => {
            if let Some(rows) = rates.as_array() {
                for row in rows {
                    println!("  {}", row);
                }
            }
        }
        Err(e) => eprintln!("Failed to get funding rates: {}", e),
    }

    println!("\n=== Top Trader Long/Short Ratio (accounts) ===");
    match client
        .market
        .long_short_ratio("accounts", "BTCUSDT", "1h", Some(3), None, None)
        .await
    {
        Ok(ratios) => println!("{}", ratios),
        Err(e) => eprintln!("Failed to get long/short ratio: {}", e),
    }

    println!("\n=== Order Book (top 5) ===");
    match client.market.depth("BTCUSDT", Some(5)).await {
        Ok(book) => println!("{}", book),
        Err(e) => eprintln!("Failed to get order book: {}", e),
    }

    Ok(())
}

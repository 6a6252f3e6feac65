use fapix::core::config::ExchangeConfig;
use fapix::fapi::{build_client, OrderSide};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // For safety this demo stays on testnet and only uses the order
    // validation endpoint; nothing here reaches the matching engine.
    let config = ExchangeConfig::new(
        std::env::var("FAPIX_API_KEY").unwrap_or_else(|_| "your_api_key".to_string()),
        std::env::var("FAPIX_SECRET_KEY").unwrap_or_else(|_| "your_secret_key".to_string()),
    )
    .testnet(true);

    let client = build_client(config)?;

    println!("=== Validating a Limit Entry ===");
    match client
        .trading
        .limit_entry(OrderSide::Buy, "BTCUSDT", 25_000.0, 0.001, true)
        .await
    {
        Ok(ack) => {
            println!("Accepted: {}", ack.response);
            for warning in &ack.warnings {
                println!("  warning: {}", warning);
            }
        }
        Err(e) => eprintln!("Validation failed: {}", e),
    }

    println!("\n=== Validating a Take Profit (close whole position) ===");
    match client
        .trading
        .take_profit(OrderSide::Sell, "BTCUSDT", 99_000.0, None, None, true)
        .await
    {
        Ok(ack) => println!("Accepted: {}", ack.response),
        Err(e) => eprintln!("Validation failed: {}", e),
    }

    println!("\n=== Open Orders ===");
    match client.trading.open_orders(Some("BTCUSDT")).await {
        Ok(orders) => println!("{}", orders),
        Err(e) => eprintln!("Failed to get open orders: {}", e),
    }

    println!("\n=== Balances ===");
    match client.account.balances(None).await {
        Ok(balances) => {
            for (asset, balance) in &balances {
                println!(
                    "  {}: free={} locked={}",
                    asset, balance.free, balance.locked
                );
            }
        }
        Err(e) => eprintln!("Failed to get balances: {}", e),
    }

    Ok(())
}

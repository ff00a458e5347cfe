//! A full trading day against the ledger engine.
//!
//! Run with `cargo run -p shopmaster-ledger --example shop_day`, set
//! `RUST_LOG=debug` for the engine's mutation logs.

use shopmaster_core::Money;
use shopmaster_ledger::{NewCustomer, NewProduct, PurchaseTarget, ReturnLine, SaleLine, Shop};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut shop = Shop::new("Karim");

    // Morning: open the drawer with a ৳1000 float.
    shop.open_session(Money::from_taka(1000))?;

    // Restock: 10 kg of rice for ৳400 from the wholesale market.
    let purchase = shop.record_purchase(
        PurchaseTarget::New(NewProduct {
            name: "Miniket Rice".to_string(),
            unit: "kg".to_string(),
            price: Some(Money::from_taka(50)),
        }),
        10,
        Money::from_taka(400),
        Some("Karwan Bazar".to_string()),
    )?;

    // A customer buys 3 kg.
    let customer = shop.register_or_find_customer(NewCustomer {
        name: Some("Rahim Uddin".to_string()),
        phone: Some("01712-345678".to_string()),
        ..NewCustomer::default()
    });
    let sale = shop.record_sale(
        vec![SaleLine {
            product_id: purchase.product_id.clone(),
            quantity: 3,
            price: None,
        }],
        customer.clone(),
    )?;

    // One kg comes back.
    shop.record_return(
        &sale.id,
        &customer.id,
        vec![ReturnLine {
            product_id: purchase.product_id.clone(),
            quantity: 1,
        }],
    )?;

    println!("sales total     {}", shop.total_sales_amount());
    println!("purchase total  {}", shop.total_purchase_cost());
    println!("returns total   {}", shop.total_returns_amount());
    println!("cash balance    {}", shop.cash_balance());
    println!("stock valuation {}", shop.inventory_valuation());

    // Evening: count the drawer and close.
    let counted = shop.cash_balance();
    shop.close_session(counted)?;

    Ok(())
}

//! Configuration-selected, file-backed store example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{ReconciliationService, Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🗄️ Reconciliation Core - File-Backed Store Example\n");

    let path = std::env::temp_dir().join("reconciliation_core_demo.json");

    // The backend comes from configuration; the engine never branches on it
    let config = StoreConfig::JsonFile { path: path.clone() };
    println!("Store config: {}\n", serde_json::to_string(&config)?);

    {
        let store = Store::open(config.clone())?;
        let mut service = ReconciliationService::new(store);

        service
            .record_event(
                "EMP001",
                NaiveDate::from_ymd_opt(2025, 3, 26).unwrap(),
                BigDecimal::from(10000),
                BigDecimal::from(0),
            )
            .await?;
        service
            .record_event(
                "EMP001",
                NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
                BigDecimal::from(0),
                BigDecimal::from(4000),
            )
            .await?;
        println!("✓ Recorded 2 events into {}", path.display());
    }

    // Reopen from the same configuration: the derived ledger is rebuilt from
    // the persisted snapshot
    let store = Store::open(config)?;
    let service = ReconciliationService::new(store);

    let summary = service.employee_summary("EMP001").await?;
    println!(
        "✓ After reopen: collected ₹{}, deposited ₹{}, outstanding ₹{}",
        summary.total_collection, summary.total_deposit, summary.outstanding
    );

    let ledger = service.employee_ledger("EMP001").await?;
    println!("✓ Ledger rebuilt with {} record(s)", ledger.len());

    std::fs::remove_file(&path).ok();
    println!("\n🎉 Example completed successfully!");
    Ok(())
}

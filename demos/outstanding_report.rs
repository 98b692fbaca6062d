//! Outstanding and detailed report example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{Employee, MemoryStore, ReconciliationService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fmt_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("💵 Reconciliation Core - Outstanding Report Example\n");

    let mut service = ReconciliationService::new(MemoryStore::new());

    // 1. Register the collection-department employees
    println!("👥 Registering employees...");
    let employees = [
        ("EMP001", "Mayank Sharma", "mayank.sharma@company.com"),
        ("EMP002", "Priya Patel", "priya.patel@company.com"),
        ("EMP003", "Rajesh Kumar", "rajesh.kumar@company.com"),
    ];
    for (key, name, email) in employees {
        let employee = service
            .register_employee(Employee::new(key, name, email, "Collections"))
            .await?;
        println!("  ✓ Registered: {} - {}", employee.key, employee.name);
    }
    println!();

    // 2. Record the field events
    println!("💰 Recording cash events...");
    let events = [
        ("EMP001", date(2025, 3, 26), 10000, 0),
        ("EMP001", date(2025, 3, 27), 20000, 0),
        ("EMP001", date(2025, 3, 28), 0, 5000),
        ("EMP001", date(2025, 3, 29), 0, 7000),
        ("EMP002", date(2025, 3, 25), 15000, 0),
        ("EMP002", date(2025, 3, 26), 12000, 15000),
        ("EMP002", date(2025, 3, 27), 0, 12000),
        ("EMP003", date(2025, 3, 24), 8000, 0),
        ("EMP003", date(2025, 3, 25), 0, 8000),
    ];
    for (key, d, collection, deposit) in events {
        service
            .record_event(key, d, BigDecimal::from(collection), BigDecimal::from(deposit))
            .await?;
    }
    println!("  ✓ Recorded {} events\n", events.len());

    // 3. Outstanding report across all employees
    let report = service.outstanding_report().await?;

    println!("📊 Outstanding Report (All Employees):");
    for row in &report.rows {
        let name = service
            .get_employee(&row.employee_key)
            .await?
            .map(|e| e.name)
            .unwrap_or_else(|| row.employee_key.clone());
        println!(
            "  {:<16} collected ₹{:>8}  deposited ₹{:>8}  outstanding ₹{:>8}  last {}",
            name,
            row.summary.total_collection,
            row.summary.total_deposit,
            row.summary.outstanding,
            fmt_date(row.summary.last_transaction_date),
        );
    }
    println!(
        "  {:<16} collected ₹{:>8}  deposited ₹{:>8}  outstanding ₹{:>8}\n",
        "TOTAL",
        report.overall.total_collection,
        report.overall.total_deposit,
        report.overall.outstanding,
    );

    // 4. Detailed FIFO-matched ledger for one employee
    println!("🔍 Detailed Payment Report for EMP001:");
    let detailed = service.detailed_report(Some("EMP001")).await?;
    for record in &detailed.records {
        println!(
            "  collection ₹{:>6} on {}  |  deposit ₹{:>6} on {}  |  diff ₹{:>6}  |  balance ₹{:>6}",
            record.collection,
            fmt_date(record.collection_date),
            record.deposit,
            fmt_date(record.deposit_date),
            record.difference,
            record.running_balance,
        );
    }
    println!("  Net difference: ₹{}", detailed.net_difference);

    println!("\n🎉 Example completed successfully!");
    Ok(())
}

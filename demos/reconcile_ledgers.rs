//! Reconciliation of a small migrated ledger
//!
//! Run with `RUST_LOG=reconciliation_core=debug` to follow the drill-down.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::utils::MemoryAccountRepository;
use reconciliation_core::{
    AccountAggregate, AccountBalanceInput, AccountFilter, BalanceNature, JournalEntry,
    ReconciliationEngine, TransactionRecord, TransactionType, TurnoverProcessor,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Reconciliation Core - Legacy vs Current Ledger\n");

    let legacy = MemoryAccountRepository::new();
    let current = MemoryAccountRepository::new();
    let filters = AccountFilter::defaults();
    let at = |level: usize, parent: Option<&str>| filters[level].with_parent(parent);
    let amount = |value: i64| BigDecimal::from(value);

    // 1. Legacy chart: one dual-nature receivable/payable account and one cash account
    let receivables = "1010020100";
    let cash = "1100011000";
    legacy.insert_aggregates(
        at(0, None),
        vec![
            AccountAggregate::new(receivables, amount(700), amount(1200), 0),
            AccountAggregate::new(cash, amount(5000), amount(300), 0),
        ],
    )?;

    // The current ledger splits the receivable account in two (50 short) and agrees on cash
    current.insert_aggregates(
        at(0, None),
        vec![
            AccountAggregate::new("1010010100", amount(900), amount(800), 0),
            AccountAggregate::new("2010020100", amount(-250), amount(400), 0),
            AccountAggregate::new(cash, amount(5000), amount(300), 0),
        ],
    )?;

    // 2. Drill-down path of the receivable account, which fails to reconcile
    let level1 = "1010020100CUST1";
    let level2 = "1010020100CUST1INV01";
    let leaf = "BR0011010020100CUST1INV01";
    legacy.insert_aggregates(
        at(1, Some(receivables)),
        vec![AccountAggregate::new(level1, amount(700), amount(1200), 1)],
    )?;
    legacy.insert_aggregates(
        at(2, Some(level1)),
        vec![AccountAggregate::new(level2, amount(700), amount(1200), 2)],
    )?;
    legacy.insert_aggregates(
        at(3, Some(level2)),
        vec![AccountAggregate::new(leaf, amount(700), amount(1200), 3)],
    )?;

    let date = NaiveDate::from_ymd_opt(2024, 3, 20).ok_or("invalid date")?;
    let invoice = TransactionRecord::new(leaf, amount(1200), "IRR", date, TransactionType::Debit)
        .with_voucher("JV-2024-0311", 1);
    legacy.add_transaction(invoice)?;

    // 3. Run the reconciliation
    let engine = ReconciliationEngine::new(legacy.clone(), current.clone());
    let outcome = engine.run().await?;

    println!("Missing accounts:");
    for detail in &outcome.missing_account_infos {
        println!(
            "  - {} ({:?}, dual nature: {})",
            detail.full_code, detail.normal_balance, detail.is_dual_nature
        );
    }
    println!("Missing transactions:");
    for txn in &outcome.missing_transaction_infos {
        println!(
            "  - {} {} {} on {} (voucher {})",
            txn.transaction_id, txn.amount, txn.currency, txn.effective_date, txn.voucher_number
        );
    }
    println!(
        "\nRepository calls: legacy {}, current {}",
        legacy.call_count(),
        current.call_count()
    );

    // 4. Period turnover of the split pair
    let balances = [
        AccountBalanceInput::new("1010010100", BalanceNature::Debit, amount(1000), amount(0))
            .with_opposite("2010020100")
            .with_currency("IRR"),
        AccountBalanceInput::new("2010020100", BalanceNature::Credit, amount(0), amount(100))
            .with_opposite("1010010100")
            .with_currency("IRR"),
    ];
    let entries = [
        JournalEntry::new("1010010100", amount(0), amount(500), date),
        JournalEntry::new("2010020100", amount(0), amount(600), date),
    ];

    println!("\nTurnover:");
    for result in TurnoverProcessor::process(&balances, &entries) {
        println!(
            "  {}: turnover {} {:?}, difference {} {:?}",
            result.account_code,
            result.total_turnover,
            result.total_turnover_nature,
            result.difference,
            result.difference_nature
        );
    }

    println!("\n{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

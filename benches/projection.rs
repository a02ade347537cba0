use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spendcast_core::{
    core::projection::{ProjectionEngine, ProjectionWindow},
    ledger::{
        AccountType, BankAccount, Database, ExpenseCategory, Frequency, RecurringPayment,
        Transaction,
    },
    storage::{load_database_from_path, save_database_to_path},
};
use tempfile::tempdir;
use uuid::Uuid;

const ACCOUNT_ID: &str = "2f1c6d3e-6a8b-4a39-9a0e-0d6c7d1b4a10";

fn build_sample_database(payment_count: usize, settled_months: i64) -> Database {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
    let mut account = BankAccount::new(ACCOUNT_ID, "Benchmark", AccountType::Personal);

    for idx in 0..payment_count {
        let frequency = Frequency::ALL[idx % Frequency::ALL.len()];
        let anchor = start + Duration::days((idx % 28) as i64);
        let payment = RecurringPayment::new(
            Uuid::new_v4().to_string(),
            format!("Payment {idx}"),
            25.0 + idx as f64,
            frequency,
            anchor,
        );

        // Settle roughly the first `settled_months` of every monthly schedule.
        if frequency == Frequency::Monthly {
            for month in 0..settled_months {
                let date = anchor + Duration::days(month * 30);
                account.transactions.push(
                    Transaction::new(-payment.amount, date, ExpenseCategory::Other)
                        .fulfilling(payment.id.clone()),
                );
            }
        }
        account.recurrent_payments.push(payment);
    }

    Database {
        bank_accounts: vec![account],
        ..Database::default()
    }
}

fn bench_projection(c: &mut Criterion) {
    let database = build_sample_database(black_box(200), 24);
    let window = ProjectionWindow::new(
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    )
    .expect("window");

    c.bench_function("project_outstanding_200_payments_5y", |b| {
        let engine = ProjectionEngine::new(&database);
        b.iter(|| {
            let report = engine
                .project_outstanding(ACCOUNT_ID, window, None)
                .expect("projection");
            black_box(report);
        })
    });
}

fn bench_database_io(c: &mut Criterion) {
    let database = build_sample_database(black_box(200), 24);
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("db.json");
    save_database_to_path(&database, &file_path).expect("seed");

    c.bench_function("database_load_200_payments", |b| {
        b.iter(|| {
            let loaded = load_database_from_path(&file_path).expect("load database");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_projection, bench_database_io);
criterion_main!(benches);

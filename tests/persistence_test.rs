use std::sync::Arc;

use payqr::application::service::{DEFAULT_PURPOSE, PaymentService};
use payqr::domain::payload::Requisites;
use payqr::domain::payment::NewPayment;
use payqr::infrastructure::sqlite::SqlitePaymentStore;
use tempfile::tempdir;

fn submission(payer: &str, amount: &str) -> NewPayment {
    NewPayment {
        payer_name: payer.to_string(),
        amount: amount.to_string(),
        purpose: Some("Refund".to_string()),
    }
}

fn service_at(path: &std::path::Path) -> PaymentService {
    let store = SqlitePaymentStore::open(path).unwrap();
    PaymentService::new(Arc::new(store), Requisites::default())
}

#[tokio::test]
async fn payments_survive_a_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("payments.db");

    // First run: create two payments.
    let first;
    let second;
    {
        let service = service_at(&db_path);
        first = service.create(submission("Ivan Petrov", "1500.50")).await.unwrap();
        second = service.create(submission("Olga Sidorova", "99,90")).await.unwrap();
    }

    // Second run: both are still there and a third can be added.
    let service = service_at(&db_path);
    assert_eq!(service.get(&first.id).await.unwrap(), first);
    assert_eq!(service.get(&second.id).await.unwrap(), second);

    let third = service.create(submission("Pyotr", "7")).await.unwrap();
    assert_eq!(third.amount.kopecks(), 700);
    assert_eq!(service.get(&third.id).await.unwrap(), third);
}

#[tokio::test]
async fn upgrading_a_legacy_database_keeps_old_payments_readable() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("payments.db");

    // A database written before the purpose column existed.
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE payments (
                id TEXT PRIMARY KEY,
                payer_name TEXT NOT NULL,
                amount_rub TEXT NOT NULL,
                amount_kopecks INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                qr_string TEXT NOT NULL
            );
            INSERT INTO payments VALUES
                ('old001', 'Ivan Petrov', '10.00', 1000,
                 '2024-01-01T00:00:00', 'ST00011|SUM=1000');",
        )
        .unwrap();
    }

    let service = service_at(&db_path);
    let legacy = service.get("old001").await.unwrap();
    assert_eq!(legacy.payer_name, "Ivan Petrov");
    assert_eq!(legacy.amount.kopecks(), 1000);
    assert_eq!(legacy.purpose, DEFAULT_PURPOSE);

    // New payments written after the upgrade keep their own purpose.
    let fresh = service.create(submission("Olga", "25.00")).await.unwrap();
    assert_eq!(service.get(&fresh.id).await.unwrap().purpose, "Refund");
}

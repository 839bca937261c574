//! Concurrent ledger access tests
//!
//! Several threads, each with its own store instance on the same file, run
//! deposits and transfers at once. Every load-mutate-save runs under the
//! ledger lock, so no update may be lost.
//!
//! Run with: cargo test --test concurrent_access_test -- --nocapture

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use bank_core::adapters::{JsonFileStore, PlaintextPin};
use bank_core::services::{AccountService, LedgerService};
use bank_core::{AccountId, LedgerStore, Registration};

/// Number of concurrent threads
const THREAD_COUNT: usize = 6;

/// Number of operations per thread
const ITERATIONS_PER_THREAD: usize = 10;

fn registration(username: &str) -> Registration {
    Registration {
        name: username.to_uppercase(),
        dob: "1990-01-01".into(),
        gender: "F".into(),
        phone: "1".into(),
        email: format!("{}@example.com", username),
        username: username.into(),
        pin: "1234".into(),
        confirm_pin: "1234".into(),
    }
}

fn register(store: Arc<JsonFileStore>, username: &str) -> AccountId {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    AccountService::new(store, Arc::new(PlaintextPin), 18)
        .register_on(registration(username), today)
        .unwrap()
}

/// Every deposit from every thread must be reflected in the final balance
#[test]
fn test_concurrent_deposits_are_not_lost() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bank_data.json");
    let id = register(Arc::new(JsonFileStore::new(&path).unwrap()), "alice");

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let path = path.clone();
            let id = id.clone();
            thread::spawn(move || {
                // Each thread opens its own store, like separate CLI processes
                let ledger = LedgerService::new(Arc::new(JsonFileStore::new(&path).unwrap()));
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    ledger.deposit(&id, Decimal::ONE).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let ledger = JsonFileStore::new(&path).unwrap().load().unwrap();
    let expected = (THREAD_COUNT * ITERATIONS_PER_THREAD) as i64;
    assert_eq!(ledger.account(&id).unwrap().balance, Decimal::new(expected, 0));
    assert_eq!(ledger.history(&id).len(), expected as usize);
}

/// Transfers racing in both directions conserve the total
#[test]
fn test_concurrent_transfers_conserve_total() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bank_data.json");
    let store = Arc::new(JsonFileStore::new(&path).unwrap());
    let a = register(Arc::clone(&store), "alice");
    let b = register(Arc::clone(&store), "bob");
    let seed = LedgerService::new(Arc::clone(&store));
    seed.deposit(&a, Decimal::new(500, 0)).unwrap();
    seed.deposit(&b, Decimal::new(500, 0)).unwrap();

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|n| {
            let barrier = Arc::clone(&barrier);
            let path = path.clone();
            let (from, to) = if n % 2 == 0 { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) };
            thread::spawn(move || {
                let ledger = LedgerService::new(Arc::new(JsonFileStore::new(&path).unwrap()));
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    ledger.transfer(&from, &to, Decimal::new(7, 0)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let ledger = store.load().unwrap();
    assert_eq!(ledger.total_balance().unwrap(), Decimal::new(1000, 0));
    // Three threads each way: net zero movement
    assert_eq!(ledger.account(&a).unwrap().balance, Decimal::new(500, 0));
    let entries = THREAD_COUNT * ITERATIONS_PER_THREAD;
    assert_eq!(ledger.history(&a).len() + ledger.history(&b).len(), 2 * entries + 2);
}

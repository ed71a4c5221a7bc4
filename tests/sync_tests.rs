// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use fintrack::db;
use fintrack::errors::SyncError;
use fintrack::models::{SyncState, Transaction, TransactionKind};
use fintrack::remote::CloudEndpoint;
use fintrack::store::Store;

fn mem_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE cache(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        "#,
    )
    .unwrap();
    conn
}

fn record(id: &str, amount: i64, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: Decimal::from(amount),
        kind: TransactionKind::Expense,
        category_id: "groceries".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: String::new(),
        state: SyncState::Confirmed,
    }
}

#[derive(Default, Clone, Copy, PartialEq)]
enum FetchMode {
    #[default]
    Ok,
    Network,
    Malformed,
}

#[derive(Default)]
struct Inner {
    snapshot: Vec<Transaction>,
    fetch_mode: FetchMode,
    pushed: Vec<Transaction>,
}

#[derive(Clone, Default)]
struct FakeCloud {
    inner: Rc<RefCell<Inner>>,
}

impl FakeCloud {
    fn with_snapshot(snapshot: Vec<Transaction>) -> Self {
        let fake = FakeCloud::default();
        fake.inner.borrow_mut().snapshot = snapshot;
        fake
    }

    fn with_fetch_mode(mode: FetchMode) -> Self {
        let fake = FakeCloud::default();
        fake.inner.borrow_mut().fetch_mode = mode;
        fake
    }
}

impl CloudEndpoint for FakeCloud {
    fn fetch_all(&self) -> Result<Vec<Transaction>, SyncError> {
        let inner = self.inner.borrow();
        match inner.fetch_mode {
            FetchMode::Ok => Ok(inner.snapshot.clone()),
            FetchMode::Network => Err(SyncError::Network("connection refused".into())),
            FetchMode::Malformed => Err(SyncError::MalformedResponse(
                "expected a JSON array, got an object".into(),
            )),
        }
    }

    fn push(&self, transaction: &Transaction) -> Result<(), SyncError> {
        self.inner.borrow_mut().pushed.push(transaction.clone());
        Ok(())
    }
}

#[test]
fn pull_replaces_confirmed_records_with_the_snapshot() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("a", 1, "2025-01-01"), record("b", 2, "2025-01-02")])
        .unwrap();

    let snapshot = vec![
        record("c", 3, "2025-02-01"),
        record("d", 4, "2025-02-02"),
        record("e", 5, "2025-02-03"),
    ];
    let fake = FakeCloud::with_snapshot(snapshot);
    let mut store = Store::new(conn, Some(Box::new(fake)));
    store.load_initial().unwrap();

    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "d", "e"]);
    assert_eq!(store.status(), Some("Synced with cloud"));
}

#[test]
fn pull_preserves_pending_records_at_the_head() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("p", 9, "2025-02-10")]).unwrap();
    db::write_pending_ids(&conn, &["p".to_string()]).unwrap();

    let fake = FakeCloud::with_snapshot(vec![record("x", 1, "2025-02-01")]);
    let mut store = Store::new(conn, Some(Box::new(fake)));
    store.load_initial().unwrap();

    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["p", "x"]);
    assert_eq!(store.transactions()[0].state, SyncState::Pending);
    assert_eq!(store.transactions()[1].state, SyncState::Confirmed);
}

#[test]
fn pull_confirms_pending_records_present_remotely() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("p", 9, "2025-02-10")]).unwrap();
    db::write_pending_ids(&conn, &["p".to_string()]).unwrap();

    let fake = FakeCloud::with_snapshot(vec![record("p", 9, "2025-02-10")]);
    let mut store = Store::new(conn, Some(Box::new(fake)));
    store.load_initial().unwrap();

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].state, SyncState::Confirmed);
    assert!(db::read_pending_ids(store.connection()).unwrap().is_empty());
}

#[test]
fn fetch_failure_leaves_local_state_untouched() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("a", 1, "2025-01-01")]).unwrap();

    let fake = FakeCloud::with_fetch_mode(FetchMode::Network);
    let mut store = Store::new(conn, Some(Box::new(fake)));
    store.load_initial().unwrap();

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].id, "a");
    assert_eq!(store.status(), Some("Offline mode"));
}

#[test]
fn malformed_response_is_treated_as_no_data() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("a", 1, "2025-01-01")]).unwrap();

    let fake = FakeCloud::with_fetch_mode(FetchMode::Malformed);
    let mut store = Store::new(conn, Some(Box::new(fake)));
    store.load_initial().unwrap();

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.status(), Some("Offline mode"));
}

#[test]
fn pull_without_endpoint_reports_and_keeps_cache() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("a", 1, "2025-01-01")]).unwrap();

    let mut store = Store::new(conn, None);
    store.load_initial().unwrap();

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.status(), Some("No cloud endpoint configured"));
}

#[test]
fn pull_persists_the_merged_list() {
    let conn = mem_conn();
    let fake = FakeCloud::with_snapshot(vec![
        record("c", 3, "2025-02-01"),
        record("d", 4, "2025-02-02"),
    ]);
    let mut store = Store::new(conn, Some(Box::new(fake)));
    store.load_initial().unwrap();

    let cached = db::read_transactions(store.connection()).unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].id, "c");
}

#[test]
fn push_pending_confirms_all_records() {
    let conn = mem_conn();
    db::write_transactions(
        &conn,
        &[record("p2", 2, "2025-02-02"), record("p1", 1, "2025-02-01")],
    )
    .unwrap();
    db::write_pending_ids(&conn, &["p1".to_string(), "p2".to_string()]).unwrap();

    let fake = FakeCloud::default();
    let mut store = Store::new(conn, Some(Box::new(fake.clone())));
    store.load_cached().unwrap();

    let confirmed = store.push_pending().unwrap();
    assert_eq!(confirmed, 2);
    assert!(store
        .transactions()
        .iter()
        .all(|t| t.state == SyncState::Confirmed));
    assert_eq!(fake.inner.borrow().pushed.len(), 2);
    assert!(db::read_pending_ids(store.connection()).unwrap().is_empty());
}

#[test]
fn push_pending_without_pending_records_is_a_noop() {
    let fake = FakeCloud::default();
    let mut store = Store::new(mem_conn(), Some(Box::new(fake.clone())));
    assert_eq!(store.push_pending().unwrap(), 0);
    assert!(fake.inner.borrow().pushed.is_empty());
}

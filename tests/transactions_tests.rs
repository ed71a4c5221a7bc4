// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use fintrack::models::{SyncState, Transaction, TransactionKind};
use fintrack::store::Store;
use fintrack::{cli, commands::transactions, db};

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

fn record(id: &str, category: &str, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: Decimal::from(10),
        kind: TransactionKind::Expense,
        category_id: category.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: String::new(),
        state: SyncState::Confirmed,
    }
}

fn seeded_store() -> Store {
    let conn = mem_conn();
    db::write_transactions(
        &conn,
        &[
            record("t3", "groceries", "2025-02-03"),
            record("t2", "transport", "2025-02-01"),
            record("t1", "groceries", "2025-01-28"),
        ],
    )
    .unwrap();
    let mut store = Store::new(conn, None);
    store.load_cached().unwrap();
    store
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let mut full = vec!["fintrack", "tx", "list"];
    full.extend_from_slice(args);
    let matches = cli.get_matches_from(full);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return list_m.clone();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let store = seeded_store();
    let rows = transactions::filter_rows(&store, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "t3");
    assert_eq!(rows[1].id, "t2");
}

#[test]
fn list_month_filter() {
    let store = seeded_store();
    let rows = transactions::filter_rows(&store, &list_matches(&["--month", "2025-02"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.date.starts_with("2025-02")));
}

#[test]
fn list_category_filter_accepts_names() {
    let store = seeded_store();
    let rows =
        transactions::filter_rows(&store, &list_matches(&["--category", "Groceries"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.category == "Groceries"));
}

#[test]
fn list_rows_carry_pending_flag() {
    let conn = mem_conn();
    db::write_transactions(&conn, &[record("p", "groceries", "2025-02-03")]).unwrap();
    db::write_pending_ids(&conn, &["p".to_string()]).unwrap();
    let mut store = Store::new(conn, None);
    store.load_cached().unwrap();

    let rows = transactions::filter_rows(&store, &list_matches(&[])).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].pending);
}

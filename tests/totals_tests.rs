// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fintrack::models::{SyncState, Transaction, TransactionKind};
use fintrack::store::compute_totals;

fn record(amount: i64, kind: TransactionKind, date: &str) -> Transaction {
    Transaction {
        id: format!("{}-{}", date, amount),
        amount: Decimal::from(amount),
        kind,
        category_id: "groceries".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: String::new(),
        state: SyncState::Confirmed,
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn single_expense() {
    let list = vec![record(500, TransactionKind::Expense, "2024-01-05")];
    let totals = compute_totals(&list, day("2024-01-15"));
    assert_eq!(totals.balance, Decimal::from(-500));
    assert_eq!(totals.monthly_income, Decimal::ZERO);
    assert_eq!(totals.monthly_expenses, Decimal::from(500));
}

#[test]
fn income_and_expense_in_the_reference_month() {
    let list = vec![
        record(1000, TransactionKind::Income, "2024-01-03"),
        record(300, TransactionKind::Expense, "2024-01-20"),
    ];
    let totals = compute_totals(&list, day("2024-01-31"));
    assert_eq!(totals.balance, Decimal::from(700));
    assert_eq!(totals.monthly_income, Decimal::from(1000));
    assert_eq!(totals.monthly_expenses, Decimal::from(300));
}

#[test]
fn other_months_count_toward_balance_only() {
    let list = vec![
        record(250, TransactionKind::Expense, "2023-12-31"),
        record(40, TransactionKind::Expense, "2024-01-02"),
    ];
    let totals = compute_totals(&list, day("2024-01-15"));
    assert_eq!(totals.balance, Decimal::from(-290));
    assert_eq!(totals.monthly_expenses, Decimal::from(40));
}

#[test]
fn same_month_in_a_different_year_is_not_monthly() {
    let list = vec![record(100, TransactionKind::Income, "2023-01-10")];
    let totals = compute_totals(&list, day("2024-01-10"));
    assert_eq!(totals.balance, Decimal::from(100));
    assert_eq!(totals.monthly_income, Decimal::ZERO);
}

#[test]
fn empty_list_is_all_zero() {
    let totals = compute_totals(&[], day("2024-01-10"));
    assert_eq!(totals.balance, Decimal::ZERO);
    assert_eq!(totals.monthly_income, Decimal::ZERO);
    assert_eq!(totals.monthly_expenses, Decimal::ZERO);
}

#[test]
fn fractional_amounts_accumulate_exactly() {
    let list = vec![
        record_dec("12.34", TransactionKind::Expense, "2024-01-05"),
        record_dec("0.66", TransactionKind::Expense, "2024-01-06"),
    ];
    let totals = compute_totals(&list, day("2024-01-15"));
    assert_eq!(totals.monthly_expenses, "13.00".parse::<Decimal>().unwrap());
}

fn record_dec(amount: &str, kind: TransactionKind, date: &str) -> Transaction {
    Transaction {
        id: format!("{}-{}", date, amount),
        amount: amount.parse().unwrap(),
        kind,
        category_id: "groceries".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: String::new(),
        state: SyncState::Confirmed,
    }
}

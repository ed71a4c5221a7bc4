// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_month, pretty_table, today};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// The dashboard view: all-time balance, reference-month income/expenses, and
/// the five most recent records.
fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let reference = match sub.get_one::<String>("month") {
        Some(m) => parse_date(&format!("{}-01", parse_month(m)?))?,
        None => today(),
    };
    let totals = store.totals(reference);
    if maybe_print_json(json_flag, jsonl_flag, &totals)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Balance", "Income (month)", "Expenses (month)"],
            vec![vec![
                totals.balance.to_string(),
                totals.monthly_income.to_string(),
                totals.monthly_expenses.to_string(),
            ]],
        )
    );

    let recent: Vec<Vec<String>> = store
        .transactions()
        .iter()
        .take(5)
        .map(|t| {
            vec![
                t.date.to_string(),
                t.kind.label().to_string(),
                store.category_name(&t.category_id).to_string(),
                t.amount.to_string(),
            ]
        })
        .collect();
    if !recent.is_empty() {
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount"], recent)
        );
    }
    Ok(())
}

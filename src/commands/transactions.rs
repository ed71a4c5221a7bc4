// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{SyncState, TransactionDraft, TransactionKind};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_month, parse_positive_amount, pretty_table, today};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Accepts a category id or name; unknown values pass through as-is, since
/// dangling references are tolerated everywhere downstream.
fn resolve_category(store: &Store, input: &str) -> String {
    store
        .categories()
        .iter()
        .find(|c| c.id == input || c.name.eq_ignore_ascii_case(input))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| input.to_string())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = match sub.get_one::<String>("type").unwrap().as_str() {
        "income" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    };
    let category_id = resolve_category(store, sub.get_one::<String>("category").unwrap());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let note = sub.get_one::<String>("note").cloned().unwrap_or_default();

    let id = store.add_transaction(TransactionDraft {
        amount,
        kind,
        category_id: category_id.clone(),
        date,
        note,
    })?;
    if store.transactions().iter().any(|t| t.id == id) {
        println!(
            "Recorded {} {} on {} ({})",
            kind.label().to_lowercase(),
            amount,
            date,
            store.category_name(&category_id)
        );
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = filter_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                    if r.pending { "pending".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Amount", "Note", "Sync"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if store.delete_transaction(id)? {
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
    pub pending: bool,
}

/// List rows in store order (most recent insertion first) with the optional
/// month/category/limit filters applied.
pub fn filter_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|c| resolve_category(store, c));
    let limit = sub.get_one::<usize>("limit").copied();

    let mut data = Vec::new();
    for t in store.transactions() {
        if let Some(ref m) = month {
            if t.date.format("%Y-%m").to_string() != *m {
                continue;
            }
        }
        if let Some(ref c) = category {
            if t.category_id != *c {
                continue;
            }
        }
        data.push(TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.label().to_string(),
            category: store.category_name(&t.category_id).to_string(),
            amount: t.amount.to_string(),
            note: t.note.clone(),
            pending: t.state == SyncState::Pending,
        });
        if let Some(limit) = limit {
            if data.len() == limit {
                break;
            }
        }
    }
    Ok(data)
}

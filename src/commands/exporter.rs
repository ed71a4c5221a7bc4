// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::Write;

use anyhow::{Result, bail};

use crate::store::Store;

/// Byte-order mark so spreadsheet tools detect UTF-8.
const BOM: &[u8] = b"\xef\xbb\xbf";

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "csv" => {
            let mut file = File::create(out)?;
            file.write_all(BOM)?;
            let mut wtr = csv::Writer::from_writer(file);
            wtr.write_record(["Date", "Type", "Category", "Amount", "Note"])?;
            for t in store.transactions() {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.label().to_string(),
                    store.category_name(&t.category_id).to_string(),
                    t.amount.to_string(),
                    t.note.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(store.transactions())?)?;
        }
        _ => {
            bail!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}

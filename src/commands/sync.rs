// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::db;
use crate::models::SyncState;
use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pull", _)) => {
            store.sync_from_cloud()?;
            println!("{} record(s) in the local list", store.transactions().len());
        }
        Some(("push", _)) => {
            let confirmed = store.push_pending()?;
            println!("{} record(s) confirmed", confirmed);
        }
        Some(("status", _)) => status(store)?,
        _ => {}
    }
    Ok(())
}

fn status(store: &Store) -> Result<()> {
    let endpoint =
        db::endpoint(store.connection())?.unwrap_or_else(|| "(not configured)".to_string());
    let pending = store
        .transactions()
        .iter()
        .filter(|t| t.state == SyncState::Pending)
        .count();
    let rows = vec![
        vec!["Endpoint".to_string(), endpoint],
        vec![
            "Cached records".to_string(),
            store.transactions().len().to_string(),
        ],
        vec!["Pending".to_string(), pending.to_string()],
        vec!["Theme".to_string(), db::theme(store.connection())?],
    ];
    println!("{}", pretty_table(&["Key", "Value"], rows));
    Ok(())
}

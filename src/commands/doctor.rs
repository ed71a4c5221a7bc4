// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::SyncState;
use crate::store::Store;
use crate::utils::pretty_table;

/// Dangling references and stuck pending records are tolerated at runtime;
/// this just makes them visible.
pub fn handle(store: &Store) -> Result<()> {
    let mut rows = Vec::new();

    for t in store.transactions() {
        if !store.categories().iter().any(|c| c.id == t.category_id) {
            rows.push(vec![
                "dangling_category".into(),
                format!("{} -> {}", t.id, t.category_id),
            ]);
        }
        if t.state == SyncState::Pending {
            rows.push(vec![
                "pending_record".into(),
                format!("{} ({})", t.id, t.date),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

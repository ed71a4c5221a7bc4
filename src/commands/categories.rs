// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{AVAILABLE_COLORS, AVAILABLE_ICONS};
use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let icon = sub
                .get_one::<String>("icon")
                .map(String::as_str)
                .unwrap_or(AVAILABLE_ICONS[0]);
            let color = sub
                .get_one::<String>("color")
                .map(String::as_str)
                .unwrap_or(AVAILABLE_COLORS[0]);
            let id = store.add_category(name, icon, color)?;
            println!("Added category '{}' ({})", name.trim(), id);
        }
        Some(("list", _)) => {
            let rows: Vec<Vec<String>> = store
                .categories()
                .iter()
                .map(|c| {
                    vec![
                        c.id.clone(),
                        c.name.clone(),
                        c.icon.clone(),
                        c.color.clone(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Id", "Name", "Icon", "Color"], rows));
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            if store.remove_category(id)? {
                println!("Removed category {}", id);
            } else {
                println!("No category with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::db;
use crate::store::Store;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("theme", sub)) => match sub.get_one::<String>("value") {
            Some(value) => {
                db::set_theme(store.connection(), value)?;
                println!("Theme set to {}", value);
            }
            None => println!("{}", db::theme(store.connection())?),
        },
        Some(("endpoint", sub)) => match sub.get_one::<String>("url") {
            Some(url) => {
                db::set_endpoint(store.connection(), url)?;
                println!("Cloud endpoint updated");
            }
            None => println!(
                "{}",
                db::endpoint(store.connection())?.unwrap_or_else(|| "(not configured)".to_string())
            ),
        },
        Some(("clear", sub)) => {
            if !sub.get_flag("yes") {
                println!("This clears local data only; pass --yes to confirm.");
                return Ok(());
            }
            store.clear()?;
        }
        _ => {}
    }
    Ok(())
}

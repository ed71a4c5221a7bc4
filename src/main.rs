// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::remote::{CloudEndpoint, SheetEndpoint};
use fintrack::store::{Store, StoreEvent};
use fintrack::{cli, commands, db};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::from_default_env().add_directive("fintrack=warn".parse().expect("static directive"));
    fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let remote: Option<Box<dyn CloudEndpoint>> = match db::endpoint(&conn)? {
        Some(url) => Some(Box::new(SheetEndpoint::new(url)?)),
        None => None,
    };
    let mut store = Store::new(conn, remote);
    store.subscribe(Box::new(|event| {
        if let StoreEvent::Status(text) = event {
            println!("» {}", text);
        }
    }));
    store.load_cached()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Local cache initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => commands::config::handle(&mut store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

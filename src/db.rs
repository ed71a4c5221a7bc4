// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Category, Transaction, default_categories};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.fintrack", "FinTrack", "fintrack"));

// Slot keys mirror the original browser-storage keys so a reader of either
// store sees the same vocabulary.
const SLOT_TRANSACTIONS: &str = "fintrack_cache";
const SLOT_CATEGORIES: &str = "fintrack_categories";
const SLOT_PENDING: &str = "fintrack_pending";
const SETTING_THEME: &str = "fintrack_theme";
const SETTING_ENDPOINT: &str = "fintrack_endpoint";

pub const THEMES: [&str; 2] = ["light", "dark"];

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_or_init_at(&db_path()?)
}

pub fn open_or_init_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open cache at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS cache(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

fn read_slot(conn: &Connection, table: &str, key: &str) -> Result<Option<String>> {
    let sql = format!("SELECT value FROM {table} WHERE key=?1");
    let v: Option<String> = conn
        .query_row(&sql, params![key], |r| r.get(0))
        .optional()?;
    Ok(v)
}

fn write_slot(conn: &Connection, table: &str, key: &str, value: &str) -> Result<()> {
    let sql = format!(
        "INSERT INTO {table}(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value"
    );
    conn.execute(&sql, params![key, value])?;
    Ok(())
}

fn delete_slot(conn: &Connection, table: &str, key: &str) -> Result<()> {
    let sql = format!("DELETE FROM {table} WHERE key=?1");
    conn.execute(&sql, params![key])?;
    Ok(())
}

/// Cached transaction list. An absent slot means first run: empty list.
pub fn read_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    match read_slot(conn, "cache", SLOT_TRANSACTIONS)? {
        Some(raw) => serde_json::from_str(&raw).context("Corrupt transaction cache slot"),
        None => Ok(Vec::new()),
    }
}

pub fn write_transactions(conn: &Connection, transactions: &[Transaction]) -> Result<()> {
    write_slot(
        conn,
        "cache",
        SLOT_TRANSACTIONS,
        &serde_json::to_string(transactions)?,
    )
}

/// Ids of records not yet confirmed by the cloud endpoint.
pub fn read_pending_ids(conn: &Connection) -> Result<Vec<String>> {
    match read_slot(conn, "cache", SLOT_PENDING)? {
        Some(raw) => serde_json::from_str(&raw).context("Corrupt pending-id slot"),
        None => Ok(Vec::new()),
    }
}

pub fn write_pending_ids(conn: &Connection, ids: &[String]) -> Result<()> {
    write_slot(conn, "cache", SLOT_PENDING, &serde_json::to_string(ids)?)
}

/// Category set. An absent slot means first run: the default set.
pub fn read_categories(conn: &Connection) -> Result<Vec<Category>> {
    match read_slot(conn, "cache", SLOT_CATEGORIES)? {
        Some(raw) => serde_json::from_str(&raw).context("Corrupt category cache slot"),
        None => Ok(default_categories()),
    }
}

pub fn write_categories(conn: &Connection, categories: &[Category]) -> Result<()> {
    write_slot(
        conn,
        "cache",
        SLOT_CATEGORIES,
        &serde_json::to_string(categories)?,
    )
}

/// Drops every data slot. Settings (theme, endpoint) survive a clear.
pub fn clear_cache(conn: &Connection) -> Result<()> {
    delete_slot(conn, "cache", SLOT_TRANSACTIONS)?;
    delete_slot(conn, "cache", SLOT_PENDING)?;
    delete_slot(conn, "cache", SLOT_CATEGORIES)?;
    Ok(())
}

/// Stored theme, else the FINTRACK_THEME environment, else "light".
pub fn theme(conn: &Connection) -> Result<String> {
    if let Some(t) = read_slot(conn, "settings", SETTING_THEME)? {
        return Ok(t);
    }
    match std::env::var("FINTRACK_THEME") {
        Ok(t) if THEMES.contains(&t.as_str()) => Ok(t),
        _ => Ok("light".to_string()),
    }
}

pub fn set_theme(conn: &Connection, theme: &str) -> Result<()> {
    write_slot(conn, "settings", SETTING_THEME, theme)
}

/// Cloud endpoint URL. FINTRACK_ENDPOINT overrides the stored value; absent
/// both places means sync is disabled.
pub fn endpoint(conn: &Connection) -> Result<Option<String>> {
    if let Ok(url) = std::env::var("FINTRACK_ENDPOINT") {
        if !url.is_empty() {
            return Ok(Some(url));
        }
    }
    read_slot(conn, "settings", SETTING_ENDPOINT)
}

pub fn set_endpoint(conn: &Connection, url: &str) -> Result<()> {
    write_slot(conn, "settings", SETTING_ENDPOINT, url)
}

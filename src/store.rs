// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db;
use crate::errors::SyncError;
use crate::models::{
    AVAILABLE_COLORS, AVAILABLE_ICONS, Category, FALLBACK_CATEGORY_LABEL, SyncState, Totals,
    Transaction, TransactionDraft, TransactionKind, default_categories,
};
use crate::remote::CloudEndpoint;

/// How long a status message stays readable. Every new status replaces both
/// the text and the deadline, so a stale timer can never clear a newer message.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub enum StoreEvent {
    TransactionsChanged,
    CategoriesChanged,
    Syncing(bool),
    Status(String),
}

pub type Listener = Box<dyn Fn(&StoreEvent)>;

/// Transaction store & sync coordinator.
///
/// Owns the in-memory collections, mirrors them to the local cache slots on
/// every mutation, and best-effort syncs transactions against the cloud
/// endpoint. The local cache is authoritative for reads; the cloud snapshot is
/// merged by id on pull. Single-threaded by design: the `syncing` flag is
/// advisory, not a lock.
pub struct Store {
    conn: Connection,
    remote: Option<Box<dyn CloudEndpoint>>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    syncing: bool,
    status: Option<(String, Instant)>,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(conn: Connection, remote: Option<Box<dyn CloudEndpoint>>) -> Self {
        Self {
            conn,
            remote,
            transactions: Vec::new(),
            categories: default_categories(),
            syncing: false,
            status: None,
            listeners: Vec::new(),
        }
    }

    /// Registers a state-change observer. Listeners see every mutation and
    /// status transition; the CLI uses one to surface sync messages.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn syncing(&self) -> bool {
        self.syncing
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn status(&self) -> Option<&str> {
        self.status_at(Instant::now())
    }

    pub(crate) fn status_at(&self, now: Instant) -> Option<&str> {
        match &self.status {
            Some((text, deadline)) if now < *deadline => Some(text),
            _ => None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.set_status_at(text, Instant::now());
    }

    pub(crate) fn set_status_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.status = Some((text.clone(), now + STATUS_TTL));
        self.notify(StoreEvent::Status(text));
    }

    /// Adopts the locally cached state for immediate reads. Absent slots mean
    /// first run: empty transactions, default categories.
    pub fn load_cached(&mut self) -> Result<()> {
        self.transactions = db::read_transactions(&self.conn)?;
        let pending: HashSet<String> = db::read_pending_ids(&self.conn)?.into_iter().collect();
        for t in &mut self.transactions {
            if pending.contains(&t.id) {
                t.state = SyncState::Pending;
            }
        }
        self.categories = db::read_categories(&self.conn)?;
        tracing::debug!(
            transactions = self.transactions.len(),
            categories = self.categories.len(),
            "adopted local cache"
        );
        self.notify(StoreEvent::TransactionsChanged);
        self.notify(StoreEvent::CategoriesChanged);
        Ok(())
    }

    /// Cold-start sequence: cached state first, then a best-effort cloud pull.
    /// Network trouble is never an error here, only an "offline" status.
    pub fn load_initial(&mut self) -> Result<()> {
        self.load_cached()?;
        self.sync_from_cloud()
    }

    /// Pulls the full cloud snapshot and merges it by id: remote records are
    /// the authoritative tail, local pending records missing remotely keep
    /// their spot at the head, local confirmed records missing remotely are
    /// evicted. On any fetch failure local state is left untouched.
    pub fn sync_from_cloud(&mut self) -> Result<()> {
        self.set_syncing(true);
        self.set_status("Loading from cloud...");
        let fetched = match &self.remote {
            Some(remote) => remote.fetch_all(),
            None => Err(SyncError::NotConfigured),
        };
        match fetched {
            Ok(snapshot) => {
                let records = snapshot.len();
                self.merge_snapshot(snapshot);
                self.persist_transactions()?;
                self.notify(StoreEvent::TransactionsChanged);
                tracing::info!(records, "cloud snapshot merged");
                self.set_status("Synced with cloud");
            }
            Err(SyncError::NotConfigured) => {
                self.set_status("No cloud endpoint configured");
            }
            Err(err) => {
                tracing::warn!(error = %err, "cloud fetch failed");
                self.set_status("Offline mode");
            }
        }
        self.set_syncing(false);
        Ok(())
    }

    fn merge_snapshot(&mut self, snapshot: Vec<Transaction>) {
        let remote_ids: HashSet<String> = snapshot.iter().map(|t| t.id.clone()).collect();
        let mut merged: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.state == SyncState::Pending && !remote_ids.contains(&t.id))
            .cloned()
            .collect();
        merged.extend(snapshot.into_iter().map(|mut t| {
            t.state = SyncState::Confirmed;
            t
        }));
        self.transactions = merged;
    }

    /// Optimistic write path. The caller has already validated `amount > 0`;
    /// the record is visible at the head of the list before any network I/O.
    /// Push outcome: 2xx confirms the record, a definitive HTTP rejection
    /// rolls it back, anything else leaves it pending for a later `sync push`.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<String> {
        let record = Transaction {
            id: Uuid::new_v4().to_string(),
            amount: draft.amount,
            kind: draft.kind,
            category_id: draft.category_id,
            date: draft.date,
            note: draft.note,
            state: SyncState::Pending,
        };
        let id = record.id.clone();
        self.transactions.insert(0, record);
        self.persist_transactions()?;
        self.notify(StoreEvent::TransactionsChanged);

        self.set_syncing(true);
        self.set_status("Saving to cloud...");
        match self.push_record(&id) {
            Ok(()) => {
                self.mark_confirmed(&id);
                self.persist_transactions()?;
                self.set_status("Saved to cloud");
            }
            Err(SyncError::Http(status)) => {
                tracing::warn!(id = %id, status, "cloud rejected record, rolling back");
                self.transactions.retain(|t| t.id != id);
                self.persist_transactions()?;
                self.notify(StoreEvent::TransactionsChanged);
                self.set_status("Cloud rejected the record");
            }
            Err(SyncError::NotConfigured) => {
                self.set_status("No cloud endpoint configured");
            }
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "push failed, record stays pending");
                self.set_status("Offline, saved locally");
            }
        }
        self.set_syncing(false);
        Ok(id)
    }

    /// Re-pushes pending records one by one. Manual only; there is no
    /// automatic retry anywhere. Returns how many records were confirmed.
    pub fn push_pending(&mut self) -> Result<usize> {
        if self.remote.is_none() {
            self.set_status("No cloud endpoint configured");
            return Ok(0);
        }
        let ids: Vec<String> = self
            .transactions
            .iter()
            .filter(|t| t.state == SyncState::Pending)
            .map(|t| t.id.clone())
            .collect();
        if ids.is_empty() {
            self.set_status("Nothing pending to push");
            return Ok(0);
        }
        self.set_syncing(true);
        self.set_status("Pushing pending records...");
        let total = ids.len();
        let mut confirmed = 0usize;
        let mut changed = false;
        let mut offline = false;
        for id in ids {
            match self.push_record(&id) {
                Ok(()) => {
                    self.mark_confirmed(&id);
                    confirmed += 1;
                    changed = true;
                }
                Err(SyncError::Http(status)) => {
                    tracing::warn!(id = %id, status, "cloud rejected pending record, dropping");
                    self.transactions.retain(|t| t.id != id);
                    changed = true;
                }
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "push failed, stopping");
                    offline = true;
                    break;
                }
            }
        }
        if changed {
            self.persist_transactions()?;
            self.notify(StoreEvent::TransactionsChanged);
        }
        if offline && confirmed == 0 {
            self.set_status("Offline mode");
        } else {
            self.set_status(format!("Confirmed {} of {} pending record(s)", confirmed, total));
        }
        self.set_syncing(false);
        Ok(confirmed)
    }

    /// Local-only removal by id; nothing is sent to the cloud, so a confirmed
    /// record deleted here reappears after the next successful pull.
    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() < before;
        if removed {
            self.persist_transactions()?;
            self.notify(StoreEvent::TransactionsChanged);
        }
        Ok(removed)
    }

    pub fn add_category(&mut self, name: &str, icon: &str, color: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Category name must not be empty");
        }
        if !AVAILABLE_ICONS.contains(&icon) {
            bail!(
                "Unknown icon '{}' (available: {})",
                icon,
                AVAILABLE_ICONS.join(", ")
            );
        }
        if !AVAILABLE_COLORS.contains(&color) {
            bail!(
                "Unknown color '{}' (available: {})",
                color,
                AVAILABLE_COLORS.join(", ")
            );
        }
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        };
        let id = category.id.clone();
        self.categories.push(category);
        db::write_categories(&self.conn, &self.categories)?;
        self.notify(StoreEvent::CategoriesChanged);
        Ok(id)
    }

    /// The category set never becomes empty: removing the last member is
    /// rejected before any state change.
    pub fn remove_category(&mut self, id: &str) -> Result<bool> {
        if self.categories.len() <= 1 {
            bail!("Cannot remove the last category");
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() < before;
        if removed {
            db::write_categories(&self.conn, &self.categories)?;
            self.notify(StoreEvent::CategoriesChanged);
        }
        Ok(removed)
    }

    /// Display name for a category id, tolerating dangling references.
    pub fn category_name(&self, id: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(FALLBACK_CATEGORY_LABEL)
    }

    /// Bulk reset: transactions gone, categories back to defaults, cache slots
    /// dropped. The cloud store is untouched.
    pub fn clear(&mut self) -> Result<()> {
        self.transactions.clear();
        self.categories = default_categories();
        db::clear_cache(&self.conn)?;
        self.notify(StoreEvent::TransactionsChanged);
        self.notify(StoreEvent::CategoriesChanged);
        self.set_status("Local data cleared");
        Ok(())
    }

    pub fn totals(&self, reference: NaiveDate) -> Totals {
        compute_totals(&self.transactions, reference)
    }

    fn push_record(&self, id: &str) -> Result<(), SyncError> {
        // The id was collected from the list in the same call; a miss means
        // the record was already removed and there is nothing to send.
        let Some(record) = self.transactions.iter().find(|t| t.id == id) else {
            return Ok(());
        };
        match &self.remote {
            Some(remote) => remote.push(record),
            None => Err(SyncError::NotConfigured),
        }
    }

    fn mark_confirmed(&mut self, id: &str) {
        if let Some(record) = self.transactions.iter_mut().find(|t| t.id == id) {
            record.state = SyncState::Confirmed;
        }
    }

    fn persist_transactions(&self) -> Result<()> {
        db::write_transactions(&self.conn, &self.transactions)?;
        let pending: Vec<String> = self
            .transactions
            .iter()
            .filter(|t| t.state == SyncState::Pending)
            .map(|t| t.id.clone())
            .collect();
        db::write_pending_ids(&self.conn, &pending)
    }

    fn set_syncing(&mut self, syncing: bool) {
        if self.syncing != syncing {
            self.syncing = syncing;
            self.notify(StoreEvent::Syncing(syncing));
        }
    }

    fn notify(&self, event: StoreEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}

/// Single pass over the list: all-time balance plus income/expense restricted
/// to the reference month and year.
pub fn compute_totals(transactions: &[Transaction], reference: NaiveDate) -> Totals {
    let mut totals = Totals {
        balance: Decimal::ZERO,
        monthly_income: Decimal::ZERO,
        monthly_expenses: Decimal::ZERO,
    };
    for t in transactions {
        let in_month = t.date.month() == reference.month() && t.date.year() == reference.year();
        match t.kind {
            TransactionKind::Income => {
                totals.balance += t.amount;
                if in_month {
                    totals.monthly_income += t.amount;
                }
            }
            TransactionKind::Expense => {
                totals.balance -= t.amount;
                if in_month {
                    totals.monthly_expenses += t.amount;
                }
            }
        }
    }
    totals
}

// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

/// Local-only sync tag. Never serialized: the wire and the cache slot carry the
/// record itself, pending ids live in their own slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    Pending,
    #[default]
    Confirmed,
}

/// A single income/expense record. Immutable once created; the only lifecycle
/// transitions are whole-record deletion and the Pending -> Confirmed sync tag.
/// Wire format is the camelCase JSON the spreadsheet endpoint stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
    #[serde(skip)]
    pub state: SyncState,
}

/// Write-path input: everything but the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category_id: String,
    pub date: NaiveDate,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Shown for transactions whose category has been deleted out from under them.
pub const FALLBACK_CATEGORY_LABEL: &str = "Other";

pub const AVAILABLE_ICONS: [&str; 14] = [
    "utensils",
    "car",
    "home",
    "film",
    "wallet",
    "heart-pulse",
    "shopping-bag",
    "zap",
    "coffee",
    "dumbbell",
    "plane",
    "briefcase",
    "gift",
    "more-horizontal",
];

pub const AVAILABLE_COLORS: [&str; 10] = [
    "orange", "blue", "indigo", "purple", "red", "green", "gray", "pink", "yellow", "teal",
];

pub fn default_categories() -> Vec<Category> {
    [
        ("groceries", "Groceries", "utensils", "orange"),
        ("transport", "Transport", "car", "blue"),
        ("housing", "Housing", "home", "indigo"),
        ("entertainment", "Entertainment", "film", "purple"),
        ("health", "Health", "heart-pulse", "red"),
        ("income", "Income", "wallet", "green"),
        ("other", "Other", "more-horizontal", "gray"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// Derived view over the transaction list. Recomputed on every read, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
}

// Copyright (c) 2025 FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::Value;

use crate::errors::SyncError;
use crate::models::Transaction;
use crate::utils::http_client;

/// Seam between the store and the spreadsheet endpoint. Production uses
/// [`SheetEndpoint`]; tests substitute an in-memory fake.
pub trait CloudEndpoint {
    /// Full-snapshot read. There is no pagination or incremental sync.
    fn fetch_all(&self) -> Result<Vec<Transaction>, SyncError>;

    /// Single-record write. Success means the endpoint acknowledged the
    /// request, which is as much durability as the protocol offers.
    fn push(&self, transaction: &Transaction) -> Result<(), SyncError>;
}

/// HTTP client for a spreadsheet-backed web-app endpoint: GET returns the full
/// transaction array, POST appends one record.
pub struct SheetEndpoint {
    url: String,
    client: reqwest::blocking::Client,
}

impl SheetEndpoint {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: http_client()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CloudEndpoint for SheetEndpoint {
    fn fetch_all(&self) -> Result<Vec<Transaction>, SyncError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| SyncError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Http(status.as_u16()));
        }
        let value: Value = resp
            .json()
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;
        match value {
            Value::Array(_) => {
                let records: Vec<Transaction> = serde_json::from_value(value)
                    .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;
                tracing::debug!(records = records.len(), "fetched cloud snapshot");
                Ok(records)
            }
            other => Err(SyncError::MalformedResponse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn push(&self, transaction: &Transaction) -> Result<(), SyncError> {
        let resp = self
            .client
            .post(&self.url)
            .json(transaction)
            .send()
            .map_err(|e| SyncError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Http(status.as_u16()));
        }
        tracing::debug!(id = %transaction.id, "pushed record to cloud");
        Ok(())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

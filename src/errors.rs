// Copyright (c) FinTrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures on the cloud boundary. None of these are fatal: the store degrades
/// to local-only operation and surfaces a transient status message.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network unavailable: {0}")]
    Network(String),
    #[error("endpoint rejected the request with status {0}")]
    Http(u16),
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),
    #[error("no cloud endpoint configured")]
    NotConfigured,
}

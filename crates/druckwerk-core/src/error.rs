// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckwerk.
//
// Protocol-level failures (bad attributes, unknown operations, busy
// printers) are NOT errors — they become IPP status codes on the response.
// This enum covers collaborator and infrastructure failures only.

use thiserror::Error;

/// Top-level error type for all Druckwerk operations.
#[derive(Debug, Error)]
pub enum DruckwerkError {
    // -- IPP core --
    #[error("IPP request failed: {0}")]
    IppRequest(String),

    #[error("document transfer failed: {0}")]
    DocumentTransfer(String),

    #[error("unknown PWG media size name: {0}")]
    UnknownMedia(String),

    // -- Job management --
    #[error("job manager error: {0}")]
    JobManager(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckwerkError>;

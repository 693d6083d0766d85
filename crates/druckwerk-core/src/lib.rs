// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckwerk — shared domain types and error definitions.

pub mod error;
pub mod types;

pub use error::DruckwerkError;
pub use types::*;

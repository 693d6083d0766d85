// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckwerk IPP core — printer-scoped IPP operation processing.
//
// The core sits between the HTTP/IPP transport (which decodes the binary
// message into an attribute tree) and the job execution pipeline.  It
// dispatches printer operations, validates request attributes against the
// driver's capabilities, mutates printer state under a reader-writer lock,
// and projects the full `printer-*` attribute set into responses.
//
// Control flow per request:
//
//   dispatch → authorization → validation → mutation (write lock)
//            → projection (read lock) → response attribute tree

pub mod apply;
pub mod attr;
pub mod dispatch;
pub mod hooks;
pub mod printer;
pub mod project;
pub mod pwg;
pub mod validate;

pub use attr::{
    AttrGroup, GroupTag, IppAttribute, IppCollection, IppRequest, IppResponse, IppValue,
    Operation, StatusCode, ValueTag,
};
pub use dispatch::{dispatch, Client, CoreContext, DispatchOutcome};
pub use hooks::{Authorization, JobManager, PrinterManager, Resource, System};
pub use printer::{Contact, DriverData, Job, MediaCol, Printer};
pub use project::RequestedAttrs;

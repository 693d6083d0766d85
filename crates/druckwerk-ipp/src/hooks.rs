// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator interfaces.
//
// The IPP core does no I/O of its own: job execution, printer ownership,
// and system-wide policy live behind these traits.  Trait methods must not
// re-enter the calling printer's lock unless documented otherwise; the
// dispatcher is careful to drop guards before crossing these seams.

use std::sync::Arc;

use druckwerk_core::error::Result;

use crate::attr::{GroupTag, IppRequest, IppResponse};
use crate::dispatch::Client;
use crate::printer::{Job, Printer};
use crate::project::RequestedAttrs;

/// Outcome of the transport-level authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The request may proceed.
    Continue,
    /// Authorization failed; respond at the HTTP layer with this status.
    Http(u16),
}

/// A localized strings resource served by the system web layer.
#[derive(Debug, Clone)]
pub struct Resource {
    /// Language tag, e.g. "en" or "de-DE"; `None` for non-strings resources.
    pub language: Option<String>,
    /// Absolute URL path of the resource.
    pub path: String,
}

/// System-wide policy and shared resources.
///
/// The default methods describe a bare single-printer system with no TLS
/// restrictions, no auth service, and nothing localized — test doubles
/// override only what they exercise.
pub trait System: Send + Sync {
    /// `true` once shutdown has been requested; refuses new jobs.
    fn is_shutdown_pending(&self) -> bool {
        false
    }

    fn auth_service_configured(&self) -> bool {
        false
    }

    /// `true` when only "ipps" URIs are served.
    fn tls_only(&self) -> bool {
        false
    }

    /// `true` when TLS is disabled entirely (no "ipps" URIs).
    fn tls_disabled(&self) -> bool {
        false
    }

    /// Authorization decision for mutating operations.
    fn authorize(&self, _client: &Client) -> Authorization {
        Authorization::Continue
    }

    /// Adds the system firmware/version attributes to a response.
    fn export_versions(
        &self,
        _resp: &mut IppResponse,
        _group: GroupTag,
        _requested: Option<&RequestedAttrs>,
    ) {
    }

    /// Signals that printer configuration changed (save-state hook).
    fn config_changed(&self) {}

    /// Snapshot of the shared resource table.  Implementations guard the
    /// table with their own lock; the snapshot keeps the printer-lock /
    /// system-lock ordering trivial for callers.
    fn resources(&self) -> Vec<Resource> {
        Vec::new()
    }
}

/// The job execution pipeline, as visible from the core.
pub trait JobManager: Send + Sync {
    /// Creates a job and registers it with the printer's job indexes.
    /// Returns `None` when job creation is currently refused; the caller
    /// maps that to `server-error-busy`.
    fn create_job(
        &self,
        printer: &Arc<Printer>,
        username: &str,
        format: Option<&str>,
        name: &str,
        request: &IppRequest,
    ) -> Option<Arc<Job>>;

    /// Cancels one job (asynchronous; the job may finish first).
    fn cancel_job(&self, printer: &Arc<Printer>, job: &Arc<Job>);

    /// Cancels every non-terminal job on the printer.
    fn cancel_all_jobs(&self, printer: &Arc<Printer>);

    /// Streams the request document data into the job's spool.
    fn copy_document_data(&self, client: &mut Client, job: &Arc<Job>) -> Result<()>;
}

/// Printer ownership operations the handlers delegate to.  The default
/// methods apply the state transition directly; a real printer manager
/// overrides them to also nudge its scheduler.
pub trait PrinterManager: Send + Sync {
    fn pause(&self, printer: &Arc<Printer>) {
        printer.write().pause();
    }

    fn resume(&self, printer: &Arc<Printer>) {
        printer.write().resume();
    }
}

/// Installer-provided handler for operations outside the dispatch table.
/// Returns `true` if it accepted the request and populated the response.
pub type ExtensionHandler =
    dyn Fn(&Arc<Printer>, &IppRequest, &mut Client, &mut IppResponse) -> bool + Send + Sync;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation dispatch.
//
// Routes one decoded request to its handler.  Handlers are the only code
// that sets a response status; each sets exactly one before returning.
// Authorization failures short-circuit to an HTTP status without an IPP
// body.  Unknown operations are offered to the installer's extension
// handler before being refused.

use std::io::{self, Read};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use druckwerk_core::types::{IdentifyActions, JobState};

use crate::apply;
use crate::attr::{GroupTag, IppAttribute, IppRequest, IppResponse, Operation, StatusCode};
use crate::hooks::{Authorization, ExtensionHandler, JobManager, PrinterManager, System};
use crate::printer::{unix_now, Job, Printer};
use crate::project::{self, ProjectCtx, RequestedAttrs};
use crate::validate::valid_job_attributes;

/// The per-connection client envelope handed over by the transport:
/// authentication result, peer/host facts, and the not-yet-consumed
/// document byte stream for Print-Job.
pub struct Client {
    /// Authenticated user, empty when the connection is anonymous.
    pub username: String,
    /// Host name the client addressed, used to assemble response URIs.
    pub host: String,
    pub port: u16,
    /// Whether this connection arrived over TLS.
    pub tls: bool,
    document: Option<Box<dyn Read + Send>>,
}

impl Client {
    pub fn new(username: &str, host: &str, port: u16, tls: bool) -> Self {
        Self {
            username: username.to_string(),
            host: host.to_string(),
            port,
            tls,
            document: None,
        }
    }

    /// Attaches the request body stream (document data).
    pub fn with_document(mut self, reader: Box<dyn Read + Send>) -> Self {
        self.document = Some(reader);
        self
    }

    pub fn has_document_data(&self) -> bool {
        self.document.is_some()
    }

    /// Hands the document stream to the caller (the job manager).
    pub fn take_document(&mut self) -> Option<Box<dyn Read + Send>> {
        self.document.take()
    }

    /// Drains and discards pending document data so the connection can be
    /// reused after a rejected Print-Job.
    pub fn flush_document_data(&mut self) {
        if let Some(mut reader) = self.document.take() {
            let _ = io::copy(&mut reader, &mut io::sink());
        }
    }
}

/// Collaborators a dispatch runs against.
pub struct CoreContext<'a> {
    pub system: &'a dyn System,
    pub jobs: &'a dyn JobManager,
    pub printers: &'a dyn PrinterManager,
    /// Handler for operations outside the dispatch table.
    pub extension: Option<&'a ExtensionHandler>,
}

/// Result of dispatching one request.
pub enum DispatchOutcome {
    /// A populated IPP response to encode and send.
    Ipp(IppResponse),
    /// Authorization failed; answer at the HTTP layer with this status.
    Http(u16),
}

/// Routes a printer-scoped request to its operation handler.
pub fn dispatch(
    printer: &Arc<Printer>,
    request: &mut IppRequest,
    client: &mut Client,
    ctx: &CoreContext<'_>,
) -> DispatchOutcome {
    let mut resp = IppResponse::new(request.request_id);
    let operation = request.operation();

    debug!(
        printer = printer.id(),
        operation = operation.map(Operation::name).unwrap_or("unknown"),
        code = %format!("0x{:04X}", request.operation_code),
        request_id = request.request_id,
        "dispatching IPP request"
    );

    let auth_failure = match operation {
        Some(Operation::PrintJob) => ipp_print_job(printer, request, client, ctx, &mut resp),
        Some(Operation::ValidateJob) => ipp_validate_job(printer, request, ctx, &mut resp),
        Some(Operation::CreateJob) => ipp_create_job(printer, request, client, ctx, &mut resp),
        Some(Operation::CancelCurrentJob) => ipp_cancel_current_job(printer, ctx, &mut resp),
        Some(Operation::CancelJobs) | Some(Operation::CancelMyJobs) => {
            ipp_cancel_jobs(printer, client, ctx, &mut resp)
        }
        Some(Operation::GetJobs) => ipp_get_jobs(printer, request, client, ctx, &mut resp),
        Some(Operation::GetPrinterAttributes) => {
            ipp_get_printer_attributes(printer, request, client, ctx, &mut resp)
        }
        Some(Operation::SetPrinterAttributes) => {
            ipp_set_printer_attributes(printer, request, client, ctx, &mut resp)
        }
        Some(Operation::IdentifyPrinter) => ipp_identify_printer(printer, request, &mut resp),
        Some(Operation::PausePrinter) => ipp_pause_printer(printer, client, ctx, &mut resp),
        Some(Operation::ResumePrinter) => ipp_resume_printer(printer, client, ctx, &mut resp),
        Some(Operation::CreatePrinter) | None => {
            ipp_unknown_operation(printer, request, client, ctx, &mut resp)
        }
    };

    if let Some(status) = auth_failure {
        return DispatchOutcome::Http(status);
    }

    debug_assert!(resp.status_set(), "handler returned without a status");
    DispatchOutcome::Ipp(resp)
}

fn project_ctx<'a>(
    client: &'a Client,
    request: &'a IppRequest,
    system: &dyn System,
) -> ProjectCtx<'a> {
    ProjectCtx {
        host: &client.host,
        port: client.port,
        language: &request.natural_language,
        tls_only: system.tls_only(),
        tls_disabled: system.tls_disabled(),
        auth_configured: system.auth_service_configured(),
    }
}

/// Shared job creation for Print-Job and Create-Job.
fn create_job(
    printer: &Arc<Printer>,
    request: &IppRequest,
    client: &Client,
    ctx: &CoreContext<'_>,
) -> Option<Arc<Job>> {
    let username = if !client.username.is_empty() {
        client.username.as_str()
    } else {
        request.string("requesting-user-name").unwrap_or("guest")
    };

    let name = request.string("job-name").unwrap_or("Untitled");
    let format = request.string("document-format");

    ctx.jobs.create_job(printer, username, format, name, request)
}

// ---------------------------------------------------------------------------
// Operation handlers
// ---------------------------------------------------------------------------

/// Print-Job: validate, create a job, and stream the document into it.
fn ipp_print_job(
    printer: &Arc<Printer>,
    request: &mut IppRequest,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if !client.has_document_data() {
        resp.respond(StatusCode::ClientErrorBadRequest, "No file in request.".to_string());
        return None;
    }

    if !valid_job_attributes(resp, printer, ctx.system, request) {
        client.flush_document_data();
        return None;
    }

    let Some(job) = create_job(printer, request, client, ctx) else {
        resp.respond(StatusCode::ServerErrorBusy, "Currently printing another job.".to_string());
        return None;
    };

    match ctx.jobs.copy_document_data(client, &job) {
        Ok(()) => {
            info!(printer = printer.id(), job = job.id(), "Print-Job accepted");
            resp.respond(StatusCode::SuccessfulOk, None);
            let requested = RequestedAttrs::of([
                "job-id",
                "job-state",
                "job-state-message",
                "job-state-reasons",
                "job-uri",
            ]);
            let pctx = project_ctx(client, request, ctx.system);
            let shared = printer.read();
            project::copy_job_attributes(resp, &pctx, &shared, &job, Some(&requested));
        }
        Err(e) => {
            error!(printer = printer.id(), job = job.id(), error = %e, "document transfer failed");
            resp.respond(
                StatusCode::ServerErrorInternal,
                format!("Unable to accept document data: {e}."),
            );
        }
    }

    None
}

/// Validate-Job: run the template checks and report the outcome.
fn ipp_validate_job(
    printer: &Arc<Printer>,
    request: &mut IppRequest,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if valid_job_attributes(resp, printer, ctx.system, request) {
        resp.respond(StatusCode::SuccessfulOk, None);
    }
    None
}

/// Create-Job: like Print-Job but the document arrives later.
fn ipp_create_job(
    printer: &Arc<Printer>,
    request: &mut IppRequest,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if client.has_document_data() {
        client.flush_document_data();
        resp.respond(
            StatusCode::ClientErrorBadRequest,
            "Unexpected document data following request.".to_string(),
        );
        return None;
    }

    if !valid_job_attributes(resp, printer, ctx.system, request) {
        return None;
    }

    let Some(job) = create_job(printer, request, client, ctx) else {
        resp.respond(StatusCode::ServerErrorBusy, "Currently printing another job.".to_string());
        return None;
    };

    info!(printer = printer.id(), job = job.id(), "Create-Job accepted");
    resp.respond(StatusCode::SuccessfulOk, None);

    let requested = RequestedAttrs::of([
        "job-id",
        "job-state",
        "job-state-message",
        "job-state-reasons",
        "job-uri",
    ]);
    let pctx = project_ctx(client, request, ctx.system);
    let shared = printer.read();
    project::copy_job_attributes(resp, &pctx, &shared, &job, Some(&requested));

    None
}

/// Cancel-Current-Job: cancel whatever is printing right now.
fn ipp_cancel_current_job(
    printer: &Arc<Printer>,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    let job = printer.read().processing_job.clone();

    let Some(job) = job else {
        resp.respond(StatusCode::ClientErrorNotFound, "No currently printing job.".to_string());
        return None;
    };

    match job.state() {
        JobState::Canceled => resp.respond(
            StatusCode::ClientErrorNotPossible,
            format!("Job #{} is already canceled - can't cancel.", job.id()),
        ),
        JobState::Aborted => resp.respond(
            StatusCode::ClientErrorNotPossible,
            format!("Job #{} is already aborted - can't cancel.", job.id()),
        ),
        JobState::Completed => resp.respond(
            StatusCode::ClientErrorNotPossible,
            format!("Job #{} is already completed - can't cancel.", job.id()),
        ),
        _ => {
            ctx.jobs.cancel_job(printer, &job);
            resp.respond(StatusCode::SuccessfulOk, None);
        }
    }

    None
}

/// Cancel-Jobs / Cancel-My-Jobs: authorized bulk cancel.
fn ipp_cancel_jobs(
    printer: &Arc<Printer>,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if let Authorization::Http(status) = ctx.system.authorize(client) {
        return Some(status);
    }

    ctx.jobs.cancel_all_jobs(printer);
    resp.respond(StatusCode::SuccessfulOk, None);
    None
}

/// Get-Jobs: list one job index, filtered by state and owner.
fn ipp_get_jobs(
    printer: &Arc<Printer>,
    request: &IppRequest,
    client: &Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    /// Which index to walk and how to compare each job's state.
    enum Selection {
        /// Active index, keep states up to and including Stopped.
        NotCompleted,
        /// Completed index, keep states from Canceled up.
        Completed,
        /// All jobs.
        All,
    }

    let which_jobs = request.string("which-jobs");
    let selection = match which_jobs {
        None | Some("not-completed") => Selection::NotCompleted,
        Some("completed") => Selection::Completed,
        Some("all") => Selection::All,
        Some(other) => {
            warn!(printer = printer.id(), which_jobs = other, "unsupported \"which-jobs\" value");
            resp.respond(
                StatusCode::ClientErrorAttributesOrValues,
                format!("The \"which-jobs\" value '{other}' is not supported."),
            );
            resp.add(GroupTag::Unsupported, IppAttribute::keyword("which-jobs", other));
            return None;
        }
    };

    let limit = request.integer("limit").unwrap_or(0);

    let mut username: Option<&str> = None;
    if request.boolean("my-jobs") == Some(true) {
        match request.string("requesting-user-name") {
            Some(name) => username = Some(name),
            None => {
                resp.respond(
                    StatusCode::ClientErrorBadRequest,
                    "Need \"requesting-user-name\" with \"my-jobs\".".to_string(),
                );
                return None;
            }
        }
    }

    let requested = RequestedAttrs::from_request(request);
    resp.respond(StatusCode::SuccessfulOk, None);

    let pctx = project_ctx(client, request, ctx.system);
    let shared = printer.read();

    let list = match selection {
        Selection::NotCompleted => &shared.active_jobs,
        Selection::Completed => &shared.completed_jobs,
        Selection::All => &shared.all_jobs,
    };

    // "limit" bounds the entries scanned, not the matches reported.
    let scan = if limit <= 0 || limit as usize > list.len() {
        list.len()
    } else {
        limit as usize
    };

    let mut emitted = 0;
    for job in list.iter().take(scan) {
        let state = job.state();
        let state_matches = match selection {
            Selection::NotCompleted => state <= JobState::Stopped,
            Selection::Completed => state >= JobState::Canceled,
            Selection::All => true,
        };
        if !state_matches {
            continue;
        }
        if username.is_some_and(|name| !name.eq_ignore_ascii_case(job.username())) {
            continue;
        }

        if emitted > 0 {
            resp.add_separator();
        }
        emitted += 1;
        project::copy_job_attributes(resp, &pctx, &shared, job, requested.as_ref());
    }

    debug!(printer = printer.id(), count = emitted, "Get-Jobs listed");
    None
}

/// Get-Printer-Attributes: refresh driver status while idle, then project.
fn ipp_get_printer_attributes(
    printer: &Arc<Printer>,
    request: &IppRequest,
    client: &Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    // Poll the driver at most once per second, only while nothing is
    // printing, and always before taking the reader lock: the callback may
    // take the writer lock itself.
    if let Some(hook) = &printer.status_hook {
        let refresh = {
            let shared = printer.read();
            !shared.device_in_use
                && shared.processing_job.is_none()
                && (unix_now() - shared.status_time) > 1
        };
        if refresh {
            hook(printer);
            printer.write().status_time = unix_now();
        }
    }

    let requested = RequestedAttrs::from_request(request);
    let format = request.string("document-format");

    resp.respond(StatusCode::SuccessfulOk, None);

    let pctx = project_ctx(client, request, ctx.system);
    let shared = printer.read();
    project::copy_printer_attributes(resp, &pctx, &shared, ctx.system, requested.as_ref(), format);

    None
}

/// Set-Printer-Attributes: authorized validate-and-apply.
fn ipp_set_printer_attributes(
    printer: &Arc<Printer>,
    request: &IppRequest,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if let Authorization::Http(status) = ctx.system.authorize(client) {
        return Some(status);
    }

    if apply::set_printer_attributes(resp, printer, ctx.system, request, false) {
        resp.respond(StatusCode::SuccessfulOk, "Printer attributes set.".to_string());
    }
    None
}

/// Identify-Printer: flash/beep/display via the driver callback.
fn ipp_identify_printer(
    printer: &Arc<Printer>,
    request: &IppRequest,
    resp: &mut IppResponse,
) -> Option<u16> {
    if let Some(hook) = &printer.identify_hook {
        let actions = match request.attr("identify-actions") {
            Some(attr) => attr
                .strings()
                .filter_map(IdentifyActions::from_keyword)
                .fold(IdentifyActions::NONE, |acc, action| acc | action),
            None => printer.read().driver.identify_default,
        };
        let message = request.string("message").map(str::to_string);

        // No lock is held across the callback.
        hook(printer, actions, message.as_deref());
    }

    resp.respond(StatusCode::SuccessfulOk, None);
    None
}

/// Pause-Printer: authorized transition towards Stopped.
fn ipp_pause_printer(
    printer: &Arc<Printer>,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if let Authorization::Http(status) = ctx.system.authorize(client) {
        return Some(status);
    }

    ctx.printers.pause(printer);
    resp.respond(StatusCode::SuccessfulOk, "Printer paused.".to_string());
    None
}

/// Resume-Printer: authorized transition back to Idle.
fn ipp_resume_printer(
    printer: &Arc<Printer>,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if let Authorization::Http(status) = ctx.system.authorize(client) {
        return Some(status);
    }

    ctx.printers.resume(printer);
    resp.respond(StatusCode::SuccessfulOk, "Printer resumed.".to_string());
    None
}

/// Unknown operation: offer it to the extension handler, else refuse.
fn ipp_unknown_operation(
    printer: &Arc<Printer>,
    request: &IppRequest,
    client: &mut Client,
    ctx: &CoreContext<'_>,
    resp: &mut IppResponse,
) -> Option<u16> {
    if let Some(extension) = ctx.extension {
        if extension(printer, request, client, resp) {
            return None;
        }
    }

    warn!(
        printer = printer.id(),
        code = %format!("0x{:04X}", request.operation_code),
        "operation not supported"
    );
    resp.respond(
        StatusCode::ServerErrorOperationNotSupported,
        "Operation not supported.".to_string(),
    );
    None
}

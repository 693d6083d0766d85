// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end operation tests: decoded requests in, response trees out,
// with in-memory collaborators standing in for the system and the job
// execution pipeline.

use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use druckwerk_core::error::Result;
use druckwerk_core::types::{ColorMode, JobState, PrinterState, Sides};

use druckwerk_ipp::attr::{GroupTag, IppAttribute, IppRequest, IppResponse, Operation, StatusCode};
use druckwerk_ipp::dispatch::{dispatch, Client, CoreContext, DispatchOutcome};
use druckwerk_ipp::hooks::{Authorization, JobManager, PrinterManager, System};
use druckwerk_ipp::printer::{DriverData, Job, Printer};
use druckwerk_ipp::pwg;

// ---------------------------------------------------------------------------
// Test collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestSystem {
    shutdown: AtomicBool,
    deny_mutations: AtomicBool,
}

impl System for TestSystem {
    fn is_shutdown_pending(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    fn authorize(&self, _client: &Client) -> Authorization {
        if self.deny_mutations.load(Ordering::Relaxed) {
            Authorization::Http(401)
        } else {
            Authorization::Continue
        }
    }
}

#[derive(Default)]
struct TestJobManager {
    next_id: AtomicU32,
    busy: AtomicBool,
}

impl JobManager for TestJobManager {
    fn create_job(
        &self,
        printer: &Arc<Printer>,
        username: &str,
        format: Option<&str>,
        name: &str,
        _request: &IppRequest,
    ) -> Option<Arc<Job>> {
        if self.busy.load(Ordering::Relaxed) {
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let job = Arc::new(Job::new(id, username, name, format));
        printer.write().add_job(Arc::clone(&job));
        Some(job)
    }

    fn cancel_job(&self, printer: &Arc<Printer>, job: &Arc<Job>) {
        if !job.state().is_terminal() {
            job.set_state(JobState::Canceled);
        }
        printer.write().retire_job(job);
    }

    fn cancel_all_jobs(&self, printer: &Arc<Printer>) {
        let active: Vec<_> = printer.read().active_jobs.clone();
        for job in &active {
            self.cancel_job(printer, job);
        }
    }

    fn copy_document_data(&self, client: &mut Client, _job: &Arc<Job>) -> Result<()> {
        if let Some(mut reader) = client.take_document() {
            io::copy(&mut reader, &mut io::sink())?;
        }
        Ok(())
    }
}

struct TestPrinterManager;
impl PrinterManager for TestPrinterManager {}

struct Harness {
    printer: Arc<Printer>,
    system: TestSystem,
    jobs: TestJobManager,
    printers: TestPrinterManager,
}

impl Harness {
    fn new() -> Self {
        let a4 = pwg::lookup("iso_a4_210x297mm").expect("a4");
        let driver = DriverData {
            make_and_model: "Druckwerk Laser 4".into(),
            formats: vec!["application/pdf".into(), "image/pwg-raster".into()],
            format_default: "application/pdf".into(),
            color_supported: ColorMode::AUTO | ColorMode::COLOR | ColorMode::MONOCHROME,
            sides_supported: Sides::ONE_SIDED | Sides::TWO_SIDED_LONG_EDGE,
            sources: vec!["tray-1".into()],
            resolutions: vec![(600, 600)],
            resolution_default: (600, 600),
            media: vec![a4, pwg::lookup("na_letter_8.5x11in").expect("letter")],
            ..DriverData::default()
        };

        Self {
            printer: Arc::new(Printer::new(1, "front-desk", "/ipp/print/front-desk", driver)),
            system: TestSystem::default(),
            jobs: TestJobManager::default(),
            printers: TestPrinterManager,
        }
    }

    fn client(&self) -> Client {
        Client::new("", "printer.local", 631, false)
    }

    fn dispatch_with(&self, mut request: IppRequest, mut client: Client) -> DispatchOutcome {
        let ctx = CoreContext {
            system: &self.system,
            jobs: &self.jobs,
            printers: &self.printers,
            extension: None,
        };
        dispatch(&self.printer, &mut request, &mut client, &ctx)
    }

    fn dispatch(&self, request: IppRequest) -> IppResponse {
        match self.dispatch_with(request, self.client()) {
            DispatchOutcome::Ipp(resp) => resp,
            DispatchOutcome::Http(status) => panic!("unexpected HTTP {status} outcome"),
        }
    }
}

fn pdf_document() -> Box<dyn Read + Send> {
    Box::new(Cursor::new(b"%PDF-1.7 test".to_vec()))
}

fn get_attrs_request(requested: &[&str]) -> IppRequest {
    IppRequest::new(Operation::GetPrinterAttributes, 1).with(
        GroupTag::Operation,
        IppAttribute::keywords("requested-attributes", requested.iter().copied()),
    )
}

// ---------------------------------------------------------------------------
// Get-Printer-Attributes
// ---------------------------------------------------------------------------

#[test]
fn copies_supported_is_single_for_streaming_raster() {
    let harness = Harness::new();

    let request = get_attrs_request(&["copies-supported"]).with(
        GroupTag::Operation,
        IppAttribute::mime_type("document-format", "image/pwg-raster"),
    );
    let resp = harness.dispatch(request);

    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    let attrs: Vec<_> = resp.attrs(GroupTag::Printer).collect();
    assert_eq!(attrs.len(), 1, "exactly one attribute expected");
    assert_eq!(attrs[0].name, "copies-supported");
    assert_eq!(attrs[0].range_value(), Some((1, 1)));
}

#[test]
fn copies_supported_is_full_range_otherwise() {
    let harness = Harness::new();

    let request = get_attrs_request(&["copies-supported"]).with(
        GroupTag::Operation,
        IppAttribute::mime_type("document-format", "application/pdf"),
    );
    let resp = harness.dispatch(request);
    assert_eq!(
        resp.get(GroupTag::Printer, "copies-supported")
            .and_then(IppAttribute::range_value),
        Some((1, 999))
    );

    let resp = harness.dispatch(get_attrs_request(&["copies-supported"]));
    assert_eq!(
        resp.get(GroupTag::Printer, "copies-supported")
            .and_then(IppAttribute::range_value),
        Some((1, 999))
    );
}

// ---------------------------------------------------------------------------
// Job submission
// ---------------------------------------------------------------------------

#[test]
fn print_job_with_bad_copies_reports_unsupported() {
    let harness = Harness::new();

    let request = IppRequest::new(Operation::PrintJob, 3)
        .with(GroupTag::Job, IppAttribute::integer("copies", 1000));
    let client = harness.client().with_document(pdf_document());

    let DispatchOutcome::Ipp(resp) = harness.dispatch_with(request, client) else {
        panic!("expected IPP outcome");
    };

    assert_eq!(resp.status(), StatusCode::ClientErrorAttributesOrValues);
    let bad = resp.get(GroupTag::Unsupported, "copies").expect("copies in unsupported group");
    assert_eq!(bad.integer_value(), Some(1000));

    // Nothing was enqueued.
    assert_eq!(harness.printer.read().all_jobs.len(), 0);
}

#[test]
fn print_job_without_document_is_bad_request() {
    let harness = Harness::new();

    let resp = harness.dispatch(IppRequest::new(Operation::PrintJob, 4));
    assert_eq!(resp.status(), StatusCode::ClientErrorBadRequest);
    assert_eq!(resp.message(), Some("No file in request."));
}

#[test]
fn print_job_accepts_and_reports_job_attributes() {
    let harness = Harness::new();

    let request = IppRequest::new(Operation::PrintJob, 5)
        .with(GroupTag::Operation, IppAttribute::name_value("requesting-user-name", "alice"))
        .with(GroupTag::Operation, IppAttribute::name_value("job-name", "quarterly"));
    let client = harness.client().with_document(pdf_document());

    let DispatchOutcome::Ipp(resp) = harness.dispatch_with(request, client) else {
        panic!("expected IPP outcome");
    };

    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(
        resp.get(GroupTag::Job, "job-id").and_then(IppAttribute::integer_value),
        Some(1)
    );
    assert_eq!(
        resp.get(GroupTag::Job, "job-state").and_then(IppAttribute::integer_value),
        Some(JobState::Pending.value())
    );
    let uri = resp.get(GroupTag::Job, "job-uri").and_then(IppAttribute::string).expect("job-uri");
    assert_eq!(uri, "ipp://printer.local:631/ipp/print/front-desk/1");

    let shared = harness.printer.read();
    assert_eq!(shared.all_jobs.len(), 1);
    assert_eq!(shared.all_jobs[0].username(), "alice");
    assert_eq!(shared.all_jobs[0].name(), "quarterly");
}

#[test]
fn create_job_rejects_trailing_document_data() {
    let harness = Harness::new();

    let request = IppRequest::new(Operation::CreateJob, 6);
    let client = harness.client().with_document(pdf_document());

    let DispatchOutcome::Ipp(resp) = harness.dispatch_with(request, client) else {
        panic!("expected IPP outcome");
    };
    assert_eq!(resp.status(), StatusCode::ClientErrorBadRequest);
}

#[test]
fn busy_manager_maps_to_server_busy() {
    let harness = Harness::new();
    harness.jobs.busy.store(true, Ordering::Relaxed);

    let resp = harness.dispatch(IppRequest::new(Operation::CreateJob, 7));
    assert_eq!(resp.status(), StatusCode::ServerErrorBusy);
    assert_eq!(resp.message(), Some("Currently printing another job."));
}

#[test]
fn shutdown_pending_refuses_jobs() {
    let harness = Harness::new();
    harness.system.shutdown.store(true, Ordering::Relaxed);

    let resp = harness.dispatch(IppRequest::new(Operation::ValidateJob, 8));
    assert_eq!(resp.status(), StatusCode::ServerErrorNotAcceptingJobs);
}

#[test]
fn validate_job_reports_ok_without_creating() {
    let harness = Harness::new();

    let request = IppRequest::new(Operation::ValidateJob, 9)
        .with(GroupTag::Job, IppAttribute::integer("copies", 3));
    let resp = harness.dispatch(request);

    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(harness.printer.read().all_jobs.len(), 0);
}

// ---------------------------------------------------------------------------
// Set-then-Get round trips
// ---------------------------------------------------------------------------

#[test]
fn printer_location_round_trips_through_set_and_get() {
    let harness = Harness::new();

    let request = IppRequest::new(Operation::SetPrinterAttributes, 10)
        .with(GroupTag::Printer, IppAttribute::text("printer-location", "Lab A"));
    let resp = harness.dispatch(request);
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(resp.message(), Some("Printer attributes set."));

    let resp = harness.dispatch(get_attrs_request(&["printer-location"]));
    assert_eq!(
        resp.get(GroupTag::Printer, "printer-location").and_then(IppAttribute::string),
        Some("Lab A")
    );

    // Clearing the value yields an empty string, not an absent attribute.
    let request = IppRequest::new(Operation::SetPrinterAttributes, 11)
        .with(GroupTag::Printer, IppAttribute::text("printer-location", ""));
    harness.dispatch(request);

    let resp = harness.dispatch(get_attrs_request(&["printer-location"]));
    assert_eq!(
        resp.get(GroupTag::Printer, "printer-location").and_then(IppAttribute::string),
        Some("")
    );
}

#[test]
fn set_printer_attributes_requires_authorization() {
    let harness = Harness::new();
    harness.system.deny_mutations.store(true, Ordering::Relaxed);

    let request = IppRequest::new(Operation::SetPrinterAttributes, 12)
        .with(GroupTag::Printer, IppAttribute::text("printer-location", "Lab A"));

    match harness.dispatch_with(request, harness.client()) {
        DispatchOutcome::Http(status) => assert_eq!(status, 401),
        DispatchOutcome::Ipp(_) => panic!("expected HTTP authorization failure"),
    }
    assert_eq!(harness.printer.read().location, "");
}

// ---------------------------------------------------------------------------
// Pause / Resume
// ---------------------------------------------------------------------------

#[test]
fn pause_and_resume_cycle_state_and_reasons() {
    let harness = Harness::new();

    let resp = harness.dispatch(IppRequest::new(Operation::PausePrinter, 13));
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(resp.message(), Some("Printer paused."));
    assert_eq!(harness.printer.read().state, PrinterState::Stopped);

    let resp = harness.dispatch(get_attrs_request(&["printer-state-reasons"]));
    let reasons = resp.get(GroupTag::Printer, "printer-state-reasons").expect("reasons");
    assert!(reasons.contains_string("paused"));

    let resp = harness.dispatch(IppRequest::new(Operation::ResumePrinter, 14));
    assert_eq!(resp.message(), Some("Printer resumed."));
    assert_eq!(harness.printer.read().state, PrinterState::Idle);

    let resp = harness.dispatch(get_attrs_request(&["printer-state-reasons"]));
    let reasons = resp.get(GroupTag::Printer, "printer-state-reasons").expect("reasons");
    assert!(reasons.contains_string("none"));
}

// ---------------------------------------------------------------------------
// Cancel operations
// ---------------------------------------------------------------------------

#[test]
fn cancel_current_job_without_processing_job_is_not_found() {
    let harness = Harness::new();

    let resp = harness.dispatch(IppRequest::new(Operation::CancelCurrentJob, 15));
    assert_eq!(resp.status(), StatusCode::ClientErrorNotFound);
    assert_eq!(resp.message(), Some("No currently printing job."));
}

#[test]
fn cancel_current_job_on_terminal_job_is_not_possible() {
    let harness = Harness::new();

    let resp = harness.dispatch(IppRequest::new(Operation::CreateJob, 16));
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);

    let job = harness.printer.read().all_jobs[0].clone();
    harness.printer.write().start_job(Arc::clone(&job));
    job.set_state(JobState::Completed);

    let resp = harness.dispatch(IppRequest::new(Operation::CancelCurrentJob, 17));
    assert_eq!(resp.status(), StatusCode::ClientErrorNotPossible);
    assert_eq!(resp.message(), Some("Job #1 is already completed - can't cancel."));
}

#[test]
fn cancel_current_job_cancels_the_processing_job() {
    let harness = Harness::new();

    harness.dispatch(IppRequest::new(Operation::CreateJob, 18));
    let job = harness.printer.read().all_jobs[0].clone();
    harness.printer.write().start_job(Arc::clone(&job));

    let resp = harness.dispatch(IppRequest::new(Operation::CancelCurrentJob, 19));
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(job.state(), JobState::Canceled);
}

#[test]
fn cancel_jobs_empties_the_active_index() {
    let harness = Harness::new();

    for i in 0..3 {
        harness.dispatch(IppRequest::new(Operation::CreateJob, 20 + i));
    }
    assert_eq!(harness.printer.read().active_jobs.len(), 3);

    let resp = harness.dispatch(IppRequest::new(Operation::CancelJobs, 23));
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);

    let shared = harness.printer.read();
    assert!(shared.active_jobs.is_empty());
    assert_eq!(shared.completed_jobs.len(), 3);
    assert_eq!(shared.all_jobs.len(), 3);
    assert!(shared.completed_jobs.iter().all(|j| j.state() == JobState::Canceled));
}

// ---------------------------------------------------------------------------
// Get-Jobs
// ---------------------------------------------------------------------------

fn job_ids(resp: &IppResponse) -> Vec<i32> {
    resp.attrs(GroupTag::Job)
        .filter(|a| a.name == "job-id")
        .filter_map(IppAttribute::integer_value)
        .collect()
}

fn get_jobs_request(request_id: u32, which: Option<&str>) -> IppRequest {
    let mut request = IppRequest::new(Operation::GetJobs, request_id);
    if let Some(which) = which {
        request.add(GroupTag::Operation, IppAttribute::keyword("which-jobs", which));
    }
    request
}

#[test]
fn created_job_appears_in_not_completed_listing() {
    let harness = Harness::new();

    let resp = harness.dispatch(IppRequest::new(Operation::CreateJob, 30));
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);

    let resp = harness.dispatch(get_jobs_request(31, Some("not-completed")));
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(job_ids(&resp), vec![1]);
    assert_eq!(
        resp.get(GroupTag::Job, "job-state").and_then(IppAttribute::integer_value),
        Some(JobState::Pending.value())
    );
}

#[test]
fn which_jobs_all_is_union_of_both_listings() {
    let harness = Harness::new();

    for i in 0..4 {
        harness.dispatch(IppRequest::new(Operation::CreateJob, 40 + i));
    }

    // Retire two of the four.
    let (first, second) = {
        let shared = harness.printer.read();
        (shared.all_jobs[0].clone(), shared.all_jobs[2].clone())
    };
    for job in [&first, &second] {
        job.set_state(JobState::Completed);
        harness.printer.write().retire_job(job);
    }

    let all = job_ids(&harness.dispatch(get_jobs_request(44, Some("all"))));
    let mut not_completed = job_ids(&harness.dispatch(get_jobs_request(45, None)));
    let completed = job_ids(&harness.dispatch(get_jobs_request(46, Some("completed"))));

    assert_eq!(not_completed, vec![2, 4]);
    assert_eq!(completed, vec![1, 3]);

    not_completed.extend(&completed);
    not_completed.sort_unstable();
    let mut all_sorted = all;
    all_sorted.sort_unstable();
    assert_eq!(all_sorted, not_completed);
}

#[test]
fn unknown_which_jobs_value_is_unsupported() {
    let harness = Harness::new();

    let resp = harness.dispatch(get_jobs_request(50, Some("strange")));
    assert_eq!(resp.status(), StatusCode::ClientErrorAttributesOrValues);
    assert_eq!(
        resp.get(GroupTag::Unsupported, "which-jobs").and_then(IppAttribute::string),
        Some("strange")
    );
}

#[test]
fn my_jobs_requires_requesting_user_name() {
    let harness = Harness::new();

    let request = get_jobs_request(51, None)
        .with(GroupTag::Operation, IppAttribute::boolean("my-jobs", true));
    let resp = harness.dispatch(request);
    assert_eq!(resp.status(), StatusCode::ClientErrorBadRequest);
    assert_eq!(resp.message(), Some("Need \"requesting-user-name\" with \"my-jobs\"."));
}

#[test]
fn my_jobs_filters_by_owner() {
    let harness = Harness::new();

    for (i, user) in ["alice", "bob", "alice"].iter().enumerate() {
        let request = IppRequest::new(Operation::CreateJob, 60 + i as u32).with(
            GroupTag::Operation,
            IppAttribute::name_value("requesting-user-name", *user),
        );
        harness.dispatch(request);
    }

    let request = get_jobs_request(63, None)
        .with(GroupTag::Operation, IppAttribute::boolean("my-jobs", true))
        .with(GroupTag::Operation, IppAttribute::name_value("requesting-user-name", "Alice"));
    let resp = harness.dispatch(request);

    // Owner matching is case-insensitive.
    assert_eq!(job_ids(&resp), vec![1, 3]);
}

#[test]
fn limit_bounds_the_listing() {
    let harness = Harness::new();

    for i in 0..5 {
        harness.dispatch(IppRequest::new(Operation::CreateJob, 70 + i));
    }

    let request = get_jobs_request(75, None)
        .with(GroupTag::Operation, IppAttribute::integer("limit", 2));
    let resp = harness.dispatch(request);
    assert_eq!(job_ids(&resp), vec![1, 2]);
}

// ---------------------------------------------------------------------------
// Identify and unknown operations
// ---------------------------------------------------------------------------

#[test]
fn unknown_operation_is_refused() {
    let harness = Harness::new();

    let mut request = IppRequest::new(Operation::GetJobs, 80);
    request.operation_code = 0x0009; // Get-Job-Attributes, not in the table
    let resp = match harness.dispatch_with(request, harness.client()) {
        DispatchOutcome::Ipp(resp) => resp,
        DispatchOutcome::Http(_) => panic!("expected IPP outcome"),
    };
    assert_eq!(resp.status(), StatusCode::ServerErrorOperationNotSupported);
    assert_eq!(resp.message(), Some("Operation not supported."));
}

#[test]
fn extension_handler_wins_for_unknown_operations() {
    let harness = Harness::new();

    let extension = |_printer: &Arc<Printer>,
                     _request: &IppRequest,
                     _client: &mut Client,
                     resp: &mut IppResponse|
     -> bool {
        resp.respond(StatusCode::SuccessfulOk, "Handled by extension.".to_string());
        true
    };

    let mut request = IppRequest::new(Operation::GetJobs, 81);
    request.operation_code = 0x4001;
    let mut client = harness.client();
    let ctx = CoreContext {
        system: &harness.system,
        jobs: &harness.jobs,
        printers: &harness.printers,
        extension: Some(&extension),
    };

    let DispatchOutcome::Ipp(resp) = dispatch(&harness.printer, &mut request, &mut client, &ctx)
    else {
        panic!("expected IPP outcome");
    };
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);
    assert_eq!(resp.message(), Some("Handled by extension."));
}

#[test]
fn identify_printer_invokes_driver_hook() {
    use std::sync::Mutex;

    let harness = Harness::new();
    let calls: Arc<Mutex<Vec<(u32, Option<String>)>>> = Arc::new(Mutex::new(Vec::new()));

    let mut printer = Printer::new(
        2,
        "beeper",
        "/ipp/print/beeper",
        DriverData::default(),
    );
    let seen = Arc::clone(&calls);
    printer.identify_hook = Some(Arc::new(
        move |_printer: &Printer,
              actions: druckwerk_core::types::IdentifyActions,
              message: Option<&str>| {
            seen.lock().unwrap().push((actions.bits(), message.map(str::to_string)));
        },
    ));
    let printer = Arc::new(printer);

    let mut request = IppRequest::new(Operation::IdentifyPrinter, 90)
        .with(GroupTag::Operation, IppAttribute::keywords("identify-actions", ["sound", "display"]))
        .with(GroupTag::Operation, IppAttribute::text("message", "Hello"));
    let mut client = harness.client();
    let ctx = CoreContext {
        system: &harness.system,
        jobs: &harness.jobs,
        printers: &harness.printers,
        extension: None,
    };

    let DispatchOutcome::Ipp(resp) = dispatch(&printer, &mut request, &mut client, &ctx) else {
        panic!("expected IPP outcome");
    };
    assert_eq!(resp.status(), StatusCode::SuccessfulOk);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (bits, message) = &calls[0];
    assert_eq!(
        *bits,
        (druckwerk_core::types::IdentifyActions::DISPLAY
            | druckwerk_core::types::IdentifyActions::SOUND)
            .bits()
    );
    assert_eq!(message.as_deref(), Some("Hello"));
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn job_indexes_partition_under_mixed_operations() {
    let harness = Harness::new();

    for i in 0..6 {
        harness.dispatch(IppRequest::new(Operation::CreateJob, 100 + i));
    }

    // Finish two, cancel one through the dispatcher.
    let (done_a, done_b, processing) = {
        let shared = harness.printer.read();
        (
            shared.all_jobs[0].clone(),
            shared.all_jobs[1].clone(),
            shared.all_jobs[2].clone(),
        )
    };
    for job in [&done_a, &done_b] {
        job.set_state(JobState::Completed);
        harness.printer.write().retire_job(job);
    }
    harness.printer.write().start_job(Arc::clone(&processing));
    harness.dispatch(IppRequest::new(Operation::CancelCurrentJob, 106));

    let shared = harness.printer.read();
    let active: Vec<u32> = shared.active_jobs.iter().map(|j| j.id()).collect();
    let completed: Vec<u32> = shared.completed_jobs.iter().map(|j| j.id()).collect();
    let all: Vec<u32> = shared.all_jobs.iter().map(|j| j.id()).collect();

    // Disjoint, and their union is the full set.
    assert!(active.iter().all(|id| !completed.contains(id)));
    let mut union: Vec<u32> = active.iter().chain(&completed).copied().collect();
    union.sort_unstable();
    let mut all_sorted = all;
    all_sorted.sort_unstable();
    assert_eq!(union, all_sorted);

    assert!(shared.active_jobs.iter().all(|j| !j.state().is_terminal()));
    assert!(shared.completed_jobs.iter().all(|j| j.state().is_terminal()));
}

#[test]
fn config_time_strictly_increases_per_set() {
    let harness = Harness::new();

    let t0 = harness.printer.read().config_time;
    for i in 0..3 {
        let request = IppRequest::new(Operation::SetPrinterAttributes, 110 + i).with(
            GroupTag::Printer,
            IppAttribute::text("printer-location", format!("Lab {i}")),
        );
        harness.dispatch(request);
    }
    let t1 = harness.printer.read().config_time;
    assert!(t1 >= t0 + 3, "each apply must bump config_time");
}

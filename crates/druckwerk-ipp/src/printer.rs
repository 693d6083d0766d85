// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer state store.
//
// One `Printer` aggregates everything the IPP core may read or mutate for a
// single print service: identity and contact fields, the driver's
// capability/default data, ready media, supplies, the state machine, and
// the job indexes.  All of it lives behind one reader-writer lock; the
// `read()`/`write()` guards are the only access path.  Driver callbacks are
// stored outside the lock and must never be invoked while a guard is held.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use druckwerk_core::types::{
    ColorMode, ContentOptimize, IdentifyActions, JobState, LabelMode, Orientation, PrinterReason,
    PrinterState, PrintQuality, Scaling, Sides, Supply,
};

use crate::attr::{IppAttribute, IppCollection};
use crate::pwg::MediaSize;

/// Wall-clock seconds, the resolution all printer timestamps use.
pub(crate) fn unix_now() -> i64 {
    Utc::now().timestamp()
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// A "media-col" value: one sheet description.  An empty `size_name` marks
/// an unpopulated ready-media slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaCol {
    pub size_name: String,
    /// Hundredths of millimetres.
    pub size_width: i32,
    pub size_length: i32,
    pub bottom_margin: i32,
    pub left_margin: i32,
    pub right_margin: i32,
    pub top_margin: i32,
    pub source: String,
    pub type_: String,
}

impl MediaCol {
    pub fn is_empty(&self) -> bool {
        self.size_name.is_empty()
    }

    /// Resets the slot to unpopulated.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replaces the size fields from a resolved PWG size, keeping margins,
    /// source, and type.
    pub fn set_size(&mut self, size: &MediaSize) {
        self.size_name = size.name.clone();
        self.size_width = size.width;
        self.size_length = size.length;
    }

    /// Exports as an IPP collection, members in alphabetical order.
    pub fn to_collection(&self) -> IppCollection {
        let size = IppCollection::new()
            .with(IppAttribute::integer("x-dimension", self.size_width))
            .with(IppAttribute::integer("y-dimension", self.size_length));

        let mut col = IppCollection::new()
            .with(IppAttribute::integer("media-bottom-margin", self.bottom_margin))
            .with(IppAttribute::integer("media-left-margin", self.left_margin))
            .with(IppAttribute::integer("media-right-margin", self.right_margin))
            .with(IppAttribute::collection("media-size", size))
            .with(IppAttribute::keyword("media-size-name", self.size_name.clone()));

        if !self.source.is_empty() {
            col = col.with(IppAttribute::keyword("media-source", self.source.clone()));
        }

        col = col.with(IppAttribute::integer("media-top-margin", self.top_margin));

        if !self.type_.is_empty() {
            col = col.with(IppAttribute::keyword("media-type", self.type_.clone()));
        }

        col
    }

    /// Imports member attributes from a request collection, updating only
    /// the members that are present.
    pub fn import(&mut self, col: &IppCollection) {
        if let Some(name) = col.member("media-size-name").and_then(IppAttribute::string) {
            self.size_name = name.to_string();
        }
        if let Some(size) = col.member("media-size").and_then(IppAttribute::collection_value) {
            if let Some(x) = size.member("x-dimension").and_then(IppAttribute::integer_value) {
                self.size_width = x;
            }
            if let Some(y) = size.member("y-dimension").and_then(IppAttribute::integer_value) {
                self.size_length = y;
            }
        }
        if let Some(v) = col.member("media-bottom-margin").and_then(IppAttribute::integer_value) {
            self.bottom_margin = v;
        }
        if let Some(v) = col.member("media-left-margin").and_then(IppAttribute::integer_value) {
            self.left_margin = v;
        }
        if let Some(v) = col.member("media-right-margin").and_then(IppAttribute::integer_value) {
            self.right_margin = v;
        }
        if let Some(v) = col.member("media-top-margin").and_then(IppAttribute::integer_value) {
            self.top_margin = v;
        }
        if let Some(v) = col.member("media-source").and_then(IppAttribute::string) {
            self.source = v.to_string();
        }
        if let Some(v) = col.member("media-type").and_then(IppAttribute::string) {
            self.type_ = v.to_string();
        }
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// The "printer-contact-col" record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub telephone: String,
}

impl Contact {
    pub fn to_collection(&self) -> IppCollection {
        let uri = if !self.email.is_empty() {
            format!("mailto:{}", self.email)
        } else {
            format!("tel:{}", self.telephone)
        };

        let vcard = format!(
            "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:{}\r\nTEL:{}\r\nEMAIL:{}\r\nEND:VCARD\r\n",
            self.name, self.telephone, self.email
        );

        IppCollection::new()
            .with(IppAttribute::name_value("contact-name", self.name.clone()))
            .with(IppAttribute::uri("contact-uri", uri))
            .with(IppAttribute::text("contact-vcard", vcard))
    }

    pub fn import(&mut self, col: &IppCollection) {
        if let Some(name) = col.member("contact-name").and_then(IppAttribute::string) {
            self.name = name.to_string();
        }
        if let Some(uri) = col.member("contact-uri").and_then(IppAttribute::string) {
            if let Some(email) = uri.strip_prefix("mailto:") {
                self.email = email.to_string();
            } else if let Some(tel) = uri.strip_prefix("tel:") {
                self.telephone = tel.to_string();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Driver data
// ---------------------------------------------------------------------------

/// Capability and default data supplied by the printer driver.  Mostly
/// read-only after printer creation; the `*_default`/`*_configured` fields
/// are settable through Set-Printer-Attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverData {
    pub make_and_model: String,
    /// IEEE 1284 device id.
    pub device_id: String,

    pub formats: Vec<String>,
    pub format_default: String,

    pub color_supported: ColorMode,
    /// Empty set = unset; "print-color-mode-default" is then omitted.
    pub color_default: ColorMode,

    pub content_default: Option<ContentOptimize>,
    pub orient_default: Orientation,
    pub quality_default: Option<PrintQuality>,
    pub scaling_default: Option<Scaling>,

    pub sides_supported: Sides,
    /// Empty set = unset; projected as "one-sided".
    pub sides_default: Sides,

    /// Input trays, in slot order.  `media_ready` is indexed by this.
    pub sources: Vec<String>,
    /// Output trays; empty for printers with a single fixed output.
    pub bins: Vec<String>,
    pub bin_default: usize,
    pub output_face_up: bool,

    /// (x, y) pairs in dots per inch.
    pub resolutions: Vec<(i32, i32)>,
    pub resolution_default: (i32, i32),

    pub media: Vec<MediaSize>,
    /// "media-type" keywords, e.g. "stationery", "labels".
    pub type_supported: Vec<String>,
    pub media_default: MediaCol,
    /// Ready media per source slot; unpopulated slots are empty and
    /// contiguous at the tail.
    pub media_ready: Vec<MediaCol>,

    pub borderless: bool,
    /// Non-borderless bottom/top margin, hundredths of mm.
    pub bottom_top: i32,
    /// Non-borderless left/right margin, hundredths of mm.
    pub left_right: i32,

    /// Number of darkness levels; 0 = darkness not supported.
    pub darkness_supported: i32,
    pub darkness_configured: i32,
    pub darkness_default: i32,

    /// (low, high); high = 0 means speed not supported.
    pub speed_supported: (i32, i32),
    pub speed_default: i32,

    pub identify_supported: IdentifyActions,
    pub identify_default: IdentifyActions,

    pub mode_supported: Vec<LabelMode>,
    pub mode_configured: Option<LabelMode>,

    /// (low, high); high = 0 means tear-off not supported.
    pub tear_offset_supported: (i32, i32),
    pub tear_offset_configured: i32,

    pub page_ranges_supported: bool,

    /// "printer-kind" keywords, e.g. "document", "photo", "label".
    pub kind: Vec<String>,

    /// Base names of vendor extension attributes; `<name>-default` request
    /// attributes matching these are stored verbatim on the printer.
    pub vendor: Vec<String>,
}

impl Default for DriverData {
    fn default() -> Self {
        Self {
            make_and_model: String::new(),
            device_id: String::new(),
            formats: Vec::new(),
            format_default: String::new(),
            color_supported: ColorMode::NONE,
            color_default: ColorMode::NONE,
            content_default: None,
            orient_default: Orientation::None,
            quality_default: None,
            scaling_default: None,
            sides_supported: Sides::NONE,
            sides_default: Sides::NONE,
            sources: Vec::new(),
            bins: Vec::new(),
            bin_default: 0,
            output_face_up: false,
            resolutions: Vec::new(),
            resolution_default: (0, 0),
            media: Vec::new(),
            type_supported: Vec::new(),
            media_default: MediaCol::default(),
            media_ready: Vec::new(),
            borderless: false,
            bottom_top: 0,
            left_right: 0,
            darkness_supported: 0,
            darkness_configured: 0,
            darkness_default: 0,
            speed_supported: (0, 0),
            speed_default: 0,
            identify_supported: IdentifyActions::NONE,
            identify_default: IdentifyActions::NONE,
            mode_supported: Vec::new(),
            mode_configured: None,
            tear_offset_supported: (0, 0),
            tear_offset_configured: 0,
            page_ranges_supported: false,
            kind: Vec::new(),
            vendor: Vec::new(),
        }
    }
}

impl DriverData {
    /// `true` when the named PWG size is in the supported media list.
    pub fn supports_media(&self, size_name: &str) -> bool {
        self.media.iter().any(|m| m.name == size_name)
    }

    /// `true` when the exact (width, length) pair matches a supported size.
    pub fn supports_media_size(&self, width: i32, length: i32) -> bool {
        self.media.iter().any(|m| m.width == width && m.length == length)
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Mutable job fields, transitioned by the job manager and read by the core.
#[derive(Debug, Clone, Copy)]
pub struct JobProgress {
    pub state: JobState,
    pub time_at_processing: Option<i64>,
    pub time_at_completed: Option<i64>,
}

/// One print job as observed by the IPP core.  Created through the
/// [`JobManager`](crate::hooks::JobManager) during Print-Job/Create-Job;
/// execution and state transitions happen outside the core.
#[derive(Debug)]
pub struct Job {
    id: u32,
    username: String,
    name: String,
    format: Option<String>,
    submit_time: i64,
    progress: RwLock<JobProgress>,
}

impl Job {
    pub fn new(id: u32, username: &str, name: &str, format: Option<&str>) -> Self {
        Self {
            id,
            username: username.to_string(),
            name: name.to_string(),
            format: format.map(str::to_string),
            submit_time: unix_now(),
            progress: RwLock::new(JobProgress {
                state: JobState::Pending,
                time_at_processing: None,
                time_at_completed: None,
            }),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn submit_time(&self) -> i64 {
        self.submit_time
    }

    pub fn progress(&self) -> JobProgress {
        *self.progress.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> JobState {
        self.progress().state
    }

    /// Transitions the job state, stamping the processing/completion times
    /// on the first entry into the corresponding phase.  Called by the job
    /// manager, never by request handlers.
    pub fn set_state(&self, state: JobState) {
        let mut progress = self.progress.write().unwrap_or_else(PoisonError::into_inner);
        progress.state = state;
        let now = unix_now();
        if state == JobState::Processing && progress.time_at_processing.is_none() {
            progress.time_at_processing = Some(now);
        }
        if state.is_terminal() && progress.time_at_completed.is_none() {
            progress.time_at_completed = Some(now);
        }
    }
}

// ---------------------------------------------------------------------------
// Printer
// ---------------------------------------------------------------------------

/// Driver status refresh callback; invoked with no printer lock held.
pub type StatusHook = Arc<dyn Fn(&Printer) + Send + Sync>;

/// Driver identify callback; invoked with no printer lock held.
pub type IdentifyHook = Arc<dyn Fn(&Printer, IdentifyActions, Option<&str>) + Send + Sync>;

/// Everything guarded by the printer's reader-writer lock.
pub struct PrinterShared {
    pub name: String,
    pub uuid: Uuid,
    /// URL path segment used in all printer URIs, e.g. "/ipp/print/front".
    pub resource: String,
    pub dns_sd_name: String,
    pub location: String,
    /// `geo:` URI; `None` projects as the out-of-band unknown value.
    pub geo_location: Option<String>,
    pub organization: String,
    pub org_unit: String,
    pub contact: Contact,
    pub info: String,

    pub driver: DriverData,
    /// Vendor `<name>-default` attributes, stored verbatim and echoed back.
    pub vendor_attrs: Vec<IppAttribute>,
    pub supplies: Vec<Supply>,

    pub state: PrinterState,
    pub reasons: PrinterReason,
    /// Set while a pause waits for the in-flight job to finish.
    pub is_stopped: bool,

    pub start_time: i64,
    pub config_time: i64,
    pub state_time: i64,
    pub status_time: i64,

    pub impressions_completed: i32,
    pub device_in_use: bool,
    pub processing_job: Option<Arc<Job>>,

    pub active_jobs: Vec<Arc<Job>>,
    pub completed_jobs: Vec<Arc<Job>>,
    pub all_jobs: Vec<Arc<Job>>,
}

impl PrinterShared {
    pub fn queued_job_count(&self) -> usize {
        self.active_jobs.len()
    }

    /// Registers a newly created job in the active and all indexes.
    pub fn add_job(&mut self, job: Arc<Job>) {
        self.active_jobs.push(Arc::clone(&job));
        self.all_jobs.push(job);
    }

    /// Moves a terminal job from the active to the completed index and
    /// releases the processing slot if it held it.
    pub fn retire_job(&mut self, job: &Arc<Job>) {
        self.active_jobs.retain(|j| j.id() != job.id());
        if !self.completed_jobs.iter().any(|j| j.id() == job.id()) {
            self.completed_jobs.push(Arc::clone(job));
        }
        if self
            .processing_job
            .as_ref()
            .is_some_and(|j| j.id() == job.id())
        {
            self.processing_job = None;
            if self.state == PrinterState::Processing {
                self.state = if self.is_stopped {
                    self.is_stopped = false;
                    PrinterState::Stopped
                } else {
                    PrinterState::Idle
                };
                self.state_time = unix_now();
            }
        }
    }

    /// Marks a job as the one being printed.
    pub fn start_job(&mut self, job: Arc<Job>) {
        job.set_state(JobState::Processing);
        self.processing_job = Some(job);
        self.state = PrinterState::Processing;
        self.state_time = unix_now();
    }

    /// Pause transition: immediate when idle, deferred via `is_stopped`
    /// while a job is printing.
    pub fn pause(&mut self) {
        if self.processing_job.is_some() {
            self.is_stopped = true;
        } else if self.state != PrinterState::Stopped {
            self.state = PrinterState::Stopped;
            self.state_time = unix_now();
        }
    }

    /// Resume transition: clears the pausing flag and returns to idle (the
    /// job manager re-enters processing if work is queued).
    pub fn resume(&mut self) {
        self.is_stopped = false;
        if self.state == PrinterState::Stopped {
            self.state = PrinterState::Idle;
            self.state_time = unix_now();
        }
    }
}

/// One printer service.  The mutable aggregate lives behind a
/// reader-writer lock; callbacks sit outside it.
pub struct Printer {
    id: u32,
    shared: RwLock<PrinterShared>,
    pub status_hook: Option<StatusHook>,
    pub identify_hook: Option<IdentifyHook>,
}

impl Printer {
    pub fn new(id: u32, name: &str, resource: &str, driver: DriverData) -> Self {
        let now = unix_now();
        let media_ready = if driver.media_ready.len() == driver.sources.len() {
            driver.media_ready.clone()
        } else {
            vec![MediaCol::default(); driver.sources.len()]
        };

        let mut driver = driver;
        driver.media_ready = media_ready;

        Self {
            id,
            shared: RwLock::new(PrinterShared {
                name: name.to_string(),
                uuid: Uuid::new_v4(),
                resource: resource.to_string(),
                dns_sd_name: name.to_string(),
                location: String::new(),
                geo_location: None,
                organization: String::new(),
                org_unit: String::new(),
                contact: Contact::default(),
                info: name.to_string(),
                driver,
                vendor_attrs: Vec::new(),
                supplies: Vec::new(),
                state: PrinterState::Idle,
                reasons: PrinterReason::NONE,
                is_stopped: false,
                start_time: now,
                config_time: now,
                state_time: now,
                status_time: 0,
                impressions_completed: 0,
                device_in_use: false,
                processing_job: None,
                active_jobs: Vec::new(),
                completed_jobs: Vec::new(),
                all_jobs: Vec::new(),
            }),
            status_hook: None,
            identify_hook: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Read view for projection and job listing.
    pub fn read(&self) -> RwLockReadGuard<'_, PrinterShared> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write view for attribute application and state transitions.
    pub fn write(&self) -> RwLockWriteGuard<'_, PrinterShared> {
        self.shared.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_driver() -> DriverData {
        DriverData {
            sources: vec!["tray-1".into(), "manual".into()],
            ..DriverData::default()
        }
    }

    #[test]
    fn media_ready_sized_to_sources() {
        let printer = Printer::new(1, "test", "/ipp/print/test", test_driver());
        let shared = printer.read();
        assert_eq!(shared.driver.media_ready.len(), 2);
        assert!(shared.driver.media_ready.iter().all(MediaCol::is_empty));
    }

    #[test]
    fn media_col_round_trip() {
        let mut media = MediaCol {
            size_name: "iso_a4_210x297mm".into(),
            size_width: 21000,
            size_length: 29700,
            bottom_margin: 423,
            left_margin: 423,
            right_margin: 423,
            top_margin: 423,
            source: "tray-1".into(),
            type_: "stationery".into(),
        };

        let col = media.to_collection();
        assert_eq!(
            col.member("media-size-name").and_then(IppAttribute::string),
            Some("iso_a4_210x297mm")
        );

        let mut imported = MediaCol::default();
        imported.import(&col);
        assert_eq!(imported, media);

        // Importing a partial collection keeps the other fields.
        let partial = IppCollection::new().with(IppAttribute::integer("media-top-margin", 0));
        media.import(&partial);
        assert_eq!(media.top_margin, 0);
        assert_eq!(media.source, "tray-1");
    }

    #[test]
    fn contact_uri_prefers_email() {
        let contact = Contact {
            name: "Front Desk".into(),
            email: "print@example.com".into(),
            telephone: "+1-555-0100".into(),
        };
        let col = contact.to_collection();
        assert_eq!(
            col.member("contact-uri").and_then(IppAttribute::string),
            Some("mailto:print@example.com")
        );

        let mut imported = Contact::default();
        imported.import(&col);
        assert_eq!(imported.name, "Front Desk");
        assert_eq!(imported.email, "print@example.com");
    }

    #[test]
    fn job_indexes_stay_partitioned() {
        let printer = Printer::new(1, "test", "/ipp/print/test", test_driver());
        let job = Arc::new(Job::new(1, "alice", "report", None));

        printer.write().add_job(Arc::clone(&job));
        {
            let shared = printer.read();
            assert_eq!(shared.active_jobs.len(), 1);
            assert_eq!(shared.completed_jobs.len(), 0);
            assert_eq!(shared.all_jobs.len(), 1);
        }

        job.set_state(JobState::Completed);
        printer.write().retire_job(&job);
        {
            let shared = printer.read();
            assert_eq!(shared.active_jobs.len(), 0);
            assert_eq!(shared.completed_jobs.len(), 1);
            assert_eq!(shared.all_jobs.len(), 1);
        }
    }

    #[test]
    fn pause_while_printing_is_deferred() {
        let printer = Printer::new(1, "test", "/ipp/print/test", test_driver());
        let job = Arc::new(Job::new(1, "alice", "report", None));
        {
            let mut shared = printer.write();
            shared.add_job(Arc::clone(&job));
            shared.start_job(Arc::clone(&job));
        }

        printer.write().pause();
        {
            let shared = printer.read();
            assert!(shared.is_stopped);
            assert_eq!(shared.state, PrinterState::Processing);
        }

        // The deferred pause lands when the job retires.
        job.set_state(JobState::Completed);
        printer.write().retire_job(&job);
        {
            let shared = printer.read();
            assert!(!shared.is_stopped);
            assert_eq!(shared.state, PrinterState::Stopped);
        }

        printer.write().resume();
        assert_eq!(printer.read().state, PrinterState::Idle);
    }

    #[test]
    fn job_state_stamps_times() {
        let job = Job::new(1, "alice", "report", Some("application/pdf"));
        assert!(job.progress().time_at_processing.is_none());

        job.set_state(JobState::Processing);
        assert!(job.progress().time_at_processing.is_some());
        assert!(job.progress().time_at_completed.is_none());

        job.set_state(JobState::Canceled);
        assert!(job.progress().time_at_completed.is_some());
    }
}

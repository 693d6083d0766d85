// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attribute projection.
//
// Pure functions from printer state to response attributes.  Every
// `printer-*` attribute the service advertises is enumerated here, each
// gated on the client's requested-attributes set and on whatever printer
// state makes it meaningful.  The caller holds the printer reader lock for
// the duration of a projection; nothing here mutates.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use druckwerk_core::types::{ContentOptimize, PrintQuality, PrinterReason, PrinterState, Scaling};

use crate::attr::{GroupTag, IppAttribute, IppRequest, IppResponse, IppValue, Operation};
use crate::hooks::System;
use crate::printer::{unix_now, Job, PrinterShared};

/// Document formats that stream page-by-page and therefore cannot be
/// copied by the printer.
const STREAMING_FORMATS: [&str; 2] = ["image/pwg-raster", "image/urf"];

/// Operations advertised in "operations-supported".
const SUPPORTED_OPERATIONS: [Operation; 12] = [
    Operation::PrintJob,
    Operation::ValidateJob,
    Operation::CreateJob,
    Operation::GetJobs,
    Operation::GetPrinterAttributes,
    Operation::PausePrinter,
    Operation::ResumePrinter,
    Operation::SetPrinterAttributes,
    Operation::CancelCurrentJob,
    Operation::CancelJobs,
    Operation::CancelMyJobs,
    Operation::IdentifyPrinter,
];

// ---------------------------------------------------------------------------
// Requested attributes
// ---------------------------------------------------------------------------

/// The client's "requested-attributes" selection.  `None` anywhere in the
/// projection API means "absent", which per RFC 8011 means all.
#[derive(Debug, Clone)]
pub struct RequestedAttrs(HashSet<String>);

impl RequestedAttrs {
    /// Parses the operation-group "requested-attributes" value.  Returns
    /// `None` when the attribute is absent or names a whole group ("all",
    /// "printer-description", "job-template", "job-description") — both
    /// mean every attribute is wanted.
    pub fn from_request(request: &IppRequest) -> Option<Self> {
        let attr = request.attr_in(GroupTag::Operation, "requested-attributes")?;
        let mut names = HashSet::new();
        for value in attr.strings() {
            match value {
                "all" | "printer-description" | "job-template" | "job-description" => return None,
                name => {
                    names.insert(name.to_string());
                }
            }
        }
        if names.is_empty() {
            None
        } else {
            Some(Self(names))
        }
    }

    /// A fixed selection, used by handlers that respond with a job subset.
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

fn want(requested: Option<&RequestedAttrs>, name: &str) -> bool {
    requested.map_or(true, |ra| ra.contains(name))
}

// ---------------------------------------------------------------------------
// Projection context
// ---------------------------------------------------------------------------

/// Per-request facts needed to assemble URIs and language-dependent values.
#[derive(Debug, Clone)]
pub struct ProjectCtx<'a> {
    /// Host header value the client used to reach us.
    pub host: &'a str,
    pub port: u16,
    /// "attributes-natural-language" of the request.
    pub language: &'a str,
    pub tls_only: bool,
    pub tls_disabled: bool,
    pub auth_configured: bool,
}

impl ProjectCtx<'_> {
    fn uri(&self, scheme: &str, path: &str) -> String {
        format!("{scheme}://{}:{}{path}", self.host, self.port)
    }

    fn https_uri(&self, path: &str) -> String {
        self.uri("https", path)
    }

    /// Canonical printer URI, used as the base for job URIs.
    pub fn printer_uri(&self, resource: &str) -> String {
        let scheme = if self.tls_only { "ipps" } else { "ipp" };
        self.uri(scheme, resource)
    }
}

fn date_time(secs: i64) -> IppValue {
    IppValue::DateTime(Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now))
}

// ---------------------------------------------------------------------------
// Printer projection
// ---------------------------------------------------------------------------

/// Emits every requested `printer-*` attribute into the printer group.
///
/// `format` is the request's "document-format" value, which parameterizes
/// "copies-supported" for streaming raster formats.
pub fn copy_printer_attributes(
    resp: &mut IppResponse,
    ctx: &ProjectCtx<'_>,
    shared: &PrinterShared,
    system: &dyn System,
    requested: Option<&RequestedAttrs>,
    format: Option<&str>,
) {
    let driver = &shared.driver;
    let now = unix_now();

    // Protocol constants every IPP Everywhere service reports.
    if want(requested, "charset-configured") {
        resp.add(GroupTag::Printer, IppAttribute::charset("charset-configured", "utf-8"));
    }
    if want(requested, "charset-supported") {
        resp.add(GroupTag::Printer, IppAttribute::charset("charset-supported", "utf-8"));
    }
    if want(requested, "compression-supported") {
        resp.add(GroupTag::Printer, IppAttribute::keyword("compression-supported", "none"));
    }

    if want(requested, "copies-default") {
        resp.add(GroupTag::Printer, IppAttribute::integer("copies-default", 1));
    }

    if want(requested, "copies-supported") {
        // No copy support for streaming raster formats.
        let upper = if format.is_some_and(|f| STREAMING_FORMATS.contains(&f)) {
            1
        } else {
            999
        };
        resp.add(GroupTag::Printer, IppAttribute::range("copies-supported", 1, upper));
    }

    if want(requested, "document-format-default") && !driver.format_default.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::mime_type("document-format-default", driver.format_default.clone()),
        );
    }
    if want(requested, "document-format-supported") && !driver.formats.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::mime_types("document-format-supported", driver.formats.clone()),
        );
    }

    if want(requested, "generated-natural-language-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::natural_language("generated-natural-language-supported", "en"),
        );
    }

    if want(requested, "identify-actions-default") {
        let keywords = driver.identify_default.keywords();
        if keywords.is_empty() {
            resp.add(GroupTag::Printer, IppAttribute::keyword("identify-actions-default", "none"));
        } else {
            resp.add(GroupTag::Printer, IppAttribute::keywords("identify-actions-default", keywords));
        }
    }
    if want(requested, "identify-actions-supported") && !driver.identify_supported.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("identify-actions-supported", driver.identify_supported.keywords()),
        );
    }

    if want(requested, "ipp-versions-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("ipp-versions-supported", ["1.1", "2.0"]),
        );
    }

    if want(requested, "label-mode-configured") {
        if let Some(mode) = driver.mode_configured {
            resp.add(GroupTag::Printer, IppAttribute::keyword("label-mode-configured", mode.keyword()));
        }
    }
    if want(requested, "label-mode-supported") && !driver.mode_supported.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords(
                "label-mode-supported",
                driver.mode_supported.iter().map(|m| m.keyword()),
            ),
        );
    }
    if want(requested, "label-tear-offset-configured") && driver.tear_offset_supported.1 > 0 {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("label-tear-offset-configured", driver.tear_offset_configured),
        );
    }
    if want(requested, "label-tear-offset-supported") && driver.tear_offset_supported.1 > 0 {
        resp.add(
            GroupTag::Printer,
            IppAttribute::range(
                "label-tear-offset-supported",
                driver.tear_offset_supported.0,
                driver.tear_offset_supported.1,
            ),
        );
    }

    copy_marker_attributes(resp, shared, requested);

    copy_media_attributes(resp, shared, requested);

    if want(requested, "multiple-document-handling-default") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keyword(
                "multiple-document-handling-default",
                "separate-documents-collated-copies",
            ),
        );
    }
    if want(requested, "multiple-document-handling-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords(
                "multiple-document-handling-supported",
                ["separate-documents-uncollated-copies", "separate-documents-collated-copies"],
            ),
        );
    }

    if want(requested, "natural-language-configured") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::natural_language("natural-language-configured", "en"),
        );
    }

    if want(requested, "operations-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::enums(
                "operations-supported",
                SUPPORTED_OPERATIONS.iter().map(|op| op.code() as i32),
            ),
        );
    }

    if want(requested, "orientation-requested-default") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::enum_value("orientation-requested-default", driver.orient_default.value()),
        );
    }
    if want(requested, "orientation-requested-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::enums("orientation-requested-supported", [3, 4, 5, 6, 7]),
        );
    }

    if want(requested, "output-bin-default") {
        let bin = if !driver.bins.is_empty() {
            driver.bins.get(driver.bin_default).cloned().unwrap_or_else(|| driver.bins[0].clone())
        } else if driver.output_face_up {
            "face-up".to_string()
        } else {
            "face-down".to_string()
        };
        resp.add(GroupTag::Printer, IppAttribute::keyword("output-bin-default", bin));
    }
    if want(requested, "output-bin-supported") {
        if !driver.bins.is_empty() {
            resp.add(GroupTag::Printer, IppAttribute::keywords("output-bin-supported", driver.bins.clone()));
        } else if driver.output_face_up {
            resp.add(GroupTag::Printer, IppAttribute::keyword("output-bin-supported", "face-up"));
        } else {
            resp.add(GroupTag::Printer, IppAttribute::keyword("output-bin-supported", "face-down"));
        }
    }

    if want(requested, "page-ranges-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::boolean("page-ranges-supported", driver.page_ranges_supported),
        );
    }

    if want(requested, "pdl-override-supported") {
        resp.add(GroupTag::Printer, IppAttribute::keyword("pdl-override-supported", "attempted"));
    }

    if want(requested, "print-color-mode-default") && !driver.color_default.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keyword("print-color-mode-default", driver.color_default.keyword()),
        );
    }
    if want(requested, "print-color-mode-supported") && !driver.color_supported.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("print-color-mode-supported", driver.color_supported.keywords()),
        );
    }

    if want(requested, "print-content-optimize-default") {
        let keyword = driver.content_default.unwrap_or(ContentOptimize::Auto).keyword();
        resp.add(GroupTag::Printer, IppAttribute::keyword("print-content-optimize-default", keyword));
    }
    if want(requested, "print-content-optimize-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords(
                "print-content-optimize-supported",
                ContentOptimize::ALL.map(|v| v.keyword()),
            ),
        );
    }

    if want(requested, "print-darkness-supported") && driver.darkness_supported > 0 {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("print-darkness-supported", driver.darkness_supported),
        );
    }

    if want(requested, "print-quality-default") {
        let quality = driver.quality_default.unwrap_or(PrintQuality::Normal);
        resp.add(GroupTag::Printer, IppAttribute::enum_value("print-quality-default", quality.value()));
    }
    if want(requested, "print-quality-supported") {
        resp.add(GroupTag::Printer, IppAttribute::enums("print-quality-supported", [3, 4, 5]));
    }

    if want(requested, "print-scaling-default") {
        let keyword = driver.scaling_default.unwrap_or(Scaling::Auto).keyword();
        resp.add(GroupTag::Printer, IppAttribute::keyword("print-scaling-default", keyword));
    }
    if want(requested, "print-scaling-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("print-scaling-supported", Scaling::ALL.map(|v| v.keyword())),
        );
    }

    if want(requested, "print-speed-supported") && driver.speed_supported.1 > 0 {
        resp.add(
            GroupTag::Printer,
            IppAttribute::range("print-speed-supported", driver.speed_supported.0, driver.speed_supported.1),
        );
    }

    if want(requested, "printer-config-change-date-time") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::new("printer-config-change-date-time", vec![date_time(shared.config_time)]),
        );
    }
    if want(requested, "printer-config-change-time") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("printer-config-change-time", (shared.config_time - shared.start_time) as i32),
        );
    }

    if want(requested, "printer-contact-col") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::collection("printer-contact-col", shared.contact.to_collection()),
        );
    }

    if want(requested, "printer-current-time") {
        resp.add(GroupTag::Printer, IppAttribute::new("printer-current-time", vec![date_time(now)]));
    }

    if want(requested, "printer-darkness-configured") && driver.darkness_supported > 0 {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("printer-darkness-configured", driver.darkness_configured),
        );
    }
    if want(requested, "printer-darkness-supported") && driver.darkness_supported > 0 {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("printer-darkness-supported", driver.darkness_supported),
        );
    }

    system.export_versions(resp, GroupTag::Printer, requested);

    if want(requested, "printer-device-id") && !driver.device_id.is_empty() {
        resp.add(GroupTag::Printer, IppAttribute::text("printer-device-id", driver.device_id.clone()));
    }

    if want(requested, "printer-dns-sd-name") {
        resp.add(GroupTag::Printer, IppAttribute::name_value("printer-dns-sd-name", shared.dns_sd_name.clone()));
    }

    if want(requested, "printer-geo-location") {
        match &shared.geo_location {
            Some(uri) => resp.add(GroupTag::Printer, IppAttribute::uri("printer-geo-location", uri.clone())),
            None => resp.add(GroupTag::Printer, IppAttribute::unknown("printer-geo-location")),
        }
    }

    if want(requested, "printer-get-attributes-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keyword("printer-get-attributes-supported", "document-format"),
        );
    }

    if want(requested, "printer-icons") {
        let icons = ["icon-sm.png", "icon-md.png", "icon-lg.png"]
            .map(|icon| ctx.https_uri(&format!("{}/{icon}", shared.resource)));
        resp.add(GroupTag::Printer, IppAttribute::uris("printer-icons", icons));
    }

    if want(requested, "printer-impressions-completed") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("printer-impressions-completed", shared.impressions_completed),
        );
    }

    if want(requested, "printer-info") {
        resp.add(GroupTag::Printer, IppAttribute::text("printer-info", shared.info.clone()));
    }

    if want(requested, "printer-input-tray") {
        let mut trays: Vec<Vec<u8>> = driver
            .sources
            .iter()
            .zip(driver.media_ready.iter())
            .map(|(source, media)| {
                let tray_type = match source.as_str() {
                    "manual" => "sheetFeedManual",
                    "by-pass-tray" => "sheetFeedAutoNonRemovableTray",
                    _ => "sheetFeedAutoRemovableTray",
                };
                let capacity = if source == "manual" { 1 } else { -2 };
                format!(
                    "type={tray_type};mediafeed={};mediaxfeed={};maxcapacity={capacity};level=-2;status=0;name={source};",
                    media.size_length, media.size_width
                )
                .into_bytes()
            })
            .collect();

        // The "auto" tray is a dummy entry.
        trays.push(
            b"type=other;mediafeed=0;mediaxfeed=0;maxcapacity=-2;level=-2;status=0;name=auto;".to_vec(),
        );
        resp.add(GroupTag::Printer, IppAttribute::octet_strings("printer-input-tray", trays));
    }

    if want(requested, "printer-is-accepting-jobs") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::boolean("printer-is-accepting-jobs", !system.is_shutdown_pending()),
        );
    }

    if want(requested, "printer-kind") && !driver.kind.is_empty() {
        resp.add(GroupTag::Printer, IppAttribute::keywords("printer-kind", driver.kind.clone()));
    }

    if want(requested, "printer-location") {
        resp.add(GroupTag::Printer, IppAttribute::text("printer-location", shared.location.clone()));
    }

    if want(requested, "printer-make-and-model") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::text("printer-make-and-model", driver.make_and_model.clone()),
        );
    }

    if want(requested, "printer-more-info") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::uri("printer-more-info", ctx.https_uri(&format!("{}/", shared.resource))),
        );
    }

    if want(requested, "printer-name") {
        resp.add(GroupTag::Printer, IppAttribute::name_value("printer-name", shared.name.clone()));
    }

    if want(requested, "printer-organization") {
        resp.add(GroupTag::Printer, IppAttribute::text("printer-organization", shared.organization.clone()));
    }
    if want(requested, "printer-organizational-unit") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::text("printer-organizational-unit", shared.org_unit.clone()),
        );
    }

    if want(requested, "printer-resolution-default") && driver.resolution_default != (0, 0) {
        resp.add(
            GroupTag::Printer,
            IppAttribute::resolution(
                "printer-resolution-default",
                driver.resolution_default.0,
                driver.resolution_default.1,
            ),
        );
    }
    if want(requested, "printer-resolution-supported") && !driver.resolutions.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::resolutions("printer-resolution-supported", &driver.resolutions),
        );
    }

    if want(requested, "printer-speed-default") && driver.speed_supported.1 > 0 {
        resp.add(GroupTag::Printer, IppAttribute::integer("printer-speed-default", driver.speed_default));
    }

    copy_state_attributes(resp, shared, requested);

    if want(requested, "printer-strings-languages-supported") {
        let languages: Vec<String> = system
            .resources()
            .into_iter()
            .filter_map(|r| r.language)
            .collect();
        if !languages.is_empty() {
            resp.add(
                GroupTag::Printer,
                IppAttribute::natural_languages("printer-strings-languages-supported", languages),
            );
        }
    }

    if want(requested, "printer-strings-uri") {
        let base = &ctx.language[..ctx.language.len().min(2)];
        if let Some(resource) = system
            .resources()
            .into_iter()
            .find(|r| r.language.as_deref() == Some(ctx.language) || r.language.as_deref() == Some(base))
        {
            resp.add(
                GroupTag::Printer,
                IppAttribute::uri("printer-strings-uri", ctx.https_uri(&resource.path)),
            );
        }
    }

    if !shared.supplies.is_empty() {
        if want(requested, "printer-supply") {
            let values: Vec<Vec<u8>> = shared
                .supplies
                .iter()
                .enumerate()
                .map(|(i, supply)| {
                    format!(
                        "index={i};type={};maxcapacity=100;level={};colorantname={};",
                        supply.type_.keyword(),
                        supply.level,
                        supply.color.colorant_name()
                    )
                    .into_bytes()
                })
                .collect();
            resp.add(GroupTag::Printer, IppAttribute::octet_strings("printer-supply", values));
        }

        if want(requested, "printer-supply-description") {
            resp.add(
                GroupTag::Printer,
                IppAttribute::texts(
                    "printer-supply-description",
                    shared.supplies.iter().map(|s| s.description.clone()),
                ),
            );
        }
    }

    if want(requested, "printer-supply-info-uri") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::uri("printer-supply-info-uri", ctx.https_uri(&format!("{}/supplies", shared.resource))),
        );
    }

    if want(requested, "printer-up-time") {
        resp.add(GroupTag::Printer, IppAttribute::integer("printer-up-time", (now - shared.start_time) as i32));
    }

    if want(requested, "printer-uri-supported") {
        let uris = supported_uris(ctx, &shared.resource);
        if !uris.is_empty() {
            resp.add(GroupTag::Printer, IppAttribute::uris("printer-uri-supported", uris));
        }
    }

    if want(requested, "printer-uuid") {
        resp.add(GroupTag::Printer, IppAttribute::uri("printer-uuid", format!("urn:uuid:{}", shared.uuid)));
    }

    if want(requested, "printer-xri-supported") {
        copy_xri_attributes(resp, ctx, &shared.resource);
    }

    if want(requested, "queued-job-count") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("queued-job-count", shared.queued_job_count() as i32),
        );
    }

    if want(requested, "sides-default") {
        let keyword = if driver.sides_default.is_empty() {
            "one-sided"
        } else {
            driver.sides_default.keyword()
        };
        resp.add(GroupTag::Printer, IppAttribute::keyword("sides-default", keyword));
    }
    if want(requested, "sides-supported") && !driver.sides_supported.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("sides-supported", driver.sides_supported.keywords()),
        );
    }

    if want(requested, "uri-authentication-supported") {
        // Authentication is only offered over TLS, so the "ipp" URI always
        // pairs with 'none'.
        let values: Vec<&str> = if ctx.tls_disabled {
            vec!["none"]
        } else if ctx.tls_only {
            vec![if ctx.auth_configured { "basic" } else { "none" }]
        } else if ctx.auth_configured {
            vec!["none", "basic"]
        } else {
            vec!["none", "none"]
        };
        resp.add(GroupTag::Printer, IppAttribute::keywords("uri-authentication-supported", values));
    }

    if want(requested, "uri-security-supported") {
        let values: Vec<&str> = if ctx.tls_disabled {
            vec!["none"]
        } else if ctx.tls_only {
            vec!["tls"]
        } else {
            vec!["none", "tls"]
        };
        resp.add(GroupTag::Printer, IppAttribute::keywords("uri-security-supported", values));
    }

    // Vendor xxx-default attributes are echoed verbatim.
    for attr in &shared.vendor_attrs {
        if want(requested, &attr.name) {
            resp.add(GroupTag::Printer, attr.clone());
        }
    }
}

/// `marker-*` supply projections, emitted only when supplies are reported.
fn copy_marker_attributes(
    resp: &mut IppResponse,
    shared: &PrinterShared,
    requested: Option<&RequestedAttrs>,
) {
    if shared.supplies.is_empty() {
        return;
    }

    if want(requested, "marker-colors") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::names("marker-colors", shared.supplies.iter().map(|s| s.color.marker_color())),
        );
    }
    if want(requested, "marker-high-levels") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integers(
                "marker-high-levels",
                shared.supplies.iter().map(|s| if s.is_consumed { 100 } else { 90 }),
            ),
        );
    }
    if want(requested, "marker-levels") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integers("marker-levels", shared.supplies.iter().map(|s| s.level)),
        );
    }
    if want(requested, "marker-low-levels") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integers(
                "marker-low-levels",
                shared.supplies.iter().map(|s| if s.is_consumed { 10 } else { 0 }),
            ),
        );
    }
    if want(requested, "marker-names") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::names("marker-names", shared.supplies.iter().map(|s| s.description.clone())),
        );
    }
    if want(requested, "marker-types") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("marker-types", shared.supplies.iter().map(|s| s.type_.keyword())),
        );
    }
}

/// Media capability, default, and ready projections.
fn copy_media_attributes(
    resp: &mut IppResponse,
    shared: &PrinterShared,
    requested: Option<&RequestedAttrs>,
) {
    let driver = &shared.driver;

    let margins = |configured: i32| -> Vec<i32> {
        if driver.borderless && configured != 0 {
            vec![0, configured]
        } else {
            vec![configured]
        }
    };

    if want(requested, "media-bottom-margin-supported") {
        resp.add(GroupTag::Printer, IppAttribute::integers("media-bottom-margin-supported", margins(driver.bottom_top)));
    }
    if want(requested, "media-left-margin-supported") {
        resp.add(GroupTag::Printer, IppAttribute::integers("media-left-margin-supported", margins(driver.left_right)));
    }
    if want(requested, "media-right-margin-supported") {
        resp.add(GroupTag::Printer, IppAttribute::integers("media-right-margin-supported", margins(driver.left_right)));
    }
    if want(requested, "media-top-margin-supported") {
        resp.add(GroupTag::Printer, IppAttribute::integers("media-top-margin-supported", margins(driver.bottom_top)));
    }

    if want(requested, "media-col-default") && !driver.media_default.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::collection("media-col-default", driver.media_default.to_collection()),
        );
    }

    if want(requested, "media-col-ready") {
        // Borderless printers with real margins report each loaded media
        // twice: bordered first, then the zero-margin variant.
        let doubled = driver.borderless && (driver.bottom_top != 0 || driver.left_right != 0);
        let mut cols = Vec::new();
        for media in driver.media_ready.iter().filter(|m| !m.is_empty()) {
            if doubled {
                let mut bordered = media.clone();
                bordered.bottom_margin = driver.bottom_top;
                bordered.top_margin = driver.bottom_top;
                bordered.left_margin = driver.left_right;
                bordered.right_margin = driver.left_right;
                cols.push(bordered.to_collection());

                let mut borderless = media.clone();
                borderless.bottom_margin = 0;
                borderless.top_margin = 0;
                borderless.left_margin = 0;
                borderless.right_margin = 0;
                cols.push(borderless.to_collection());
            } else {
                cols.push(media.to_collection());
            }
        }
        if !cols.is_empty() {
            resp.add(GroupTag::Printer, IppAttribute::collections("media-col-ready", cols));
        }
    }

    if want(requested, "media-col-supported") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords(
                "media-col-supported",
                [
                    "media-bottom-margin",
                    "media-left-margin",
                    "media-right-margin",
                    "media-size",
                    "media-size-name",
                    "media-source",
                    "media-top-margin",
                    "media-type",
                ],
            ),
        );
    }

    if want(requested, "media-default") && !driver.media_default.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keyword("media-default", driver.media_default.size_name.clone()),
        );
    }

    if want(requested, "media-ready") {
        let names: Vec<String> = driver
            .media_ready
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| m.size_name.clone())
            .collect();
        if !names.is_empty() {
            resp.add(GroupTag::Printer, IppAttribute::keywords("media-ready", names));
        }
    }

    if want(requested, "media-size-supported") && !driver.media.is_empty() {
        let sizes = driver.media.iter().map(|size| {
            IppCollectionSize { width: size.width, length: size.length }.to_collection()
        });
        resp.add(GroupTag::Printer, IppAttribute::collections("media-size-supported", sizes));
    }

    if want(requested, "media-source-supported") && !driver.sources.is_empty() {
        resp.add(GroupTag::Printer, IppAttribute::keywords("media-source-supported", driver.sources.clone()));
    }

    if want(requested, "media-supported") && !driver.media.is_empty() {
        resp.add(
            GroupTag::Printer,
            IppAttribute::keywords("media-supported", driver.media.iter().map(|m| m.name.clone())),
        );
    }

    if want(requested, "media-type-supported") && !driver.type_supported.is_empty() {
        resp.add(GroupTag::Printer, IppAttribute::keywords("media-type-supported", driver.type_supported.clone()));
    }
}

/// Helper for the bare x/y dimension collections in "media-size-supported".
struct IppCollectionSize {
    width: i32,
    length: i32,
}

impl IppCollectionSize {
    fn to_collection(&self) -> crate::attr::IppCollection {
        crate::attr::IppCollection::new()
            .with(IppAttribute::integer("x-dimension", self.width))
            .with(IppAttribute::integer("y-dimension", self.length))
    }
}

/// The `printer-state`, `printer-state-message`, `printer-state-reasons`,
/// and state-change timestamps.
pub fn copy_state_attributes(
    resp: &mut IppResponse,
    shared: &PrinterShared,
    requested: Option<&RequestedAttrs>,
) {
    if want(requested, "printer-state") {
        resp.add(GroupTag::Printer, IppAttribute::enum_value("printer-state", shared.state.value()));
    }

    if want(requested, "printer-state-change-date-time") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::new("printer-state-change-date-time", vec![date_time(shared.state_time)]),
        );
    }
    if want(requested, "printer-state-change-time") {
        resp.add(
            GroupTag::Printer,
            IppAttribute::integer("printer-state-change-time", (shared.state_time - shared.start_time) as i32),
        );
    }

    if want(requested, "printer-state-message") {
        resp.add(GroupTag::Printer, IppAttribute::text("printer-state-message", shared.state.message()));
    }

    if want(requested, "printer-state-reasons") {
        let mut keywords: Vec<&str> = Vec::new();
        if shared.reasons == PrinterReason::NONE {
            if shared.is_stopped {
                keywords.push("moving-to-paused");
            } else if shared.state == PrinterState::Stopped {
                keywords.push("paused");
            } else {
                keywords.push("none");
            }
        } else {
            keywords.extend(shared.reasons.keywords());
            if shared.is_stopped {
                keywords.push("moving-to-paused");
            } else if shared.state == PrinterState::Stopped {
                keywords.push("paused");
            }
        }
        resp.add(GroupTag::Printer, IppAttribute::keywords("printer-state-reasons", keywords));
    }
}

/// URIs the printer answers on, honouring the system TLS policy.
fn supported_uris(ctx: &ProjectCtx<'_>, resource: &str) -> Vec<String> {
    let mut uris = Vec::new();
    if !ctx.tls_only {
        uris.push(ctx.uri("ipp", resource));
    }
    if !ctx.tls_disabled {
        uris.push(ctx.uri("ipps", resource));
    }
    uris
}

/// "printer-xri-supported": one collection per supported URI.
fn copy_xri_attributes(resp: &mut IppResponse, ctx: &ProjectCtx<'_>, resource: &str) {
    let mut cols = Vec::new();

    if !ctx.tls_only {
        cols.push(
            crate::attr::IppCollection::new()
                .with(IppAttribute::keyword("xri-authentication", "none"))
                .with(IppAttribute::keyword("xri-security", "none"))
                .with(IppAttribute::uri("xri-uri", ctx.uri("ipp", resource))),
        );
    }

    if !ctx.tls_disabled {
        let auth = if ctx.auth_configured { "basic" } else { "none" };
        cols.push(
            crate::attr::IppCollection::new()
                .with(IppAttribute::keyword("xri-authentication", auth))
                .with(IppAttribute::keyword("xri-security", "tls"))
                .with(IppAttribute::uri("xri-uri", ctx.uri("ipps", resource))),
        );
    }

    if !cols.is_empty() {
        resp.add(GroupTag::Printer, IppAttribute::collections("printer-xri-supported", cols));
    }
}

// ---------------------------------------------------------------------------
// Job projection
// ---------------------------------------------------------------------------

/// Emits the requested `job-*` attributes for one job into the job group.
pub fn copy_job_attributes(
    resp: &mut IppResponse,
    ctx: &ProjectCtx<'_>,
    shared: &PrinterShared,
    job: &Job,
    requested: Option<&RequestedAttrs>,
) {
    let progress = job.progress();
    let now = unix_now();
    let printer_uri = ctx.printer_uri(&shared.resource);

    if want(requested, "job-id") {
        resp.add(GroupTag::Job, IppAttribute::integer("job-id", job.id() as i32));
    }
    if want(requested, "job-name") {
        resp.add(GroupTag::Job, IppAttribute::name_value("job-name", job.name()));
    }
    if want(requested, "job-originating-user-name") {
        resp.add(GroupTag::Job, IppAttribute::name_value("job-originating-user-name", job.username()));
    }
    if want(requested, "job-printer-up-time") {
        resp.add(GroupTag::Job, IppAttribute::integer("job-printer-up-time", (now - shared.start_time) as i32));
    }
    if want(requested, "job-printer-uri") {
        resp.add(GroupTag::Job, IppAttribute::uri("job-printer-uri", printer_uri.clone()));
    }
    if want(requested, "job-state") {
        resp.add(GroupTag::Job, IppAttribute::enum_value("job-state", progress.state.value()));
    }
    if want(requested, "job-state-message") {
        resp.add(GroupTag::Job, IppAttribute::text("job-state-message", progress.state.message()));
    }
    if want(requested, "job-state-reasons") {
        resp.add(GroupTag::Job, IppAttribute::keyword("job-state-reasons", progress.state.reason_keyword()));
    }
    if want(requested, "job-uri") {
        resp.add(GroupTag::Job, IppAttribute::uri("job-uri", format!("{printer_uri}/{}", job.id())));
    }
    if want(requested, "time-at-creation") {
        resp.add(GroupTag::Job, IppAttribute::integer("time-at-creation", (job.submit_time() - shared.start_time) as i32));
    }
    if want(requested, "time-at-processing") {
        match progress.time_at_processing {
            Some(t) => resp.add(GroupTag::Job, IppAttribute::integer("time-at-processing", (t - shared.start_time) as i32)),
            None => resp.add(GroupTag::Job, IppAttribute::unknown("time-at-processing")),
        }
    }
    if want(requested, "time-at-completed") {
        match progress.time_at_completed {
            Some(t) => resp.add(GroupTag::Job, IppAttribute::integer("time-at-completed", (t - shared.start_time) as i32)),
            None => resp.add(GroupTag::Job, IppAttribute::unknown("time-at-completed")),
        }
    }
}

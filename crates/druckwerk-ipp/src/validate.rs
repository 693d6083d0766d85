// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job-template attribute validation.
//
// Every submitted job attribute is checked for syntax and against the
// driver's capabilities.  Checks are independent and all failures are
// gathered into one response, so the client sees every problem at once.

use druckwerk_core::types::{ColorMode, ContentOptimize, Orientation, PrintQuality, Scaling, Sides};

use crate::attr::{
    GroupTag, IppAttribute, IppRequest, IppResponse, ResolutionUnits, StatusCode, ValueTag,
};
use crate::hooks::System;
use crate::printer::Printer;

/// Value tags acceptable for name-valued request attributes.
fn is_name_tag(tag: ValueTag) -> bool {
    matches!(tag, ValueTag::Name | ValueTag::NameLang)
}

/// Value tags acceptable for keyword-or-name request attributes.
fn is_keyword_or_name_tag(tag: ValueTag) -> bool {
    matches!(tag, ValueTag::Keyword | ValueTag::Name | ValueTag::NameLang)
}

/// Validates the job template attributes of a Print-Job, Validate-Job, or
/// Create-Job request.
///
/// On failure the response carries `attributes-or-values-not-supported`
/// (or `not-accepting-jobs`) and the offending attributes in the
/// unsupported group.  When no "job-name" was supplied, a default of
/// "Untitled" is injected into the request's job group so job creation
/// sees a name.
pub fn valid_job_attributes(
    resp: &mut IppResponse,
    printer: &Printer,
    system: &dyn System,
    request: &mut IppRequest,
) -> bool {
    // If a shutdown is pending, do not accept more jobs.
    if system.is_shutdown_pending() {
        resp.respond(
            StatusCode::ServerErrorNotAcceptingJobs,
            "Not accepting new jobs.".to_string(),
        );
        return false;
    }

    let mut valid = valid_document_attributes(resp, printer, request);
    let needs_default_name = request.attr("job-name").is_none();

    {
        let shared = printer.read();
        let driver = &shared.driver;

        if let Some(attr) = request.attr("copies") {
            let value = attr.integer_value().unwrap_or(0);
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Integer
                || !(1..=999).contains(&value)
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("ipp-attribute-fidelity") {
            if attr.count() != 1 || attr.value_tag() != ValueTag::Boolean {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("job-hold-until") {
            if attr.count() != 1
                || !is_keyword_or_name_tag(attr.value_tag())
                || attr.string() != Some("no-hold")
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("job-impressions") {
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Integer
                || attr.integer_value().unwrap_or(-1) < 0
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("job-name") {
            if attr.count() != 1 || !is_name_tag(attr.value_tag()) {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("job-priority") {
            let value = attr.integer_value().unwrap_or(0);
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Integer
                || !(1..=100).contains(&value)
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("job-sheets") {
            if attr.count() != 1
                || !is_keyword_or_name_tag(attr.value_tag())
                || attr.string() != Some("none")
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("media") {
            if attr.count() != 1 || !is_keyword_or_name_tag(attr.value_tag()) {
                resp.unsupported(attr);
                valid = false;
            } else if !driver.supports_media(attr.string().unwrap_or_default()) {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("media-col") {
            if attr.count() != 1 || attr.value_tag() != ValueTag::Collection {
                resp.unsupported(attr);
                valid = false;
            } else if let Some(col) = attr.collection_value() {
                if let Some(member) = col.member("media-size-name") {
                    if member.count() != 1
                        || !is_keyword_or_name_tag(member.value_tag())
                        || !driver.supports_media(member.string().unwrap_or_default())
                    {
                        resp.unsupported(attr);
                        valid = false;
                    }
                } else if let Some(member) = col.member("media-size") {
                    if member.count() != 1 || member.value_tag() != ValueTag::Collection {
                        resp.unsupported(attr);
                        valid = false;
                    } else if let Some(size) = member.collection_value() {
                        let x = size
                            .member("x-dimension")
                            .filter(|m| m.count() == 1 && m.value_tag() == ValueTag::Integer)
                            .and_then(IppAttribute::integer_value);
                        let y = size
                            .member("y-dimension")
                            .filter(|m| m.count() == 1 && m.value_tag() == ValueTag::Integer)
                            .and_then(IppAttribute::integer_value);

                        match (x, y) {
                            (Some(x), Some(y)) if driver.supports_media_size(x, y) => {}
                            _ => {
                                resp.unsupported(attr);
                                valid = false;
                            }
                        }
                    }
                }
            }
        }

        if let Some(attr) = request.attr("multiple-document-handling") {
            let value = attr.string().unwrap_or_default();
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Keyword
                || (value != "separate-documents-uncollated-copies"
                    && value != "separate-documents-collated-copies")
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("orientation-requested") {
            let in_range = attr
                .integer_value()
                .and_then(Orientation::from_value)
                .is_some();
            if attr.count() != 1 || attr.value_tag() != ValueTag::Enum || !in_range {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("page-ranges") {
            let (lower, upper) = attr.range_value().unwrap_or((0, 0));
            if !driver.page_ranges_supported
                || attr.count() != 1
                || attr.value_tag() != ValueTag::Range
                || lower < 1
                || upper < lower
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("print-color-mode") {
            let mode = attr.string().and_then(ColorMode::from_keyword);
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Keyword
                || !mode.is_some_and(|m| driver.color_supported.intersects(m))
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("print-content-optimize") {
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Keyword
                || attr.string().and_then(ContentOptimize::from_keyword).is_none()
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("print-darkness") {
            let value = attr.integer_value().unwrap_or(i32::MIN);
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Integer
                || !(-100..=100).contains(&value)
                || driver.darkness_supported == 0
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("print-quality") {
            let in_range = attr
                .integer_value()
                .and_then(PrintQuality::from_value)
                .is_some();
            if attr.count() != 1 || attr.value_tag() != ValueTag::Enum || !in_range {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("print-scaling") {
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Keyword
                || attr.string().and_then(Scaling::from_keyword).is_none()
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("print-speed") {
            let value = attr.integer_value().unwrap_or(i32::MIN);
            let (low, high) = driver.speed_supported;
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Integer
                || value < low
                || value > high
                || high == 0
            {
                resp.unsupported(attr);
                valid = false;
            }
        }

        if let Some(attr) = request.attr("printer-resolution") {
            match attr.resolution_value() {
                Some((x, y, units))
                    if attr.count() == 1
                        && units == ResolutionUnits::PerInch
                        && driver.resolutions.contains(&(x, y)) => {}
                _ => {
                    resp.unsupported(attr);
                    valid = false;
                }
            }
        }

        if let Some(attr) = request.attr("sides") {
            let sides = attr.string().and_then(Sides::from_keyword);
            if attr.count() != 1
                || attr.value_tag() != ValueTag::Keyword
                || !sides.is_some_and(|s| driver.sides_supported.intersects(s))
            {
                resp.unsupported(attr);
                valid = false;
            }
        }
    }

    if needs_default_name {
        request.add(GroupTag::Job, IppAttribute::name_value("job-name", "Untitled"));
    }

    valid
}

/// Checks the operation-group document attributes.
fn valid_document_attributes(
    resp: &mut IppResponse,
    printer: &Printer,
    request: &IppRequest,
) -> bool {
    let mut valid = true;

    if let Some(attr) = request.attr("compression") {
        if attr.count() != 1
            || attr.value_tag() != ValueTag::Keyword
            || attr.string() != Some("none")
        {
            resp.unsupported(attr);
            valid = false;
        }
    }

    if let Some(attr) = request.attr("document-format") {
        let supported = {
            let shared = printer.read();
            attr.string()
                .map(|format| shared.driver.formats.iter().any(|f| f == format))
                .unwrap_or(false)
        };
        if attr.count() != 1 || attr.value_tag() != ValueTag::MimeType || !supported {
            resp.unsupported(attr);
            valid = false;
        }
    }

    if let Some(attr) = request.attr("document-name") {
        if attr.count() != 1 || !is_name_tag(attr.value_tag()) {
            resp.unsupported(attr);
            valid = false;
        }
    }

    valid
}

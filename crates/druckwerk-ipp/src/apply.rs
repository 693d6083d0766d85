// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Set-Printer-Attributes validation and application.
//
// Two phases: a preflight that checks every request attribute against the
// settable-attribute allowlist (rejecting the whole request if anything is
// unsupported), then an atomic apply under the printer write lock.  The
// preflight itself runs against a lock-free snapshot of the vendor names.

use tracing::{debug, info};

use druckwerk_core::types::{
    ContentOptimize, IdentifyActions, LabelMode, Orientation, PrintQuality, Scaling,
};

use crate::attr::{GroupTag, IppRequest, IppResponse, StatusCode, ValueTag};
use crate::hooks::System;
use crate::printer::{unix_now, Printer};
use crate::pwg;

/// Upper bound on ready-media values accepted in one request; the actual
/// slot count is the printer's source count.
const MAX_SOURCE: usize = 16;

/// Settable printer attributes: name, required value tag, maximum count.
const SETTABLE: &[(&str, ValueTag, usize)] = &[
    ("label-mode-configured", ValueTag::Keyword, 1),
    // Both spellings appear in deployed clients.
    ("label-tear-off-configured", ValueTag::Integer, 1),
    ("label-tear-offset-configured", ValueTag::Integer, 1),
    ("media-col-default", ValueTag::Collection, 1),
    ("media-col-ready", ValueTag::Collection, MAX_SOURCE),
    ("media-default", ValueTag::Keyword, 1),
    ("media-ready", ValueTag::Keyword, MAX_SOURCE),
    ("orientation-requested-default", ValueTag::Enum, 1),
    ("print-color-mode-default", ValueTag::Keyword, 1),
    ("print-content-optimize-default", ValueTag::Keyword, 1),
    ("print-darkness-default", ValueTag::Integer, 1),
    ("print-quality-default", ValueTag::Enum, 1),
    ("print-speed-default", ValueTag::Integer, 1),
    ("printer-contact-col", ValueTag::Collection, 1),
    ("printer-darkness-configured", ValueTag::Integer, 1),
    ("printer-geo-location", ValueTag::Uri, 1),
    ("printer-location", ValueTag::Text, 1),
    ("printer-organization", ValueTag::Text, 1),
    ("printer-organizational-unit", ValueTag::Text, 1),
    ("printer-resolution-default", ValueTag::Resolution, 1),
];

/// Attributes the printer manager consumes during Create-Printer; tolerated
/// here so they do not land in the unsupported group.
const CREATE_PRINTER_PASSTHROUGH: [&str; 4] = [
    "printer-device-id",
    "printer-name",
    "smi2699-device-uri",
    "smi2699-device-command",
];

/// Validates and applies the printer attributes carried in `request`.
///
/// Returns `true` when everything was applied; `false` when the response
/// already carries the unsupported group and nothing was changed.
pub fn set_printer_attributes(
    resp: &mut IppResponse,
    printer: &Printer,
    system: &dyn System,
    request: &IppRequest,
    create_printer: bool,
) -> bool {
    // Vendor xxx-default names, snapshotted so the preflight holds no lock.
    let vendor_defaults: Vec<String> = printer
        .read()
        .driver
        .vendor
        .iter()
        .map(|name| format!("{name}-default"))
        .collect();

    // Preflight request attributes.
    for group in &request.groups {
        if group.tag == GroupTag::Operation {
            continue;
        }

        for attr in &group.attrs {
            debug!(
                group = ?group.tag,
                name = %attr.name,
                count = attr.count(),
                tag = ?attr.value_tag(),
                "preflighting attribute"
            );

            if group.tag != GroupTag::Printer {
                resp.unsupported(attr);
                continue;
            }

            if create_printer && CREATE_PRINTER_PASSTHROUGH.contains(&attr.name.as_str()) {
                continue;
            }

            let listed = SETTABLE.iter().any(|&(name, tag, max)| {
                attr.name == name && attr.value_tag() == tag && attr.count() <= max
            });

            // TODO: validate vendor attribute values, not just their names.
            if !listed && !vendor_defaults.iter().any(|name| *name == attr.name) {
                resp.unsupported(attr);
            }
        }
    }

    if resp.status() != StatusCode::SuccessfulOk {
        return false;
    }

    // Now apply changes atomically.
    let mut shared = printer.write();

    for group in &request.groups {
        if group.tag == GroupTag::Operation {
            continue;
        }

        for attr in &group.attrs {
            if create_printer && CREATE_PRINTER_PASSTHROUGH.contains(&attr.name.as_str()) {
                continue;
            }

            match attr.name.as_str() {
                "identify-actions-default" => {
                    let mut actions = IdentifyActions::NONE;
                    for keyword in attr.strings() {
                        if let Some(action) = IdentifyActions::from_keyword(keyword) {
                            actions |= action;
                        }
                    }
                    shared.driver.identify_default = actions;
                }
                "label-mode-configured" => {
                    if let Some(mode) = attr.string().and_then(LabelMode::from_keyword) {
                        shared.driver.mode_configured = Some(mode);
                    }
                }
                "label-tear-offset-configured" | "label-tear-off-configured" => {
                    if let Some(value) = attr.integer_value() {
                        shared.driver.tear_offset_configured = value;
                    }
                }
                "media-col-default" => {
                    if let Some(col) = attr.collection_value() {
                        shared.driver.media_default.import(col);
                    }
                }
                "media-col-ready" => {
                    let slots = shared.driver.media_ready.len();
                    let mut applied = 0;
                    for (i, value) in attr.values.iter().enumerate().take(slots) {
                        if let crate::attr::IppValue::Collection(col) = value {
                            shared.driver.media_ready[i].import(col);
                            applied = i + 1;
                        }
                    }
                    for slot in shared.driver.media_ready[applied..].iter_mut() {
                        slot.clear();
                    }
                }
                "media-default" => {
                    if let Some(size) = attr.string().and_then(pwg::lookup) {
                        shared.driver.media_default.set_size(&size);
                    }
                }
                "media-ready" => {
                    let slots = shared.driver.media_ready.len();
                    let mut applied = 0;
                    for (i, keyword) in attr.strings().enumerate().take(slots) {
                        if let Some(size) = pwg::lookup(keyword) {
                            shared.driver.media_ready[i].set_size(&size);
                            applied = i + 1;
                        }
                    }
                    for slot in shared.driver.media_ready[applied..].iter_mut() {
                        slot.clear();
                    }
                }
                "orientation-requested-default" => {
                    if let Some(orient) = attr.integer_value().and_then(Orientation::from_value) {
                        shared.driver.orient_default = orient;
                    }
                }
                "print-color-mode-default" => {
                    if let Some(mode) =
                        attr.string().and_then(druckwerk_core::types::ColorMode::from_keyword)
                    {
                        shared.driver.color_default = mode;
                    }
                }
                "print-content-optimize-default" => {
                    if let Some(content) = attr.string().and_then(ContentOptimize::from_keyword) {
                        shared.driver.content_default = Some(content);
                    }
                }
                "print-darkness-default" => {
                    if let Some(value) = attr.integer_value() {
                        shared.driver.darkness_default = value;
                    }
                }
                "print-quality-default" => {
                    if let Some(quality) = attr.integer_value().and_then(PrintQuality::from_value) {
                        shared.driver.quality_default = Some(quality);
                    }
                }
                "print-scaling-default" => {
                    if let Some(scaling) = attr.string().and_then(Scaling::from_keyword) {
                        shared.driver.scaling_default = Some(scaling);
                    }
                }
                "print-speed-default" => {
                    if let Some(value) = attr.integer_value() {
                        shared.driver.speed_default = value;
                    }
                }
                "printer-contact-col" => {
                    if let Some(col) = attr.collection_value() {
                        shared.contact.import(col);
                    }
                }
                "printer-darkness-configured" => {
                    if let Some(value) = attr.integer_value() {
                        shared.driver.darkness_configured = value;
                    }
                }
                "printer-geo-location" => {
                    shared.geo_location = attr.string().map(str::to_string);
                }
                "printer-location" => {
                    shared.location = attr.string().unwrap_or_default().to_string();
                }
                "printer-organization" => {
                    shared.organization = attr.string().unwrap_or_default().to_string();
                }
                // "printer-organization-unit" is a legacy alias kept for
                // requests that predate the registered name.
                "printer-organizational-unit" | "printer-organization-unit" => {
                    shared.org_unit = attr.string().unwrap_or_default().to_string();
                }
                "printer-resolution-default" => {
                    if let Some((x, y, _units)) = attr.resolution_value() {
                        shared.driver.resolution_default = (x, y);
                    }
                }
                _ => {
                    // Vendor xxx-default attribute: replace any previous copy.
                    shared.vendor_attrs.retain(|a| a.name != attr.name);
                    shared.vendor_attrs.push(attr.clone());
                }
            }
        }
    }

    // Bump strictly so a Set-then-Get pair always observes the change even
    // within one clock second.
    shared.config_time = unix_now().max(shared.config_time + 1);
    drop(shared);

    system.config_changed();
    info!(printer = printer.id(), create_printer, "printer attributes applied");

    true
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PWG 5101.1 self-describing media size names.
//
// A PWG media name has the form `class_sizename_WxHunit`, e.g.
// "iso_a4_210x297mm" or "na_letter_8.5x11in".  The dimensions are embedded
// in the name itself, so lookup is a parse rather than a table scan; a small
// alias table covers the registry names whose dimension suffix is omitted in
// the wild.

use serde::{Deserialize, Serialize};

/// Internal media units: hundredths of millimetres, as used by the IPP
/// "media-size" x-dimension/y-dimension members.
pub const HUNDREDTHS_PER_MM: i32 = 100;

/// Hundredths of millimetres per inch.
pub const HUNDREDTHS_PER_INCH: i32 = 2540;

/// A resolved media size: canonical PWG name plus dimensions in hundredths
/// of millimetres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSize {
    pub name: String,
    pub width: i32,
    pub length: i32,
}

/// Resolves a PWG self-describing media size name to its dimensions.
///
/// Returns `None` for names that do not carry a parseable dimension suffix.
pub fn lookup(name: &str) -> Option<MediaSize> {
    let dims = name.rsplit('_').next()?;

    let (dims, unit_scale) = if let Some(stripped) = dims.strip_suffix("mm") {
        (stripped, HUNDREDTHS_PER_MM as f64)
    } else if let Some(stripped) = dims.strip_suffix("in") {
        (stripped, HUNDREDTHS_PER_INCH as f64)
    } else {
        return None;
    };

    let (w, h) = dims.split_once('x')?;
    let width = parse_dimension(w, unit_scale)?;
    let length = parse_dimension(h, unit_scale)?;

    if width <= 0 || length <= 0 {
        return None;
    }

    Some(MediaSize { name: name.to_string(), width, length })
}

/// Parses one decimal dimension and scales it to hundredths of mm.
fn parse_dimension(text: &str, unit_scale: f64) -> Option<i32> {
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value * unit_scale).round() as i32)
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Druckwerk IPP printer core.
//
// Multi-valued printer capabilities (color modes, sides, identify actions,
// state reasons) are bitsets with a round-trip mapping to their IPP keyword
// vocabularies; iteration yields keywords in bit order, matching the order
// the wire attributes are emitted in.

use serde::{Deserialize, Serialize};

/// Declares a keyword bitset: a `u32` newtype whose named bits map 1:1 to
/// an IPP keyword vocabulary.
macro_rules! keyword_bitset {
    ($(#[$meta:meta])* $vis:vis struct $name:ident {
        $($(#[$vmeta:meta])* $flag:ident = $bit:literal => $kw:literal,)+
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(u32);

        impl $name {
            /// The empty set.
            pub const NONE: Self = Self(0);
            $($(#[$vmeta])* pub const $flag: Self = Self($bit);)+
            /// Every defined bit.
            pub const ALL: Self = Self($($bit |)+ 0);

            pub const fn bits(self) -> u32 {
                self.0
            }

            /// Reconstructs a set from raw bits, dropping undefined bits.
            pub const fn from_bits(bits: u32) -> Self {
                Self(bits & Self::ALL.0)
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// `true` if any bit of `other` is set in `self`.
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }

            /// Iterates the set bits as single-bit values, ascending.
            pub fn iter(self) -> impl Iterator<Item = Self> {
                (0..u32::BITS)
                    .map(|i| 1u32 << i)
                    .filter(move |bit| self.0 & bit != 0)
                    .map(Self)
            }

            /// IPP keyword for a single-bit value.
            pub fn keyword(self) -> &'static str {
                match self {
                    $(Self::$flag => $kw,)+
                    _ => "none",
                }
            }

            pub fn from_keyword(keyword: &str) -> Option<Self> {
                match keyword {
                    $($kw => Some(Self::$flag),)+
                    _ => None,
                }
            }

            /// Keywords for every set bit, in bit order.
            pub fn keywords(self) -> Vec<&'static str> {
                self.iter().map(Self::keyword).collect()
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };
}

keyword_bitset! {
    /// "print-color-mode" values a printer supports.
    pub struct ColorMode {
        AUTO = 0x0001 => "auto",
        AUTO_MONOCHROME = 0x0002 => "auto-monochrome",
        BI_LEVEL = 0x0004 => "bi-level",
        COLOR = 0x0008 => "color",
        MONOCHROME = 0x0010 => "monochrome",
        PROCESS_BI_LEVEL = 0x0020 => "process-bi-level",
        PROCESS_MONOCHROME = 0x0040 => "process-monochrome",
    }
}

keyword_bitset! {
    /// "sides" values (RFC 8011 §5.2.8).
    pub struct Sides {
        ONE_SIDED = 0x0001 => "one-sided",
        TWO_SIDED_LONG_EDGE = 0x0002 => "two-sided-long-edge",
        TWO_SIDED_SHORT_EDGE = 0x0004 => "two-sided-short-edge",
    }
}

keyword_bitset! {
    /// "identify-actions" values (PWG 5100.13).
    pub struct IdentifyActions {
        DISPLAY = 0x0001 => "display",
        FLASH = 0x0002 => "flash",
        SOUND = 0x0004 => "sound",
        SPEAK = 0x0008 => "speak",
    }
}

keyword_bitset! {
    /// "printer-state-reasons" keywords, less the paused/moving-to-paused
    /// pair which is derived from the state machine rather than stored.
    pub struct PrinterReason {
        OTHER = 0x0001 => "other",
        COVER_OPEN = 0x0002 => "cover-open",
        INPUT_TRAY_MISSING = 0x0004 => "input-tray-missing",
        MARKER_SUPPLY_EMPTY = 0x0008 => "marker-supply-empty",
        MARKER_SUPPLY_LOW = 0x0010 => "marker-supply-low",
        MEDIA_EMPTY = 0x0020 => "media-empty",
        MEDIA_JAM = 0x0040 => "media-jam",
        MEDIA_LOW = 0x0080 => "media-low",
        MEDIA_NEEDED = 0x0100 => "media-needed",
        OFFLINE = 0x0200 => "offline",
        SPOOL_AREA_FULL = 0x0400 => "spool-area-full",
        TONER_EMPTY = 0x0800 => "toner-empty",
        TONER_LOW = 0x1000 => "toner-low",
    }
}

/// IPP "printer-state" enum values (RFC 8011 §5.4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrinterState {
    Idle = 3,
    Processing = 4,
    Stopped = 5,
}

impl PrinterState {
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Fixed "printer-state-message" text for each state.
    pub fn message(self) -> &'static str {
        match self {
            Self::Idle => "Idle.",
            Self::Processing => "Printing.",
            Self::Stopped => "Stopped.",
        }
    }
}

/// IPP "job-state" enum values (RFC 8011 §5.3.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobState {
    Pending = 3,
    Held = 4,
    Processing = 5,
    Stopped = 6,
    Canceled = 7,
    Aborted = 8,
    Completed = 9,
}

impl JobState {
    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            3 => Some(Self::Pending),
            4 => Some(Self::Held),
            5 => Some(Self::Processing),
            6 => Some(Self::Stopped),
            7 => Some(Self::Canceled),
            8 => Some(Self::Aborted),
            9 => Some(Self::Completed),
            _ => None,
        }
    }

    /// Canceled, aborted, and completed jobs can no longer change state.
    pub fn is_terminal(self) -> bool {
        self >= Self::Canceled
    }

    /// "job-state-reasons" keyword derived from the state.
    pub fn reason_keyword(self) -> &'static str {
        match self {
            Self::Pending => "none",
            Self::Held => "job-hold-until-specified",
            Self::Processing => "job-printing",
            Self::Stopped => "job-stopped",
            Self::Canceled => "job-canceled-by-user",
            Self::Aborted => "aborted-by-system",
            Self::Completed => "job-completed-successfully",
        }
    }

    /// "job-state-message" text derived from the state.
    pub fn message(self) -> &'static str {
        match self {
            Self::Pending => "Job pending.",
            Self::Held => "Job held.",
            Self::Processing => "Job printing.",
            Self::Stopped => "Job stopped.",
            Self::Canceled => "Job canceled.",
            Self::Aborted => "Job aborted.",
            Self::Completed => "Job completed.",
        }
    }
}

/// IPP "orientation-requested" enum values (RFC 8011 §5.2.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait = 3,
    Landscape = 4,
    ReverseLandscape = 5,
    ReversePortrait = 6,
    /// No requested orientation; the upstream validator admits this value
    /// for job submission.
    None = 7,
}

impl Orientation {
    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            3 => Some(Self::Portrait),
            4 => Some(Self::Landscape),
            5 => Some(Self::ReverseLandscape),
            6 => Some(Self::ReversePortrait),
            7 => Some(Self::None),
            _ => None,
        }
    }
}

/// IPP "print-quality" enum values (RFC 8011 §5.2.13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintQuality {
    Draft = 3,
    Normal = 4,
    High = 5,
}

impl PrintQuality {
    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            3 => Some(Self::Draft),
            4 => Some(Self::Normal),
            5 => Some(Self::High),
            _ => None,
        }
    }
}

/// "print-content-optimize" keywords (PWG 5100.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentOptimize {
    Auto,
    Graphic,
    Photo,
    Text,
    TextAndGraphic,
}

impl ContentOptimize {
    pub const ALL: [Self; 5] = [
        Self::Auto,
        Self::Graphic,
        Self::Photo,
        Self::Text,
        Self::TextAndGraphic,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Graphic => "graphic",
            Self::Photo => "photo",
            Self::Text => "text",
            Self::TextAndGraphic => "text-and-graphic",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.keyword() == keyword)
    }
}

/// "print-scaling" keywords (PWG 5100.16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    Auto,
    AutoFit,
    Fill,
    Fit,
    None,
}

impl Scaling {
    pub const ALL: [Self; 5] = [Self::Auto, Self::AutoFit, Self::Fill, Self::Fit, Self::None];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::AutoFit => "auto-fit",
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::None => "none",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.keyword() == keyword)
    }
}

/// "label-mode-xxx" keywords for label printers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelMode {
    Applicator,
    Cutter,
    CutterDelayed,
    Kiosk,
    PeelOff,
    PeelOffPrepeel,
    Rewind,
    Rfid,
    TearOff,
}

impl LabelMode {
    pub const ALL: [Self; 9] = [
        Self::Applicator,
        Self::Cutter,
        Self::CutterDelayed,
        Self::Kiosk,
        Self::PeelOff,
        Self::PeelOffPrepeel,
        Self::Rewind,
        Self::Rfid,
        Self::TearOff,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Applicator => "applicator",
            Self::Cutter => "cutter",
            Self::CutterDelayed => "cutter-delayed",
            Self::Kiosk => "kiosk",
            Self::PeelOff => "peel-off",
            Self::PeelOffPrepeel => "peel-off-prepeel",
            Self::Rewind => "rewind",
            Self::Rfid => "rfid",
            Self::TearOff => "tear-off",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.keyword() == keyword)
    }
}

/// Colorant of a supply, reported in "printer-supply" and "marker-colors".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyColor {
    NoColor,
    Black,
    Cyan,
    Gray,
    Green,
    LightCyan,
    LightGray,
    LightMagenta,
    Magenta,
    Orange,
    Violet,
    Yellow,
}

impl SupplyColor {
    /// "colorantname=" value for the "printer-supply" octet string.
    pub fn colorant_name(self) -> &'static str {
        match self {
            Self::NoColor => "no-color",
            Self::Black => "black",
            Self::Cyan => "cyan",
            Self::Gray => "gray",
            Self::Green => "green",
            Self::LightCyan => "light-cyan",
            Self::LightGray => "light-gray",
            Self::LightMagenta => "light-magenta",
            Self::Magenta => "magenta",
            Self::Orange => "orange",
            Self::Violet => "violet",
            Self::Yellow => "yellow",
        }
    }

    /// sRGB hex value for the "marker-colors" attribute.
    pub fn marker_color(self) -> &'static str {
        match self {
            Self::NoColor => "#FFFFFF",
            Self::Black => "#000000",
            Self::Cyan => "#00FFFF",
            Self::Gray => "#808080",
            Self::Green => "#00CC00",
            Self::LightCyan => "#E0FFFF",
            Self::LightGray => "#D3D3D3",
            Self::LightMagenta => "#FF77FF",
            Self::Magenta => "#FF00FF",
            Self::Orange => "#FFA500",
            Self::Violet => "#EE82EE",
            Self::Yellow => "#FFFF00",
        }
    }
}

/// Kind of supply, using the PWG marker-types registry keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyType {
    Ink,
    InkCartridge,
    InkRibbon,
    Toner,
    TonerCartridge,
    Developer,
    Fuser,
    FuserOil,
    WasteInk,
    WasteToner,
    CleanerUnit,
    OpcUnit,
    TransferUnit,
    Unspecified,
}

impl SupplyType {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Ink => "ink",
            Self::InkCartridge => "inkCartridge",
            Self::InkRibbon => "inkRibbon",
            Self::Toner => "toner",
            Self::TonerCartridge => "tonerCartridge",
            Self::Developer => "developer",
            Self::Fuser => "fuser",
            Self::FuserOil => "fuserOil",
            Self::WasteInk => "wasteInk",
            Self::WasteToner => "wasteToner",
            Self::CleanerUnit => "cleanerUnit",
            Self::OpcUnit => "opc",
            Self::TransferUnit => "transferUnit",
            Self::Unspecified => "unspecified",
        }
    }
}

/// One consumable slot reported by the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    pub description: String,
    pub color: SupplyColor,
    pub type_: SupplyType,
    /// Fill level, 0..=100.
    pub level: i32,
    /// `true` for supplies that deplete (ink), `false` for ones that fill
    /// (waste containers).
    pub is_consumed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitset_keyword_round_trip() {
        for bit in ColorMode::ALL.iter() {
            assert_eq!(ColorMode::from_keyword(bit.keyword()), Some(bit));
        }
        for bit in PrinterReason::ALL.iter() {
            assert_eq!(PrinterReason::from_keyword(bit.keyword()), Some(bit));
        }
    }

    #[test]
    fn bitset_iteration_is_bit_ordered() {
        let set = Sides::TWO_SIDED_SHORT_EDGE | Sides::ONE_SIDED;
        let keywords = set.keywords();
        assert_eq!(keywords, vec!["one-sided", "two-sided-short-edge"]);
    }

    #[test]
    fn bitset_from_bits_masks_undefined() {
        let set = IdentifyActions::from_bits(0xFFFF_FFFF);
        assert_eq!(set, IdentifyActions::ALL);
    }

    #[test]
    fn intersects_is_any_common_bit() {
        let supported = ColorMode::AUTO | ColorMode::COLOR | ColorMode::MONOCHROME;
        assert!(supported.intersects(ColorMode::COLOR));
        assert!(!supported.intersects(ColorMode::BI_LEVEL));
        assert!(!supported.intersects(ColorMode::NONE));
    }

    #[test]
    fn job_state_terminality() {
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::Stopped.is_terminal());
        assert!(JobState::Canceled.is_terminal());
        assert!(JobState::Aborted.is_terminal());
        assert!(JobState::Completed.is_terminal());
    }

    #[test]
    fn orientation_admits_none() {
        assert_eq!(Orientation::from_value(7), Some(Orientation::None));
        assert_eq!(Orientation::from_value(2), None);
        assert_eq!(Orientation::from_value(8), None);
    }

    #[test]
    fn quality_enum_range() {
        assert_eq!(PrintQuality::from_value(3), Some(PrintQuality::Draft));
        assert_eq!(PrintQuality::from_value(5), Some(PrintQuality::High));
        assert_eq!(PrintQuality::from_value(6), None);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed IPP attribute model.
//
// The transport codec decodes the binary message (RFC 8010) into this
// representation and encodes responses back out of it; the core never sees
// wire bytes.  An attribute is a named list of one-or-more tagged values;
// requests and responses are ordered sequences of attribute groups.

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Resolution units (RFC 8010 §3.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionUnits {
    PerInch,
    PerCm,
}

/// One IPP attribute value, discriminated by its wire value tag.
#[derive(Debug, Clone, PartialEq)]
pub enum IppValue {
    Integer(i32),
    Enum(i32),
    Boolean(bool),
    Keyword(String),
    Name(String),
    NameLang { lang: String, text: String },
    Text(String),
    Uri(String),
    Charset(String),
    NaturalLanguage(String),
    MimeType(String),
    Resolution { x: i32, y: i32, units: ResolutionUnits },
    Range { lower: i32, upper: i32 },
    DateTime(DateTime<Utc>),
    OctetString(Vec<u8>),
    Collection(IppCollection),
    /// Out-of-band "unknown" value (RFC 8010 §3.8).
    Unknown,
}

/// Value tag discriminator, used by the settable-attribute allowlist and
/// the per-attribute syntax checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTag {
    Integer,
    Enum,
    Boolean,
    Keyword,
    Name,
    NameLang,
    Text,
    Uri,
    Charset,
    NaturalLanguage,
    MimeType,
    Resolution,
    Range,
    DateTime,
    OctetString,
    Collection,
    Unknown,
}

impl IppValue {
    pub fn tag(&self) -> ValueTag {
        match self {
            Self::Integer(_) => ValueTag::Integer,
            Self::Enum(_) => ValueTag::Enum,
            Self::Boolean(_) => ValueTag::Boolean,
            Self::Keyword(_) => ValueTag::Keyword,
            Self::Name(_) => ValueTag::Name,
            Self::NameLang { .. } => ValueTag::NameLang,
            Self::Text(_) => ValueTag::Text,
            Self::Uri(_) => ValueTag::Uri,
            Self::Charset(_) => ValueTag::Charset,
            Self::NaturalLanguage(_) => ValueTag::NaturalLanguage,
            Self::MimeType(_) => ValueTag::MimeType,
            Self::Resolution { .. } => ValueTag::Resolution,
            Self::Range { .. } => ValueTag::Range,
            Self::DateTime(_) => ValueTag::DateTime,
            Self::OctetString(_) => ValueTag::OctetString,
            Self::Collection(_) => ValueTag::Collection,
            Self::Unknown => ValueTag::Unknown,
        }
    }

    /// Text content for the string-like tags.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Keyword(s)
            | Self::Name(s)
            | Self::Text(s)
            | Self::Uri(s)
            | Self::Charset(s)
            | Self::NaturalLanguage(s)
            | Self::MimeType(s) => Some(s),
            Self::NameLang { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(v) | Self::Enum(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// An ordered set of member attributes (the begCollection value syntax).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IppCollection {
    pub members: Vec<IppAttribute>,
}

impl IppCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, member: IppAttribute) -> Self {
        self.members.push(member);
        self
    }

    pub fn member(&self, name: &str) -> Option<&IppAttribute> {
        self.members.iter().find(|m| m.name == name)
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// A named attribute carrying one or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct IppAttribute {
    pub name: String,
    pub values: Vec<IppValue>,
}

impl IppAttribute {
    pub fn new(name: impl Into<String>, values: Vec<IppValue>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, vec![IppValue::Integer(value)])
    }

    pub fn integers(name: impl Into<String>, values: impl IntoIterator<Item = i32>) -> Self {
        Self::new(name, values.into_iter().map(IppValue::Integer).collect())
    }

    pub fn enum_value(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, vec![IppValue::Enum(value)])
    }

    pub fn enums(name: impl Into<String>, values: impl IntoIterator<Item = i32>) -> Self {
        Self::new(name, values.into_iter().map(IppValue::Enum).collect())
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, vec![IppValue::Boolean(value)])
    }

    pub fn keyword(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::Keyword(value.into())])
    }

    pub fn keywords<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values.into_iter().map(|v| IppValue::Keyword(v.into())).collect(),
        )
    }

    pub fn name_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::Name(value.into())])
    }

    pub fn names<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values.into_iter().map(|v| IppValue::Name(v.into())).collect(),
        )
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::Text(value.into())])
    }

    pub fn texts<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values.into_iter().map(|v| IppValue::Text(v.into())).collect(),
        )
    }

    pub fn uri(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::Uri(value.into())])
    }

    pub fn uris<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values.into_iter().map(|v| IppValue::Uri(v.into())).collect(),
        )
    }

    pub fn charset(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::Charset(value.into())])
    }

    pub fn natural_language(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::NaturalLanguage(value.into())])
    }

    pub fn natural_languages<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values
                .into_iter()
                .map(|v| IppValue::NaturalLanguage(v.into()))
                .collect(),
        )
    }

    pub fn mime_type(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::MimeType(value.into())])
    }

    pub fn mime_types<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values.into_iter().map(|v| IppValue::MimeType(v.into())).collect(),
        )
    }

    pub fn resolution(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self::new(
            name,
            vec![IppValue::Resolution { x, y, units: ResolutionUnits::PerInch }],
        )
    }

    pub fn resolutions(name: impl Into<String>, values: &[(i32, i32)]) -> Self {
        Self::new(
            name,
            values
                .iter()
                .map(|&(x, y)| IppValue::Resolution { x, y, units: ResolutionUnits::PerInch })
                .collect(),
        )
    }

    pub fn range(name: impl Into<String>, lower: i32, upper: i32) -> Self {
        Self::new(name, vec![IppValue::Range { lower, upper }])
    }

    pub fn date_time(name: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(name, vec![IppValue::DateTime(value)])
    }

    pub fn octet_string(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(name, vec![IppValue::OctetString(value.into())])
    }

    pub fn octet_strings<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        Self::new(
            name,
            values
                .into_iter()
                .map(|v| IppValue::OctetString(v.into()))
                .collect(),
        )
    }

    pub fn collection(name: impl Into<String>, value: IppCollection) -> Self {
        Self::new(name, vec![IppValue::Collection(value)])
    }

    pub fn collections(
        name: impl Into<String>,
        values: impl IntoIterator<Item = IppCollection>,
    ) -> Self {
        Self::new(name, values.into_iter().map(IppValue::Collection).collect())
    }

    /// Out-of-band "unknown" single value.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::new(name, vec![IppValue::Unknown])
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Tag of the first value; `Unknown` for an empty value list.
    pub fn value_tag(&self) -> ValueTag {
        self.values.first().map_or(ValueTag::Unknown, IppValue::tag)
    }

    /// `true` when every value carries the given tag.
    pub fn is_1set_of(&self, tag: ValueTag) -> bool {
        !self.values.is_empty() && self.values.iter().all(|v| v.tag() == tag)
    }

    /// First value as text, for the string-like tags.
    pub fn string(&self) -> Option<&str> {
        self.values.first().and_then(IppValue::as_str)
    }

    /// First value as an integer (integer or enum tag).
    pub fn integer_value(&self) -> Option<i32> {
        self.values.first().and_then(IppValue::as_integer)
    }

    pub fn boolean_value(&self) -> Option<bool> {
        match self.values.first() {
            Some(IppValue::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn range_value(&self) -> Option<(i32, i32)> {
        match self.values.first() {
            Some(IppValue::Range { lower, upper }) => Some((*lower, *upper)),
            _ => None,
        }
    }

    pub fn resolution_value(&self) -> Option<(i32, i32, ResolutionUnits)> {
        match self.values.first() {
            Some(IppValue::Resolution { x, y, units }) => Some((*x, *y, *units)),
            _ => None,
        }
    }

    pub fn collection_value(&self) -> Option<&IppCollection> {
        match self.values.first() {
            Some(IppValue::Collection(col)) => Some(col),
            _ => None,
        }
    }

    /// String values in order, for 1setOf keyword/name attributes.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(IppValue::as_str)
    }

    pub fn contains_string(&self, wanted: &str) -> bool {
        self.strings().any(|s| s == wanted)
    }

    /// `true` if any integer value equals `wanted` or any range contains it.
    pub fn contains_integer(&self, wanted: i32) -> bool {
        self.values.iter().any(|v| match v {
            IppValue::Integer(n) | IppValue::Enum(n) => *n == wanted,
            IppValue::Range { lower, upper } => *lower <= wanted && wanted <= *upper,
            _ => false,
        })
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Attribute group delimiter tags (RFC 8010 §3.5.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupTag {
    Operation,
    Job,
    Printer,
    Unsupported,
    System,
}

/// A delimited group of attributes within a request.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrGroup {
    pub tag: GroupTag,
    pub attrs: Vec<IppAttribute>,
}

impl AttrGroup {
    pub fn new(tag: GroupTag) -> Self {
        Self { tag, attrs: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<&IppAttribute> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

// ---------------------------------------------------------------------------
// Operations and status codes
// ---------------------------------------------------------------------------

/// Printer-scoped IPP operations the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PrintJob,
    ValidateJob,
    CreateJob,
    GetJobs,
    GetPrinterAttributes,
    PausePrinter,
    ResumePrinter,
    SetPrinterAttributes,
    CancelCurrentJob,
    CancelJobs,
    CancelMyJobs,
    IdentifyPrinter,
    CreatePrinter,
}

impl Operation {
    pub fn code(self) -> u16 {
        match self {
            Self::PrintJob => 0x0002,
            Self::ValidateJob => 0x0004,
            Self::CreateJob => 0x0005,
            Self::GetJobs => 0x000A,
            Self::GetPrinterAttributes => 0x000B,
            Self::PausePrinter => 0x0010,
            Self::ResumePrinter => 0x0011,
            Self::SetPrinterAttributes => 0x0013,
            Self::CancelCurrentJob => 0x002D,
            Self::CancelJobs => 0x0038,
            Self::CancelMyJobs => 0x0039,
            Self::IdentifyPrinter => 0x003C,
            Self::CreatePrinter => 0x004C,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0002 => Some(Self::PrintJob),
            0x0004 => Some(Self::ValidateJob),
            0x0005 => Some(Self::CreateJob),
            0x000A => Some(Self::GetJobs),
            0x000B => Some(Self::GetPrinterAttributes),
            0x0010 => Some(Self::PausePrinter),
            0x0011 => Some(Self::ResumePrinter),
            0x0013 => Some(Self::SetPrinterAttributes),
            0x002D => Some(Self::CancelCurrentJob),
            0x0038 => Some(Self::CancelJobs),
            0x0039 => Some(Self::CancelMyJobs),
            0x003C => Some(Self::IdentifyPrinter),
            0x004C => Some(Self::CreatePrinter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PrintJob => "Print-Job",
            Self::ValidateJob => "Validate-Job",
            Self::CreateJob => "Create-Job",
            Self::GetJobs => "Get-Jobs",
            Self::GetPrinterAttributes => "Get-Printer-Attributes",
            Self::PausePrinter => "Pause-Printer",
            Self::ResumePrinter => "Resume-Printer",
            Self::SetPrinterAttributes => "Set-Printer-Attributes",
            Self::CancelCurrentJob => "Cancel-Current-Job",
            Self::CancelJobs => "Cancel-Jobs",
            Self::CancelMyJobs => "Cancel-My-Jobs",
            Self::IdentifyPrinter => "Identify-Printer",
            Self::CreatePrinter => "Create-Printer",
        }
    }
}

/// IPP status codes emitted by the core (RFC 8011 §4.1.8 registry values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    SuccessfulOk,
    ClientErrorBadRequest,
    ClientErrorNotPossible,
    ClientErrorNotFound,
    ClientErrorAttributesOrValues,
    ServerErrorInternal,
    ServerErrorOperationNotSupported,
    ServerErrorNotAcceptingJobs,
    ServerErrorBusy,
}

impl StatusCode {
    pub fn code(self) -> u16 {
        match self {
            Self::SuccessfulOk => 0x0000,
            Self::ClientErrorBadRequest => 0x0400,
            Self::ClientErrorNotPossible => 0x0404,
            Self::ClientErrorNotFound => 0x0406,
            Self::ClientErrorAttributesOrValues => 0x040B,
            Self::ServerErrorInternal => 0x0500,
            Self::ServerErrorOperationNotSupported => 0x0501,
            Self::ServerErrorNotAcceptingJobs => 0x0506,
            Self::ServerErrorBusy => 0x0507,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A decoded IPP request as handed over by the transport.
#[derive(Debug, Clone)]
pub struct IppRequest {
    /// Raw operation code; may name an operation the core does not know.
    pub operation_code: u16,
    /// Request id, echoed into the response.
    pub request_id: u32,
    /// "attributes-natural-language" from the operation group.
    pub natural_language: String,
    pub groups: Vec<AttrGroup>,
}

impl IppRequest {
    pub fn new(operation: Operation, request_id: u32) -> Self {
        Self {
            operation_code: operation.code(),
            request_id,
            natural_language: "en".into(),
            groups: Vec::new(),
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        Operation::from_code(self.operation_code)
    }

    /// Appends an attribute, creating the trailing group if needed.
    pub fn add(&mut self, tag: GroupTag, attr: IppAttribute) {
        match self.groups.last_mut() {
            Some(group) if group.tag == tag => group.attrs.push(attr),
            _ => {
                let mut group = AttrGroup::new(tag);
                group.attrs.push(attr);
                self.groups.push(group);
            }
        }
    }

    /// Builder form of [`add`](Self::add), for tests and transports.
    pub fn with(mut self, tag: GroupTag, attr: IppAttribute) -> Self {
        self.add(tag, attr);
        self
    }

    /// Finds an attribute by name in any group.
    pub fn attr(&self, name: &str) -> Option<&IppAttribute> {
        self.groups.iter().find_map(|g| g.get(name))
    }

    /// Finds an attribute by name within groups carrying `tag`.
    pub fn attr_in(&self, tag: GroupTag, name: &str) -> Option<&IppAttribute> {
        self.groups
            .iter()
            .filter(|g| g.tag == tag)
            .find_map(|g| g.get(name))
    }

    /// First value of the named attribute as text.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(IppAttribute::string)
    }

    pub fn integer(&self, name: &str) -> Option<i32> {
        self.attr(name).and_then(IppAttribute::integer_value)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.attr(name).and_then(IppAttribute::boolean_value)
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// One entry of the ordered response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseItem {
    Attr(GroupTag, IppAttribute),
    /// Group separator between per-job attribute sub-sequences in Get-Jobs.
    Separator,
}

/// An IPP response under construction: one status code, an optional status
/// message, and an ordered sequence of grouped attributes.
#[derive(Debug, Clone)]
pub struct IppResponse {
    pub request_id: u32,
    status: StatusCode,
    status_set: bool,
    message: Option<String>,
    items: Vec<ResponseItem>,
}

impl IppResponse {
    pub fn new(request_id: u32) -> Self {
        Self {
            request_id,
            status: StatusCode::SuccessfulOk,
            status_set: false,
            message: None,
            items: Vec::new(),
        }
    }

    /// Sets the status code and message.  Handlers call this exactly once on
    /// the success or failure path; the unsupported-attribute path may have
    /// set a status earlier, in which case the later call still wins.
    pub fn respond(&mut self, status: StatusCode, message: impl Into<Option<String>>) {
        self.status = status;
        self.status_set = true;
        self.message = message.into();
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_set(&self) -> bool {
        self.status_set
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Records an unsupported request attribute: copies it into the
    /// unsupported group and, unless a non-OK status is already present,
    /// sets `client-error-attributes-or-values-not-supported`.
    pub fn unsupported(&mut self, attr: &IppAttribute) {
        if !self.status_set || self.status == StatusCode::SuccessfulOk {
            self.respond(
                StatusCode::ClientErrorAttributesOrValues,
                Some(format!("Unsupported {} attribute.", attr.name)),
            );
        }
        self.items
            .push(ResponseItem::Attr(GroupTag::Unsupported, attr.clone()));
    }

    pub fn add(&mut self, tag: GroupTag, attr: IppAttribute) {
        self.items.push(ResponseItem::Attr(tag, attr));
    }

    pub fn add_separator(&mut self) {
        self.items.push(ResponseItem::Separator);
    }

    pub fn items(&self) -> &[ResponseItem] {
        &self.items
    }

    /// Attributes within groups carrying `tag`, in emission order.
    pub fn attrs(&self, tag: GroupTag) -> impl Iterator<Item = &IppAttribute> {
        self.items.iter().filter_map(move |item| match item {
            ResponseItem::Attr(t, attr) if *t == tag => Some(attr),
            _ => None,
        })
    }

    pub fn get(&self, tag: GroupTag, name: &str) -> Option<&IppAttribute> {
        self.attrs(tag).find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_accessors() {
        let attr = IppAttribute::keywords("media-supported", ["iso_a4_210x297mm", "na_letter_8.5x11in"]);
        assert_eq!(attr.count(), 2);
        assert_eq!(attr.value_tag(), ValueTag::Keyword);
        assert!(attr.is_1set_of(ValueTag::Keyword));
        assert!(attr.contains_string("na_letter_8.5x11in"));
        assert!(!attr.contains_string("iso_a3_297x420mm"));
    }

    #[test]
    fn contains_integer_honours_ranges() {
        let attr = IppAttribute::range("copies-supported", 1, 999);
        assert!(attr.contains_integer(1));
        assert!(attr.contains_integer(999));
        assert!(!attr.contains_integer(1000));
    }

    #[test]
    fn mixed_value_tags_fail_1set_check() {
        let attr = IppAttribute::new(
            "odd",
            vec![IppValue::Integer(1), IppValue::Keyword("x".into())],
        );
        assert!(!attr.is_1set_of(ValueTag::Integer));
    }

    #[test]
    fn request_group_lookup() {
        let req = IppRequest::new(Operation::GetJobs, 1)
            .with(GroupTag::Operation, IppAttribute::keyword("which-jobs", "all"))
            .with(GroupTag::Job, IppAttribute::integer("copies", 2));

        assert_eq!(req.string("which-jobs"), Some("all"));
        assert!(req.attr_in(GroupTag::Operation, "copies").is_none());
        assert_eq!(
            req.attr_in(GroupTag::Job, "copies").and_then(IppAttribute::integer_value),
            Some(2)
        );
    }

    #[test]
    fn unsupported_sets_status_once() {
        let mut resp = IppResponse::new(7);
        resp.unsupported(&IppAttribute::integer("copies", 1000));
        assert_eq!(resp.status(), StatusCode::ClientErrorAttributesOrValues);

        // An explicit status set by the handler afterwards wins.
        resp.respond(StatusCode::ClientErrorBadRequest, None);
        assert_eq!(resp.status(), StatusCode::ClientErrorBadRequest);
        assert_eq!(resp.attrs(GroupTag::Unsupported).count(), 1);
    }

    #[test]
    fn operation_code_round_trip() {
        for op in [
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
            Operation::CreatePrinter,
        ] {
            assert_eq!(Operation::from_code(op.code()), Some(op));
        }
        assert_eq!(Operation::from_code(0x3FFF), None);
    }
}

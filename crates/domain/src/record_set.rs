use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::name::reverse_name_for;
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    PTR,
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::PTR => "PTR",
            RecordType::Other(s) => s.as_str(),
        }
    }

    /// A and AAAA sets drive reverse-record synchronization.
    pub fn is_address(&self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA)
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "PTR" => RecordType::PTR,
            other => RecordType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RecordType::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub content: String,

    #[serde(default)]
    pub disabled: bool,

    /// Ask for a matching PTR record in the reverse zone.
    #[serde(rename = "set-ptr", default, skip_serializing_if = "is_false")]
    pub set_ptr: bool,
}

impl Record {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
            set_ptr: false,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One rrset change in the authoritative server's PATCH format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordChange {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    #[serde(default)]
    pub ttl: u32,

    pub changetype: ChangeType,

    #[serde(default)]
    pub records: Vec<Record>,
}

impl ResourceRecordChange {
    pub fn wants_ptr(&self) -> bool {
        self.records.iter().any(|r| r.set_ptr)
    }

    /// The PTR upsert that mirrors `record` into the reverse zone: named after
    /// the record's address, pointing back at this rrset's name.
    pub fn reverse_change(&self, record: &Record) -> Result<ResourceRecordChange, DomainError> {
        Ok(ResourceRecordChange {
            name: reverse_name_for(&record.content)?,
            record_type: RecordType::PTR,
            ttl: self.ttl,
            changetype: ChangeType::Replace,
            records: vec![Record::new(self.name.clone())],
        })
    }
}

/// Body of a zone PATCH request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePatch {
    #[serde(default)]
    pub rrsets: Vec<ResourceRecordChange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchObjectType {
    All,
    Zone,
    Record,
    Comment,
}

impl SearchObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchObjectType::All => "all",
            SearchObjectType::Zone => "zone",
            SearchObjectType::Record => "record",
            SearchObjectType::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,

    #[serde(rename = "type", default)]
    pub record_type: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub zone: String,

    #[serde(default)]
    pub object_type: String,
}

impl SearchResult {
    pub fn is_ptr(&self) -> bool {
        self.record_type.eq_ignore_ascii_case("PTR")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlushResult {
    pub count: u64,
    #[serde(default)]
    pub result: String,
}

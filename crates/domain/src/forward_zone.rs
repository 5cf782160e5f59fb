use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::name::canonicalize;
use crate::DomainError;

/// Marker the recursor reads as "recursion desired" in front of a line.
pub const RECURSION_DESIRED_PREFIX: char = '+';

/// A domain plus the nameservers the recursor should ask for it.
///
/// Equality and ordering only look at the canonical, case-folded name;
/// nameserver order is preserved but never compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardZone {
    pub name: String,
    pub nameservers: Vec<String>,
}

impl ForwardZone {
    pub fn new(name: &str, nameservers: Vec<String>) -> Self {
        Self {
            name: canonicalize(name),
            nameservers,
        }
    }

    /// Parses one `<name>=<ns1,ns2,...>` line.
    pub fn parse_line(line: &str) -> Result<Self, DomainError> {
        let trimmed = line.trim();
        let body = trimmed
            .strip_prefix(RECURSION_DESIRED_PREFIX)
            .unwrap_or(trimmed);

        let (name, servers) = body
            .split_once('=')
            .ok_or_else(|| malformed(line, "missing '='"))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(malformed(line, "empty zone name"));
        }
        if !name.chars().all(is_name_char) {
            return Err(malformed(line, "invalid characters in zone name"));
        }

        let nameservers: Vec<String> = servers
            .split(',')
            .map(|token| token.trim().to_string())
            .collect();

        for ns in &nameservers {
            if ns.is_empty() {
                return Err(malformed(line, "empty nameserver"));
            }
            if !ns.chars().all(is_nameserver_char) {
                return Err(malformed(line, "invalid characters in nameserver"));
            }
        }

        Ok(Self {
            name: canonicalize(name),
            nameservers,
        })
    }

    /// Serialized line, newline terminated, name always canonical.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Case-folded canonical name used for comparisons.
    pub fn key(&self) -> String {
        zone_key(&self.name)
    }

    pub fn validate(&self) -> Result<Self, DomainError> {
        Self::parse_line(&self.serialize())
    }

    /// Checks a zone name taken from a request path.
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(DomainError::InvalidForwardZone(format!(
                "invalid forward-zone name '{}'",
                name
            )));
        }
        Ok(())
    }
}

pub(crate) fn zone_key(name: &str) -> String {
    canonicalize(name.trim()).to_ascii_lowercase()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

fn is_nameserver_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == ':' || c == '-'
}

fn malformed(line: &str, reason: &str) -> DomainError {
    DomainError::InvalidForwardZone(format!(
        "failed to parse forward-zones line '{}': {}",
        line.trim_end(),
        reason
    ))
}

impl fmt::Display for ForwardZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}={}",
            canonicalize(&self.name),
            self.nameservers.join(",")
        )
    }
}

impl FromStr for ForwardZone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl PartialEq for ForwardZone {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ForwardZone {}

impl PartialOrd for ForwardZone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ForwardZone {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

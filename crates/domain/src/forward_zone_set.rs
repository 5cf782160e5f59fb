use serde::{Deserialize, Serialize};

use crate::forward_zone::{zone_key, ForwardZone};
use crate::name::canonicalize;
use crate::DomainError;

/// Forward zones unique by canonical name.
///
/// Every mutation reads the whole set, changes it in memory and writes it back
/// in full; the operations below are pure transformations of that snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForwardZoneSet {
    zones: Vec<ForwardZone>,
}

impl ForwardZoneSet {
    pub fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Parses a whole forward-zones file. Blank lines and `#` comments are
    /// skipped; the first malformed line aborts the parse.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut set = Self::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            set = set.upsert(ForwardZone::parse_line(trimmed)?);
        }
        Ok(set)
    }

    /// Decodes the JSON array wire format and validates every entry by
    /// re-parsing its serialized line.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let input: Vec<ForwardZone> = serde_json::from_slice(bytes).map_err(|e| {
            DomainError::InvalidForwardZone(format!("parsing forward-zones: {}", e))
        })?;

        let mut set = Self::new();
        for zone in input {
            set = set.upsert(zone.validate()?);
        }
        Ok(set)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(&self.zones).map_err(|e| {
            DomainError::InvalidForwardZone(format!("encoding forward-zones: {}", e))
        })
    }

    /// Concatenated serialized lines, one zone per line.
    pub fn render(&self) -> String {
        self.zones.iter().map(ForwardZone::serialize).collect()
    }

    /// Sorts the set by name and binary-searches it. Callers must not rely on
    /// the previous ordering afterwards.
    pub fn exists(&mut self, name: &str) -> bool {
        self.zones.sort();
        let key = zone_key(name);
        self.zones
            .binary_search_by(|zone| zone.key().cmp(&key))
            .is_ok()
    }

    pub fn find(&self, name: &str) -> Option<&ForwardZone> {
        let key = zone_key(name);
        self.zones.iter().find(|zone| zone.key() == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Replaces a zone with the same name in place, otherwise appends.
    pub fn upsert(mut self, zone: ForwardZone) -> Self {
        let zone = ForwardZone::new(&zone.name, zone.nameservers);
        match self.position(&zone.name) {
            Some(idx) => self.zones[idx] = zone,
            None => self.zones.push(zone),
        }
        self
    }

    /// Appends a zone that must not exist yet.
    pub fn insert_new(self, zone: ForwardZone) -> Result<Self, DomainError> {
        if self.contains(&zone.name) {
            return Err(DomainError::ForwardZoneAlreadyExists(zone.name));
        }
        Ok(self.upsert(zone))
    }

    /// Replaces a zone that must already exist.
    pub fn update(self, zone: ForwardZone) -> Result<Self, DomainError> {
        let name = zone.name.clone();
        self.replace(&name, zone)
    }

    /// Replaces the zone called `name` with `zone`, which may carry a new
    /// name as long as no other entry already uses it.
    pub fn replace(mut self, name: &str, zone: ForwardZone) -> Result<Self, DomainError> {
        let idx = self
            .position(name)
            .ok_or_else(|| DomainError::ForwardZoneNotFound(canonicalize(name)))?;

        if let Some(other) = self.position(&zone.name) {
            if other != idx {
                return Err(DomainError::ForwardZoneAlreadyExists(zone.name));
            }
        }

        self.zones[idx] = ForwardZone::new(&zone.name, zone.nameservers);
        Ok(self)
    }

    /// Removes the first zone with the given name.
    pub fn delete(mut self, name: &str) -> Result<Self, DomainError> {
        let idx = self
            .position(name)
            .ok_or_else(|| DomainError::ForwardZoneNotFound(canonicalize(name)))?;
        self.zones.remove(idx);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForwardZone> {
        self.zones.iter()
    }

    pub fn as_slice(&self) -> &[ForwardZone] {
        &self.zones
    }

    pub fn into_vec(self) -> Vec<ForwardZone> {
        self.zones
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = zone_key(name);
        self.zones.iter().position(|zone| zone.key() == key)
    }
}

impl FromIterator<ForwardZone> for ForwardZoneSet {
    fn from_iter<I: IntoIterator<Item = ForwardZone>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ForwardZoneSet::new(), |set, zone| set.upsert(zone))
    }
}

impl<'a> IntoIterator for &'a ForwardZoneSet {
    type Item = &'a ForwardZone;
    type IntoIter = std::slice::Iter<'a, ForwardZone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

impl IntoIterator for ForwardZoneSet {
    type Item = ForwardZone;
    type IntoIter = std::vec::IntoIter<ForwardZone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.into_iter()
    }
}

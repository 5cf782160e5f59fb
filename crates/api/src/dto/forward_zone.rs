use zonesync_domain::{DomainError, ForwardZone, ForwardZoneSet, ZonePatch};

// Bodies are decoded by hand so malformed input gets the same JSON error
// shape as every other failure.

pub fn parse_zone_set(body: &[u8]) -> Result<ForwardZoneSet, DomainError> {
    ForwardZoneSet::from_json(body)
}

pub fn parse_zone(body: &[u8]) -> Result<ForwardZone, DomainError> {
    let zone: ForwardZone = serde_json::from_slice(body)
        .map_err(|e| DomainError::InvalidForwardZone(format!("parsing forward-zone: {}", e)))?;
    zone.validate()
}

pub fn parse_zone_patch(body: &[u8]) -> Result<ZonePatch, DomainError> {
    serde_json::from_slice(body)
        .map_err(|e| DomainError::InvalidInput(format!("parsing rrsets: {}", e)))
}

//! Domain name helpers shared by the forward-zone codec and the reverse
//! record synchronizer.

use std::net::IpAddr;

use crate::DomainError;

/// Appends the trailing dot if it is missing. Empty input stays empty.
pub fn canonicalize(name: &str) -> String {
    if name.is_empty() || name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Strips a single trailing dot.
pub fn decanonicalize(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

pub fn names_equal(a: &str, b: &str) -> bool {
    decanonicalize(a).eq_ignore_ascii_case(decanonicalize(b))
}

/// Reverse-lookup name for an address, canonical form:
/// `10.1.2.3` becomes `3.2.1.10.in-addr.arpa.`, IPv6 addresses expand to
/// 32 nibbles under `ip6.arpa.`.
pub fn reverse_name(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa.",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa.", nibbles.join("."))
        }
    }
}

/// Parses record content as an address and returns its reverse-lookup name.
pub fn reverse_name_for(content: &str) -> Result<String, DomainError> {
    let ip: IpAddr = content.trim().parse().map_err(|_| {
        DomainError::InvalidIpAddress(format!(
            "failed to get reverse address for {}",
            content
        ))
    })?;
    Ok(reverse_name(&ip))
}

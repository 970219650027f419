//! Network address rules.
//!
//! Domain names follow RFC 1123 label rules: each label is 1..=63 ascii
//! alphanumerics or hyphens, never starting or ending with a hyphen, and the
//! whole name is at most 253 characters excluding an optional trailing dot.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

fn is_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Fully qualified: at least two labels and an alphabetic top-level label.
fn is_fqdn(input: &str) -> bool {
    let name = input.strip_suffix('.').unwrap_or(input);
    if name.is_empty() || name.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = name.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| is_label(l))
        && labels
            .last()
            .is_some_and(|tld| tld.bytes().all(|b| b.is_ascii_alphabetic()))
}

/// Six two-digit hex octets joined by one consistent separator, `:` or `-`.
fn is_mac(input: &str) -> bool {
    let Some(sep) = input.chars().find(|c| *c == ':' || *c == '-') else {
        return false;
    };
    let octets: Vec<&str> = input.split(sep).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.bytes().all(|b| b.is_ascii_hexdigit()))
}

crate::rule! {
    /// Passes for basic `local@domain.tld` email syntax.
    pub Email as "email";
    message "invalid email address";
    rule(value, params) { value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s)) }
}

crate::rule! {
    /// Passes for dotted-quad IPv4 addresses.
    pub Ipv4 as "ipv4";
    message "invalid IPv4 address";
    rule(value, params) { value.as_str().is_some_and(|s| s.parse::<Ipv4Addr>().is_ok()) }
}

crate::rule! {
    /// Passes for IPv6 addresses.
    pub Ipv6 as "ipv6";
    message "invalid IPv6 address";
    rule(value, params) { value.as_str().is_some_and(|s| s.parse::<Ipv6Addr>().is_ok()) }
}

crate::rule! {
    /// Passes for IPv4 or IPv6 addresses.
    pub Ip as "ip";
    message "invalid IP address";
    rule(value, params) { value.as_str().is_some_and(|s| s.parse::<IpAddr>().is_ok()) }
}

crate::rule! {
    /// Passes for fully qualified domain names such as `api.example.com`.
    pub Fqdn as "fqdn";
    message "invalid domain name";
    rule(value, params) { value.as_str().is_some_and(is_fqdn) }
}

crate::rule! {
    /// Passes for 6-octet MAC addresses: `AA:BB:CC:DD:EE:FF` or `AA-BB-CC-DD-EE-FF`.
    pub Mac as "mac";
    message "invalid MAC address";
    rule(value, params) { value.as_str().is_some_and(is_mac) }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IPv4 address type for network-attached devices.
//!
//! This module provides a validated dotted-quad address. The accepted text
//! is stored verbatim, so an address read from a record re-serializes
//! byte-for-byte, leading zeros included.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A dotted-quad IPv4 address, e.g. `192.168.1.1`.
///
/// Validation requires exactly four groups of 1-3 decimal digits, each in
/// the range 0-255. Anything else is rejected at construction, so a held
/// address is always well-formed.
///
/// # Examples
///
/// ```
/// use devroster::types::Ipv4Address;
///
/// let ip: Ipv4Address = "192.168.1.1".parse().unwrap();
/// assert_eq!(ip.as_str(), "192.168.1.1");
/// assert_eq!(ip.octets(), [192, 168, 1, 1]);
///
/// assert!("999.999.999.999".parse::<Ipv4Address>().is_err());
/// assert!("not-an-ip".parse::<Ipv4Address>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ipv4Address {
    text: String,
    octets: [u8; 4],
}

impl Ipv4Address {
    /// Creates an address from its textual form.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidIpAddress` if `text` is not a
    /// dotted-quad with octets in 0-255.
    pub fn new(text: impl Into<String>) -> Result<Self, ValueError> {
        let text = text.into();
        let octets = parse_octets(&text).ok_or_else(|| ValueError::InvalidIpAddress(text.clone()))?;
        Ok(Self { text, octets })
    }

    /// Returns the address exactly as it was accepted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the four octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }
}

fn parse_octets(text: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut groups = 0;
    for group in text.split('.') {
        // 1-3 plain digits per group; rejects signs, spaces, and "0255".
        if groups == 4
            || group.is_empty()
            || group.len() > 3
            || !group.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        octets[groups] = group.parse().ok()?;
        groups += 1;
    }
    (groups == 4).then_some(octets)
}

impl FromStr for Ipv4Address {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_valid_addresses() {
        for text in ["0.0.0.0", "127.0.0.1", "192.168.1.1", "255.255.255.255"] {
            let ip: Ipv4Address = text.parse().unwrap();
            assert_eq!(ip.as_str(), text);
        }
    }

    #[test]
    fn ip_preserves_leading_zeros() {
        let ip: Ipv4Address = "010.001.0.1".parse().unwrap();
        assert_eq!(ip.as_str(), "010.001.0.1");
        assert_eq!(ip.octets(), [10, 1, 0, 1]);
    }

    #[test]
    fn ip_octet_out_of_range() {
        assert!("999.999.999.999".parse::<Ipv4Address>().is_err());
        assert!("256.0.0.1".parse::<Ipv4Address>().is_err());
    }

    #[test]
    fn ip_wrong_shape() {
        for text in [
            "",
            "1.2.3",
            "1.2.3.4.5",
            "1..3.4",
            "a.b.c.d",
            "1.2.3.4 ",
            "+1.2.3.4",
            "0255.0.0.1",
        ] {
            assert!(
                text.parse::<Ipv4Address>().is_err(),
                "accepted invalid address {text:?}"
            );
        }
    }

    #[test]
    fn ip_error_carries_input() {
        let err = Ipv4Address::new("10.0.0").unwrap_err();
        assert_eq!(err, ValueError::InvalidIpAddress("10.0.0".to_string()));
    }

    #[test]
    fn ip_display_round_trip() {
        let ip: Ipv4Address = "192.168.1.44".parse().unwrap();
        assert_eq!(ip.to_string(), "192.168.1.44");
    }
}

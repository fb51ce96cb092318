// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Embedded device - a network-attached device gated on its network.

use std::fmt;

use crate::error::PowerError;
use crate::types::Ipv4Address;

/// An embedded device with an IP address and a network name.
///
/// Turning the device on first runs a connection check: the network name
/// must contain [`TRUSTED_NETWORK`](Self::TRUSTED_NETWORK). Only then does
/// the power state flip.
///
/// # Examples
///
/// ```
/// use devroster::device::EmbeddedDevice;
///
/// let ip = "192.168.1.1".parse().unwrap();
/// let mut device = EmbeddedDevice::new("3", "Pi", false, ip, "MD Ltd. Wifi");
/// device.turn_on().unwrap();
/// assert!(device.is_powered_on());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedDevice {
    id: String,
    name: String,
    powered_on: bool,
    ip_address: Ipv4Address,
    network_name: String,
}

impl EmbeddedDevice {
    /// Substring a network name must contain for the connection check.
    pub const TRUSTED_NETWORK: &'static str = "MD Ltd.";

    /// Creates an embedded device.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        powered_on: bool,
        ip_address: Ipv4Address,
        network_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            powered_on,
            ip_address,
            network_name: network_name.into(),
        }
    }

    /// Returns the device id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the device.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns `true` when the device is on.
    #[must_use]
    pub const fn is_powered_on(&self) -> bool {
        self.powered_on
    }

    /// Returns the IP address.
    #[must_use]
    pub const fn ip_address(&self) -> &Ipv4Address {
        &self.ip_address
    }

    /// Assigns a new IP address.
    pub fn set_ip_address(&mut self, ip_address: Ipv4Address) {
        self.ip_address = ip_address;
    }

    /// Returns the network name.
    #[must_use]
    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Assigns a new network name. The name is unconstrained; it is only
    /// checked at turn-on time.
    pub fn set_network_name(&mut self, network_name: impl Into<String>) {
        self.network_name = network_name.into();
    }

    /// Turns the device on.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::ConnectionRefused`] when the network name does
    /// not contain `"MD Ltd."`; the device stays off.
    pub fn turn_on(&mut self) -> Result<(), PowerError> {
        self.connect()?;
        self.powered_on = true;
        Ok(())
    }

    /// Turns the device off. Unconditional and idempotent.
    pub fn turn_off(&mut self) {
        self.powered_on = false;
    }

    fn connect(&self) -> Result<(), PowerError> {
        if self.network_name.contains(Self::TRUSTED_NETWORK) {
            Ok(())
        } else {
            Err(PowerError::ConnectionRefused {
                name: self.name.clone(),
                network: self.network_name.clone(),
            })
        }
    }
}

impl fmt::Display for EmbeddedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[EmbeddedDevice: Id={}, Name={}, IsOn={}, IP={}, Network={}]",
            self.id, self.name, self.powered_on, self.ip_address, self.network_name
        )
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device model - the closed set of device variants and their power rules.
//!
//! [`Device`] is a sum type over the three supported variants. Matching on
//! it is exhaustive everywhere (encoding, edit dispatch, display), so adding
//! a variant is a compile-time event, not a runtime surprise.
//!
//! Power state is a two-state machine per device. `turn_on` runs a
//! variant-specific precondition and, on success, a variant-specific side
//! effect; `turn_off` is unconditional and idempotent. Power state is
//! externally read-only: there is no setter, only the transitions.

use std::fmt;

use crate::error::PowerError;

mod embedded;
mod personal_computer;
mod smart_watch;

pub use embedded::EmbeddedDevice;
pub use personal_computer::PersonalComputer;
pub use smart_watch::SmartWatch;

/// A device held by the roster.
///
/// # Examples
///
/// ```
/// use devroster::device::{Device, PersonalComputer};
///
/// let mut device = Device::from(PersonalComputer::new(
///     "7",
///     "Desk PC",
///     false,
///     Some("Linux".to_string()),
/// ));
///
/// device.turn_on().unwrap();
/// assert!(device.is_powered_on());
/// device.turn_off();
/// assert!(!device.is_powered_on());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    /// A battery-powered wearable.
    SmartWatch(SmartWatch),
    /// A computer gated on an installed operating system.
    PersonalComputer(PersonalComputer),
    /// A network-attached embedded device.
    Embedded(EmbeddedDevice),
}

impl Device {
    /// Returns the device id, unique within a roster.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::SmartWatch(watch) => watch.id(),
            Self::PersonalComputer(pc) => pc.id(),
            Self::Embedded(device) => device.id(),
        }
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SmartWatch(watch) => watch.name(),
            Self::PersonalComputer(pc) => pc.name(),
            Self::Embedded(device) => device.name(),
        }
    }

    /// Renames the device.
    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            Self::SmartWatch(watch) => watch.set_name(name),
            Self::PersonalComputer(pc) => pc.set_name(name),
            Self::Embedded(device) => device.set_name(name),
        }
    }

    /// Returns `true` when the device is on.
    #[must_use]
    pub fn is_powered_on(&self) -> bool {
        match self {
            Self::SmartWatch(watch) => watch.is_powered_on(),
            Self::PersonalComputer(pc) => pc.is_powered_on(),
            Self::Embedded(device) => device.is_powered_on(),
        }
    }

    /// Turns the device on, running its variant-specific precondition.
    ///
    /// # Errors
    ///
    /// Returns the variant's [`PowerError`] when the precondition fails;
    /// the device stays off.
    pub fn turn_on(&mut self) -> Result<(), PowerError> {
        match self {
            Self::SmartWatch(watch) => watch.turn_on(),
            Self::PersonalComputer(pc) => pc.turn_on(),
            Self::Embedded(device) => device.turn_on(),
        }
    }

    /// Turns the device off. Unconditional and idempotent.
    pub fn turn_off(&mut self) {
        match self {
            Self::SmartWatch(watch) => watch.turn_off(),
            Self::PersonalComputer(pc) => pc.turn_off(),
            Self::Embedded(device) => device.turn_off(),
        }
    }
}

impl From<SmartWatch> for Device {
    fn from(watch: SmartWatch) -> Self {
        Self::SmartWatch(watch)
    }
}

impl From<PersonalComputer> for Device {
    fn from(pc: PersonalComputer) -> Self {
        Self::PersonalComputer(pc)
    }
}

impl From<EmbeddedDevice> for Device {
    fn from(device: EmbeddedDevice) -> Self {
        Self::Embedded(device)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmartWatch(watch) => watch.fmt(f),
            Self::PersonalComputer(pc) => pc.fmt(f),
            Self::Embedded(device) => device.fmt(f),
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart watch - a battery-powered wearable device.

use std::fmt;
use std::sync::Arc;

use crate::error::PowerError;
use crate::notify::{self, PowerNotifier};
use crate::types::BatteryLevel;

/// A smart watch with a battery-gated power state.
///
/// Turning the watch on requires at least 11% charge and drains 10
/// percentage points (floored at 0). Every battery assignment that lands
/// below 20% fires the injected [`PowerNotifier`] synchronously.
///
/// # Examples
///
/// ```
/// use devroster::device::SmartWatch;
/// use devroster::types::BatteryLevel;
///
/// let mut watch = SmartWatch::new("1", "Watch", false, BatteryLevel::new(52).unwrap());
/// watch.turn_on().unwrap();
///
/// assert!(watch.is_powered_on());
/// assert_eq!(watch.battery().value(), 42);
/// ```
#[derive(Clone)]
pub struct SmartWatch {
    id: String,
    name: String,
    powered_on: bool,
    battery: BatteryLevel,
    notifier: Arc<dyn PowerNotifier>,
}

impl SmartWatch {
    /// Minimum charge required to turn the watch on.
    pub const TURN_ON_MINIMUM: u8 = 11;

    /// Charge consumed by a successful turn-on.
    pub const TURN_ON_DRAIN: u8 = 10;

    /// Creates a watch that reports low battery through `tracing`.
    ///
    /// Fires the low-battery notification immediately when `battery` is
    /// already below 20%.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        powered_on: bool,
        battery: BatteryLevel,
    ) -> Self {
        Self::with_notifier(id, name, powered_on, battery, notify::default_notifier())
    }

    /// Creates a watch with an injected low-battery notifier.
    #[must_use]
    pub fn with_notifier(
        id: impl Into<String>,
        name: impl Into<String>,
        powered_on: bool,
        battery: BatteryLevel,
        notifier: Arc<dyn PowerNotifier>,
    ) -> Self {
        let watch = Self {
            id: id.into(),
            name: name.into(),
            powered_on,
            battery,
            notifier,
        };
        watch.observe_battery();
        watch
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

    /// Returns `true` when the watch is on.
    #[must_use]
    pub const fn is_powered_on(&self) -> bool {
        self.powered_on
    }

    /// Returns the current battery level.
    #[must_use]
    pub const fn battery(&self) -> BatteryLevel {
        self.battery
    }

    /// Assigns a new battery level, firing the notifier when it is low.
    pub fn set_battery(&mut self, level: BatteryLevel) {
        self.battery = level;
        self.observe_battery();
    }

    /// Turns the watch on.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::EmptyBattery`] when the charge is below 11%;
    /// the watch stays off and the battery is untouched.
    pub fn turn_on(&mut self) -> Result<(), PowerError> {
        if self.battery.value() < Self::TURN_ON_MINIMUM {
            return Err(PowerError::EmptyBattery {
                name: self.name.clone(),
                level: self.battery.value(),
            });
        }
        self.powered_on = true;
        self.set_battery(self.battery.saturating_drain(Self::TURN_ON_DRAIN));
        Ok(())
    }

    /// Turns the watch off. Unconditional and idempotent.
    pub fn turn_off(&mut self) {
        self.powered_on = false;
    }

    fn observe_battery(&self) {
        if self.battery.is_low() {
            self.notifier.low_battery(&self.name, self.battery);
        }
    }
}

impl fmt::Debug for SmartWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartWatch")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("powered_on", &self.powered_on)
            .field("battery", &self.battery)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SmartWatch {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.powered_on == other.powered_on
            && self.battery == other.battery
    }
}

impl Eq for SmartWatch {}

impl fmt::Display for SmartWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[SmartWatch: Id={}, Name={}, IsOn={}, Battery={}]",
            self.id, self.name, self.powered_on, self.battery
        )
    }
}

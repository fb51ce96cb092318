// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification hooks for device observations.
//!
//! A [`PowerNotifier`] is an injected capability that a battery-powered
//! device calls synchronously whenever its charge is assigned a value below
//! 20% - at construction, after the turn-on drain, or through an edit. The
//! notification is a pure observation: it never changes device state and is
//! never an error.
//!
//! Any `Fn(&str, BatteryLevel)` closure is a notifier, which keeps tests
//! trivial:
//!
//! ```
//! use std::sync::Arc;
//!
//! use devroster::notify::PowerNotifier;
//! use devroster::types::BatteryLevel;
//!
//! let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let notifier = move |name: &str, level: BatteryLevel| {
//!     sink.lock().push((name.to_string(), level.value()));
//! };
//!
//! notifier.low_battery("Watch", BatteryLevel::new(8).unwrap());
//! assert_eq!(seen.lock().as_slice(), &[("Watch".to_string(), 8)]);
//! ```

use std::sync::Arc;

use crate::types::BatteryLevel;

/// Receiver for low-battery observations.
pub trait PowerNotifier: Send + Sync {
    /// Called when `device_name` had its battery set below 20%.
    fn low_battery(&self, device_name: &str, level: BatteryLevel);
}

impl<F> PowerNotifier for F
where
    F: Fn(&str, BatteryLevel) + Send + Sync,
{
    fn low_battery(&self, device_name: &str, level: BatteryLevel) {
        self(device_name, level);
    }
}

/// Returns the notifier used when none is injected: a `tracing` warning.
pub(crate) fn default_notifier() -> Arc<dyn PowerNotifier> {
    Arc::new(|device_name: &str, level: BatteryLevel| {
        tracing::warn!(device = %device_name, level = %level, "battery is low");
    })
}

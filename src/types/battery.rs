// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery level type for battery-powered devices.
//!
//! This module provides a type-safe representation of battery charge,
//! ensuring values are always within the valid range of 0-100%.

use std::fmt;

use crate::error::ValueError;

/// Battery charge as a percentage (0-100).
///
/// A `BatteryLevel` below 20% is considered low; observers can check this
/// with [`is_low`](Self::is_low).
///
/// # Examples
///
/// ```
/// use devroster::types::BatteryLevel;
///
/// let level = BatteryLevel::new(42).unwrap();
/// assert_eq!(level.value(), 42);
/// assert!(!level.is_low());
///
/// // Invalid values return an error
/// assert!(BatteryLevel::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// Minimum battery level (0%).
    pub const MIN: Self = Self(0);

    /// Maximum battery level (100%).
    pub const MAX: Self = Self(100);

    /// Levels strictly below this threshold count as low.
    pub const LOW_THRESHOLD: u8 = 20;

    /// Creates a new battery level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::BatteryOutOfRange` if `value` exceeds 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use devroster::types::BatteryLevel;
    ///
    /// let level = BatteryLevel::new(75).unwrap();
    /// assert_eq!(level.value(), 75);
    /// ```
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::BatteryOutOfRange {
                actual: i16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the charge percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` when the charge is below 20%.
    #[must_use]
    pub const fn is_low(&self) -> bool {
        self.0 < Self::LOW_THRESHOLD
    }

    /// Returns the level reduced by `amount` percentage points, floored at 0.
    #[must_use]
    pub const fn saturating_drain(&self, amount: u8) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Personal computer - a device gated on an installed operating system.

use std::fmt;

use crate::error::PowerError;

/// A personal computer with an optional operating system.
///
/// Turning the computer on requires an installed, non-blank operating
/// system name.
///
/// # Examples
///
/// ```
/// use devroster::device::PersonalComputer;
///
/// let mut pc = PersonalComputer::new("2", "Desk PC", false, None);
/// assert!(pc.turn_on().is_err());
///
/// pc.set_operating_system(Some("Linux".to_string()));
/// pc.turn_on().unwrap();
/// assert!(pc.is_powered_on());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalComputer {
    id: String,
    name: String,
    powered_on: bool,
    operating_system: Option<String>,
}

impl PersonalComputer {
    /// Creates a personal computer.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        powered_on: bool,
        operating_system: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            powered_on,
            operating_system,
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

    /// Returns `true` when the computer is on.
    #[must_use]
    pub const fn is_powered_on(&self) -> bool {
        self.powered_on
    }

    /// Returns the installed operating system, if any.
    #[must_use]
    pub fn operating_system(&self) -> Option<&str> {
        self.operating_system.as_deref()
    }

    /// Installs or removes the operating system.
    pub fn set_operating_system(&mut self, operating_system: Option<String>) {
        self.operating_system = operating_system;
    }

    /// Turns the computer on.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::EmptySystem`] when no operating system is
    /// installed or its name is blank; the computer stays off.
    pub fn turn_on(&mut self) -> Result<(), PowerError> {
        match self.operating_system.as_deref() {
            Some(os) if !os.trim().is_empty() => {
                self.powered_on = true;
                Ok(())
            }
            _ => Err(PowerError::EmptySystem {
                name: self.name.clone(),
            }),
        }
    }

    /// Turns the computer off. Unconditional and idempotent.
    pub fn turn_off(&mut self) {
        self.powered_on = false;
    }
}

impl fmt::Display for PersonalComputer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[PC: Id={}, Name={}, IsOn={}, OS={}]",
            self.id,
            self.name,
            self.powered_on,
            self.operating_system.as_deref().unwrap_or("null")
        )
    }
}

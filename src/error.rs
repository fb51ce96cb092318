// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `devroster` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, record parsing, power transitions, storage access, and
//! roster bookkeeping.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when loading,
/// mutating, or saving a device roster.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing a record line.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device refused a power transition.
    #[error("power error: {0}")]
    Power(#[from] PowerError),

    /// Error occurred while talking to the backing record store.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// No device with the given id is held by the roster.
    #[error("no device with id {0:?}")]
    DeviceNotFound(String),

    /// A device with the same id is already held by the roster.
    #[error("device with id {0:?} already exists")]
    DuplicateId(String),

    /// The roster already holds its maximum number of devices.
    #[error("roster is full ({capacity} devices)")]
    CapacityExceeded {
        /// The fixed capacity bound of the roster.
        capacity: usize,
    },

    /// An edit named a field outside the closed editable set.
    #[error("unknown editable field {0:?}")]
    UnknownField(String),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A battery percentage is outside the allowed 0-100 range.
    #[error("battery percentage {actual} is out of range [0, 100]")]
    BatteryOutOfRange {
        /// The value that was provided.
        actual: i16,
    },

    /// A string is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address: {0:?}")]
    InvalidIpAddress(String),
}

/// Errors related to decoding a record line into a device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The record line is empty or contains only whitespace.
    #[error("record line is empty or whitespace-only")]
    EmptyLine,

    /// The record line has the wrong number of comma-separated fields.
    #[error("{kind} record needs {expected} fields, got {actual}")]
    WrongFieldCount {
        /// The record kind being decoded.
        kind: &'static str,
        /// Human-readable description of the accepted field count.
        expected: &'static str,
        /// The number of fields actually present.
        actual: usize,
    },

    /// The first field does not start with a known device type prefix.
    #[error("unknown device type prefix in {0:?}")]
    UnknownPrefix(String),

    /// A field failed to coerce to its expected type.
    #[error("failed to parse {field}: {message}")]
    InvalidField {
        /// The field that failed to parse.
        field: &'static str,
        /// Description of the coercion failure.
        message: String,
    },

    /// A field parsed but violated a value constraint.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Errors raised by a device refusing to turn on.
///
/// These are expected runtime conditions: the device stays off and the
/// caller decides how to report them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PowerError {
    /// Battery is below the 11% turn-on threshold.
    #[error("cannot turn on {name}: battery is too low ({level}%)")]
    EmptyBattery {
        /// Name of the refusing device.
        name: String,
        /// Battery percentage at the time of the attempt.
        level: u8,
    },

    /// No operating system is installed, or the installed name is blank.
    #[error("cannot turn on {name}: no operating system installed")]
    EmptySystem {
        /// Name of the refusing device.
        name: String,
    },

    /// The configured network is not one the device may join.
    #[error("cannot connect {name} to network {network:?}: \"MD Ltd.\" not present")]
    ConnectionRefused {
        /// Name of the refusing device.
        name: String,
        /// The network name that failed the membership check.
        network: String,
    },
}

/// Errors related to the backing record store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing resource does not exist.
    #[error("record file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O operation on the backing resource failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for devroster operations.
pub type Result<T> = std::result::Result<T, Error>;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for device fields.
//!
//! This module provides type-safe representations of constrained device
//! fields. Each type ensures values are valid at construction time, so a
//! device held in memory can always be re-serialized.
//!
//! # Types
//!
//! - [`BatteryLevel`] - Battery charge percentage (0-100)
//! - [`Ipv4Address`] - Dotted-quad IPv4 address

mod battery;
mod ip;

pub use battery::BatteryLevel;
pub use ip::Ipv4Address;

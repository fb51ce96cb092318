// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `devroster` - a registry of personal devices persisted as flat text
//! records.
//!
//! The crate keeps an in-memory roster of heterogeneous devices - smart
//! watches, personal computers, embedded network devices - loaded from and
//! saved to a one-line-per-device record format. Each variant carries its
//! own validation (battery range, IPv4 syntax) and its own rules for when
//! it may be turned on.
//!
//! # Record format
//!
//! ```text
//! SW-1,Apple Watch,true,97%
//! P-2,ThinkPad T440,false,Arch Linux
//! ED-3,Pi,192.168.1.44,MD Ltd. Wifi
//! ```
//!
//! # Quick Start
//!
//! ```
//! use devroster::{DeviceRoster, MemoryRecordStore};
//!
//! fn main() -> devroster::Result<()> {
//!     let store = MemoryRecordStore::with_lines([
//!         "SW-1,Apple Watch,false,97%",
//!         "P-2,ThinkPad T440,false,Arch Linux",
//!     ]);
//!
//!     // Open loads the store; per-line problems land in the report.
//!     let (mut roster, report) = DeviceRoster::open(store)?;
//!     assert!(report.is_clean());
//!
//!     roster.turn_on("1")?;
//!     roster.edit("2", "Name", "Travel laptop")?;
//!     roster.save()?;
//!     Ok(())
//! }
//! ```
//!
//! For a file on disk, use [`DeviceRoster::open_path`] or build a
//! [`FileRecordStore`] yourself; any [`RecordStore`] implementation works.
//!
//! # Power rules
//!
//! - **Smart watch**: needs at least 11% battery; a successful turn-on
//!   drains 10 points. Battery assignments below 20% fire the injected
//!   [`PowerNotifier`](notify::PowerNotifier) hook.
//! - **Personal computer**: needs an installed, non-blank operating system.
//! - **Embedded device**: needs a network name containing `"MD Ltd."`.
//!
//! Turning off is always allowed and idempotent.

pub mod device;
pub mod error;
pub mod notify;
pub mod record;
pub mod roster;
pub mod storage;
pub mod types;

pub use device::{Device, EmbeddedDevice, PersonalComputer, SmartWatch};
pub use error::{Error, ParseError, PowerError, Result, StorageError, ValueError};
pub use notify::PowerNotifier;
pub use record::RecordCodec;
pub use roster::{DeviceRoster, EditField, LoadReport, SkippedLine};
pub use storage::{FileRecordStore, MemoryRecordStore, RecordStore};
pub use types::{BatteryLevel, Ipv4Address};

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device roster - an ordered, unique-keyed, capacity-bounded collection.
//!
//! [`DeviceRoster`] owns a [`RecordStore`] and a [`RecordCodec`] and keeps
//! at most [`CAPACITY`](DeviceRoster::CAPACITY) devices in insertion order.
//! Bulk loading is line-recoverable: every problem line is reported in the
//! returned [`LoadReport`] and skipped, the batch itself always completes
//! (or stops early only when the capacity bound is hit).
//!
//! All per-device failures - a missing id, a refused power transition, an
//! invalid edit value - come back as structured errors to the immediate
//! caller. The roster never aborts, never prints, and never mutates on a
//! failed operation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::device::Device;
use crate::error::{Error, Result};
use crate::record::{self, RecordCodec};
use crate::storage::{FileRecordStore, RecordStore};

/// One record line that bulk load rejected.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number within the loaded batch.
    pub line_number: usize,
    /// The raw line as read from the store.
    pub line: String,
    /// Why the line was skipped.
    pub reason: Error,
}

/// Outcome of a bulk load.
///
/// A load that skipped lines is not a failure: the report carries every
/// per-line problem and the caller decides how to surface them.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of devices ingested into the roster.
    pub loaded: usize,
    /// Lines rejected with their reasons, in input order.
    pub skipped: Vec<SkippedLine>,
    /// Set when the capacity bound stopped the load; any lines after that
    /// point were not attempted.
    pub capacity_reached: bool,
}

impl LoadReport {
    /// Returns `true` when every line was ingested.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && !self.capacity_reached
    }
}

/// The closed set of editable device fields.
///
/// Parsed from the textual field names a front end passes to
/// [`DeviceRoster::edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// The common device name.
    Name,
    /// Smart watch battery charge.
    BatteryPercentage,
    /// Personal computer operating system.
    OperatingSystem,
    /// Embedded device IP address.
    IpAddress,
    /// Embedded device network name.
    NetworkName,
}

impl FromStr for EditField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Name" => Ok(Self::Name),
            "BatteryPercentage" => Ok(Self::BatteryPercentage),
            "OperatingSystem" => Ok(Self::OperatingSystem),
            "IPAddress" => Ok(Self::IpAddress),
            "NetworkName" => Ok(Self::NetworkName),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

/// An ordered collection of devices persisted through a [`RecordStore`].
///
/// # Examples
///
/// ```
/// use devroster::roster::DeviceRoster;
/// use devroster::storage::MemoryRecordStore;
///
/// let store = MemoryRecordStore::with_lines([
///     "SW-1,Watch,false,52%",
///     "P-2,Desk PC,false,Linux",
/// ]);
///
/// let (mut roster, report) = DeviceRoster::open(store).unwrap();
/// assert_eq!(report.loaded, 2);
///
/// roster.turn_on("1").unwrap();
/// roster.save().unwrap();
/// ```
pub struct DeviceRoster<S> {
    store: S,
    codec: RecordCodec,
    devices: Vec<Device>,
}

impl<S: RecordStore> DeviceRoster<S> {
    /// Maximum number of devices the roster may hold.
    pub const CAPACITY: usize = 15;

    /// Creates an empty roster over the given store. Nothing is loaded.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_codec(store, RecordCodec::new())
    }

    /// Creates an empty roster with an explicit codec (for injecting a
    /// custom low-battery notifier).
    #[must_use]
    pub fn with_codec(store: S, codec: RecordCodec) -> Self {
        Self {
            store,
            codec,
            devices: Vec::new(),
        }
    }

    /// Creates a roster and loads it from the store in one step.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the store cannot be read. Per-line
    /// problems do not fail the open; they are in the returned report.
    pub fn open(store: S) -> Result<(Self, LoadReport)> {
        let mut roster = Self::new(store);
        let report = roster.load()?;
        Ok((roster, report))
    }

    /// Loads record lines from the store into the roster.
    ///
    /// Each line decodes independently; a malformed line or a duplicate id
    /// is recorded in the report and skipped without aborting the batch.
    /// Once the roster is full, loading stops and later lines are not
    /// attempted.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the store cannot be read.
    pub fn load(&mut self) -> Result<LoadReport> {
        let lines = self.store.load_lines()?;
        let mut report = LoadReport::default();

        for (index, line) in lines.iter().enumerate() {
            if self.devices.len() >= Self::CAPACITY {
                report.capacity_reached = true;
                tracing::warn!(
                    remaining = lines.len() - index,
                    "roster is full, remaining record lines were not attempted"
                );
                break;
            }

            let outcome = self
                .codec
                .decode(line)
                .map_err(Error::from)
                .and_then(|device| {
                    if self.contains(device.id()) {
                        Err(Error::DuplicateId(device.id().to_string()))
                    } else {
                        self.devices.push(device);
                        Ok(())
                    }
                });

            match outcome {
                Ok(()) => report.loaded += 1,
                Err(reason) => {
                    tracing::warn!(line = index + 1, error = %reason, "skipping record line");
                    report.skipped.push(SkippedLine {
                        line_number: index + 1,
                        line: line.clone(),
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded device records"
        );
        Ok(report)
    }

    /// Returns the held devices in insertion order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Returns the number of held devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` when the roster holds no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Looks up a device by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.id() == id)
    }

    /// Returns a reference to the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a device, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the roster is full, or
    /// [`Error::DuplicateId`] when a device with the same id is held.
    pub fn add(&mut self, device: Device) -> Result<()> {
        if self.devices.len() >= Self::CAPACITY {
            return Err(Error::CapacityExceeded {
                capacity: Self::CAPACITY,
            });
        }
        if self.contains(device.id()) {
            return Err(Error::DuplicateId(device.id().to_string()));
        }
        self.devices.push(device);
        Ok(())
    }

    /// Removes a device by id and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] when no such device is held.
    pub fn remove(&mut self, id: &str) -> Result<Device> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::DeviceNotFound(id.to_string()))?;
        Ok(self.devices.remove(index))
    }

    /// Edits one field of a device, coercing `value` from text.
    ///
    /// `field` must name a member of the closed editable set: `Name`,
    /// `BatteryPercentage`, `OperatingSystem`, `IPAddress`, `NetworkName`.
    /// A field that does not apply to the target device's variant is a
    /// silent no-op. For `OperatingSystem` the literal value `null` removes
    /// the OS, mirroring the record grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] for an unknown id,
    /// [`Error::UnknownField`] for a field name outside the set, and a
    /// parse or value error when `value` fails the field's invariant - in
    /// which case the device keeps its previous value.
    pub fn edit(&mut self, id: &str, field: &str, value: &str) -> Result<()> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::DeviceNotFound(id.to_string()))?;
        let field: EditField = field.parse()?;

        let device = &mut self.devices[index];
        match (field, device) {
            (EditField::Name, device) => device.set_name(value),
            (EditField::BatteryPercentage, Device::SmartWatch(watch)) => {
                watch.set_battery(record::parse_battery(value)?);
            }
            (EditField::OperatingSystem, Device::PersonalComputer(pc)) => {
                let os = if value == "null" {
                    None
                } else {
                    Some(value.to_string())
                };
                pc.set_operating_system(os);
            }
            (EditField::IpAddress, Device::Embedded(embedded)) => {
                embedded.set_ip_address(value.parse()?);
            }
            (EditField::NetworkName, Device::Embedded(embedded)) => {
                embedded.set_network_name(value);
            }
            // Known field, wrong variant: deliberately a no-op.
            _ => {}
        }
        Ok(())
    }

    /// Turns a device on by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] for an unknown id, or the
    /// device's [`PowerError`](crate::error::PowerError) when its
    /// precondition refuses the transition. The roster state is unchanged
    /// on failure.
    pub fn turn_on(&mut self, id: &str) -> Result<()> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::DeviceNotFound(id.to_string()))?;
        self.devices[index].turn_on()?;
        tracing::debug!(id, "device turned on");
        Ok(())
    }

    /// Turns a device off by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] for an unknown id. Turning off
    /// itself cannot fail.
    pub fn turn_off(&mut self, id: &str) -> Result<()> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::DeviceNotFound(id.to_string()))?;
        self.devices[index].turn_off();
        tracing::debug!(id, "device turned off");
        Ok(())
    }

    /// Encodes every held device, in order, and hands the lines to the
    /// store.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the store rejects the write.
    pub fn save(&self) -> Result<()> {
        let lines: Vec<String> = self
            .devices
            .iter()
            .map(|device| self.codec.encode(device))
            .collect();
        self.store.save_lines(&lines)?;
        tracing::debug!(count = lines.len(), "saved device records");
        Ok(())
    }

    /// Logs every held device in display order.
    pub fn show_all(&self) {
        for device in &self.devices {
            tracing::info!(device = %device, "roster entry");
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.devices.iter().position(|device| device.id() == id)
    }
}

impl<S: fmt::Debug> fmt::Debug for DeviceRoster<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRoster")
            .field("store", &self.store)
            .field("devices", &self.devices)
            .finish_non_exhaustive()
    }
}

impl DeviceRoster<FileRecordStore> {
    /// Opens a roster backed by the record file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] (wrapped in
    /// [`Error::Storage`]) when the file does not exist.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<(Self, LoadReport)> {
        Self::open(FileRecordStore::new(path))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::device::SmartWatch;
    use crate::error::{PowerError, ValueError};
    use crate::storage::MemoryRecordStore;
    use crate::types::BatteryLevel;

    fn watch(id: &str, battery: u8) -> Device {
        SmartWatch::new(id, format!("Watch{id}"), false, BatteryLevel::new(battery).unwrap()).into()
    }

    fn open(lines: &[&str]) -> (DeviceRoster<MemoryRecordStore>, LoadReport) {
        DeviceRoster::open(MemoryRecordStore::with_lines(lines.iter().copied())).unwrap()
    }

    #[test]
    fn load_ingests_valid_lines_in_order() {
        let (roster, report) = open(&[
            "SW-1,Watch,false,52%",
            "P-2,PC,false,Linux",
            "ED-3,Pi,192.168.1.1,MD Ltd. Wifi",
        ]);
        assert!(report.is_clean());
        assert_eq!(report.loaded, 3);
        let ids: Vec<&str> = roster.devices().iter().map(Device::id).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn load_skips_malformed_line_and_continues() {
        let (roster, report) = open(&[
            "SW-1,Watch,false,52%",
            "garbage line",
            "P-2,PC,false,Linux",
        ]);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert_eq!(roster.len(), 2);
        assert!(roster.get("2").is_some());
    }

    #[test]
    fn load_keeps_first_of_duplicate_ids() {
        let (roster, report) = open(&["SW-1,First,false,52%", "SW-1,Second,false,80%"]);
        assert_eq!(report.loaded, 1);
        assert!(matches!(report.skipped[0].reason, Error::DuplicateId(_)));
        assert_eq!(roster.get("1").unwrap().name(), "First");
    }

    #[test]
    fn load_sixteen_lines_keeps_fifteen() {
        let lines: Vec<String> = (1..=16)
            .map(|i| format!("SW-{i},Watch{i},false,50%"))
            .collect();
        let store = MemoryRecordStore::with_lines(lines);
        let (roster, report) = DeviceRoster::open(store).unwrap();

        assert_eq!(roster.len(), DeviceRoster::<MemoryRecordStore>::CAPACITY);
        assert_eq!(report.loaded, 15);
        assert!(report.capacity_reached);
        assert!(roster.get("16").is_none());
    }

    #[test]
    fn open_missing_store_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let result = DeviceRoster::open_path(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut roster = DeviceRoster::new(MemoryRecordStore::new());
        roster.add(watch("1", 50)).unwrap();
        let err = roster.add(watch("1", 80)).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "1"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn add_rejects_at_capacity() {
        let mut roster = DeviceRoster::new(MemoryRecordStore::new());
        for i in 0..15 {
            roster.add(watch(&i.to_string(), 50)).unwrap();
        }
        let err = roster.add(watch("overflow", 50)).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 15 }));
    }

    #[test]
    fn remove_returns_device() {
        let (mut roster, _) = open(&["SW-1,Watch,false,52%"]);
        let removed = roster.remove("1").unwrap();
        assert_eq!(removed.id(), "1");
        assert!(roster.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let mut roster = DeviceRoster::new(MemoryRecordStore::new());
        let err = roster.remove("1").unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id == "1"));
    }

    #[test]
    fn edit_name_applies_to_any_variant() {
        let (mut roster, _) = open(&["P-2,PC,false,Linux"]);
        roster.edit("2", "Name", "Updated PC").unwrap();
        assert_eq!(roster.get("2").unwrap().name(), "Updated PC");
    }

    #[test]
    fn edit_absent_id_is_not_found_and_mutates_nothing() {
        let (mut roster, _) = open(&["P-2,PC,false,Linux"]);
        let err = roster.edit("1", "Name", "X").unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id == "1"));
        assert_eq!(roster.get("2").unwrap().name(), "PC");
    }

    #[test]
    fn edit_unknown_field_is_rejected() {
        let (mut roster, _) = open(&["P-2,PC,false,Linux"]);
        let err = roster.edit("2", "Color", "red").unwrap_err();
        assert!(matches!(err, Error::UnknownField(field) if field == "Color"));
    }

    #[test]
    fn edit_inapplicable_field_is_a_silent_noop() {
        let (mut roster, _) = open(&["P-2,PC,false,Linux"]);
        roster.edit("2", "BatteryPercentage", "50").unwrap();
        let Device::PersonalComputer(pc) = roster.get("2").unwrap() else {
            panic!("expected a personal computer");
        };
        assert_eq!(pc.operating_system(), Some("Linux"));
    }

    #[test]
    fn edit_battery_applies_invariants() {
        let (mut roster, _) = open(&["SW-1,Watch,false,52%"]);
        roster.edit("1", "BatteryPercentage", "90").unwrap();

        let err = roster.edit("1", "BatteryPercentage", "150").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(crate::error::ParseError::Value(ValueError::BatteryOutOfRange {
                actual: 150
            }))
        ));

        // The last valid value is retained.
        let Device::SmartWatch(watch) = roster.get("1").unwrap() else {
            panic!("expected a smart watch");
        };
        assert_eq!(watch.battery().value(), 90);
    }

    #[test]
    fn edit_ip_rejects_malformed_and_keeps_old_value() {
        let (mut roster, _) = open(&["ED-3,Pi,192.168.1.1,MD Ltd. Wifi"]);
        let err = roster.edit("3", "IPAddress", "999.999.999.999").unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::InvalidIpAddress(_))));

        let Device::Embedded(embedded) = roster.get("3").unwrap() else {
            panic!("expected an embedded device");
        };
        assert_eq!(embedded.ip_address().as_str(), "192.168.1.1");
    }

    #[test]
    fn edit_operating_system_null_removes_it() {
        let (mut roster, _) = open(&["P-2,PC,false,Linux"]);
        roster.edit("2", "OperatingSystem", "null").unwrap();

        let err = roster.turn_on("2").unwrap_err();
        assert!(matches!(err, Error::Power(PowerError::EmptySystem { .. })));
    }

    #[test]
    fn turn_on_low_battery_watch_is_refused() {
        let (mut roster, _) = open(&["SW-1,Watch,true,8"]);
        let err = roster.turn_on("1").unwrap_err();
        assert!(matches!(
            err,
            Error::Power(PowerError::EmptyBattery { level: 8, .. })
        ));

        let Device::SmartWatch(watch) = roster.get("1").unwrap() else {
            panic!("expected a smart watch");
        };
        assert_eq!(watch.battery().value(), 8);
    }

    #[test]
    fn turn_on_untrusted_network_is_refused() {
        let (mut roster, _) = open(&["ED-2,Pi,192.168.1.1,CorpNet"]);
        let err = roster.turn_on("2").unwrap_err();
        assert!(matches!(
            err,
            Error::Power(PowerError::ConnectionRefused { .. })
        ));
        assert!(!roster.get("2").unwrap().is_powered_on());
    }

    #[test]
    fn turn_on_and_off_unknown_id() {
        let mut roster = DeviceRoster::new(MemoryRecordStore::new());
        assert!(matches!(roster.turn_on("9"), Err(Error::DeviceNotFound(_))));
        assert!(matches!(roster.turn_off("9"), Err(Error::DeviceNotFound(_))));
    }

    #[test]
    fn save_writes_encoded_lines_in_order() {
        let (mut roster, _) = open(&[
            "SW-1,Watch,false,52%",
            "P-2,PC,false,null",
            "ED-3,Pi,192.168.1.1,MD Ltd. Wifi",
        ]);
        roster.turn_on("1").unwrap();
        roster.save().unwrap();

        assert_eq!(
            roster.store().snapshot(),
            vec![
                "SW-1,Watch,true,42%".to_string(),
                "P-2,PC,false,null".to_string(),
                "ED-3,Pi,192.168.1.1,MD Ltd. Wifi".to_string(),
            ]
        );
    }

    #[test]
    fn debug_output_elides_the_codec() {
        let (roster, _) = open(&["SW-1,Watch,false,52%"]);
        let rendered = format!("{roster:?}");
        assert!(rendered.starts_with("DeviceRoster {"), "{rendered}");
        assert!(rendered.contains("devices"), "{rendered}");
        assert!(rendered.ends_with(".. }"), "{rendered}");
    }

    #[test]
    fn codec_notifier_reaches_loaded_watches() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let codec = RecordCodec::with_notifier(Arc::new(
            move |name: &str, level: BatteryLevel| {
                sink.lock().push((name.to_string(), level.value()));
            },
        ));

        let store = MemoryRecordStore::with_lines(["SW-1,Watch,false,25%"]);
        let mut roster = DeviceRoster::with_codec(store, codec);
        roster.load().unwrap();
        assert!(seen.lock().is_empty());

        // 25% -> 15% after the drain, which is below the threshold.
        roster.turn_on("1").unwrap();
        assert_eq!(seen.lock().as_slice(), &[("Watch".to_string(), 15)]);
    }
}

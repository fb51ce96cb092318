// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record codec - one text line to one device and back.
//!
//! Each device serializes to a single comma-separated line. Fields are
//! trimmed on decode and commas are not escaped, so field values must not
//! contain commas. The first field is the discriminator: a variant prefix
//! followed by the device id. The prefix is stripped on decode and
//! re-derived from the variant on encode, so the stored id is prefix-free.
//!
//! | Variant | Prefix | Fields |
//! |---|---|---|
//! | smart watch | `SW-` | id, name, bool, battery (`%`-suffixed) |
//! | personal computer | `P-` | id, name, bool, optional os (`null` = none, surplus fields ignored) |
//! | embedded device | `ED-` | id, name, ip, network (power always off) |
//!
//! Decoding is line-recoverable: a bad line yields a [`ParseError`] naming
//! what went wrong, never a panic. Encoding is total - construction-time
//! invariants guarantee every held device has a textual form.

use std::fmt;
use std::sync::Arc;

use crate::device::{Device, EmbeddedDevice, PersonalComputer, SmartWatch};
use crate::error::{ParseError, ValueError};
use crate::notify::{self, PowerNotifier};
use crate::types::BatteryLevel;

/// Discriminator prefix for smart watch records.
pub const SMART_WATCH_PREFIX: &str = "SW-";

/// Discriminator prefix for personal computer records.
pub const PERSONAL_COMPUTER_PREFIX: &str = "P-";

/// Discriminator prefix for embedded device records.
pub const EMBEDDED_PREFIX: &str = "ED-";

/// Literal token that encodes "no operating system". Case-sensitive.
const NO_OS_TOKEN: &str = "null";

/// Converts between record lines and [`Device`] values.
///
/// The codec carries the [`PowerNotifier`] injected into decoded smart
/// watches, so a watch read in below 20% battery fires the low-battery
/// hook at construction like any other assignment.
///
/// # Examples
///
/// ```
/// use devroster::record::RecordCodec;
///
/// let codec = RecordCodec::new();
/// let device = codec.decode("SW-1,Watch,true,42%").unwrap();
///
/// assert_eq!(device.id(), "1");
/// assert_eq!(codec.encode(&device), "SW-1,Watch,true,42%");
/// ```
#[derive(Clone)]
pub struct RecordCodec {
    notifier: Arc<dyn PowerNotifier>,
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCodec").finish_non_exhaustive()
    }
}

impl RecordCodec {
    /// Creates a codec whose decoded watches notify through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifier: notify::default_notifier(),
        }
    }

    /// Creates a codec that injects `notifier` into decoded watches.
    #[must_use]
    pub fn with_notifier(notifier: Arc<dyn PowerNotifier>) -> Self {
        Self { notifier }
    }

    /// Decodes one record line into a device.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first problem found: an
    /// empty line, a wrong field count, an unknown prefix, a field that
    /// fails to coerce, or a value outside its invariant.
    pub fn decode(&self, line: &str) -> Result<Device, ParseError> {
        if line.trim().is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            return Err(ParseError::WrongFieldCount {
                kind: "device",
                expected: "at least 2",
                actual: fields.len(),
            });
        }

        let discriminator = fields[0];
        if let Some(id) = discriminator.strip_prefix(SMART_WATCH_PREFIX) {
            self.decode_smart_watch(id, &fields)
        } else if let Some(id) = discriminator.strip_prefix(PERSONAL_COMPUTER_PREFIX) {
            Self::decode_personal_computer(id, &fields)
        } else if let Some(id) = discriminator.strip_prefix(EMBEDDED_PREFIX) {
            Self::decode_embedded(id, &fields)
        } else {
            Err(ParseError::UnknownPrefix(discriminator.to_string()))
        }
    }

    /// Encodes a device into its record line.
    #[must_use]
    pub fn encode(&self, device: &Device) -> String {
        match device {
            Device::SmartWatch(watch) => format!(
                "{SMART_WATCH_PREFIX}{},{},{},{}",
                watch.id(),
                watch.name(),
                watch.is_powered_on(),
                watch.battery(),
            ),
            Device::PersonalComputer(pc) => format!(
                "{PERSONAL_COMPUTER_PREFIX}{},{},{},{}",
                pc.id(),
                pc.name(),
                pc.is_powered_on(),
                pc.operating_system().unwrap_or(NO_OS_TOKEN),
            ),
            Device::Embedded(device) => format!(
                "{EMBEDDED_PREFIX}{},{},{},{}",
                device.id(),
                device.name(),
                device.ip_address(),
                device.network_name(),
            ),
        }
    }

    fn decode_smart_watch(&self, id: &str, fields: &[&str]) -> Result<Device, ParseError> {
        if fields.len() != 4 {
            return Err(ParseError::WrongFieldCount {
                kind: "smart watch",
                expected: "exactly 4",
                actual: fields.len(),
            });
        }
        let powered_on = parse_bool(fields[2])?;
        let battery = parse_battery(fields[3])?;
        Ok(SmartWatch::with_notifier(
            id,
            fields[1],
            powered_on,
            battery,
            Arc::clone(&self.notifier),
        )
        .into())
    }

    fn decode_personal_computer(id: &str, fields: &[&str]) -> Result<Device, ParseError> {
        if fields.len() < 3 {
            return Err(ParseError::WrongFieldCount {
                kind: "personal computer",
                expected: "at least 3",
                actual: fields.len(),
            });
        }
        let powered_on = parse_bool(fields[2])?;
        // A missing 4th field and the literal "null" both mean "no OS"; an
        // empty 4th field is a present-but-blank OS. Fields past the 4th
        // are ignored.
        let operating_system = match fields.get(3) {
            None => None,
            Some(&NO_OS_TOKEN) => None,
            Some(os) => Some((*os).to_string()),
        };
        Ok(PersonalComputer::new(id, fields[1], powered_on, operating_system).into())
    }

    fn decode_embedded(id: &str, fields: &[&str]) -> Result<Device, ParseError> {
        if fields.len() != 4 {
            return Err(ParseError::WrongFieldCount {
                kind: "embedded device",
                expected: "exactly 4",
                actual: fields.len(),
            });
        }
        let ip_address = fields[2].parse().map_err(ValueError::from)?;
        // The grammar has no power field for this variant; power starts off.
        Ok(EmbeddedDevice::new(id, fields[1], false, ip_address, fields[3]).into())
    }
}

fn parse_bool(field: &str) -> Result<bool, ParseError> {
    if field.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if field.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::InvalidField {
            field: "power state",
            message: format!("{field:?} is not a boolean"),
        })
    }
}

/// Parses a battery field, stripping one trailing `%` if present.
pub(crate) fn parse_battery(field: &str) -> Result<BatteryLevel, ParseError> {
    let digits = field.strip_suffix('%').unwrap_or(field).trim();
    let value: i16 = digits.parse().map_err(|_| ParseError::InvalidField {
        field: "battery percentage",
        message: format!("{field:?} is not an integer"),
    })?;
    let value = u8::try_from(value)
        .map_err(|_| ValueError::BatteryOutOfRange { actual: value })?;
    Ok(BatteryLevel::new(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PowerError;

    fn codec() -> RecordCodec {
        RecordCodec::new()
    }

    #[test]
    fn decode_smart_watch() {
        let device = codec().decode("SW-1,Apple Watch,true,97%").unwrap();
        let Device::SmartWatch(watch) = device else {
            panic!("expected a smart watch");
        };
        assert_eq!(watch.id(), "1");
        assert_eq!(watch.name(), "Apple Watch");
        assert!(watch.is_powered_on());
        assert_eq!(watch.battery().value(), 97);
    }

    #[test]
    fn decode_trims_whitespace() {
        let device = codec().decode(" SW-1 , Watch , TRUE , 50% ").unwrap();
        assert_eq!(device.id(), "1");
        assert_eq!(device.name(), "Watch");
        assert!(device.is_powered_on());
    }

    #[test]
    fn decode_battery_without_percent_sign() {
        let device = codec().decode("SW-1,Watch,true,8").unwrap();
        let Device::SmartWatch(watch) = device else {
            panic!("expected a smart watch");
        };
        assert_eq!(watch.battery().value(), 8);
    }

    #[test]
    fn decode_personal_computer_with_os() {
        let device = codec().decode("P-2,ThinkPad,false,Arch Linux").unwrap();
        let Device::PersonalComputer(pc) = device else {
            panic!("expected a personal computer");
        };
        assert_eq!(pc.id(), "2");
        assert_eq!(pc.operating_system(), Some("Arch Linux"));
    }

    #[test]
    fn decode_personal_computer_null_os() {
        let device = codec().decode("P-2,ThinkPad,false,null").unwrap();
        let Device::PersonalComputer(pc) = device else {
            panic!("expected a personal computer");
        };
        assert_eq!(pc.operating_system(), None);
    }

    #[test]
    fn decode_personal_computer_missing_os() {
        let device = codec().decode("P-2,ThinkPad,false").unwrap();
        let Device::PersonalComputer(pc) = device else {
            panic!("expected a personal computer");
        };
        assert_eq!(pc.operating_system(), None);
    }

    #[test]
    fn decode_personal_computer_ignores_surplus_fields() {
        // Only the 4th field is the OS; an unescaped comma in the OS name
        // truncates it rather than failing the line.
        let device = codec().decode("P-2,PC,false,Windows 10, Pro").unwrap();
        let Device::PersonalComputer(pc) = device else {
            panic!("expected a personal computer");
        };
        assert_eq!(pc.operating_system(), Some("Windows 10"));
    }

    #[test]
    fn null_os_token_is_case_sensitive() {
        let device = codec().decode("P-2,ThinkPad,false,NULL").unwrap();
        let Device::PersonalComputer(pc) = device else {
            panic!("expected a personal computer");
        };
        assert_eq!(pc.operating_system(), Some("NULL"));
    }

    #[test]
    fn decode_embedded_forces_power_off() {
        let device = codec().decode("ED-3,Pi,192.168.1.44,MD Ltd. Wifi").unwrap();
        let Device::Embedded(embedded) = device else {
            panic!("expected an embedded device");
        };
        assert_eq!(embedded.id(), "3");
        assert!(!embedded.is_powered_on());
        assert_eq!(embedded.ip_address().as_str(), "192.168.1.44");
        assert_eq!(embedded.network_name(), "MD Ltd. Wifi");
    }

    #[test]
    fn decode_empty_line() {
        assert_eq!(codec().decode("").unwrap_err(), ParseError::EmptyLine);
        assert_eq!(codec().decode("   \t").unwrap_err(), ParseError::EmptyLine);
    }

    #[test]
    fn decode_single_field() {
        let err = codec().decode("SW-1").unwrap_err();
        assert!(matches!(err, ParseError::WrongFieldCount { actual: 1, .. }));
    }

    #[test]
    fn decode_unknown_prefix() {
        let err = codec().decode("XX-1,Thing,true").unwrap_err();
        assert_eq!(err, ParseError::UnknownPrefix("XX-1".to_string()));
    }

    #[test]
    fn decode_smart_watch_wrong_field_count() {
        let err = codec().decode("SW-1,Watch,true").unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongFieldCount {
                kind: "smart watch",
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn decode_personal_computer_too_few_fields() {
        let err = codec().decode("P-2,ThinkPad").unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongFieldCount {
                kind: "personal computer",
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn decode_smart_watch_bad_bool() {
        let err = codec().decode("SW-1,Watch,maybe,50%").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "power state",
                ..
            }
        ));
    }

    #[test]
    fn decode_smart_watch_bad_battery() {
        let err = codec().decode("SW-1,Watch,true,full%").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "battery percentage",
                ..
            }
        ));
    }

    #[test]
    fn decode_smart_watch_battery_out_of_range() {
        let err = codec().decode("SW-1,Watch,true,150%").unwrap_err();
        assert_eq!(
            err,
            ParseError::Value(ValueError::BatteryOutOfRange { actual: 150 })
        );

        let err = codec().decode("SW-1,Watch,true,-5%").unwrap_err();
        assert_eq!(
            err,
            ParseError::Value(ValueError::BatteryOutOfRange { actual: -5 })
        );
    }

    #[test]
    fn decode_embedded_invalid_ip() {
        let err = codec().decode("ED-3,Pi,999.999.999.999,MD Ltd.").unwrap_err();
        assert_eq!(
            err,
            ParseError::Value(ValueError::InvalidIpAddress("999.999.999.999".to_string()))
        );
    }

    #[test]
    fn decoded_low_battery_watch_refuses_turn_on() {
        let mut device = codec().decode("SW-1,Watch,true,8").unwrap();
        // Decoded fine - refusal only happens at the transition.
        let err = device.turn_on().unwrap_err();
        assert_eq!(
            err,
            PowerError::EmptyBattery {
                name: "Watch".to_string(),
                level: 8,
            }
        );
    }

    #[test]
    fn decode_injects_codec_notifier() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let codec = RecordCodec::with_notifier(Arc::new(
            move |name: &str, level: BatteryLevel| {
                sink.lock().push((name.to_string(), level.value()));
            },
        ));

        codec.decode("SW-1,Watch,false,8%").unwrap();
        assert_eq!(seen.lock().as_slice(), &[("Watch".to_string(), 8)]);
    }

    #[test]
    fn encode_round_trips_every_variant() {
        let codec = codec();
        for line in [
            "SW-1,Watch,true,42%",
            "SW-2,Watch,false,0%",
            "P-3,Desk PC,true,Windows 10",
            "P-4,Bare PC,false,null",
            "ED-5,Pi,192.168.1.1,MD Ltd. Wifi",
        ] {
            let device = codec.decode(line).unwrap();
            assert_eq!(codec.encode(&device), line);
            assert_eq!(codec.decode(&codec.encode(&device)).unwrap(), device);
        }
    }

    #[test]
    fn encode_missing_os_as_null() {
        let device = Device::from(PersonalComputer::new("9", "PC", false, None));
        assert_eq!(codec().encode(&device), "P-9,PC,false,null");
    }

    #[test]
    fn debug_output_elides_the_notifier() {
        assert_eq!(format!("{:?}", codec()), "RecordCodec { .. }");
    }
}

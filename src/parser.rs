//! Frame parsing: wire frame in, status document out.
//!
//! Parsing is deliberately tolerant. Every field read is guarded by byte
//! availability, so a short frame degrades to a partial document instead of
//! failing, and the trailing checksum is never recomputed: upstream layers
//! historically validated (or ignored) it before the codec saw the frame,
//! and rejecting here would change that compatibility boundary.

use crate::fields::{
    APPOINT_RECORD_LEN, BATH_PERSON_MASK, BATH_PERSON_OFF, BATH_PERSON_VALUES,
    BODY_APPOINT_BASE, BODY_APPOINT_QUERY, HALF_HEAT_MASK, IDX_APPOINT_RECORD, IDX_HEAT_POWER,
    IDX_MODE_HIGH, IDX_PERSON, IDX_WATER_CONSUMPTION, MODE_FLAGS, NUMERIC_FIELDS,
    SWITCH_FIELDS, TELEMETRY_FIELDS, WHOLE_HEAT_MASK,
};
use crate::frame::{
    FRAME_TYPE_CONTROL, FRAME_TYPE_QUERY, FRAME_TYPE_STATUS_PUSH, IDX_BODY_TYPE, IDX_FRAME_TYPE,
};
use crate::types::Status;

/// Revision of the status field table this crate emits; callers use it for
/// forward/backward compatibility checks.
pub const STATUS_VERSION: u32 = 23;

/// Stateless frame parser. The format version stamped into every produced
/// document is injected at construction.
#[derive(Debug, Clone)]
pub struct FrameParser {
    version: u32,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            version: STATUS_VERSION,
        }
    }

    /// Parser stamping a non-default table revision.
    pub fn with_version(version: u32) -> Self {
        Self { version }
    }

    /// Decode a frame into a fresh status document. Unrecognized frame
    /// shapes produce a document holding only the version field.
    pub fn parse(&self, frame: &[u8]) -> Status {
        let mut status = Status {
            version: Some(self.version),
            ..Status::default()
        };

        let frame_type = frame.get(IDX_FRAME_TYPE).copied().unwrap_or(0);
        let body_type = frame.get(IDX_BODY_TYPE).copied().unwrap_or(0);

        match (frame_type, body_type) {
            (FRAME_TYPE_CONTROL, 0x01 | 0x02 | 0x04 | 0x14)
            | (FRAME_TYPE_QUERY | FRAME_TYPE_STATUS_PUSH, 0x01) => {
                status_report(frame, &mut status);
            }
            (FRAME_TYPE_CONTROL, body @ 0x05..=0x07) => {
                let slot = (body - BODY_APPOINT_BASE) as usize;
                store_appointment(&mut status, slot, appoint_record(frame, IDX_APPOINT_RECORD));
            }
            (FRAME_TYPE_QUERY, BODY_APPOINT_QUERY) => {
                for slot in 0..3 {
                    let start = IDX_APPOINT_RECORD + slot * APPOINT_RECORD_LEN;
                    store_appointment(&mut status, slot, appoint_record(frame, start));
                }
            }
            _ => {}
        }

        status
    }
}

fn status_report(frame: &[u8], status: &mut Status) {
    for field in SWITCH_FIELDS {
        if let Some(&byte) = frame.get(field.index) {
            (field.store)(status, if byte & field.mask != 0 { "on" } else { "off" });
        }
    }

    // Derived mode: scan order is the tie-break, the last set flag wins.
    // Multiple set bits should not happen but are not rejected.
    for flag in MODE_FLAGS {
        if let Some(&byte) = frame.get(flag.index) {
            if byte & flag.mask != 0 {
                status.mode = Some(flag.name.to_string());
            }
        }
    }

    if let Some(&byte) = frame.get(IDX_PERSON) {
        let code = byte & BATH_PERSON_MASK;
        let name = BATH_PERSON_VALUES
            .iter()
            .find(|(_, value)| *value == code)
            .map(|(name, _)| *name)
            .unwrap_or(BATH_PERSON_OFF);
        status.bath_person = Some(name.to_string());
    }

    if let Some(&mode_high) = frame.get(IDX_MODE_HIGH) {
        let heat = if mode_high & WHOLE_HEAT_MASK != 0 {
            "whole"
        } else if mode_high & HALF_HEAT_MASK != 0 {
            "half"
        } else {
            "none"
        };
        status.heat = Some(heat.to_string());
    }

    for field in NUMERIC_FIELDS {
        if let Some(&byte) = frame.get(field.index) {
            (field.store)(status, byte);
        }
    }

    for field in TELEMETRY_FIELDS {
        if let Some(&byte) = frame.get(field.index) {
            (field.store)(status, byte);
        }
    }

    if let Some(bytes) = frame.get(IDX_HEAT_POWER..IDX_HEAT_POWER + 2) {
        status.heat_power = Some(u16::from_be_bytes([bytes[0], bytes[1]]));
    }
    if let Some(bytes) = frame.get(IDX_WATER_CONSUMPTION..IDX_WATER_CONSUMPTION + 2) {
        status.water_consumption = Some(u16::from_be_bytes([bytes[0], bytes[1]]));
    }
}

/// Decode one schedule record into `"<enabled>,<b1>,<b2>,<b3>,<b4>"`.
fn appoint_record(frame: &[u8], start: usize) -> Option<String> {
    let bytes = frame.get(start..start + APPOINT_RECORD_LEN)?;
    let enabled = if bytes[0] != 0 { "1" } else { "0" };
    Some(format!(
        "{enabled},{},{},{},{}",
        bytes[1], bytes[2], bytes[3], bytes[4]
    ))
}

fn store_appointment(status: &mut Status, slot: usize, record: Option<String>) {
    let Some(record) = record else { return };
    match slot {
        0 => status.appoint0 = Some(record),
        1 => status.appoint1 = Some(record),
        _ => status.appoint2 = Some(record),
    }
}

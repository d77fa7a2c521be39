//! Frame assembly: request document in, complete wire frame out.

use log::debug;

use crate::fields::{
    APPOINT_RECORD_LEN, APPOINT_WINDOW_END, BATH_PERSON_MASK, BATH_PERSON_VALUES, BODY_APPOINT_BASE,
    BODY_APPOINT_QUERY, BODY_NORMAL, COMPACT_SUB_TYPES, CONTROL_WINDOW_END, HALF_HEAT_MASK,
    IDX_APPOINT_RECORD, IDX_GREA, IDX_MODE_HIGH, IDX_MODE_LOW, IDX_MORNING_NIGHT_BASH,
    IDX_PERSON, IDX_SCENE_ID, IDX_SCREEN_LIGHT, IDX_SWITCHES, IDX_TEMPERATURE,
    IDX_WASH_TEMPERATURE, MODE_FLAGS, NUMERIC_FIELDS, SCREEN_LIGHT_BOUNDS, SWITCH_FIELDS,
    SwitchField, TEMPERATURE_BOUNDS, WASH_TEMPERATURE_BOUNDS, WHOLE_HEAT_MASK,
};
use crate::frame::{FRAME_TYPE_CONTROL, FRAME_TYPE_QUERY, FrameBuilder, IDX_BODY_TYPE};
use crate::types::{Control, DeviceInfo, FieldValue, Query, Request, Status, clamp_byte};

/// Build a complete frame for the request, or `None` when the document
/// carries nothing to send.
pub fn assemble(request: &Request) -> Option<Vec<u8>> {
    if let Some(query) = &request.query {
        return Some(query_frame(query));
    }
    let control = request.control.as_ref()?;
    Some(control_frame(
        control,
        request.status.as_ref(),
        compact_variant(request.deviceinfo.as_ref(), control),
    ))
}

/// Query frames carry only a body selector and a fixed trailing 0x01.
fn query_frame(query: &Query) -> Vec<u8> {
    let mut frame = FrameBuilder::new(FRAME_TYPE_QUERY);
    let body = if query.query_type.as_deref() == Some("appoint_query") {
        BODY_APPOINT_QUERY
    } else {
        BODY_NORMAL
    };
    frame.set_byte(IDX_BODY_TYPE, body);
    frame.set_byte(IDX_BODY_TYPE + 1, 0x01);
    frame.finish()
}

/// Older single-field firmware variants, and any request that asks for the
/// compact scheme explicitly.
fn compact_variant(deviceinfo: Option<&DeviceInfo>, control: &Control) -> bool {
    if control.control_type.as_deref() == Some("part") {
        return true;
    }
    deviceinfo
        .and_then(|info| info.device_sub_type.as_ref())
        .and_then(FieldValue::as_i64)
        .is_some_and(|sub_type| COMPACT_SUB_TYPES.contains(&sub_type))
}

fn control_frame(control: &Control, status: Option<&Status>, compact: bool) -> Vec<u8> {
    let mut frame = FrameBuilder::new(FRAME_TYPE_CONTROL);
    frame.set_byte(IDX_BODY_TYPE, BODY_NORMAL);

    let power = control.power.as_ref();
    if power.is_some_and(|p| p.is_on() || p.is_off()) {
        // Power commands are exclusive: a two-byte body, nothing else.
        debug!("control frame: power branch");
        let on = power.is_some_and(FieldValue::is_on);
        frame.set_byte(IDX_SWITCHES, if on { 0x01 } else { 0x00 });
        frame.truncate_body(IDX_SWITCHES);
    } else if compact {
        debug!("control frame: compact branch");
        frame.clear_window(IDX_SWITCHES, CONTROL_WINDOW_END);
        encode_compact(control, &mut frame);
    } else {
        debug!("control frame: full branch");
        frame.clear_window(IDX_SWITCHES, CONTROL_WINDOW_END);
        encode_full(control, status, &mut frame);
    }

    // Schedule slots are checked independently of the branches above and
    // overwrite the body outright.
    encode_appointments(control, &mut frame);

    frame.finish()
}

/// Resolve one bit field: explicit control value wins, otherwise the
/// last-known status is preserved, otherwise the bit stays clear.
fn resolve_switch(field: &SwitchField, control: &Control, status: Option<&Status>) -> bool {
    match (field.control)(control) {
        Some(value) => value.is_on(),
        None => status.is_some_and(|s| (field.status)(s) == Some("on")),
    }
}

/// Bath-person code from a control value (number or enumeration name).
fn person_code(value: &FieldValue) -> u8 {
    if let Some(n) = value.as_i64() {
        return (n as u8) & BATH_PERSON_MASK;
    }
    value
        .as_text()
        .and_then(|name| {
            BATH_PERSON_VALUES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, code)| *code)
        })
        .unwrap_or(0)
}

/// The status-aware default scheme. Evaluation order is fixed: bit fields,
/// bath person, named mode (reset and re-derive), the heat alias, then the
/// numeric bytes.
fn encode_full(control: &Control, status: Option<&Status>, frame: &mut FrameBuilder) {
    for field in SWITCH_FIELDS {
        if resolve_switch(field, control, status) {
            debug!("set {}", field.name);
            frame.set_bit(field.index, field.mask);
        }
    }

    match &control.bath_person {
        Some(value) => frame.set_bit(IDX_PERSON, person_code(value)),
        None => {
            let preserved = status
                .and_then(|s| s.bath_person.as_deref())
                .and_then(|name| BATH_PERSON_VALUES.iter().find(|(n, _)| *n == name))
                .map(|(_, code)| *code);
            if let Some(code) = preserved {
                frame.set_bit(IDX_PERSON, code);
            }
        }
    }

    // A named mode resets both mode bytes before claiming exactly one bit,
    // so exclusivity holds by construction.
    if let Some(mode) = control.mode.as_deref() {
        frame.clear_window(IDX_MODE_LOW, IDX_MODE_HIGH);
        if let Some(flag) = MODE_FLAGS.iter().find(|flag| flag.name == mode) {
            frame.set_bit(flag.index, flag.mask);
        } else {
            debug!("unknown mode {mode:?} left both mode bytes clear");
        }
    }

    // `heat` aliases the heating-element bits; any other value clears both.
    if let Some(heat) = &control.heat {
        frame.clear_bit(IDX_MODE_HIGH, HALF_HEAT_MASK | WHOLE_HEAT_MASK);
        match (heat.as_text(), heat.as_i64()) {
            (Some("half"), _) | (None, Some(1)) => frame.set_bit(IDX_MODE_HIGH, HALF_HEAT_MASK),
            (Some("whole"), _) | (None, Some(2)) => frame.set_bit(IDX_MODE_HIGH, WHOLE_HEAT_MASK),
            _ => {}
        }
    }

    for field in NUMERIC_FIELDS {
        match (field.control)(control) {
            Some(value) => {
                let byte = field.to_byte(value.as_i64());
                debug!("{} = {byte}", field.name);
                frame.set_byte(field.index, byte);
                if field.clears_mode {
                    frame.clear_window(IDX_MODE_LOW, IDX_MODE_LOW);
                }
            }
            None => {
                if let Some(value) = status.and_then(|s| (field.status)(s)) {
                    frame.set_byte(field.index, field.to_byte(Some(value)));
                }
            }
        }
    }
}

/// What the compact branch may express, and how.
enum PartAction {
    Bit(usize, u8),
    Byte(usize, Option<(u8, u8)>),
    Person,
}

struct PartField {
    name: &'static str,
    get: fn(&Control) -> Option<&FieldValue>,
    action: PartAction,
}

/// Compact-branch priority order: the first present field below is the one
/// encoded; everything after it is ignored for the call.
static PART_PRIORITY: &[PartField] = &[
    PartField {
        name: "temperature",
        get: |c| c.temperature.as_ref(),
        action: PartAction::Byte(IDX_TEMPERATURE, Some(TEMPERATURE_BOUNDS)),
    },
    PartField {
        name: "wash_temperature",
        get: |c| c.wash_temperature.as_ref(),
        action: PartAction::Byte(IDX_WASH_TEMPERATURE, Some(WASH_TEMPERATURE_BOUNDS)),
    },
    PartField {
        name: "sterilization",
        get: |c| c.sterilization.as_ref(),
        action: PartAction::Bit(IDX_MODE_LOW, 0x40),
    },
    PartField {
        name: "high_temp_sterilize",
        get: |c| c.high_temp_sterilize.as_ref(),
        action: PartAction::Bit(IDX_PERSON, 0x10),
    },
    PartField {
        name: "smart_sterilize",
        get: |c| c.smart_sterilize.as_ref(),
        action: PartAction::Bit(IDX_PERSON, 0x08),
    },
    PartField {
        name: "uv_sterilization",
        get: |c| c.uv_sterilization.as_ref(),
        action: PartAction::Bit(IDX_MODE_HIGH, 0x40),
    },
    PartField {
        name: "fast_wash",
        get: |c| c.fast_wash.as_ref(),
        action: PartAction::Bit(IDX_MODE_LOW, 0x02),
    },
    PartField {
        name: "single_wash",
        get: |c| c.single_wash.as_ref(),
        action: PartAction::Bit(IDX_PERSON, 0x80),
    },
    PartField {
        name: "morning_bash",
        get: |c| c.morning_bash.as_ref(),
        action: PartAction::Bit(IDX_PERSON, 0x20),
    },
    PartField {
        name: "night_bash",
        get: |c| c.night_bash.as_ref(),
        action: PartAction::Bit(IDX_PERSON, 0x40),
    },
    PartField {
        name: "wash",
        get: |c| c.wash.as_ref(),
        action: PartAction::Bit(IDX_MODE_HIGH, 0x01),
    },
    PartField {
        name: "shower",
        get: |c| c.shower.as_ref(),
        action: PartAction::Bit(IDX_MODE_HIGH, 0x02),
    },
    PartField {
        name: "bath",
        get: |c| c.bath.as_ref(),
        action: PartAction::Bit(IDX_MODE_HIGH, 0x04),
    },
    PartField {
        name: "bath_person",
        get: |c| c.bath_person.as_ref(),
        action: PartAction::Person,
    },
    PartField {
        name: "scene_id",
        get: |c| c.scene_id.as_ref(),
        action: PartAction::Byte(IDX_SCENE_ID, None),
    },
    PartField {
        name: "screen_light",
        get: |c| c.screen_light.as_ref(),
        action: PartAction::Byte(IDX_SCREEN_LIGHT, Some(SCREEN_LIGHT_BOUNDS)),
    },
    PartField {
        name: "morning_night_bash",
        get: |c| c.morning_night_bash.as_ref(),
        action: PartAction::Byte(IDX_MORNING_NIGHT_BASH, None),
    },
    PartField {
        name: "grea",
        get: |c| c.grea.as_ref(),
        action: PartAction::Byte(IDX_GREA, None),
    },
];

/// The compact scheme expresses at most the first matching field per call,
/// with no status fallback.
fn encode_compact(control: &Control, frame: &mut FrameBuilder) {
    for field in PART_PRIORITY {
        let Some(value) = (field.get)(control) else {
            continue;
        };
        debug!("compact branch encodes {}", field.name);
        match field.action {
            PartAction::Bit(index, mask) => {
                if value.is_on() {
                    frame.set_bit(index, mask);
                }
            }
            PartAction::Byte(index, bounds) => {
                let byte = match bounds {
                    Some((min, max)) => clamp_byte(value.as_i64(), min, max),
                    None => value.as_i64().unwrap_or(0) as u8,
                };
                frame.set_byte(index, byte);
            }
            PartAction::Person => frame.set_bit(IDX_PERSON, person_code(value)),
        }
        break;
    }
}

/// Program schedule slots. Applied last: a slot overwrites the body type
/// and the payload window regardless of what the branches above wrote.
/// Slots are checked in order, so the highest present slot wins.
fn encode_appointments(control: &Control, frame: &mut FrameBuilder) {
    let slots = [&control.appoint0, &control.appoint1, &control.appoint2];
    for (slot, value) in slots.into_iter().enumerate() {
        if let Some(record) = value.as_deref() {
            encode_appointment(slot, record, frame);
        }
    }
}

fn encode_appointment(slot: usize, record: &str, frame: &mut FrameBuilder) {
    frame.clear_window(IDX_BODY_TYPE, APPOINT_WINDOW_END);
    frame.set_byte(IDX_BODY_TYPE, BODY_APPOINT_BASE + slot as u8);

    let mut parts = record.split(',');
    let enabled = parts.next().map(str::trim) == Some("1");
    frame.set_byte(IDX_APPOINT_RECORD, if enabled { 0xFF } else { 0x00 });
    for (i, part) in parts.take(APPOINT_RECORD_LEN - 1).enumerate() {
        let byte = part.trim().parse::<i64>().unwrap_or(0) as u8;
        frame.set_byte(IDX_APPOINT_RECORD + 1 + i, byte);
    }
    frame.truncate_body(APPOINT_WINDOW_END);
}

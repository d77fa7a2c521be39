//! The canonical field-to-wire mapping.
//!
//! One set of tables feeds both directions: the assembler resolves each
//! entry (explicit control value, else last-known status, else clear) and
//! the parser unpacks the same entries back into a status document. Scan
//! order in [`SWITCH_FIELDS`] and [`MODE_FLAGS`] is load-bearing: it is the
//! encode evaluation order and the decode tie-break.

use crate::types::{Control, FieldValue, Status};

// Shared control/status window, 0-based frame indices.
pub(crate) const IDX_SWITCHES: usize = 11;
pub(crate) const IDX_MODE_LOW: usize = 12;
pub(crate) const IDX_MODE_HIGH: usize = 13;
pub(crate) const IDX_TEMPERATURE: usize = 14;
pub(crate) const IDX_WASH_TEMPERATURE: usize = 15;
pub(crate) const IDX_PERSON: usize = 16;
pub(crate) const IDX_SCENE_ID: usize = 17;
pub(crate) const IDX_GREA: usize = 18;
pub(crate) const IDX_SCREEN_LIGHT: usize = 19;
pub(crate) const IDX_MORNING_NIGHT_BASH: usize = 20;
pub(crate) const IDX_AUX: usize = 21;

/// Last byte of the control payload window.
pub(crate) const CONTROL_WINDOW_END: usize = IDX_AUX;

// Status-report telemetry extension (decode only).
pub(crate) const IDX_HEAT_POWER: usize = 32;
pub(crate) const IDX_WATER_CONSUMPTION: usize = 35;

// Body type selectors.
pub(crate) const BODY_NORMAL: u8 = 0x01;
pub(crate) const BODY_APPOINT_QUERY: u8 = 0x02;
/// Appointment slot N programs with body type `BODY_APPOINT_BASE + N`.
pub(crate) const BODY_APPOINT_BASE: u8 = 0x05;

/// Appointment record: enable byte plus four raw parameter bytes.
pub(crate) const APPOINT_RECORD_LEN: usize = 5;
pub(crate) const IDX_APPOINT_RECORD: usize = 11;
/// Appointment frames overwrite the body through this index.
pub(crate) const APPOINT_WINDOW_END: usize = 19;

/// Heating-element bits inside the high mode byte.
pub(crate) const HALF_HEAT_MASK: u8 = 0x10;
pub(crate) const WHOLE_HEAT_MASK: u8 = 0x20;

pub(crate) const BATH_PERSON_MASK: u8 = 0x07;
pub(crate) const BATH_PERSON_OFF: &str = "off";

/// Bath-person enumeration, value within [`BATH_PERSON_MASK`].
pub(crate) static BATH_PERSON_VALUES: &[(&str, u8)] =
    &[("single", 1), ("double", 2), ("triple", 3)];

// Firmware-enforced numeric bounds.
pub(crate) const TEMPERATURE_BOUNDS: (u8, u8) = (30, 75);
pub(crate) const WASH_TEMPERATURE_BOUNDS: (u8, u8) = (35, 60);
pub(crate) const SCREEN_LIGHT_BOUNDS: (u8, u8) = (0, 100);

/// Device variants whose firmware only accepts the compact one-field
/// control scheme.
pub(crate) const COMPACT_SUB_TYPES: &[i64] = &[1];

/// One boolean bit field, mapped in both directions.
pub(crate) struct SwitchField {
    pub name: &'static str,
    pub index: usize,
    pub mask: u8,
    pub control: fn(&Control) -> Option<&FieldValue>,
    pub status: fn(&Status) -> Option<&str>,
    pub store: fn(&mut Status, &'static str),
}

/// Every single-bit field, in scan order.
pub(crate) static SWITCH_FIELDS: &[SwitchField] = &[
    SwitchField {
        name: "power",
        index: IDX_SWITCHES,
        mask: 0x01,
        control: |c| c.power.as_ref(),
        status: |s| s.power.as_deref(),
        store: |s, v| s.power = Some(v.to_string()),
    },
    SwitchField {
        name: "heating",
        index: IDX_SWITCHES,
        mask: 0x02,
        control: |c| c.heating.as_ref(),
        status: |s| s.heating.as_deref(),
        store: |s, v| s.heating = Some(v.to_string()),
    },
    SwitchField {
        name: "keep_warm",
        index: IDX_SWITCHES,
        mask: 0x04,
        control: |c| c.keep_warm.as_ref(),
        status: |s| s.keep_warm.as_deref(),
        store: |s, v| s.keep_warm = Some(v.to_string()),
    },
    SwitchField {
        name: "protect",
        index: IDX_SWITCHES,
        mask: 0x08,
        control: |c| c.protect.as_ref(),
        status: |s| s.protect.as_deref(),
        store: |s, v| s.protect = Some(v.to_string()),
    },
    SwitchField {
        name: "discharge",
        index: IDX_SWITCHES,
        mask: 0x10,
        control: |c| c.discharge.as_ref(),
        status: |s| s.discharge.as_deref(),
        store: |s, v| s.discharge = Some(v.to_string()),
    },
    SwitchField {
        name: "water_cyclic",
        index: IDX_SWITCHES,
        mask: 0x20,
        control: |c| c.water_cyclic.as_ref(),
        status: |s| s.water_cyclic.as_deref(),
        store: |s, v| s.water_cyclic = Some(v.to_string()),
    },
    SwitchField {
        name: "passwater",
        index: IDX_SWITCHES,
        mask: 0x40,
        control: |c| c.passwater.as_ref(),
        status: |s| s.passwater.as_deref(),
        store: |s, v| s.passwater = Some(v.to_string()),
    },
    SwitchField {
        name: "fault",
        index: IDX_SWITCHES,
        mask: 0x80,
        control: |c| c.fault.as_ref(),
        status: |s| s.fault.as_deref(),
        store: |s, v| s.fault = Some(v.to_string()),
    },
    SwitchField {
        name: "eplus",
        index: IDX_MODE_LOW,
        mask: 0x01,
        control: |c| c.eplus.as_ref(),
        status: |s| s.eplus.as_deref(),
        store: |s, v| s.eplus = Some(v.to_string()),
    },
    SwitchField {
        name: "fast_wash",
        index: IDX_MODE_LOW,
        mask: 0x02,
        control: |c| c.fast_wash.as_ref(),
        status: |s| s.fast_wash.as_deref(),
        store: |s, v| s.fast_wash = Some(v.to_string()),
    },
    SwitchField {
        name: "summer",
        index: IDX_MODE_LOW,
        mask: 0x04,
        control: |c| c.summer.as_ref(),
        status: |s| s.summer.as_deref(),
        store: |s, v| s.summer = Some(v.to_string()),
    },
    SwitchField {
        name: "winter",
        index: IDX_MODE_LOW,
        mask: 0x08,
        control: |c| c.winter.as_ref(),
        status: |s| s.winter.as_deref(),
        store: |s, v| s.winter = Some(v.to_string()),
    },
    SwitchField {
        name: "efficient",
        index: IDX_MODE_LOW,
        mask: 0x10,
        control: |c| c.efficient.as_ref(),
        status: |s| s.efficient.as_deref(),
        store: |s, v| s.efficient = Some(v.to_string()),
    },
    SwitchField {
        name: "night",
        index: IDX_MODE_LOW,
        mask: 0x20,
        control: |c| c.night.as_ref(),
        status: |s| s.night.as_deref(),
        store: |s, v| s.night = Some(v.to_string()),
    },
    SwitchField {
        name: "sterilization",
        index: IDX_MODE_LOW,
        mask: 0x40,
        control: |c| c.sterilization.as_ref(),
        status: |s| s.sterilization.as_deref(),
        store: |s, v| s.sterilization = Some(v.to_string()),
    },
    SwitchField {
        name: "cloud",
        index: IDX_MODE_LOW,
        mask: 0x80,
        control: |c| c.cloud.as_ref(),
        status: |s| s.cloud.as_deref(),
        store: |s, v| s.cloud = Some(v.to_string()),
    },
    SwitchField {
        name: "wash",
        index: IDX_MODE_HIGH,
        mask: 0x01,
        control: |c| c.wash.as_ref(),
        status: |s| s.wash.as_deref(),
        store: |s, v| s.wash = Some(v.to_string()),
    },
    SwitchField {
        name: "shower",
        index: IDX_MODE_HIGH,
        mask: 0x02,
        control: |c| c.shower.as_ref(),
        status: |s| s.shower.as_deref(),
        store: |s, v| s.shower = Some(v.to_string()),
    },
    SwitchField {
        name: "bath",
        index: IDX_MODE_HIGH,
        mask: 0x04,
        control: |c| c.bath.as_ref(),
        status: |s| s.bath.as_deref(),
        store: |s, v| s.bath = Some(v.to_string()),
    },
    SwitchField {
        name: "memory",
        index: IDX_MODE_HIGH,
        mask: 0x08,
        control: |c| c.memory.as_ref(),
        status: |s| s.memory.as_deref(),
        store: |s, v| s.memory = Some(v.to_string()),
    },
    SwitchField {
        name: "half_heat",
        index: IDX_MODE_HIGH,
        mask: HALF_HEAT_MASK,
        control: |c| c.half_heat.as_ref(),
        status: |s| s.half_heat.as_deref(),
        store: |s, v| s.half_heat = Some(v.to_string()),
    },
    SwitchField {
        name: "whole_heat",
        index: IDX_MODE_HIGH,
        mask: WHOLE_HEAT_MASK,
        control: |c| c.whole_heat.as_ref(),
        status: |s| s.whole_heat.as_deref(),
        store: |s, v| s.whole_heat = Some(v.to_string()),
    },
    SwitchField {
        name: "uv_sterilization",
        index: IDX_MODE_HIGH,
        mask: 0x40,
        control: |c| c.uv_sterilization.as_ref(),
        status: |s| s.uv_sterilization.as_deref(),
        store: |s, v| s.uv_sterilization = Some(v.to_string()),
    },
    SwitchField {
        name: "ai_wash",
        index: IDX_MODE_HIGH,
        mask: 0x80,
        control: |c| c.ai_wash.as_ref(),
        status: |s| s.ai_wash.as_deref(),
        store: |s, v| s.ai_wash = Some(v.to_string()),
    },
    SwitchField {
        name: "smart_sterilize",
        index: IDX_PERSON,
        mask: 0x08,
        control: |c| c.smart_sterilize.as_ref(),
        status: |s| s.smart_sterilize.as_deref(),
        store: |s, v| s.smart_sterilize = Some(v.to_string()),
    },
    SwitchField {
        name: "high_temp_sterilize",
        index: IDX_PERSON,
        mask: 0x10,
        control: |c| c.high_temp_sterilize.as_ref(),
        status: |s| s.high_temp_sterilize.as_deref(),
        store: |s, v| s.high_temp_sterilize = Some(v.to_string()),
    },
    SwitchField {
        name: "morning_bash",
        index: IDX_PERSON,
        mask: 0x20,
        control: |c| c.morning_bash.as_ref(),
        status: |s| s.morning_bash.as_deref(),
        store: |s, v| s.morning_bash = Some(v.to_string()),
    },
    SwitchField {
        name: "night_bash",
        index: IDX_PERSON,
        mask: 0x40,
        control: |c| c.night_bash.as_ref(),
        status: |s| s.night_bash.as_deref(),
        store: |s, v| s.night_bash = Some(v.to_string()),
    },
    SwitchField {
        name: "single_wash",
        index: IDX_PERSON,
        mask: 0x80,
        control: |c| c.single_wash.as_ref(),
        status: |s| s.single_wash.as_deref(),
        store: |s, v| s.single_wash = Some(v.to_string()),
    },
    SwitchField {
        name: "sleep",
        index: IDX_AUX,
        mask: 0x01,
        control: |c| c.sleep.as_ref(),
        status: |s| s.sleep.as_deref(),
        store: |s, v| s.sleep = Some(v.to_string()),
    },
    SwitchField {
        name: "bacteriostatic",
        index: IDX_AUX,
        mask: 0x02,
        control: |c| c.bacteriostatic.as_ref(),
        status: |s| s.bacteriostatic.as_deref(),
        store: |s, v| s.bacteriostatic = Some(v.to_string()),
    },
    SwitchField {
        name: "smart_grid",
        index: IDX_AUX,
        mask: 0x04,
        control: |c| c.smart_grid.as_ref(),
        status: |s| s.smart_grid.as_deref(),
        store: |s, v| s.smart_grid = Some(v.to_string()),
    },
    SwitchField {
        name: "screen_off",
        index: IDX_AUX,
        mask: 0x08,
        control: |c| c.screen_off.as_ref(),
        status: |s| s.screen_off.as_deref(),
        store: |s, v| s.screen_off = Some(v.to_string()),
    },
    SwitchField {
        name: "mute",
        index: IDX_AUX,
        mask: 0x10,
        control: |c| c.mute.as_ref(),
        status: |s| s.mute.as_deref(),
        store: |s, v| s.mute = Some(v.to_string()),
    },
    SwitchField {
        name: "vacation",
        index: IDX_AUX,
        mask: 0x20,
        control: |c| c.vacation.as_ref(),
        status: |s| s.vacation.as_deref(),
        store: |s, v| s.vacation = Some(v.to_string()),
    },
    SwitchField {
        name: "remind",
        index: IDX_AUX,
        mask: 0x40,
        control: |c| c.remind.as_ref(),
        status: |s| s.remind.as_deref(),
        store: |s, v| s.remind = Some(v.to_string()),
    },
    SwitchField {
        name: "child_lock",
        index: IDX_AUX,
        mask: 0x80,
        control: |c| c.child_lock.as_ref(),
        status: |s| s.child_lock.as_deref(),
        store: |s, v| s.child_lock = Some(v.to_string()),
    },
];

/// One named operating mode bit.
pub(crate) struct ModeFlag {
    pub name: &'static str,
    pub index: usize,
    pub mask: u8,
}

/// Mode dispatch table. Encode sets exactly one entry after zeroing both
/// mode bytes; decode scans in order and the last set flag wins.
pub(crate) static MODE_FLAGS: &[ModeFlag] = &[
    ModeFlag { name: "eplus", index: IDX_MODE_LOW, mask: 0x01 },
    ModeFlag { name: "fast_wash", index: IDX_MODE_LOW, mask: 0x02 },
    ModeFlag { name: "summer", index: IDX_MODE_LOW, mask: 0x04 },
    ModeFlag { name: "winter", index: IDX_MODE_LOW, mask: 0x08 },
    ModeFlag { name: "efficient", index: IDX_MODE_LOW, mask: 0x10 },
    ModeFlag { name: "night", index: IDX_MODE_LOW, mask: 0x20 },
    ModeFlag { name: "sterilization", index: IDX_MODE_LOW, mask: 0x40 },
    ModeFlag { name: "cloud", index: IDX_MODE_LOW, mask: 0x80 },
    ModeFlag { name: "wash", index: IDX_MODE_HIGH, mask: 0x01 },
    ModeFlag { name: "shower", index: IDX_MODE_HIGH, mask: 0x02 },
    ModeFlag { name: "bath", index: IDX_MODE_HIGH, mask: 0x04 },
    ModeFlag { name: "memory", index: IDX_MODE_HIGH, mask: 0x08 },
];

/// One whole-byte numeric field, mapped in both directions.
pub(crate) struct NumericField {
    pub name: &'static str,
    pub index: usize,
    /// Inclusive bounds where the firmware enforces a range.
    pub bounds: Option<(u8, u8)>,
    /// An explicit value also zeroes the named-mode byte: set-temperature
    /// and set-named-mode are mutually exclusive on the wire.
    pub clears_mode: bool,
    pub control: fn(&Control) -> Option<&FieldValue>,
    pub status: fn(&Status) -> Option<i64>,
    pub store: fn(&mut Status, u8),
}

impl NumericField {
    /// Resolve a raw wire byte, clamping only where bounds exist.
    pub(crate) fn to_byte(&self, value: Option<i64>) -> u8 {
        match self.bounds {
            Some((min, max)) => crate::types::clamp_byte(value, min, max),
            None => value.unwrap_or(0) as u8,
        }
    }
}

pub(crate) static NUMERIC_FIELDS: &[NumericField] = &[
    NumericField {
        name: "temperature",
        index: IDX_TEMPERATURE,
        bounds: Some(TEMPERATURE_BOUNDS),
        clears_mode: true,
        control: |c| c.temperature.as_ref(),
        status: |s| s.temperature.map(i64::from),
        store: |s, v| s.temperature = Some(v),
    },
    NumericField {
        name: "wash_temperature",
        index: IDX_WASH_TEMPERATURE,
        bounds: Some(WASH_TEMPERATURE_BOUNDS),
        clears_mode: false,
        control: |c| c.wash_temperature.as_ref(),
        status: |s| s.wash_temperature.map(i64::from),
        store: |s, v| s.wash_temperature = Some(v),
    },
    NumericField {
        name: "scene_id",
        index: IDX_SCENE_ID,
        bounds: None,
        clears_mode: false,
        control: |c| c.scene_id.as_ref(),
        status: |s| s.scene_id.map(i64::from),
        store: |s, v| s.scene_id = Some(v),
    },
    NumericField {
        name: "grea",
        index: IDX_GREA,
        bounds: None,
        clears_mode: false,
        control: |c| c.grea.as_ref(),
        status: |s| s.grea.map(i64::from),
        store: |s, v| s.grea = Some(v),
    },
    NumericField {
        name: "screen_light",
        index: IDX_SCREEN_LIGHT,
        bounds: Some(SCREEN_LIGHT_BOUNDS),
        clears_mode: false,
        control: |c| c.screen_light.as_ref(),
        status: |s| s.screen_light.map(i64::from),
        store: |s, v| s.screen_light = Some(v),
    },
    NumericField {
        name: "morning_night_bash",
        index: IDX_MORNING_NIGHT_BASH,
        bounds: None,
        clears_mode: false,
        control: |c| c.morning_night_bash.as_ref(),
        status: |s| s.morning_night_bash.map(i64::from),
        store: |s, v| s.morning_night_bash = Some(v),
    },
];

/// One telemetry byte found only in status reports.
pub(crate) struct TelemetryField {
    pub index: usize,
    pub store: fn(&mut Status, u8),
}

pub(crate) static TELEMETRY_FIELDS: &[TelemetryField] = &[
    TelemetryField { index: 22, store: |s, v| s.cur_temperature = Some(v) },
    TelemetryField { index: 23, store: |s, v| s.top_temperature = Some(v) },
    TelemetryField { index: 24, store: |s, v| s.bottom_temperature = Some(v) },
    TelemetryField { index: 25, store: |s, v| s.in_temperature = Some(v) },
    TelemetryField { index: 26, store: |s, v| s.hot_water = Some(v) },
    TelemetryField { index: 27, store: |s, v| s.remain_hour = Some(v) },
    TelemetryField { index: 28, store: |s, v| s.remain_minute = Some(v) },
    TelemetryField { index: 29, store: |s, v| s.error_code = Some(v) },
    TelemetryField { index: 30, store: |s, v| s.water_flow = Some(v) },
    TelemetryField { index: 31, store: |s, v| s.wash_remain_time = Some(v) },
    TelemetryField { index: 34, store: |s, v| s.day_water_consumption = Some(v) },
    TelemetryField { index: 37, store: |s, v| s.appoint_hour = Some(v) },
    TelemetryField { index: 38, store: |s, v| s.appoint_minute = Some(v) },
    TelemetryField { index: 39, store: |s, v| s.clock_hour = Some(v) },
    TelemetryField { index: 40, store: |s, v| s.clock_minute = Some(v) },
];

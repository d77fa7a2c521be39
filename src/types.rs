//! Request and status documents exchanged with the upstream app layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the fallible codec API.
///
/// The string entry points ([`crate::EwhCodec::encode`] /
/// [`crate::EwhCodec::decode`]) map every variant to `None`, which is what
/// the app layer treats as "nothing to send / nothing decoded".
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input string was empty.
    #[error("empty input")]
    EmptyInput,
    /// The input was not a valid JSON document.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The request document carried neither a query nor a control section.
    #[error("request contains nothing to encode")]
    EmptyRequest,
    /// The report document had no `msg.data` hex payload.
    #[error("report document has no msg.data field")]
    MissingData,
    /// The `msg.data` payload was not a hex string.
    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A control value as the app sends it: `"on"`, `"off"`, `1`, `0`, `"50"`
/// and plain numbers are all in circulation, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// True for `"on"`, `"1"` or the number 1.
    pub fn is_on(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n == 1.0,
            FieldValue::Text(t) => t == "on" || t == "1",
        }
    }

    /// True for `"off"`, `"0"` or the number 0.
    pub fn is_off(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n == 0.0,
            FieldValue::Text(t) => t == "off" || t == "0",
        }
    }

    /// Numeric reading of the value, if it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n as i64),
            FieldValue::Text(t) => t.trim().parse().ok(),
        }
    }

    /// Textual reading of the value, if it is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(t) => Some(t),
        }
    }
}

/// Top-level request document handed to the encoder.
#[derive(Debug, Default, Deserialize)]
pub struct Request {
    pub query: Option<Query>,
    pub control: Option<Control>,
    /// Last known device status, used as the fallback source for fields
    /// the control section omits.
    pub status: Option<Status>,
    pub deviceinfo: Option<DeviceInfo>,
}

/// Query section; presence alone selects a query frame.
#[derive(Debug, Default, Deserialize)]
pub struct Query {
    pub query_type: Option<String>,
}

/// Device variant information from the registration layer.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "deviceSubType")]
    pub device_sub_type: Option<FieldValue>,
}

/// Control section: every field optional, every field independent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Control {
    pub power: Option<FieldValue>,
    /// Named operating mode; resets both mode bytes before setting one bit.
    pub mode: Option<String>,
    /// Alias over the half/whole heating-element bits.
    pub heat: Option<FieldValue>,
    /// `"part"` forces the compact single-field encoding.
    pub control_type: Option<String>,

    pub heating: Option<FieldValue>,
    pub keep_warm: Option<FieldValue>,
    pub protect: Option<FieldValue>,
    pub discharge: Option<FieldValue>,
    pub water_cyclic: Option<FieldValue>,
    pub passwater: Option<FieldValue>,
    pub fault: Option<FieldValue>,

    pub eplus: Option<FieldValue>,
    pub fast_wash: Option<FieldValue>,
    pub summer: Option<FieldValue>,
    pub winter: Option<FieldValue>,
    pub efficient: Option<FieldValue>,
    pub night: Option<FieldValue>,
    pub sterilization: Option<FieldValue>,
    pub cloud: Option<FieldValue>,
    pub wash: Option<FieldValue>,
    pub shower: Option<FieldValue>,
    pub bath: Option<FieldValue>,
    pub memory: Option<FieldValue>,

    pub half_heat: Option<FieldValue>,
    pub whole_heat: Option<FieldValue>,
    pub uv_sterilization: Option<FieldValue>,
    pub ai_wash: Option<FieldValue>,

    pub bath_person: Option<FieldValue>,
    pub smart_sterilize: Option<FieldValue>,
    pub high_temp_sterilize: Option<FieldValue>,
    pub morning_bash: Option<FieldValue>,
    pub night_bash: Option<FieldValue>,
    pub single_wash: Option<FieldValue>,

    pub temperature: Option<FieldValue>,
    pub wash_temperature: Option<FieldValue>,
    pub scene_id: Option<FieldValue>,
    pub grea: Option<FieldValue>,
    pub screen_light: Option<FieldValue>,
    pub morning_night_bash: Option<FieldValue>,

    pub sleep: Option<FieldValue>,
    pub bacteriostatic: Option<FieldValue>,
    pub smart_grid: Option<FieldValue>,
    pub screen_off: Option<FieldValue>,
    pub mute: Option<FieldValue>,
    pub vacation: Option<FieldValue>,
    pub remind: Option<FieldValue>,
    pub child_lock: Option<FieldValue>,

    /// Schedule slots, `"<enable>,<b1>,<b2>,<b3>,<b4>"`.
    pub appoint0: Option<String>,
    pub appoint1: Option<String>,
    pub appoint2: Option<String>,
}

/// Flat status document produced by the parser. Fields missing from a short
/// frame stay `None` and are omitted from the serialized document.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Field-table revision; set on every parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_warm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_cyclic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwater: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eplus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_wash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sterilization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_heat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_heat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_sterilization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_wash: Option<String>,
    /// Derived from the heating-element bits: `"whole"`, `"half"` or `"none"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat: Option<String>,

    /// Derived: last set mode flag in table-scan order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// `"single"`, `"double"`, `"triple"` or `"off"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bath_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_sterilize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_temp_sterilize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_bash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_bash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_wash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wash_temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grea: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_light: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_night_bash: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bacteriostatic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_grid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_off: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_lock: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cur_temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_temperature: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot_water: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remain_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remain_minute: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_flow: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wash_remain_time: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_power: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_water_consumption: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_consumption: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appoint_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appoint_minute: Option<u8>,
    // Wall-clock bytes pass through untouched; no timezone handling here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_minute: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub appoint0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appoint1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appoint2: Option<String>,
}

/// Clamp into `min..=max`, treating a missing or unparseable value as 0.
pub(crate) fn clamp_byte(value: Option<i64>, min: u8, max: u8) -> u8 {
    value.unwrap_or(0).clamp(i64::from(min), i64::from(max)) as u8
}

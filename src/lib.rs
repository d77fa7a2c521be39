//! Bidirectional frame codec for 0xE2 smart electric water heater
//! appliances.
//!
//! The codec turns a JSON request document (query or control) into the
//! appliance's fixed-layout, checksummed wire frame as a lowercase hex
//! string, and turns an inbound report (`{"msg":{"data":"<hex>"}}`) back
//! into a flat status document. Transport, discovery and session handling
//! live outside this crate: they hand the codec a payload and get a
//! payload back.
//!
//! # Example
//!
//! ```
//! use ewh_codec::EwhCodec;
//!
//! let codec = EwhCodec::new();
//! let frame = codec.encode(r#"{"control":{"power":"on"}}"#).unwrap();
//! assert_eq!(frame, "aa0de20000000000000201010d");
//! ```
//!
//! Every call is independent and side-effect free; a single codec instance
//! may be shared across threads.

mod assembler;
mod codec;
mod fields;
mod frame;
mod parser;
mod types;

// Re-exports
pub use assembler::assemble;
pub use codec::EwhCodec;
pub use frame::{bytes_to_hex, bytes_to_raw_string, hex_to_bytes, raw_string_to_bytes};
pub use parser::{FrameParser, STATUS_VERSION};
pub use types::{CodecError, Control, DeviceInfo, FieldValue, Query, Request, Status};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{
        bytes_to_hex, bytes_to_raw_string, checksum, hex_to_bytes, raw_string_to_bytes,
    };
    use crate::types::clamp_byte;

    /// Decode a request JSON string and assemble its frame.
    fn assemble_json(json: &str) -> Vec<u8> {
        let request: Request = serde_json::from_str(json).unwrap();
        assemble(&request).expect("request should produce a frame")
    }

    /// Build a raw frame for parser tests: header, frame type, body bytes,
    /// correct length byte and checksum.
    fn raw_frame(frame_type: u8, body: &[u8]) -> Vec<u8> {
        let mut frame = vec![0xAA, 0x00, 0xE2, 0, 0, 0, 0, 0, 0, frame_type];
        frame.extend_from_slice(body);
        frame[1] = (frame.len() + 1) as u8;
        let check = checksum(&frame, 1, frame.len() - 1);
        frame.push(check);
        frame
    }

    // ===================
    // checksum tests
    // ===================

    #[test]
    fn test_checksum_literal() {
        // Worked example: everything after the start byte.
        let bytes = [
            0xAA, 0x0B, 0xE2, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x01,
        ];
        assert_eq!(checksum(&bytes, 1, 11), 0x0F);
    }

    #[test]
    fn test_checksum_wraps_to_zero() {
        assert_eq!(checksum(&[0x80, 0x80], 0, 1), 0x00);
        assert_eq!(checksum(&[0xFF, 0x01], 0, 1), 0x00);
    }

    #[test]
    fn test_checksum_single_byte() {
        assert_eq!(checksum(&[0x00, 0x10, 0x00], 1, 1), 0xF0);
    }

    // ===================
    // hex / raw string tests
    // ===================

    #[test]
    fn test_bytes_to_hex_lowercase() {
        assert_eq!(bytes_to_hex(&[0xDE, 0xAD, 0xBE, 0xEF]), "deadbeef");
        assert_eq!(bytes_to_hex(&[0x00, 0x01, 0x0A, 0xFF]), "00010aff");
        assert_eq!(bytes_to_hex(&[]), "");
    }

    #[test]
    fn test_hex_to_bytes_even_length() {
        assert_eq!(hex_to_bytes("aa0de2").unwrap(), vec![0xAA, 0x0D, 0xE2]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_drops_trailing_nibble() {
        // Odd-length input loses its last nibble; kept for compatibility.
        assert_eq!(hex_to_bytes("aa0bf").unwrap(), vec![0xAA, 0x0B]);
        assert_eq!(hex_to_bytes("a").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_rejects_non_hex() {
        assert!(hex_to_bytes("zz").is_err());
        assert!(hex_to_bytes("aa b").is_err());
    }

    #[test]
    fn test_raw_string_round_trip() {
        let bytes = [0x00, 0x41, 0x7F, 0x80, 0xFF];
        let staged = bytes_to_raw_string(&bytes);
        assert_eq!(staged.chars().count(), bytes.len());
        assert_eq!(raw_string_to_bytes(&staged), bytes);
    }

    // ===================
    // clamp tests
    // ===================

    #[test]
    fn test_clamp_in_range() {
        assert_eq!(clamp_byte(Some(50), 30, 75), 50);
        assert_eq!(clamp_byte(Some(30), 30, 75), 30);
        assert_eq!(clamp_byte(Some(75), 30, 75), 75);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(clamp_byte(Some(10), 30, 75), 30);
        assert_eq!(clamp_byte(Some(200), 30, 75), 75);
        assert_eq!(clamp_byte(Some(-5), 0, 100), 0);
    }

    #[test]
    fn test_clamp_missing_defaults_to_zero() {
        assert_eq!(clamp_byte(None, 30, 75), 30);
        assert_eq!(clamp_byte(None, 0, 100), 0);
    }

    // ===================
    // query frame tests
    // ===================

    #[test]
    fn test_query_frame() {
        let frame = assemble_json(r#"{"query":{}}"#);
        assert_eq!(
            frame,
            [0xAA, 0x0D, 0xE2, 0, 0, 0, 0, 0, 0, 0x03, 0x01, 0x01, 0x0C]
        );
    }

    #[test]
    fn test_appoint_query_frame() {
        let frame = assemble_json(r#"{"query":{"query_type":"appoint_query"}}"#);
        assert_eq!(
            frame,
            [0xAA, 0x0D, 0xE2, 0, 0, 0, 0, 0, 0, 0x03, 0x02, 0x01, 0x0B]
        );
    }

    #[test]
    fn test_query_wins_over_control() {
        let frame = assemble_json(r#"{"query":{},"control":{"power":"on"}}"#);
        assert_eq!(frame[9], 0x03);
    }

    // ===================
    // power branch tests
    // ===================

    #[test]
    fn test_power_on_frame() {
        let frame = assemble_json(r#"{"control":{"power":"on"}}"#);
        assert_eq!(
            frame,
            [0xAA, 0x0D, 0xE2, 0, 0, 0, 0, 0, 0, 0x02, 0x01, 0x01, 0x0D]
        );
    }

    #[test]
    fn test_power_off_frame() {
        let frame = assemble_json(r#"{"control":{"power":"off"}}"#);
        assert_eq!(
            frame,
            [0xAA, 0x0D, 0xE2, 0, 0, 0, 0, 0, 0, 0x02, 0x01, 0x00, 0x0E]
        );
    }

    #[test]
    fn test_power_accepts_numbers() {
        let on = assemble_json(r#"{"control":{"power":1}}"#);
        assert_eq!(on[11], 0x01);
        let off = assemble_json(r#"{"control":{"power":0}}"#);
        assert_eq!(off[11], 0x00);
    }

    #[test]
    fn test_power_is_exclusive() {
        // Other control fields are dropped when a power command is present.
        let frame = assemble_json(
            r#"{"control":{"power":"on","temperature":50,"eplus":"on","scene_id":3}}"#,
        );
        assert_eq!(frame.len(), 13);
        assert_eq!(frame[10], 0x01);
        assert_eq!(frame[11], 0x01);
    }

    // ===================
    // full branch tests
    // ===================

    #[test]
    fn test_full_frame_shape() {
        let frame = assemble_json(r#"{"control":{}}"#);
        assert_eq!(frame.len(), 23);
        assert_eq!(frame[1], 23);
        assert_eq!(frame[9], 0x02);
        assert_eq!(frame[10], 0x01);
        // Empty control with no status leaves the whole window clear.
        assert!(frame[11..22].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_status_fallback_preserves_eplus() {
        let frame = assemble_json(r#"{"control":{},"status":{"eplus":"on"}}"#);
        assert_eq!(frame[12] & 0x01, 0x01);
    }

    #[test]
    fn test_control_off_overrides_status_on() {
        let frame = assemble_json(r#"{"control":{"eplus":"off"},"status":{"eplus":"on"}}"#);
        assert_eq!(frame[12] & 0x01, 0x00);
    }

    #[test]
    fn test_status_fallback_preserves_power_bit() {
        // Without an explicit power command the last-known power state is
        // carried in the switch byte of the full frame.
        let frame = assemble_json(r#"{"control":{"eplus":"on"},"status":{"power":"on"}}"#);
        assert_eq!(frame[11] & 0x01, 0x01);
        assert_eq!(frame.len(), 23);
    }

    #[test]
    fn test_mode_resets_then_sets_one_bit() {
        let frame = assemble_json(
            r#"{"control":{"mode":"summer"},"status":{"eplus":"on","fast_wash":"on","wash":"on"}}"#,
        );
        assert_eq!(frame[12], 0x04);
        assert_eq!(frame[13], 0x00);
    }

    #[test]
    fn test_mode_summer_alone_literal() {
        let frame = assemble_json(r#"{"control":{"mode":"summer"}}"#);
        assert_eq!(
            frame,
            [
                0xAA, 0x17, 0xE2, 0, 0, 0, 0, 0, 0, 0x02, 0x01, 0x00, 0x04, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn test_unknown_mode_leaves_mode_bytes_clear() {
        let frame = assemble_json(r#"{"control":{"mode":"turbo"},"status":{"night":"on"}}"#);
        assert_eq!(frame[12], 0x00);
        assert_eq!(frame[13], 0x00);
    }

    #[test]
    fn test_mode_bits_span_both_bytes() {
        let frame = assemble_json(r#"{"control":{"mode":"memory"}}"#);
        assert_eq!(frame[12], 0x00);
        assert_eq!(frame[13], 0x08);
    }

    #[test]
    fn test_heat_alias() {
        let half = assemble_json(r#"{"control":{"heat":"half"}}"#);
        assert_eq!(half[13], 0x10);
        let whole = assemble_json(r#"{"control":{"heat":"whole"}}"#);
        assert_eq!(whole[13], 0x20);
        let numeric = assemble_json(r#"{"control":{"heat":2}}"#);
        assert_eq!(numeric[13], 0x20);
    }

    #[test]
    fn test_heat_none_clears_preserved_bits() {
        let frame = assemble_json(r#"{"control":{"heat":"none"},"status":{"whole_heat":"on"}}"#);
        assert_eq!(frame[13] & 0x30, 0x00);
    }

    #[test]
    fn test_temperature_clears_named_mode_byte() {
        let frame =
            assemble_json(r#"{"control":{"temperature":50},"status":{"summer":"on"}}"#);
        assert_eq!(frame[14], 50);
        assert_eq!(frame[12], 0x00);
    }

    #[test]
    fn test_temperature_from_status_keeps_mode_bits() {
        let frame =
            assemble_json(r#"{"control":{},"status":{"temperature":60,"summer":"on"}}"#);
        assert_eq!(frame[14], 60);
        assert_eq!(frame[12], 0x04);
    }

    #[test]
    fn test_temperature_clamped() {
        let low = assemble_json(r#"{"control":{"temperature":10}}"#);
        assert_eq!(low[14], 30);
        let high = assemble_json(r#"{"control":{"temperature":200}}"#);
        assert_eq!(high[14], 75);
    }

    #[test]
    fn test_unbounded_numeric_copied_verbatim() {
        let frame = assemble_json(r#"{"control":{"scene_id":9,"grea":250}}"#);
        assert_eq!(frame[17], 9);
        assert_eq!(frame[18], 250);
    }

    #[test]
    fn test_bath_person_by_name_and_number() {
        let named = assemble_json(r#"{"control":{"bath_person":"double"}}"#);
        assert_eq!(named[16] & 0x07, 0x02);
        let numbered = assemble_json(r#"{"control":{"bath_person":3}}"#);
        assert_eq!(numbered[16] & 0x07, 0x03);
    }

    #[test]
    fn test_aux_flags_share_their_byte() {
        let frame =
            assemble_json(r#"{"control":{"sleep":"on","child_lock":"on"},"status":{"mute":"on"}}"#);
        assert_eq!(frame[21], 0x01 | 0x10 | 0x80);
    }

    #[test]
    fn test_length_and_checksum_invariant() {
        for json in [
            r#"{"query":{}}"#,
            r#"{"control":{"power":"on"}}"#,
            r#"{"control":{"mode":"night","temperature":42}}"#,
            r#"{"control":{"appoint0":"1,6,30,0,0"}}"#,
        ] {
            let frame = assemble_json(json);
            assert_eq!(frame[1] as usize, frame.len());
            let check = checksum(&frame, 1, frame.len() - 2);
            assert_eq!(*frame.last().unwrap(), check);
        }
    }

    // ===================
    // compact branch tests
    // ===================

    #[test]
    fn test_part_encodes_first_match_only() {
        let frame = assemble_json(
            r#"{"control":{"control_type":"part","temperature":50,"sterilization":"on"}}"#,
        );
        assert_eq!(frame[14], 50);
        // Sterilization ranks below temperature and is dropped for the call.
        assert_eq!(frame[12], 0x00);
    }

    #[test]
    fn test_part_single_switch() {
        let frame =
            assemble_json(r#"{"control":{"control_type":"part","sterilization":"on"}}"#);
        assert_eq!(frame[12], 0x40);
    }

    #[test]
    fn test_limited_sub_type_selects_compact() {
        let frame = assemble_json(
            r#"{"deviceinfo":{"deviceSubType":1},"control":{"sterilization":"on"},"status":{"eplus":"on"}}"#,
        );
        // Compact scheme: one field, no status fallback.
        assert_eq!(frame[12], 0x40);
        assert_eq!(frame[12] & 0x01, 0x00);
    }

    #[test]
    fn test_limited_sub_type_as_string() {
        let frame = assemble_json(
            r#"{"deviceinfo":{"deviceSubType":"1"},"control":{"wash":"on"}}"#,
        );
        assert_eq!(frame[13], 0x01);
    }

    #[test]
    fn test_rich_sub_type_keeps_full_scheme() {
        let frame = assemble_json(
            r#"{"deviceinfo":{"deviceSubType":2},"control":{"sterilization":"on"},"status":{"eplus":"on"}}"#,
        );
        assert_eq!(frame[12], 0x40 | 0x01);
    }

    #[test]
    fn test_part_with_no_match_leaves_window_clear() {
        let frame = assemble_json(r#"{"control":{"control_type":"part"}}"#);
        assert!(frame[11..22].iter().all(|&b| b == 0));
    }

    // ===================
    // appointment tests
    // ===================

    #[test]
    fn test_appoint0_frame() {
        let frame = assemble_json(r#"{"control":{"appoint0":"1,6,30,0,0"}}"#);
        assert_eq!(
            frame,
            [
                0xAA, 0x15, 0xE2, 0, 0, 0, 0, 0, 0, 0x02, 0x05, 0xFF, 0x06, 0x1E, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0xDF
            ]
        );
    }

    #[test]
    fn test_appoint_disabled_record() {
        let frame = assemble_json(r#"{"control":{"appoint1":"0,7,15,0,0"}}"#);
        assert_eq!(frame[10], 0x06);
        assert_eq!(frame[11], 0x00);
        assert_eq!(frame[12], 7);
        assert_eq!(frame[13], 15);
    }

    #[test]
    fn test_appoint2_body_type() {
        let frame = assemble_json(r#"{"control":{"appoint2":"1,22,0,0,0"}}"#);
        assert_eq!(frame[10], 0x07);
    }

    #[test]
    fn test_appointment_overwrites_other_branches() {
        let frame = assemble_json(r#"{"control":{"power":"on","appoint1":"1,7,0,0,0"}}"#);
        assert_eq!(frame.len(), 21);
        assert_eq!(frame[10], 0x06);
        assert_eq!(frame[11], 0xFF);
    }

    #[test]
    fn test_appoint_malformed_parts_default_to_zero() {
        let frame = assemble_json(r#"{"control":{"appoint0":"1,x,300"}}"#);
        assert_eq!(frame[11], 0xFF);
        assert_eq!(frame[12], 0);
        // 300 truncates to its low byte, matching raw byte copies elsewhere.
        assert_eq!(frame[13], 44);
    }

    #[test]
    fn test_appointment_round_trip() {
        let frame = assemble_json(r#"{"control":{"appoint0":"1,6,30,0,0"}}"#);
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.appoint0.as_deref(), Some("1,6,30,0,0"));
        assert!(status.appoint1.is_none());
    }

    #[test]
    fn test_appoint_query_response() {
        let mut body = vec![0x02];
        body.extend_from_slice(&[0xFF, 6, 30, 0, 0]);
        body.extend_from_slice(&[0x00, 7, 15, 0, 0]);
        body.extend_from_slice(&[0xFF, 8, 0, 1, 2]);
        let frame = raw_frame(0x03, &body);

        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.appoint0.as_deref(), Some("1,6,30,0,0"));
        assert_eq!(status.appoint1.as_deref(), Some("0,7,15,0,0"));
        assert_eq!(status.appoint2.as_deref(), Some("1,8,0,1,2"));
    }

    #[test]
    fn test_appoint_query_response_short_frame() {
        // Only the first record fits; the other slots stay absent.
        let mut body = vec![0x02];
        body.extend_from_slice(&[0xFF, 6, 30, 0, 0]);
        body.extend_from_slice(&[0x00, 7]);
        let frame = raw_frame(0x03, &body);

        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.appoint0.as_deref(), Some("1,6,30,0,0"));
        assert!(status.appoint1.is_none());
        assert!(status.appoint2.is_none());
    }

    // ===================
    // status report tests
    // ===================

    /// A full synthetic status report exercising every table region.
    fn sample_report() -> Vec<u8> {
        let body = [
            0x01, // body type: status report
            0x0D, // power + keep_warm + protect
            0x04, // summer
            0x22, // shower + whole_heat
            55,   // temperature
            40,   // wash_temperature
            0x12, // bath_person double + high_temp_sterilize
            7,    // scene_id
            9,    // grea
            80,   // screen_light
            2,    // morning_night_bash
            0x81, // sleep + child_lock
            48, 52, 45, 20, // cur/top/bottom/in temperature
            66, // hot_water
            1, 30, // remaining time
            0,  // error_code
            12, // water_flow
            5,  // wash_remain_time
            0x08, 0x34, // heat_power = 2100
            120,  // day_water_consumption
            0x01, 0x2C, // water_consumption = 300
            6, 30, // appointment time
            14, 45, // wall clock
        ];
        raw_frame(0x02, &body)
    }

    #[test]
    fn test_report_switch_fields() {
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.power.as_deref(), Some("on"));
        assert_eq!(status.keep_warm.as_deref(), Some("on"));
        assert_eq!(status.protect.as_deref(), Some("on"));
        assert_eq!(status.heating.as_deref(), Some("off"));
        assert_eq!(status.summer.as_deref(), Some("on"));
        assert_eq!(status.eplus.as_deref(), Some("off"));
        assert_eq!(status.shower.as_deref(), Some("on"));
        assert_eq!(status.whole_heat.as_deref(), Some("on"));
        assert_eq!(status.half_heat.as_deref(), Some("off"));
        assert_eq!(status.sleep.as_deref(), Some("on"));
        assert_eq!(status.child_lock.as_deref(), Some("on"));
        assert_eq!(status.mute.as_deref(), Some("off"));
    }

    #[test]
    fn test_report_mode_last_set_flag_wins() {
        // Both summer and shower are set; shower is later in scan order.
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.mode.as_deref(), Some("shower"));
    }

    #[test]
    fn test_report_derived_heat() {
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.heat.as_deref(), Some("whole"));
    }

    #[test]
    fn test_report_heat_none_when_no_element_bits() {
        let frame = raw_frame(0x02, &[0x01, 0x00, 0x00, 0x00]);
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.heat.as_deref(), Some("none"));
    }

    #[test]
    fn test_report_bath_person() {
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.bath_person.as_deref(), Some("double"));
        assert_eq!(status.high_temp_sterilize.as_deref(), Some("on"));
        assert_eq!(status.smart_sterilize.as_deref(), Some("off"));
    }

    #[test]
    fn test_report_bath_person_off_fallback() {
        // Code 5 is outside the enumeration and falls back to "off".
        let frame = raw_frame(0x02, &[0x01, 0, 0, 0, 0, 0, 0x05]);
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.bath_person.as_deref(), Some("off"));
    }

    #[test]
    fn test_report_numeric_fields() {
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.temperature, Some(55));
        assert_eq!(status.wash_temperature, Some(40));
        assert_eq!(status.scene_id, Some(7));
        assert_eq!(status.grea, Some(9));
        assert_eq!(status.screen_light, Some(80));
        assert_eq!(status.morning_night_bash, Some(2));
    }

    #[test]
    fn test_report_telemetry_fields() {
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.cur_temperature, Some(48));
        assert_eq!(status.top_temperature, Some(52));
        assert_eq!(status.bottom_temperature, Some(45));
        assert_eq!(status.in_temperature, Some(20));
        assert_eq!(status.hot_water, Some(66));
        assert_eq!(status.remain_hour, Some(1));
        assert_eq!(status.remain_minute, Some(30));
        assert_eq!(status.error_code, Some(0));
        assert_eq!(status.water_flow, Some(12));
        assert_eq!(status.wash_remain_time, Some(5));
        assert_eq!(status.heat_power, Some(2100));
        assert_eq!(status.day_water_consumption, Some(120));
        assert_eq!(status.water_consumption, Some(300));
        assert_eq!(status.appoint_hour, Some(6));
        assert_eq!(status.appoint_minute, Some(30));
        assert_eq!(status.clock_hour, Some(14));
        assert_eq!(status.clock_minute, Some(45));
    }

    #[test]
    fn test_report_version_stamped() {
        let status = FrameParser::new().parse(&sample_report());
        assert_eq!(status.version, Some(STATUS_VERSION));
        let status = FrameParser::with_version(7).parse(&sample_report());
        assert_eq!(status.version, Some(7));
    }

    #[test]
    fn test_short_frame_degrades_to_partial_document() {
        // Cut after the switch byte: switches decode, everything later is
        // simply absent.
        let report = sample_report();
        let status = FrameParser::new().parse(&report[..12]);
        assert_eq!(status.power.as_deref(), Some("on"));
        assert!(status.mode.is_none());
        assert!(status.temperature.is_none());
        assert!(status.heat.is_none());
    }

    #[test]
    fn test_checksum_not_validated_on_parse() {
        let mut frame = sample_report();
        let last = frame.len() - 1;
        frame[last] ^= 0xFF;
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.power.as_deref(), Some("on"));
    }

    #[test]
    fn test_alt_frame_types_parse_as_status_report() {
        for frame_type in [0x03, 0x04] {
            let frame = raw_frame(frame_type, &[0x01, 0x01]);
            let status = FrameParser::new().parse(&frame);
            assert_eq!(status.power.as_deref(), Some("on"));
        }
    }

    #[test]
    fn test_unknown_shape_yields_version_only() {
        let frame = raw_frame(0x07, &[0x01, 0x01]);
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.version, Some(STATUS_VERSION));
        assert_eq!(status, Status { version: Some(STATUS_VERSION), ..Status::default() });
    }

    #[test]
    fn test_control_round_trip_through_shared_table() {
        // Bits written by the full branch decode back to the same fields.
        let frame = assemble_json(
            r#"{"control":{"eplus":"on","protect":"on","bath_person":"triple","wash_temperature":40}}"#,
        );
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.eplus.as_deref(), Some("on"));
        assert_eq!(status.protect.as_deref(), Some("on"));
        assert_eq!(status.bath_person.as_deref(), Some("triple"));
        assert_eq!(status.wash_temperature, Some(40));
        assert_eq!(status.fast_wash.as_deref(), Some("off"));
    }

    #[test]
    fn test_power_frame_round_trip() {
        let frame = assemble_json(r#"{"control":{"power":"on"}}"#);
        let status = FrameParser::new().parse(&frame);
        assert_eq!(status.power.as_deref(), Some("on"));
    }

    // ===================
    // codec entry point tests
    // ===================

    #[test]
    fn test_encode_empty_input() {
        assert!(EwhCodec::new().encode("").is_none());
        assert!(EwhCodec::new().encode("   ").is_none());
    }

    #[test]
    fn test_encode_malformed_json() {
        assert!(EwhCodec::new().encode("not json").is_none());
        assert!(EwhCodec::new().encode("{\"control\":").is_none());
    }

    #[test]
    fn test_encode_nothing_to_send() {
        assert!(EwhCodec::new().encode("{}").is_none());
        assert!(matches!(
            EwhCodec::new().try_encode("{}"),
            Err(CodecError::EmptyRequest)
        ));
    }

    #[test]
    fn test_encode_power_hex() {
        let hex = EwhCodec::new()
            .encode(r#"{"control":{"power":"on"}}"#)
            .unwrap();
        assert_eq!(hex, "aa0de20000000000000201010d");
    }

    #[test]
    fn test_encode_query_hex() {
        let hex = EwhCodec::new().encode(r#"{"query":{}}"#).unwrap();
        assert_eq!(hex, "aa0de20000000000000301010c");
    }

    #[test]
    fn test_try_encode_empty_error() {
        assert!(matches!(
            EwhCodec::new().try_encode(""),
            Err(CodecError::EmptyInput)
        ));
    }

    #[test]
    fn test_decode_status_report() {
        let report = format!(
            r#"{{"msg":{{"data":"{}"}}}}"#,
            bytes_to_hex(&sample_report())
        );
        let decoded = EwhCodec::new().decode(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["status"]["power"], "on");
        assert_eq!(value["status"]["mode"], "shower");
        assert_eq!(value["status"]["temperature"], 55);
        assert_eq!(value["status"]["version"], STATUS_VERSION);
    }

    #[test]
    fn test_decode_omits_absent_fields() {
        // A short frame produces a partial document, not null-filled fields.
        let frame = assemble_json(r#"{"control":{"power":"on"}}"#);
        let report = format!(r#"{{"msg":{{"data":"{}"}}}}"#, bytes_to_hex(&frame));
        let decoded = EwhCodec::new().decode(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["status"]["power"], "on");
        assert!(value["status"].get("temperature").is_none());
    }

    #[test]
    fn test_decode_missing_msg_data() {
        assert!(EwhCodec::new().decode("{}").is_none());
        assert!(EwhCodec::new().decode(r#"{"msg":{}}"#).is_none());
        assert!(matches!(
            EwhCodec::new().try_decode(r#"{"msg":{}}"#),
            Err(CodecError::MissingData)
        ));
    }

    #[test]
    fn test_decode_empty_and_malformed_input() {
        assert!(EwhCodec::new().decode("").is_none());
        assert!(EwhCodec::new().decode("no json here").is_none());
    }

    #[test]
    fn test_decode_rejects_non_hex_payload() {
        assert!(EwhCodec::new()
            .decode(r#"{"msg":{"data":"zz"}}"#)
            .is_none());
    }

    #[test]
    fn test_decode_tolerates_odd_length_hex() {
        let mut hex = bytes_to_hex(&sample_report());
        hex.push('f');
        let report = format!(r#"{{"msg":{{"data":"{hex}"}}}}"#);
        let decoded = EwhCodec::new().decode(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["status"]["power"], "on");
    }

    #[test]
    fn test_codec_with_version() {
        let frame = assemble_json(r#"{"control":{"power":"on"}}"#);
        let report = format!(r#"{{"msg":{{"data":"{}"}}}}"#, bytes_to_hex(&frame));
        let decoded = EwhCodec::with_version(9).decode(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["status"]["version"], 9);
    }
}

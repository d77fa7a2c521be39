//! String-level entry points: JSON documents in, hex frames out, and back.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assembler::assemble;
use crate::frame::{bytes_to_hex, hex_to_bytes};
use crate::parser::FrameParser;
use crate::types::{CodecError, Request, Status};

/// Report envelope as delivered by the transport layer.
#[derive(Deserialize)]
struct Report {
    msg: Option<Msg>,
}

#[derive(Deserialize)]
struct Msg {
    data: Option<String>,
}

#[derive(Serialize)]
struct StatusEnvelope {
    status: Status,
}

/// The codec surface: stateless aside from the injected format version, so
/// one instance may be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct EwhCodec {
    parser: FrameParser,
}

impl EwhCodec {
    pub fn new() -> Self {
        Self {
            parser: FrameParser::new(),
        }
    }

    /// Codec stamping a non-default status-table revision.
    pub fn with_version(version: u32) -> Self {
        Self {
            parser: FrameParser::with_version(version),
        }
    }

    /// Encode a request document into a lowercase hex frame. Empty or
    /// undecodable input, or a request with nothing to send, yields `None`.
    pub fn encode(&self, request_json: &str) -> Option<String> {
        match self.try_encode(request_json) {
            Ok(hex) => Some(hex),
            Err(err) => {
                debug!("encode request dropped: {err}");
                None
            }
        }
    }

    /// Fallible form of [`encode`](Self::encode).
    pub fn try_encode(&self, request_json: &str) -> Result<String, CodecError> {
        if request_json.trim().is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let request: Request = serde_json::from_str(request_json)?;
        let frame = assemble(&request).ok_or(CodecError::EmptyRequest)?;
        debug!("assembled frame: {frame:02x?}");
        Ok(bytes_to_hex(&frame))
    }

    /// Decode a report document (`{"msg":{"data":"<hex>"}}`) into a status
    /// document (`{"status":{...}}`). Undecodable input yields `None`.
    pub fn decode(&self, report_json: &str) -> Option<String> {
        match self.try_decode(report_json) {
            Ok(status) => Some(status),
            Err(err) => {
                debug!("report dropped: {err}");
                None
            }
        }
    }

    /// Fallible form of [`decode`](Self::decode).
    pub fn try_decode(&self, report_json: &str) -> Result<String, CodecError> {
        if report_json.trim().is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let report: Report = serde_json::from_str(report_json)?;
        let data = report
            .msg
            .and_then(|msg| msg.data)
            .ok_or(CodecError::MissingData)?;
        let frame = hex_to_bytes(&data)?;
        debug!("received frame: {frame:02x?}");
        let status = self.parser.parse(&frame);
        Ok(serde_json::to_string(&StatusEnvelope { status })?)
    }
}

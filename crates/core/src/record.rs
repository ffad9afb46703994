//! Persisted parameter records
//!
//! One fixed-size record per non-volatile parameter, little-endian:
//!
//! ```text
//! 0..4    parameter id
//! 4..8    timestamp
//! 8       data type tag
//! 9       payload length (string/bytes) or 0
//! 10..12  reserved (0)
//! 12..44  payload, zero padded
//! 44..48  CRC-32 (ISO-HDLC) over bytes 0..44
//! ```

use crate::catalog::ParamDataType;
use crate::error::RecordError;
use crate::value::{ParamValue, ParameterValue, PARAM_BYTES_LEN, PARAM_STRING_LEN};
use crc::{Crc, CRC_32_ISO_HDLC};
use heapless::{String, Vec};

/// Payload area size
pub const RECORD_PAYLOAD_LEN: usize = 32;

/// Total encoded record size
pub const RECORD_SIZE: usize = 48;

const PAYLOAD_START: usize = 12;
const CRC_START: usize = PAYLOAD_START + RECORD_PAYLOAD_LEN;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Serialize a parameter value into its record
pub fn encode(value: &ParameterValue) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..4].copy_from_slice(&value.parameter_id.to_le_bytes());
    buf[4..8].copy_from_slice(&value.timestamp.to_le_bytes());
    buf[8] = value.data_type() as u8;

    let payload = &mut buf[PAYLOAD_START..CRC_START];
    let len = match &value.value {
        ParamValue::Uint32(v) | ParamValue::Enumeration(v) | ParamValue::BitField(v) => {
            payload[..4].copy_from_slice(&v.to_le_bytes());
            0
        }
        ParamValue::Int32(v) => {
            payload[..4].copy_from_slice(&v.to_le_bytes());
            0
        }
        ParamValue::Float32(v) => {
            payload[..4].copy_from_slice(&v.to_le_bytes());
            0
        }
        ParamValue::Uint64(v) => {
            payload[..8].copy_from_slice(&v.to_le_bytes());
            0
        }
        ParamValue::Int64(v) => {
            payload[..8].copy_from_slice(&v.to_le_bytes());
            0
        }
        ParamValue::Float64(v) => {
            payload[..8].copy_from_slice(&v.to_le_bytes());
            0
        }
        ParamValue::Bool(v) => {
            payload[0] = *v as u8;
            0
        }
        ParamValue::String(s) => {
            payload[..s.len()].copy_from_slice(s.as_bytes());
            s.len() as u8
        }
        ParamValue::Bytes(b) => {
            payload[..b.len()].copy_from_slice(b);
            b.len() as u8
        }
    };
    buf[9] = len;

    let crc = CRC32.checksum(&buf[..CRC_START]);
    buf[CRC_START..].copy_from_slice(&crc.to_le_bytes());
    buf
}

/// Deserialize a record, checking size, checksum and payload shape
pub fn decode(buf: &[u8]) -> Result<ParameterValue, RecordError> {
    if buf.len() != RECORD_SIZE {
        return Err(RecordError::Size);
    }

    let stored_crc = u32::from_le_bytes([
        buf[CRC_START],
        buf[CRC_START + 1],
        buf[CRC_START + 2],
        buf[CRC_START + 3],
    ]);
    if stored_crc != CRC32.checksum(&buf[..CRC_START]) {
        return Err(RecordError::Crc);
    }

    let parameter_id = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let timestamp = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let data_type = ParamDataType::from_u8(buf[8]).ok_or(RecordError::UnknownType)?;
    let len = buf[9] as usize;
    let p = &buf[PAYLOAD_START..CRC_START];

    let word = || [p[0], p[1], p[2], p[3]];
    let dword = || [p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]];

    let value = match data_type {
        ParamDataType::Uint32 => ParamValue::Uint32(u32::from_le_bytes(word())),
        ParamDataType::Int32 => ParamValue::Int32(i32::from_le_bytes(word())),
        ParamDataType::Float32 => ParamValue::Float32(f32::from_le_bytes(word())),
        ParamDataType::Uint64 => ParamValue::Uint64(u64::from_le_bytes(dword())),
        ParamDataType::Int64 => ParamValue::Int64(i64::from_le_bytes(dword())),
        ParamDataType::Float64 => ParamValue::Float64(f64::from_le_bytes(dword())),
        ParamDataType::Bool => match p[0] {
            0 => ParamValue::Bool(false),
            1 => ParamValue::Bool(true),
            _ => return Err(RecordError::Payload),
        },
        ParamDataType::Enumeration => ParamValue::Enumeration(u32::from_le_bytes(word())),
        ParamDataType::BitField => ParamValue::BitField(u32::from_le_bytes(word())),
        ParamDataType::String => {
            if len > PARAM_STRING_LEN {
                return Err(RecordError::Payload);
            }
            let text = core::str::from_utf8(&p[..len]).map_err(|_| RecordError::Payload)?;
            let mut s = String::new();
            s.push_str(text).map_err(|_| RecordError::Payload)?;
            ParamValue::String(s)
        }
        ParamDataType::ByteArray => {
            if len > PARAM_BYTES_LEN {
                return Err(RecordError::Payload);
            }
            ParamValue::Bytes(Vec::from_slice(&p[..len]).map_err(|_| RecordError::Payload)?)
        }
    };

    Ok(ParameterValue::new(parameter_id, timestamp, value))
}

/// Deserialize a record expected to hold `pid` with type `data_type`
pub fn decode_for(
    buf: &[u8],
    pid: u32,
    data_type: ParamDataType,
) -> Result<ParameterValue, RecordError> {
    let value = decode(buf)?;
    if value.parameter_id != pid {
        return Err(RecordError::IdMismatch);
    }
    if value.data_type() != data_type {
        return Err(RecordError::TypeMismatch);
    }
    Ok(value)
}

//! Parameter values
//!
//! `ParamValue` carries one variant per data type. Strings and byte arrays
//! are bounded; oversize input is truncated to capacity on construction.

use crate::catalog::ParamDataType;
use heapless::{String, Vec};

/// String parameter capacity (bytes)
pub const PARAM_STRING_LEN: usize = 32;

/// Byte-array parameter capacity
pub const PARAM_BYTES_LEN: usize = 32;

/// Tagged parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Uint32(u32),
    Int32(i32),
    Float32(f32),
    Uint64(u64),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    String(String<PARAM_STRING_LEN>),
    /// Enumeration value, labelled through extended metadata
    Enumeration(u32),
    /// Bit mask, labelled through extended metadata
    BitField(u32),
    Bytes(Vec<u8, PARAM_BYTES_LEN>),
}

impl ParamValue {
    /// Data type of this variant
    pub fn data_type(&self) -> ParamDataType {
        match self {
            ParamValue::Uint32(_) => ParamDataType::Uint32,
            ParamValue::Int32(_) => ParamDataType::Int32,
            ParamValue::Float32(_) => ParamDataType::Float32,
            ParamValue::Uint64(_) => ParamDataType::Uint64,
            ParamValue::Int64(_) => ParamDataType::Int64,
            ParamValue::Float64(_) => ParamDataType::Float64,
            ParamValue::Bool(_) => ParamDataType::Bool,
            ParamValue::String(_) => ParamDataType::String,
            ParamValue::Enumeration(_) => ParamDataType::Enumeration,
            ParamValue::BitField(_) => ParamDataType::BitField,
            ParamValue::Bytes(_) => ParamDataType::ByteArray,
        }
    }

    /// Zero value of a type (empty for strings and byte arrays)
    pub fn zero(data_type: ParamDataType) -> Self {
        match data_type {
            ParamDataType::Uint32 => ParamValue::Uint32(0),
            ParamDataType::Int32 => ParamValue::Int32(0),
            ParamDataType::Float32 => ParamValue::Float32(0.0),
            ParamDataType::Uint64 => ParamValue::Uint64(0),
            ParamDataType::Int64 => ParamValue::Int64(0),
            ParamDataType::Float64 => ParamValue::Float64(0.0),
            ParamDataType::Bool => ParamValue::Bool(false),
            ParamDataType::String => ParamValue::String(String::new()),
            ParamDataType::Enumeration => ParamValue::Enumeration(0),
            ParamDataType::BitField => ParamValue::BitField(0),
            ParamDataType::ByteArray => ParamValue::Bytes(Vec::new()),
        }
    }

    /// Build a value of `data_type` from a numeric descriptor default
    ///
    /// Float-to-int casts saturate. Strings and byte arrays ignore the
    /// number and start empty.
    pub fn from_f64(data_type: ParamDataType, value: f64) -> Self {
        match data_type {
            ParamDataType::Uint32 => ParamValue::Uint32(value as u32),
            ParamDataType::Int32 => ParamValue::Int32(value as i32),
            ParamDataType::Float32 => ParamValue::Float32(value as f32),
            ParamDataType::Uint64 => ParamValue::Uint64(value as u64),
            ParamDataType::Int64 => ParamValue::Int64(value as i64),
            ParamDataType::Float64 => ParamValue::Float64(value),
            ParamDataType::Bool => ParamValue::Bool(value != 0.0),
            ParamDataType::Enumeration => ParamValue::Enumeration(value as u32),
            ParamDataType::BitField => ParamValue::BitField(value as u32),
            ParamDataType::String | ParamDataType::ByteArray => Self::zero(data_type),
        }
    }

    /// String value, truncated to capacity on a character boundary
    pub fn string_truncated(text: &str) -> Self {
        let mut end = text.len().min(PARAM_STRING_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut s = String::new();
        // Cannot fail: `end` is within capacity.
        let _ = s.push_str(&text[..end]);
        ParamValue::String(s)
    }

    /// Byte-array value, truncated to capacity
    pub fn bytes_truncated(data: &[u8]) -> Self {
        let len = data.len().min(PARAM_BYTES_LEN);
        ParamValue::Bytes(Vec::from_slice(&data[..len]).unwrap_or_default())
    }

    /// Numeric view used for range checks
    ///
    /// Strings and byte arrays report their length.
    pub fn as_f64(&self) -> f64 {
        match self {
            ParamValue::Uint32(v) => *v as f64,
            ParamValue::Int32(v) => *v as f64,
            ParamValue::Float32(v) => *v as f64,
            ParamValue::Uint64(v) => *v as f64,
            ParamValue::Int64(v) => *v as f64,
            ParamValue::Float64(v) => *v,
            ParamValue::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::String(s) => s.len() as f64,
            ParamValue::Enumeration(v) | ParamValue::BitField(v) => *v as f64,
            ParamValue::Bytes(b) => b.len() as f64,
        }
    }
}

/// A parameter's current value and the time it was last written
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValue {
    pub parameter_id: u32,
    /// Caller-supplied time of the last write or restore
    pub timestamp: u32,
    pub value: ParamValue,
}

impl ParameterValue {
    pub fn new(parameter_id: u32, timestamp: u32, value: ParamValue) -> Self {
        Self {
            parameter_id,
            timestamp,
            value,
        }
    }

    pub fn data_type(&self) -> ParamDataType {
        self.value.data_type()
    }
}

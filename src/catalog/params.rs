//! Demo parameter table
//!
//! Ids are odd and start at 1, so hosts cannot assume contiguous ids.
//! Every data type appears at least once. The tail of the table is a run of
//! read-only int32 sensors that pads discovery past a single page.
//!
//! | id | type | access | storage |
//! |----|------|--------|---------|
//! | 1  | uint32 | rw | RAM |
//! | 3  | int32 | rw | RAM extended |
//! | 5  | float32 | rw | non-volatile |
//! | 7  | uint64 | rw | non-volatile |
//! | 9  | int64 | rw | RAM |
//! | 11 | float64 | rw | RAM |
//! | 13 | bool | rw | RAM |
//! | 15 | string | rw | non-volatile |
//! | 17 | enumeration | rw | non-volatile |
//! | 19 | bit-field | rw | non-volatile |
//! | 21 | byte array | rw | non-volatile |
//! | 23 | int32 | r | RAM extended (drift target) |
//! | 25 | float32 | w | non-volatile |
//! | 27 | uint64 | rw | non-volatile |
//! | 29 | int64 | rw | RAM |
//! | 31 | int32 | r | RAM extended |
//! | 33..=65 | int32 | r | RAM |

use reach_core::catalog::{AccessLevel, ParamDataType, ParamDescriptor, StorageClass};

/// Parameter advanced by the drift generator
pub const DRIFT_PARAMETER: u32 = 23;

/// Read-only int32 with the shared sensor range
const fn sensor(id: u32, name: &'static str, storage: StorageClass) -> ParamDescriptor {
    ParamDescriptor::new(id, ParamDataType::Int32, name)
        .access(AccessLevel::READ)
        .description(if matches!(storage, StorageClass::RamExtended) {
            "Read only,RAM-EX"
        } else {
            "Read only,RAM"
        })
        .units("signed int")
        .range(-1024.0, 1023.0)
        .storage(storage)
}

pub const PARAMETERS: &[ParamDescriptor] = &[
    ParamDescriptor::new(1, ParamDataType::Uint32, "first param (1)")
        .description("This parameter comes first")
        .units("unsigned int")
        .range(0.0, 32767.0)
        .default_value(1970.0),
    ParamDescriptor::new(3, ParamDataType::Int32, "param #three")
        .description("Eleven bits signed")
        .units("°")
        .range(-1024.0, 1023.0)
        .default_value(1.0)
        .storage(StorageClass::RamExtended),
    ParamDescriptor::new(5, ParamDataType::Float32, "fifth param")
        .description("float32")
        .units("%")
        .range(0.0, 100.0)
        .default_value(66.66666666666667)
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(7, ParamDataType::Uint64, "first uint64")
        .description("Parmenter no come foist!")
        .units("unsigned long")
        .range(0.0, 68719476736.0)
        .default_value(68719476736.0)
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(9, ParamDataType::Int64, "param #nine")
        .description("38 bits signed")
        .units("signed long")
        .default_value(-68719476736.0),
    ParamDescriptor::new(11, ParamDataType::Float64, "eleventh param")
        .description("float64")
        .units("bigs")
        .range(0.0, 100.0)
        .default_value(66.66666666666667),
    ParamDescriptor::new(13, ParamDataType::Bool, "first bool")
        .description("On or off")
        .units("truth")
        .default_value(1.0),
    ParamDescriptor::new(15, ParamDataType::String, "param #fifteen")
        .description("string type")
        .units("words")
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(17, ParamDataType::Enumeration, "counting words")
        .description("One through fourteen")
        .units("number")
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(19, ParamDataType::BitField, "enable bits")
        .description("Turn me on deadman")
        .units("bits")
        .default_value(0.0)
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(21, ParamDataType::ByteArray, "param 21")
        .description("array of bytes")
        .units("data")
        .storage(StorageClass::NonVolatile),
    sensor(DRIFT_PARAMETER, "param #23", StorageClass::RamExtended),
    ParamDescriptor::new(25, ParamDataType::Float32, "25th param")
        .access(AccessLevel::WRITE)
        .description("write only")
        .units("percentage")
        .range(0.0, 100.0)
        .default_value(66.66666666666667)
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(27, ParamDataType::Uint64, "p27 uint64")
        .description("This parameter is 13th")
        .units("unsigned long")
        .range(0.0, 68719476736.0)
        .default_value(68719476736.0)
        .storage(StorageClass::NonVolatile),
    ParamDescriptor::new(29, ParamDataType::Int64, "param #29")
        .description("38 bits signed")
        .units("signed long")
        .range(-68719476736.0, 68719476735.0)
        .default_value(-68719476736.0),
    sensor(31, "param #31", StorageClass::RamExtended),
    sensor(33, "id(x) 33", StorageClass::Ram),
    sensor(35, "id(x) 35", StorageClass::Ram),
    sensor(37, "id(x) 37", StorageClass::Ram),
    sensor(39, "id(x) 39", StorageClass::Ram),
    sensor(41, "id(x) 41", StorageClass::Ram),
    sensor(43, "id(x) 43", StorageClass::Ram),
    sensor(45, "id(x) 45", StorageClass::Ram),
    sensor(47, "id(x) 47", StorageClass::Ram),
    sensor(49, "id(x) 49", StorageClass::Ram),
    sensor(51, "id(x) 51", StorageClass::Ram),
    sensor(53, "id(x) 53", StorageClass::Ram),
    sensor(55, "id(x) 55", StorageClass::Ram),
    sensor(57, "id(x) 57", StorageClass::Ram),
    sensor(59, "id(x) 59", StorageClass::Ram),
    sensor(61, "id(x) 61", StorageClass::Ram),
    sensor(63, "id(x) 63", StorageClass::Ram),
    sensor(65, "id(x) 65", StorageClass::Ram),
];

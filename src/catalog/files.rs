//! Demo file table

use reach_core::catalog::{AccessLevel, FileDescriptor, StorageClass};

pub const FILES: &[FileDescriptor] = &[
    FileDescriptor {
        id: 0,
        name: "log_file.csv",
        access: AccessLevel::READ,
        size_bytes: 4000,
        storage_class: StorageClass::Ram,
    },
    FileDescriptor {
        id: 1,
        name: "ota.bin",
        access: AccessLevel::READ_WRITE,
        size_bytes: 50000,
        storage_class: StorageClass::NonVolatile,
    },
];

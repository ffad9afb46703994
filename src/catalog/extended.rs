//! Demo extended metadata
//!
//! Each labelled parameter spans two pages, so hosts must concatenate.

use reach_core::catalog::{ExLabel, ParamDataType, ParamExDescriptor};

const COUNTING_LOW: &[ExLabel] = &[
    ExLabel::new(1, "one"),
    ExLabel::new(2, "two"),
    ExLabel::new(3, "three"),
    ExLabel::new(4, "four"),
    ExLabel::new(5, "five"),
    ExLabel::new(6, "six"),
    ExLabel::new(7, "seven"),
    ExLabel::new(8, "eight"),
];

const COUNTING_HIGH: &[ExLabel] = &[
    ExLabel::new(9, "nine"),
    ExLabel::new(10, "ten"),
    ExLabel::new(11, "eleven"),
    ExLabel::new(12, "twelve"),
    ExLabel::new(13, "thirteen"),
    ExLabel::new(14, "fourteen"),
];

const ENABLE_LOW: &[ExLabel] = &[
    ExLabel::new(1 << 0, "one"),
    ExLabel::new(1 << 1, "two"),
    ExLabel::new(1 << 2, "four"),
    ExLabel::new(1 << 3, "eight"),
    ExLabel::new(1 << 4, "sixteen"),
    ExLabel::new(1 << 5, "thirty two"),
    ExLabel::new(1 << 6, "sixty four"),
    ExLabel::new(1 << 7, "onetwentyeight"),
];

const ENABLE_HIGH: &[ExLabel] = &[
    ExLabel::new(1 << 8, "1<<8"),
    ExLabel::new(1 << 9, "1<<9"),
    ExLabel::new(1 << 10, "1<<10"),
    ExLabel::new(1 << 11, "1<<11"),
    ExLabel::new(1 << 12, "1<<12"),
    ExLabel::new(1 << 13, "1<<13"),
];

pub const EXTENDED: &[ParamExDescriptor] = &[
    ParamExDescriptor::new(17, ParamDataType::Enumeration, COUNTING_LOW),
    ParamExDescriptor::new(17, ParamDataType::Enumeration, COUNTING_HIGH),
    ParamExDescriptor::new(19, ParamDataType::BitField, ENABLE_LOW),
    ParamExDescriptor::new(19, ParamDataType::BitField, ENABLE_HIGH),
];

use std::ops::Range;

/// Leading octet of every multi-byte payload. Always written as zero and
/// never validated on decode.
pub const CONTROL_OCTET_OFFSET: usize = 0;
/// First value octet after the control octet.
pub const VALUE_OFFSET: usize = CONTROL_OCTET_OFFSET + 1;

pub const B1_LEN: usize = 1;
pub const U8_LEN: usize = VALUE_OFFSET + 1;
pub const U16_LEN: usize = VALUE_OFFSET + 2;
pub const U32_LEN: usize = VALUE_OFFSET + 4;
pub const F16_LEN: usize = U16_LEN;
pub const F32_LEN: usize = U32_LEN;

pub const U8_OFFSET: usize = VALUE_OFFSET;
pub const U16_RANGE: Range<usize> = VALUE_OFFSET..U16_LEN;
pub const U32_RANGE: Range<usize> = VALUE_OFFSET..U32_LEN;

pub const F16_MAX: f64 = 670_760.96;
pub const F16_MIN: f64 = -671_088.64;
pub const F16_MANTISSA_MAX: i32 = 2047;
pub const F16_MANTISSA_MIN: i32 = -2048;
pub const F16_MANTISSA_BIAS: i32 = 2048;
pub const F16_SIGN_BIT: u8 = 0x80;
pub const F16_EXPONENT_SHIFT: u8 = 3;
pub const F16_EXPONENT_MASK: u8 = 0x0F;
pub const F16_MANTISSA_HIGH_MASK: u8 = 0x07;

// DPT 10.001 time of day: N3 U5 / r2 U6 / r2 U6
pub const TIME_OF_DAY_LEN: usize = 4;
pub const TIME_OF_DAY_DAY_HOUR_OFFSET: usize = 1;
pub const TIME_OF_DAY_MINUTE_OFFSET: usize = 2;
pub const TIME_OF_DAY_SECOND_OFFSET: usize = 3;

// DPT 19.001 date time: U8 r4U4 r3U5 U3U5 r2U6 r2U6 B8 B1r7
pub const DATE_TIME_LEN: usize = 9;
pub const DATE_TIME_YEAR_OFFSET: usize = 1;
pub const DATE_TIME_MONTH_OFFSET: usize = 2;
pub const DATE_TIME_DAY_OFFSET: usize = 3;
pub const DATE_TIME_DAY_HOUR_OFFSET: usize = 4;
pub const DATE_TIME_MINUTE_OFFSET: usize = 5;
pub const DATE_TIME_SECOND_OFFSET: usize = 6;
pub const DATE_TIME_STATUS_OFFSET: usize = 7;
pub const DATE_TIME_QUALITY_OFFSET: usize = 8;
pub const DATE_TIME_YEAR_BASE: u16 = 1900;
pub const DATE_TIME_FAULT_BIT: u8 = 0x80;
pub const DATE_TIME_WORKING_DAY_BIT: u8 = 0x40;
pub const DATE_TIME_SUMMER_BIT: u8 = 0x01;

/// Weekday lives in the top three bits of the day/hour octet.
pub const WEEKDAY_SHIFT: u8 = 5;
pub const HOUR_MASK: u8 = 0x1F;
pub const MINUTE_SECOND_MASK: u8 = 0x3F;
pub const MONTH_MASK: u8 = 0x0F;
pub const DAY_MASK: u8 = 0x1F;

// DPT 232.600 colour RGB: U8 U8 U8
pub const RGB_LEN: usize = 4;
pub const RGB_RED_OFFSET: usize = 1;
pub const RGB_GREEN_OFFSET: usize = 2;
pub const RGB_BLUE_OFFSET: usize = 3;

// DPT 251.600 colour RGBW: U8 U8 U8 U8 r8 r4B4
pub const RGBW_LEN: usize = 7;
pub const RGBW_RED_OFFSET: usize = 1;
pub const RGBW_GREEN_OFFSET: usize = 2;
pub const RGBW_BLUE_OFFSET: usize = 3;
pub const RGBW_WHITE_OFFSET: usize = 4;
pub const RGBW_FLAGS_OFFSET: usize = 6;

// DPT 242.600 colour xyY: U16 U16 U8 r6B2
pub const XYY_LEN: usize = 7;
pub const XYY_X_RANGE: Range<usize> = 1..3;
pub const XYY_Y_RANGE: Range<usize> = 3..5;
pub const XYY_BRIGHTNESS_OFFSET: usize = 5;
pub const XYY_FLAGS_OFFSET: usize = 6;

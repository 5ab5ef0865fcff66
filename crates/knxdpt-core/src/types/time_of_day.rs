use std::fmt;

use super::Datapoint;
use super::text::{fields_exact, parse_bounded};
use crate::clock;
use crate::codec::layout;
use crate::codec::reader::FrameReader;
use crate::codec::writer::FrameWriter;
use crate::error::DptError;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday name for a 1-based KNX day (Monday = 1 … Sunday = 7).
pub(crate) fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAYS.get(usize::from(weekday).checked_sub(1)?).copied()
}

/// Time of day with optional weekday (DPT 10.001).
///
/// `weekday` 0 means "no day"; 1 is Monday and 7 is Sunday.
///
/// # Examples
/// ```
/// use knxdpt_core::{Datapoint, TimeOfDay};
///
/// let mut time = TimeOfDay::default();
/// time.unpack(&[0x00, 0x28, 0x1E, 0x00])?;
/// assert_eq!(time.to_string(), "Monday 08:30:00");
/// # Ok::<(), knxdpt_core::DptError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeOfDay {
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub fn new(weekday: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            weekday,
            hour,
            minute,
            second,
        }
    }

    /// Check every field against its domain, naming the first that fails.
    pub fn validate(&self) -> Result<(), DptError> {
        check_field("weekday", self.weekday, 7)?;
        check_field("hour", self.hour, 23)?;
        check_field("minute", self.minute, 59)?;
        check_field("second", self.second, 59)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn now() -> Self {
        let now = clock::local_now();
        Self {
            weekday: now.weekday().number_from_monday(),
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
        }
    }

    fn from_text(text: &str) -> Result<Self, DptError> {
        let fields = fields_exact(text, 4)?;
        let value = Self {
            weekday: parse_bounded("weekday", fields[0])?,
            hour: parse_bounded("hour", fields[1])?,
            minute: parse_bounded("minute", fields[2])?,
            second: parse_bounded("second", fields[3])?,
        };
        value.validate()?;
        Ok(value)
    }
}

pub(crate) fn check_field(field: &'static str, value: u8, max: u8) -> Result<(), DptError> {
    if value > max {
        return Err(DptError::out_of_range("value", format!("{value} > {max}")).in_field(field));
    }
    Ok(())
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(day) = weekday_name(self.weekday) {
            write!(f, "{day} ")?;
        }
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl Datapoint for TimeOfDay {
    /// Invalid values pack to an all-zero payload.
    fn pack(&self) -> Vec<u8> {
        let writer = FrameWriter::with_len(layout::TIME_OF_DAY_LEN);
        if !self.is_valid() {
            return writer.finish();
        }
        writer
            .put_u8(
                layout::TIME_OF_DAY_DAY_HOUR_OFFSET,
                (self.weekday << layout::WEEKDAY_SHIFT) | (self.hour & layout::HOUR_MASK),
            )
            .put_u8(layout::TIME_OF_DAY_MINUTE_OFFSET, self.minute)
            .put_u8(layout::TIME_OF_DAY_SECOND_OFFSET, self.second)
            .finish()
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        let reader = FrameReader::exact(data, layout::TIME_OF_DAY_LEN)?;
        let day_hour = reader.read_u8(layout::TIME_OF_DAY_DAY_HOUR_OFFSET)?;
        let value = Self {
            weekday: day_hour >> layout::WEEKDAY_SHIFT,
            hour: day_hour & layout::HOUR_MASK,
            minute: reader.read_u8(layout::TIME_OF_DAY_MINUTE_OFFSET)? & layout::MINUTE_SECOND_MASK,
            second: reader.read_u8(layout::TIME_OF_DAY_SECOND_OFFSET)? & layout::MINUTE_SECOND_MASK,
        };
        value.validate()?;
        *self = value;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        ""
    }

    /// Seconds since midnight; the weekday is not part of the projection.
    fn to_f64(&self) -> f64 {
        f64::from(self.hour) * 3600.0 + f64::from(self.minute) * 60.0 + f64::from(self.second)
    }

    /// Empty text takes the current local time.
    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError> {
        let value = if text.is_empty() {
            Self::now()
        } else {
            Self::from_text(text)?
        };
        *self = value;
        Ok(self.pack())
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeOfDay, weekday_name};
    use crate::error::{DptError, ErrorKind};
    use crate::types::Datapoint;

    #[test]
    fn packs_weekday_and_hour_into_one_octet() {
        let time = TimeOfDay::new(3, 14, 5, 59);
        assert_eq!(time.pack(), vec![0x00, 0x6E, 0x05, 0x3B]);
    }

    #[test]
    fn unpack_masks_reserved_bits() {
        let mut time = TimeOfDay::default();
        time.unpack(&[0x00, 0xF7, 0xC0, 0xC1]).unwrap();
        assert_eq!(time, TimeOfDay::new(7, 23, 0, 1));
        assert_eq!(time.to_string(), "Sunday 23:00:01");
    }

    #[test]
    fn unpack_rejects_hour_out_of_range() {
        let mut time = TimeOfDay::new(1, 1, 1, 1);
        let err = time.unpack(&[0x00, 0x18, 0x00, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(err, DptError::Field { field: "hour", .. }));
        assert_eq!(time, TimeOfDay::new(1, 1, 1, 1));
    }

    #[test]
    fn unpack_rejects_minute_out_of_range() {
        let mut time = TimeOfDay::default();
        let err = time.unpack(&[0x00, 0x00, 0x3C, 0x00]).unwrap_err();
        assert!(matches!(err, DptError::Field { field: "minute", .. }));
    }

    #[test]
    fn weekday_eight_is_out_of_range() {
        let err = TimeOfDay::new(8, 10, 0, 0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(err, DptError::Field { field: "weekday", .. }));

        let mut time = TimeOfDay::default();
        let err = time.parse_text("8,10,0,0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(time, TimeOfDay::default());
    }

    #[test]
    fn invalid_value_packs_to_zero_payload() {
        assert_eq!(TimeOfDay::new(8, 10, 0, 0).pack(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn wrong_length_is_invalid_length() {
        let mut time = TimeOfDay::default();
        let err = time.unpack(&[0x00, 0x01, 0x02]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn parse_text_fields() {
        let mut time = TimeOfDay::default();
        assert_eq!(
            time.parse_text("1,8,30,0").unwrap(),
            vec![0x00, 0x28, 0x1E, 0x00]
        );
        assert_eq!(time.to_string(), "Monday 08:30:00");
        assert_eq!(time.to_f64(), 30_600.0);

        time.parse_text("0,8,30,0").unwrap();
        assert_eq!(time.to_string(), "08:30:00");
    }

    #[test]
    fn parse_text_rejects_bad_shapes() {
        let mut time = TimeOfDay::default();
        let err = time.parse_text("1,2,3").unwrap_err();
        assert!(matches!(
            err,
            DptError::FieldCount {
                expected: 4,
                actual: 3
            }
        ));
        let err = time.parse_text("1,x,3,4").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedText);
        assert!(matches!(err, DptError::Field { field: "hour", .. }));
    }

    #[test]
    fn empty_text_uses_current_time() {
        let mut time = TimeOfDay::default();
        let payload = time.parse_text("").unwrap();
        assert_eq!(payload.len(), 4);
        assert!((1..=7).contains(&time.weekday));
        let mut decoded = TimeOfDay::default();
        decoded.unpack(&payload).unwrap();
        assert_eq!(decoded, time);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(0), None);
        assert_eq!(weekday_name(1), Some("Monday"));
        assert_eq!(weekday_name(7), Some("Sunday"));
        assert_eq!(weekday_name(8), None);
    }
}

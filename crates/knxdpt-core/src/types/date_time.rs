use std::fmt;

use time::{Date, Month, PrimitiveDateTime, Time};

use super::Datapoint;
use super::text::{fields_at_least, parse_bounded};
use super::time_of_day::check_field;
use crate::clock;
use crate::codec::layout;
use crate::codec::reader::FrameReader;
use crate::codec::writer::FrameWriter;
use crate::error::DptError;

const YEAR_MAX: u16 = layout::DATE_TIME_YEAR_BASE + u8::MAX as u16;

/// Calendar date, time and status flags (DPT 19.001).
///
/// `weekday` follows the KNX convention (1 = Monday … 7 = Sunday, 0 = none)
/// and is always derived from the date when parsed from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub fault: bool,
    pub working_day: bool,
    pub summer_time: bool,
}

impl DateTime {
    pub fn validate(&self) -> Result<(), DptError> {
        if !(layout::DATE_TIME_YEAR_BASE..=YEAR_MAX).contains(&self.year) {
            return Err(DptError::out_of_range(
                "value",
                format!(
                    "{} not in [{}, {YEAR_MAX}]",
                    self.year,
                    layout::DATE_TIME_YEAR_BASE
                ),
            )
            .in_field("year"));
        }
        check_range("month", self.month, 1, 12)?;
        check_range("day", self.day, 1, 31)?;
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
            year: u16::try_from(now.year()).unwrap_or_default(),
            month: u8::from(now.month()),
            day: now.day(),
            weekday: now.weekday().number_from_monday(),
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
            ..Self::default()
        }
    }

    fn from_text(text: &str) -> Result<Self, DptError> {
        let fields = fields_at_least(text, 6)?;
        let mut value = Self {
            year: parse_bounded("year", fields[0])?,
            month: parse_bounded("month", fields[1])?,
            day: parse_bounded("day", fields[2])?,
            hour: parse_bounded("hour", fields[3])?,
            minute: parse_bounded("minute", fields[4])?,
            second: parse_bounded("second", fields[5])?,
            ..Self::default()
        };
        value.validate()?;
        value.weekday = value.date()?.weekday().number_from_monday();
        Ok(value)
    }

    fn date(&self) -> Result<Date, DptError> {
        let month = Month::try_from(self.month)
            .map_err(|err| DptError::out_of_range("value", err).in_field("month"))?;
        Date::from_calendar_date(i32::from(self.year), month, self.day)
            .map_err(|err| DptError::out_of_range("value", err).in_field("day"))
    }
}

fn check_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), DptError> {
    if !(min..=max).contains(&value) {
        return Err(
            DptError::out_of_range("value", format!("{value} not in [{min}, {max}]"))
                .in_field(field),
        );
    }
    Ok(())
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl Datapoint for DateTime {
    fn pack(&self) -> Vec<u8> {
        let writer = FrameWriter::with_len(layout::DATE_TIME_LEN);
        if !self.is_valid() {
            return writer.finish();
        }
        let mut status = 0;
        if self.fault {
            status |= layout::DATE_TIME_FAULT_BIT;
        }
        if self.working_day {
            status |= layout::DATE_TIME_WORKING_DAY_BIT;
        }
        let quality = if self.summer_time {
            layout::DATE_TIME_SUMMER_BIT
        } else {
            0
        };
        // validate() bounds the year to one octet above the base
        let year = (self.year - layout::DATE_TIME_YEAR_BASE) as u8;
        writer
            .put_u8(layout::DATE_TIME_YEAR_OFFSET, year)
            .put_u8(layout::DATE_TIME_MONTH_OFFSET, self.month)
            .put_u8(layout::DATE_TIME_DAY_OFFSET, self.day)
            .put_u8(
                layout::DATE_TIME_DAY_HOUR_OFFSET,
                (self.weekday << layout::WEEKDAY_SHIFT) | self.hour,
            )
            .put_u8(layout::DATE_TIME_MINUTE_OFFSET, self.minute)
            .put_u8(layout::DATE_TIME_SECOND_OFFSET, self.second)
            .put_u8(layout::DATE_TIME_STATUS_OFFSET, status)
            .put_u8(layout::DATE_TIME_QUALITY_OFFSET, quality)
            .finish()
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        let reader = FrameReader::exact(data, layout::DATE_TIME_LEN)?;
        let day_hour = reader.read_u8(layout::DATE_TIME_DAY_HOUR_OFFSET)?;
        let status = reader.read_u8(layout::DATE_TIME_STATUS_OFFSET)?;
        let quality = reader.read_u8(layout::DATE_TIME_QUALITY_OFFSET)?;
        let value = Self {
            year: layout::DATE_TIME_YEAR_BASE
                + u16::from(reader.read_u8(layout::DATE_TIME_YEAR_OFFSET)?),
            month: reader.read_u8(layout::DATE_TIME_MONTH_OFFSET)? & layout::MONTH_MASK,
            day: reader.read_u8(layout::DATE_TIME_DAY_OFFSET)? & layout::DAY_MASK,
            weekday: day_hour >> layout::WEEKDAY_SHIFT,
            hour: day_hour & layout::HOUR_MASK,
            minute: reader.read_u8(layout::DATE_TIME_MINUTE_OFFSET)? & layout::MINUTE_SECOND_MASK,
            second: reader.read_u8(layout::DATE_TIME_SECOND_OFFSET)? & layout::MINUTE_SECOND_MASK,
            fault: status & layout::DATE_TIME_FAULT_BIT != 0,
            working_day: status & layout::DATE_TIME_WORKING_DAY_BIT != 0,
            summer_time: quality & layout::DATE_TIME_SUMMER_BIT != 0,
        };
        value.validate()?;
        *self = value;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        ""
    }

    /// Unix timestamp of the fields read as UTC; 0 when they do not form a
    /// calendar date.
    fn to_f64(&self) -> f64 {
        let Ok(date) = self.date() else {
            return 0.0;
        };
        let Ok(time) = Time::from_hms(self.hour, self.minute, self.second) else {
            return 0.0;
        };
        PrimitiveDateTime::new(date, time)
            .assume_utc()
            .unix_timestamp() as f64
    }

    /// Empty text takes the current local time. Otherwise the first six
    /// fields are year, month, day, hour, minute, second; any extra fields
    /// are ignored and the weekday comes from the date.
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
    use time::{Date, Duration, Month, PrimitiveDateTime, Time};

    use super::DateTime;
    use crate::clock;
    use crate::error::{DptError, ErrorKind};
    use crate::types::Datapoint;

    fn sample() -> DateTime {
        DateTime {
            year: 2026,
            month: 1,
            day: 9,
            weekday: 5,
            hour: 18,
            minute: 30,
            second: 0,
            fault: false,
            working_day: true,
            summer_time: true,
        }
    }

    #[test]
    fn packs_fields_and_flags() {
        assert_eq!(
            sample().pack(),
            vec![0x00, 126, 1, 9, 0xB2, 30, 0, 0x40, 0x01]
        );
        let faulty = DateTime {
            fault: true,
            working_day: false,
            summer_time: false,
            ..sample()
        };
        assert_eq!(faulty.pack()[7..], [0x80, 0x00]);
    }

    #[test]
    fn unpack_reads_fields_and_flags() {
        let mut value = DateTime::default();
        value
            .unpack(&[0x00, 126, 1, 9, 0xB2, 30, 0, 0x40, 0x01])
            .unwrap();
        assert_eq!(value, sample());
        assert_eq!(value.to_string(), "2026-01-09 18:30:00");
    }

    #[test]
    fn year_outside_domain_packs_to_zero_payload() {
        let early = DateTime {
            year: 1899,
            ..sample()
        };
        assert_eq!(early.pack(), vec![0; 9]);
        let late = DateTime {
            year: 2156,
            ..sample()
        };
        assert_eq!(late.pack(), vec![0; 9]);
        let last = DateTime {
            year: 2155,
            ..sample()
        };
        assert_eq!(last.pack()[1], 255);
    }

    #[test]
    fn unpack_rejects_month_zero() {
        let mut value = sample();
        let err = value
            .unpack(&[0x00, 126, 0, 9, 0xB2, 30, 0, 0, 0])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(err, DptError::Field { field: "month", .. }));
        assert_eq!(value, sample());
    }

    #[test]
    fn unpack_rejects_hour_24() {
        let mut value = DateTime::default();
        let err = value
            .unpack(&[0x00, 126, 1, 9, 0x18, 0, 0, 0, 0])
            .unwrap_err();
        assert!(matches!(err, DptError::Field { field: "hour", .. }));
    }

    #[test]
    fn wrong_length_is_invalid_length() {
        let mut value = DateTime::default();
        let err = value.unpack(&[0x00; 8]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn parse_text_derives_weekday() {
        let mut value = DateTime::default();
        let payload = value.parse_text("2026,1,9,18,30,0").unwrap();
        // 2026-01-09 is a Friday
        assert_eq!(value.weekday, 5);
        assert_eq!(payload, vec![0x00, 126, 1, 9, 0xB2, 30, 0, 0, 0]);

        value.parse_text("2024,3,3,0,0,0,ignored").unwrap();
        assert_eq!(value.weekday, 7);
    }

    #[test]
    fn parse_text_rejects_impossible_dates() {
        let mut value = DateTime::default();
        let err = value.parse_text("2025,2,29,0,0,0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(err, DptError::Field { field: "day", .. }));

        let err = value.parse_text("1899,1,1,0,0,0").unwrap_err();
        assert!(matches!(err, DptError::Field { field: "year", .. }));

        let err = value.parse_text("2026,1,9").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedText);
        assert_eq!(value, DateTime::default());
    }

    #[test]
    fn unix_timestamp_projection() {
        let value = DateTime {
            year: 1970,
            month: 1,
            day: 2,
            weekday: 5,
            hour: 0,
            minute: 0,
            second: 1,
            ..DateTime::default()
        };
        assert_eq!(value.to_f64(), 86_401.0);
        assert_eq!(DateTime::default().to_f64(), 0.0);
    }

    #[test]
    fn empty_text_uses_current_local_time() {
        let mut value = DateTime::default();
        let payload = value.parse_text("").unwrap();
        let after = clock::local_now();
        assert_eq!(payload.len(), 9);

        let mut decoded = DateTime::default();
        decoded.unpack(&payload).unwrap();

        let date = Date::from_calendar_date(
            i32::from(decoded.year),
            Month::try_from(decoded.month).unwrap(),
            decoded.day,
        )
        .unwrap();
        assert_eq!(
            decoded.weekday,
            date.weekday().number_from_monday(),
            "weekday must match the decoded date"
        );

        let stamp = PrimitiveDateTime::new(
            date,
            Time::from_hms(decoded.hour, decoded.minute, decoded.second).unwrap(),
        )
        .assume_offset(after.offset());
        let elapsed = after - stamp;
        assert!(elapsed >= Duration::ZERO, "decoded time is in the future");
        assert!(elapsed < Duration::seconds(2), "decoded time lags by {elapsed}");
    }
}

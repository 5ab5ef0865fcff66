use std::fmt;

use super::Datapoint;
use super::text::{fields_exact, parse_bounded, parse_flag};
use crate::codec::flags::{pack_flags, unpack_flags};
use crate::codec::layout;
use crate::codec::reader::FrameReader;
use crate::codec::writer::FrameWriter;
use crate::error::DptError;

/// RGB colour (DPT 232.600).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColourRgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl fmt::Display for ColourRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

impl Datapoint for ColourRgb {
    fn pack(&self) -> Vec<u8> {
        FrameWriter::with_len(layout::RGB_LEN)
            .put_u8(layout::RGB_RED_OFFSET, self.red)
            .put_u8(layout::RGB_GREEN_OFFSET, self.green)
            .put_u8(layout::RGB_BLUE_OFFSET, self.blue)
            .finish()
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        let reader = FrameReader::exact(data, layout::RGB_LEN)?;
        *self = Self {
            red: reader.read_u8(layout::RGB_RED_OFFSET)?,
            green: reader.read_u8(layout::RGB_GREEN_OFFSET)?,
            blue: reader.read_u8(layout::RGB_BLUE_OFFSET)?,
        };
        Ok(())
    }

    fn unit(&self) -> &'static str {
        ""
    }

    fn to_f64(&self) -> f64 {
        f64::from(self.red) + f64::from(self.green) + f64::from(self.blue)
    }

    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError> {
        let fields = fields_exact(text, 3)?;
        *self = Self {
            red: parse_bounded("red", fields[0])?,
            green: parse_bounded("green", fields[1])?,
            blue: parse_bounded("blue", fields[2])?,
        };
        Ok(self.pack())
    }
}

/// RGBW colour with per-channel validity flags (DPT 251.600).
///
/// The flag octet carries red, green, blue and white in bits 3 to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColourRgbw {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
    pub red_valid: bool,
    pub green_valid: bool,
    pub blue_valid: bool,
    pub white_valid: bool,
}

impl fmt::Display for ColourRgbw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "red: {} green: {} blue: {} white: {} (valid: {}/{}/{}/{})",
            self.red,
            self.green,
            self.blue,
            self.white,
            self.red_valid,
            self.green_valid,
            self.blue_valid,
            self.white_valid
        )
    }
}

impl Datapoint for ColourRgbw {
    fn pack(&self) -> Vec<u8> {
        let flags = pack_flags([
            self.red_valid,
            self.green_valid,
            self.blue_valid,
            self.white_valid,
        ]);
        FrameWriter::with_len(layout::RGBW_LEN)
            .put_u8(layout::RGBW_RED_OFFSET, self.red)
            .put_u8(layout::RGBW_GREEN_OFFSET, self.green)
            .put_u8(layout::RGBW_BLUE_OFFSET, self.blue)
            .put_u8(layout::RGBW_WHITE_OFFSET, self.white)
            .put_u8(layout::RGBW_FLAGS_OFFSET, flags)
            .finish()
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        let reader = FrameReader::exact(data, layout::RGBW_LEN)?;
        let [red_valid, green_valid, blue_valid, white_valid] =
            unpack_flags::<4>(reader.read_u8(layout::RGBW_FLAGS_OFFSET)?);
        *self = Self {
            red: reader.read_u8(layout::RGBW_RED_OFFSET)?,
            green: reader.read_u8(layout::RGBW_GREEN_OFFSET)?,
            blue: reader.read_u8(layout::RGBW_BLUE_OFFSET)?,
            white: reader.read_u8(layout::RGBW_WHITE_OFFSET)?,
            red_valid,
            green_valid,
            blue_valid,
            white_valid,
        };
        Ok(())
    }

    fn unit(&self) -> &'static str {
        ""
    }

    fn to_f64(&self) -> f64 {
        f64::from(self.red) + f64::from(self.green) + f64::from(self.blue) + f64::from(self.white)
    }

    /// Four channels; every validity flag is set.
    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError> {
        let fields = fields_exact(text, 4)?;
        *self = Self {
            red: parse_bounded("red", fields[0])?,
            green: parse_bounded("green", fields[1])?,
            blue: parse_bounded("blue", fields[2])?,
            white: parse_bounded("white", fields[3])?,
            red_valid: true,
            green_valid: true,
            blue_valid: true,
            white_valid: true,
        };
        Ok(self.pack())
    }
}

/// CIE xyY colour with validity flags (DPT 242.600).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColourXyY {
    pub x: u16,
    pub y: u16,
    pub brightness: u8,
    pub colour_valid: bool,
    pub brightness_valid: bool,
}

impl fmt::Display for ColourXyY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x: {} y: {} Y: {} colour valid: {}, brightness valid: {}",
            self.x, self.y, self.brightness, self.colour_valid, self.brightness_valid
        )
    }
}

impl Datapoint for ColourXyY {
    fn pack(&self) -> Vec<u8> {
        FrameWriter::with_len(layout::XYY_LEN)
            .put_slice(layout::XYY_X_RANGE, &self.x.to_be_bytes())
            .put_slice(layout::XYY_Y_RANGE, &self.y.to_be_bytes())
            .put_u8(layout::XYY_BRIGHTNESS_OFFSET, self.brightness)
            .put_u8(
                layout::XYY_FLAGS_OFFSET,
                pack_flags([self.colour_valid, self.brightness_valid]),
            )
            .finish()
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        let reader = FrameReader::exact(data, layout::XYY_LEN)?;
        let [colour_valid, brightness_valid] =
            unpack_flags::<2>(reader.read_u8(layout::XYY_FLAGS_OFFSET)?);
        *self = Self {
            x: reader.read_u16_be(layout::XYY_X_RANGE)?,
            y: reader.read_u16_be(layout::XYY_Y_RANGE)?,
            brightness: reader.read_u8(layout::XYY_BRIGHTNESS_OFFSET)?,
            colour_valid,
            brightness_valid,
        };
        Ok(())
    }

    fn unit(&self) -> &'static str {
        ""
    }

    fn to_f64(&self) -> f64 {
        f64::from(self.x) + f64::from(self.y) + f64::from(self.brightness)
    }

    /// `x,y,Y,colourValid,brightnessValid`; flags accept `1` or `true`.
    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError> {
        let fields = fields_exact(text, 5)?;
        *self = Self {
            x: parse_bounded("x", fields[0])?,
            y: parse_bounded("y", fields[1])?,
            brightness: parse_bounded("brightness", fields[2])?,
            colour_valid: parse_flag(fields[3]),
            brightness_valid: parse_flag(fields[4]),
        };
        Ok(self.pack())
    }
}

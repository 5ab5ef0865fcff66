//! Static descriptor table for every supported datapoint type.
//!
//! One row per type: identifier, ETS name and a [`DptKind`] carrying the
//! per-type configuration (word pair and true-tokens for booleans; backing
//! primitive, unit, domain and text form for scalars). The generic
//! implementations in [`crate::types`] read their behaviour from these rows.
//!
//! The table is compile-time data and never mutated.

use serde::Serialize;

use crate::codec::{Primitive, layout};
use crate::error::DptError;
use crate::id::DptId;
use crate::types::{
    Boolean, BooleanSpec, ColourRgb, ColourRgbw, ColourXyY, Datapoint, DateTime, Scalar,
    ScalarSpec, TextForm, TimeOfDay,
};

/// Configuration of one datapoint type family member.
#[derive(Debug)]
pub enum DptKind {
    Boolean(BooleanSpec),
    Scalar(ScalarSpec),
    TimeOfDay,
    DateTime,
    ColourRgb,
    ColourXyY,
    ColourRgbw,
}

/// Coarse grouping used in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Boolean,
    Scalar,
    TimeOfDay,
    DateTime,
    Colour,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Boolean => "boolean",
            Family::Scalar => "scalar",
            Family::TimeOfDay => "time_of_day",
            Family::DateTime => "date_time",
            Family::Colour => "colour",
        }
    }
}

/// One registry row.
#[derive(Debug)]
pub struct DptDescriptor {
    pub id: DptId,
    pub name: &'static str,
    pub kind: DptKind,
}

impl DptDescriptor {
    /// Declared payload length, control octet included.
    pub fn wire_len(&self) -> usize {
        match &self.kind {
            DptKind::Boolean(_) => layout::B1_LEN,
            DptKind::Scalar(spec) => spec.primitive.wire_len(),
            DptKind::TimeOfDay => layout::TIME_OF_DAY_LEN,
            DptKind::DateTime => layout::DATE_TIME_LEN,
            DptKind::ColourRgb => layout::RGB_LEN,
            DptKind::ColourXyY => layout::XYY_LEN,
            DptKind::ColourRgbw => layout::RGBW_LEN,
        }
    }

    pub fn family(&self) -> Family {
        match &self.kind {
            DptKind::Boolean(_) => Family::Boolean,
            DptKind::Scalar(_) => Family::Scalar,
            DptKind::TimeOfDay => Family::TimeOfDay,
            DptKind::DateTime => Family::DateTime,
            DptKind::ColourRgb | DptKind::ColourXyY | DptKind::ColourRgbw => Family::Colour,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match &self.kind {
            DptKind::Scalar(spec) => Some(spec.primitive),
            _ => None,
        }
    }

    pub fn unit(&self) -> &'static str {
        match &self.kind {
            DptKind::Scalar(spec) => spec.unit,
            _ => "",
        }
    }

    /// Fresh value of this type, holding the family's zero value.
    pub fn instantiate(&'static self) -> Box<dyn Datapoint> {
        match &self.kind {
            DptKind::Boolean(spec) => Box::new(Boolean::new(spec, false)),
            DptKind::Scalar(spec) => Box::new(Scalar::new(spec, 0.0)),
            DptKind::TimeOfDay => Box::new(TimeOfDay::default()),
            DptKind::DateTime => Box::new(DateTime::default()),
            DptKind::ColourRgb => Box::new(ColourRgb::default()),
            DptKind::ColourXyY => Box::new(ColourXyY::default()),
            DptKind::ColourRgbw => Box::new(ColourRgbw::default()),
        }
    }
}

/// Find the descriptor for `id`.
pub fn lookup(id: DptId) -> Option<&'static DptDescriptor> {
    REGISTRY
        .binary_search_by(|descriptor| descriptor.id.cmp(&id))
        .ok()
        .map(|index| &REGISTRY[index])
}

/// Parse `text` as an identifier and find its descriptor.
pub fn resolve(text: &str) -> Result<&'static DptDescriptor, DptError> {
    let id: DptId = text.parse()?;
    lookup(id).ok_or_else(|| DptError::UnknownType { id: id.to_string() })
}

/// Every registered type, ordered by identifier.
pub fn all() -> &'static [DptDescriptor] {
    REGISTRY
}

const fn boolean(
    sub: u16,
    name: &'static str,
    true_word: &'static str,
    false_word: &'static str,
    true_tokens: &'static [&'static str],
) -> DptDescriptor {
    DptDescriptor {
        id: DptId::new(1, sub),
        name,
        kind: DptKind::Boolean(BooleanSpec {
            true_word,
            false_word,
            true_tokens,
        }),
    }
}

#[allow(clippy::too_many_arguments)]
const fn scalar(
    main: u16,
    sub: u16,
    name: &'static str,
    primitive: Primitive,
    unit: &'static str,
    quantity: &'static str,
    domain: Option<(f64, f64)>,
    text: TextForm,
) -> DptDescriptor {
    DptDescriptor {
        id: DptId::new(main, sub),
        name,
        kind: DptKind::Scalar(ScalarSpec {
            primitive,
            unit,
            quantity,
            domain,
            text,
        }),
    }
}

const fn u16_value(sub: u16, name: &'static str, unit: &'static str) -> DptDescriptor {
    scalar(7, sub, name, Primitive::U16, unit, "value", None, TextForm::Integer)
}

const fn v16_value(sub: u16, name: &'static str, unit: &'static str) -> DptDescriptor {
    scalar(8, sub, name, Primitive::V16, unit, "value", None, TextForm::Integer)
}

const fn f16_value(
    sub: u16,
    name: &'static str,
    unit: &'static str,
    quantity: &'static str,
    min: f64,
) -> DptDescriptor {
    scalar(
        9,
        sub,
        name,
        Primitive::F16,
        unit,
        quantity,
        Some((min, F16_DOMAIN_MAX)),
        TextForm::Decimal,
    )
}

const fn v32_value(sub: u16, name: &'static str, unit: &'static str) -> DptDescriptor {
    scalar(13, sub, name, Primitive::V32, unit, "value", None, TextForm::Integer)
}

const fn f32_value(
    sub: u16,
    name: &'static str,
    unit: &'static str,
    quantity: &'static str,
) -> DptDescriptor {
    scalar(14, sub, name, Primitive::F32, unit, quantity, None, TextForm::Decimal)
}

const fn composite(main: u16, sub: u16, name: &'static str, kind: DptKind) -> DptDescriptor {
    DptDescriptor {
        id: DptId::new(main, sub),
        name,
        kind,
    }
}

const F16_DOMAIN_MAX: f64 = 670_760.0;
const F16_DOMAIN_MIN: f64 = -670_760.0;
const ABSOLUTE_ZERO_C: f64 = -273.0;
const ABSOLUTE_ZERO_F: f64 = -459.6;

// Sorted by identifier; `lookup` relies on it.
static REGISTRY: &[DptDescriptor] = &[
    boolean(1, "DPT_Switch", "On", "Off", &["On"]),
    boolean(2, "DPT_Bool", "True", "False", &["On"]),
    boolean(3, "DPT_Enable", "Enable", "Disable", &["Enable"]),
    boolean(4, "DPT_Ramp", "Ramp", "No ramp", &["Ramp"]),
    boolean(5, "DPT_Alarm", "Alarm", "No alarm", &["Alarm"]),
    boolean(6, "DPT_BinaryValue", "High", "Low", &["High"]),
    boolean(7, "DPT_Step", "Increase", "Decrease", &["Increase"]),
    boolean(8, "DPT_UpDown", "Down", "Up", &["Down"]),
    boolean(9, "DPT_OpenClose", "Close", "Open", &["Close"]),
    boolean(10, "DPT_Start", "Start", "Stop", &["Start"]),
    boolean(11, "DPT_State", "Active", "Inactive", &["Active"]),
    boolean(12, "DPT_Invert", "Inverted", "Not inverted", &["Inverted"]),
    boolean(13, "DPT_DimSendStyle", "Cyclically", "Start/stop", &["Cyclically"]),
    boolean(14, "DPT_InputSource", "Calculated", "Fixed", &["Calculated"]),
    boolean(15, "DPT_Reset", "reset command", "no action", &["reset command"]),
    boolean(16, "DPT_Ack", "acknowledge command", "no action", &["acknowledge command"]),
    boolean(17, "DPT_Trigger", "trigger", "trigger", &["trigger"]),
    boolean(18, "DPT_Occupancy", "occupied", "not occupied", &["occupied"]),
    boolean(19, "DPT_Window_Door", "open", "closed", &["open"]),
    boolean(21, "DPT_LogicalFunction", "AND", "OR", &["AND"]),
    boolean(22, "DPT_Scene_AB", "scene B", "scene A", &["scene B"]),
    boolean(
        23,
        "DPT_ShutterBlinds_Mode",
        "move Up/Down + StepStop mode",
        "only move Up/Down mode",
        &[],
    ),
    boolean(24, "DPT_DayNight", "Night", "Day", &[]),
    boolean(100, "DPT_Heat_Cool", "heating", "cooling", &[]),
    scalar(
        3,
        7,
        "DPT_Control_Dimming",
        Primitive::U8,
        "",
        "dimming step",
        None,
        TextForm::Decimal,
    ),
    scalar(
        5,
        10,
        "DPT_Value_1_Ucount",
        Primitive::U8,
        "counter pulses",
        "counter",
        None,
        TextForm::Integer,
    ),
    scalar(
        6,
        10,
        "DPT_Value_1_Count",
        Primitive::V8,
        "counter pulses",
        "counter",
        None,
        TextForm::Decimal,
    ),
    u16_value(1, "DPT_Value_2_Ucount", "pulses"),
    u16_value(2, "DPT_TimePeriodMsec", "ms"),
    u16_value(3, "DPT_TimePeriod10MSec", "s"),
    u16_value(4, "DPT_TimePeriod100MSec", "s"),
    u16_value(5, "DPT_TimePeriodSec", "s"),
    u16_value(6, "DPT_TimePeriodMin", "m"),
    u16_value(7, "DPT_TimePeriodHrs", "h"),
    u16_value(10, "DPT_PropDataType", ""),
    u16_value(11, "DPT_Length_mm", "mm"),
    u16_value(12, "DPT_UElCurrentmA", "mA"),
    u16_value(13, "DPT_Brightness", "lux"),
    u16_value(600, "DPT_Absolute_Colour_Temperature", "K"),
    v16_value(1, "DPT_Value_2_Count", "pulses"),
    v16_value(2, "DPT_DeltaTimeMsec", "ms"),
    v16_value(5, "DPT_DeltaTimeSec", "s"),
    v16_value(11, "DPT_Rotation_Angle", "°"),
    f16_value(1, "DPT_Value_Temp", "°C", "temperature", ABSOLUTE_ZERO_C),
    f16_value(2, "DPT_Value_Tempd", "K", "temperature difference", F16_DOMAIN_MIN),
    f16_value(3, "DPT_Value_Tempa", "K/h", "kelvin per hour", F16_DOMAIN_MIN),
    f16_value(4, "DPT_Value_Lux", "lux", "illuminance", 0.0),
    f16_value(5, "DPT_Value_Wsp", "m/s", "wind speed", 0.0),
    f16_value(6, "DPT_Value_Pres", "Pa", "pressure", 0.0),
    f16_value(7, "DPT_Value_Humidity", "%", "humidity", 0.0),
    f16_value(8, "DPT_Value_AirQuality", "ppm", "air quality", 0.0),
    f16_value(10, "DPT_Value_Time1", "s", "time", F16_DOMAIN_MIN),
    f16_value(11, "DPT_Value_Time2", "ms", "time", F16_DOMAIN_MIN),
    f16_value(20, "DPT_Value_Volt", "mV", "voltage", F16_DOMAIN_MIN),
    f16_value(21, "DPT_Value_Curr", "mA", "current", F16_DOMAIN_MIN),
    f16_value(22, "DPT_PowerDensity", "W/m2", "power density", F16_DOMAIN_MIN),
    f16_value(23, "DPT_KelvinPerPercent", "K/%", "kelvin per percent", F16_DOMAIN_MIN),
    f16_value(24, "DPT_Power", "kW", "power", F16_DOMAIN_MIN),
    f16_value(25, "DPT_Value_Volume_Flow", "l/h", "volume flow", F16_DOMAIN_MIN),
    f16_value(26, "DPT_Rain_Amount", "l/m^2", "rain amount", F16_DOMAIN_MIN),
    f16_value(27, "DPT_Value_Temp_F", "°F", "temperature", ABSOLUTE_ZERO_F),
    f16_value(28, "DPT_Value_Wsp_kmh", "km/h", "wind speed", 0.0),
    f16_value(29, "DPT_Value_Absolute_Humidity", "g/m³", "absolute humidity", 0.0),
    composite(10, 1, "DPT_TimeOfDay", DptKind::TimeOfDay),
    scalar(
        12,
        1,
        "DPT_Value_4_Ucount",
        Primitive::U32,
        "pulses",
        "counter",
        None,
        TextForm::Decimal,
    ),
    v32_value(1, "DPT_Value_4_Count", "pulses"),
    v32_value(2, "DPT_FlowRate_m3/h", "m^3/h"),
    v32_value(10, "DPT_ActiveEnergy", "Wh"),
    v32_value(11, "DPT_ApparantEnergy", "VAh"),
    v32_value(12, "DPT_ReactiveEnergy", "VARh"),
    v32_value(13, "DPT_ActiveEnergy_kWh", "kWh"),
    v32_value(14, "DPT_ApparantEnergy_kVAh", "kVAh"),
    v32_value(15, "DPT_ReactiveEnergy_kVARh", "kVARh"),
    v32_value(16, "DPT_ActiveEnergy_MWh", "MWh"),
    v32_value(100, "DPT_LongDeltaTimeSec", "s"),
    f32_value(19, "DPT_Value_Electric_Current", "A", "current"),
    f32_value(27, "DPT_Value_Electric_Potential", "V", "voltage"),
    f32_value(33, "DPT_Value_Frequency", "Hz", "frequency"),
    f32_value(56, "DPT_Value_Power", "W", "power"),
    f32_value(68, "DPT_Value_Common_Temperature", "°C", "temperature"),
    composite(19, 1, "DPT_DateTime", DptKind::DateTime),
    composite(232, 600, "DPT_Colour_RGB", DptKind::ColourRgb),
    composite(242, 600, "DPT_Colour_xyY", DptKind::ColourXyY),
    composite(251, 600, "DPT_Colour_RGBW", DptKind::ColourRgbw),
];

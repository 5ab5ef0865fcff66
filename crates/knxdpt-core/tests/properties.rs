use knxdpt_core::codec::flags::{pack_flags, unpack_flags};
use knxdpt_core::codec::primitives::f16_parts;
use knxdpt_core::registry::{self, DptDescriptor, DptKind};
use knxdpt_core::{
    ColourRgbw, Datapoint, DptId, ErrorKind, Primitive, Scalar, ScalarSpec, TimeOfDay, decode,
    encode_text,
};
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};

fn scalar_specs() -> impl Iterator<Item = (&'static DptDescriptor, &'static ScalarSpec)> {
    registry::all()
        .iter()
        .filter_map(|descriptor| match &descriptor.kind {
            DptKind::Scalar(spec) => Some((descriptor, spec)),
            _ => None,
        })
}

fn round_trip(spec: &'static ScalarSpec, value: f64) -> f64 {
    let payload = Scalar::new(spec, value).pack();
    let mut decoded = Scalar::new(spec, 0.0);
    decoded.unpack(&payload).expect("unpack packed value");
    decoded.to_f64()
}

#[test]
fn integer_backed_values_round_trip_exactly() {
    for (descriptor, spec) in scalar_specs().filter(|(_, spec)| spec.primitive.is_integer()) {
        let (min, max) = spec.limits();
        for value in [min, max, 0.0f64.clamp(min, max), ((min + max) / 2.0).trunc()] {
            assert_eq!(
                round_trip(spec, value),
                value,
                "{} did not round-trip {value}",
                descriptor.id
            );
        }
    }
}

#[test]
fn f16_values_round_trip_within_exponent_step() {
    let samples = [
        0.0, 0.01, -0.01, 21.5, -20.49, 20.48, 1234.56, -273.0, -459.6, 5000.25, 99_999.99,
        670_760.0, -670_760.0,
    ];
    for (descriptor, spec) in scalar_specs().filter(|(_, spec)| spec.primitive == Primitive::F16)
    {
        let (min, max) = spec.limits();
        for value in samples.into_iter().filter(|value| (min..=max).contains(value)) {
            let step = 0.01 * f64::from(1u32 << f16_parts(value).exponent);
            let decoded = round_trip(spec, value);
            assert!(
                (decoded - value).abs() <= step,
                "{}: {value} decoded as {decoded} (step {step})",
                descriptor.id
            );
        }
    }
}

#[test]
fn every_type_packs_its_declared_length() {
    for descriptor in registry::all() {
        let len = descriptor.wire_len();
        let mut value = descriptor.instantiate();
        assert_eq!(value.pack().len(), len, "{}", descriptor.id);

        for wrong in [len - 1, len + 1] {
            let err = value
                .unpack(&vec![0u8; wrong])
                .expect_err("wrong length must fail");
            assert_eq!(
                err.kind(),
                ErrorKind::InvalidLength,
                "{} with {wrong} bytes",
                descriptor.id
            );
        }
    }
}

#[test]
fn non_zero_control_octet_is_accepted() {
    let decoded = decode(DptId::new(9, 1), &[0xFF, 0x08, 0x66]).expect("permissive read");
    assert_eq!(decoded.value, 21.5);
    let decoded = decode(DptId::new(232, 600), &[0x80, 1, 2, 3]).expect("permissive read");
    assert_eq!(decoded.text, "1,2,3");
}

#[test]
fn temperature_saturates_instead_of_failing() {
    let huge = encode_text(DptId::new(9, 1), "671000000").expect("saturating encode");
    let bound = encode_text(DptId::new(9, 1), "670760").expect("encode bound");
    assert_eq!(huge, bound);

    let cold = encode_text(DptId::new(9, 1), "-500").expect("saturating encode");
    let floor = encode_text(DptId::new(9, 1), "-273").expect("encode floor");
    assert_eq!(cold, floor);
}

#[test]
fn flag_octet_is_a_bijection() {
    for byte in 0u8..4 {
        let flags = unpack_flags::<2>(byte);
        assert_eq!(pack_flags(flags), byte);
        assert_eq!(unpack_flags::<2>(pack_flags(flags)), flags);
    }
    for byte in 0u8..16 {
        let flags = unpack_flags::<4>(byte);
        assert_eq!(pack_flags(flags), byte);
        assert_eq!(unpack_flags::<4>(pack_flags(flags)), flags);
    }
}

#[test]
fn boolean_text_parse_matches_pack() {
    for descriptor in registry::all() {
        let DptKind::Boolean(spec) = &descriptor.kind else {
            continue;
        };
        let mut value = descriptor.instantiate();
        assert_eq!(value.parse_text("1").unwrap(), vec![1], "{}", descriptor.id);
        for token in spec.true_tokens {
            assert_eq!(
                value.parse_text(token).unwrap(),
                vec![1],
                "{} token {token:?}",
                descriptor.id
            );
        }
        let mut others = vec!["0", "", "2", "true", "yes"];
        if !spec.true_tokens.contains(&spec.false_word) {
            others.push(spec.false_word);
        }
        for other in others {
            assert_eq!(
                value.parse_text(other).unwrap(),
                vec![0],
                "{} text {other:?}",
                descriptor.id
            );
        }
    }
}

#[test]
fn scenario_f16_encode_21_5() {
    let parts = f16_parts(21.5);
    assert_eq!(parts.mantissa, 2150);
    assert_eq!(parts.exponent, 0);

    let payload = encode_text(DptId::new(9, 1), "21.5").unwrap();
    assert_eq!(payload, vec![0x00, 0x08, 0x66]);
    assert_eq!(decode(DptId::new(9, 1), &payload).unwrap().value, 21.5);
}

#[test]
fn scenario_weekday_eight_is_out_of_range() {
    let err = TimeOfDay::new(8, 10, 0, 0).validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    let err = encode_text(DptId::new(10, 1), "8,10,0,0").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(err.to_string().starts_with("weekday: "));
}

#[test]
fn scenario_rgbw_all_valid_flag_octet() {
    let colour = ColourRgbw {
        red: 10,
        green: 20,
        blue: 30,
        white: 40,
        red_valid: true,
        green_valid: true,
        blue_valid: true,
        white_valid: true,
    };
    assert_eq!(colour.pack()[6], 0x0F);
}

#[test]
fn scenario_date_time_from_empty_text_is_now() {
    let payload = encode_text(DptId::new(19, 1), "").unwrap();
    let after = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    assert_eq!(payload.len(), 9);

    let mut decoded = knxdpt_core::DateTime::default();
    decoded.unpack(&payload).unwrap();

    let date = Date::from_calendar_date(
        i32::from(decoded.year),
        Month::try_from(decoded.month).unwrap(),
        decoded.day,
    )
    .unwrap();
    assert_eq!(decoded.weekday, date.weekday().number_from_monday());

    let stamp = PrimitiveDateTime::new(
        date,
        Time::from_hms(decoded.hour, decoded.minute, decoded.second).unwrap(),
    )
    .assume_offset(after.offset());
    let elapsed = after - stamp;
    assert!(elapsed >= Duration::ZERO, "decoded time is in the future");
    assert!(elapsed < Duration::seconds(2), "decoded time lags by {elapsed}");
}

#[test]
fn failed_unpack_leaves_every_type_untouched() {
    for descriptor in registry::all() {
        let mut value = descriptor.instantiate();
        let before = value.to_string();
        let _ = value.unpack(&[0xAB; 12]);
        assert_eq!(value.to_string(), before, "{}", descriptor.id);
    }
}

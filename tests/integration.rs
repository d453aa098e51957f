use std::cmp::Ordering;
use tempocal::{
    decode, encode, Calendar, CalendarDate, Duration, Instant, InstantRange, TimeError, TimeUnit,
    UnitOriginSpec,
};

#[test]
fn switchover_addition_skips_the_ten_missing_days() {
    let reform = Instant::standard(1582, 10, 4).unwrap();
    let next = reform.add_period(&Duration::days(1)).unwrap();
    assert_eq!(next, Instant::standard(1582, 10, 15).unwrap());
}

#[test]
fn leap_year_fixtures_hold_per_calendar() {
    assert!(Calendar::Julian.is_leap(1900));
    assert!(Calendar::Julian.is_leap(2000));
    assert!(!Calendar::ProlepticGregorian.is_leap(1900));
    assert!(Calendar::ProlepticGregorian.is_leap(2000));
}

#[test]
fn canonical_rounding_fixture_on_the_ten_second_grid() {
    let x = Instant::standard(2000, 1, 2).unwrap();
    let ten = Duration::seconds(10);
    let probe = x.add_period(&Duration::seconds(9)).unwrap();

    assert_eq!(probe.floor(&ten).unwrap(), x);
    assert_eq!(probe.ceil(&ten).unwrap(), x.add_period(&ten).unwrap());
    assert_eq!(probe.round(&ten).unwrap(), x.add_period(&ten).unwrap());
}

#[test]
fn year_2000_daily_range_has_366_members() {
    let range = InstantRange::new(
        Instant::standard(2000, 1, 1).unwrap(),
        Duration::days(1),
        Instant::standard(2000, 12, 31).unwrap(),
    )
    .unwrap();
    assert_eq!(range.len(), 366);
}

#[test]
fn decode_then_encode_is_the_identity_on_raw_values() {
    for (spec_string, calendar) in [
        ("days since 2000-01-01", Calendar::Standard),
        ("hours since 1582-10-04", Calendar::Standard),
        ("seconds since 1970-01-01 00:00:00", Calendar::ProlepticGregorian),
        ("milliseconds since 1970-01-01", Calendar::NoLeap),
        ("days since 0000-02-30", Calendar::Day360),
    ] {
        let spec = UnitOriginSpec::parse(spec_string, calendar).unwrap();
        let raw = [0i64, 1, -1, 365, -1_000_000, 86_400_000];
        let instants: Vec<_> = decode(raw, &spec, calendar).unwrap().collect();
        let encoded: Vec<_> = encode(instants, &spec, calendar)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(encoded, raw, "{spec_string}");
    }
}

#[test]
fn comparison_agrees_with_difference_sign() {
    let a = Instant::julian(1999, 12, 31).unwrap();
    let b = Instant::julian(2000, 1, 1).unwrap();
    assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
    assert!(a.difference(&b).unwrap().mantissa() < 0);
    assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
    assert!(b.difference(&a).unwrap().mantissa() > 0);
    assert_eq!(a.compare(&a).unwrap(), Ordering::Equal);
    assert!(a.difference(&a).unwrap().is_zero());
}

#[test]
fn cross_calendar_comparison_is_an_explicit_error() {
    let standard = Instant::standard(2000, 1, 1).unwrap();
    let day360 = Instant::day360(2000, 1, 1).unwrap();
    assert!(matches!(
        standard.compare(&day360),
        Err(TimeError::CalendarMismatch { .. })
    ));
}

#[test]
fn round_trip_through_fields_is_exact_for_every_calendar() {
    let calendars = [
        Calendar::Julian,
        Calendar::ProlepticGregorian,
        Calendar::Standard,
        Calendar::NoLeap,
        Calendar::AllLeap,
        Calendar::Day360,
    ];
    for calendar in calendars {
        let date = CalendarDate::new(1988, 4, 30).with_hms(6, 30, 45);
        let instant = Instant::from_fields(
            calendar,
            date,
            TimeUnit::Seconds,
            CalendarDate::new(1970, 1, 1),
        )
        .unwrap();
        assert_eq!(instant.to_fields().unwrap(), date, "{calendar}");
    }
}

#[test]
fn explicit_rounding_unlocks_a_coarser_encoding() {
    let spec = UnitOriginSpec::parse("minutes since 2000-01-01", Calendar::Standard).unwrap();
    let instant = Instant::new(
        Calendar::Standard,
        CalendarDate::new(2000, 1, 1),
        Duration::seconds(90),
    )
    .unwrap();

    // 90 s is not a whole number of minutes: encoding must refuse...
    let refused: Vec<_> = encode([instant], &spec, Calendar::Standard)
        .unwrap()
        .collect();
    assert!(matches!(
        refused[0],
        Err(TimeError::InexactConversion { .. })
    ));

    // ...until the caller rounds; the tie goes up.
    let rounded = instant.round(&Duration::minutes(1)).unwrap();
    let encoded: Vec<_> = encode([rounded], &spec, Calendar::Standard)
        .unwrap()
        .collect();
    assert_eq!(encoded[0], Ok(2));
}

#[test]
fn range_members_decode_and_encode_consistently() {
    let spec = UnitOriginSpec::parse("days since 2000-01-01", Calendar::Standard).unwrap();
    let start = Instant::standard(2000, 1, 1).unwrap();
    let stop = Instant::standard(2000, 1, 31).unwrap();
    let range = InstantRange::new(start, Duration::days(1), stop).unwrap();

    let encoded: Vec<_> = encode(range.iter(), &spec, Calendar::Standard)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(encoded, (0..=30).collect::<Vec<i64>>());
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_the_value_types() {
    let calendar = Calendar::Standard;
    let json = serde_json::to_string(&calendar).unwrap();
    assert_eq!(serde_json::from_str::<Calendar>(&json).unwrap(), calendar);

    let duration = Duration::milliseconds(86_400_000);
    let json = serde_json::to_string(&duration).unwrap();
    assert_eq!(serde_json::from_str::<Duration>(&json).unwrap(), duration);

    let instant = Instant::standard(1582, 10, 15).unwrap();
    let json = serde_json::to_string(&instant).unwrap();
    let back: Instant = serde_json::from_str(&json).unwrap();
    assert_eq!(back, instant);
}

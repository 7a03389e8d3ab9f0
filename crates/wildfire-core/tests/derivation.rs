use chrono::NaiveDate;
use wildfire_core::area::{
    acres_to_square_meters, area_display_value, area_unit_suffix, format_area,
    square_meters_to_hectares, AreaUnit,
};
use wildfire_core::dates::{
    decode_julian_day, decode_raw_date, julian_day, parse_gregorian_date, UNIX_EPOCH_JULIAN_DAY,
};
use wildfire_core::duration::{duration_days, sanitize_duration, MAX_DURATION_DAYS};
use wildfire_core::season::{season_for_month, Season};
use wildfire_parser::RawDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn julian_epoch_decodes_to_unix_epoch() {
    assert_eq!(decode_julian_day(Some(UNIX_EPOCH_JULIAN_DAY)), Some(date(1970, 1, 1)));
    // noon of the previous day is still 1969-12-31
    assert_eq!(decode_julian_day(Some(2_440_587.0)), Some(date(1969, 12, 31)));
    assert_eq!(decode_julian_day(Some(2_459_015.5)), Some(date(2020, 6, 15)));
}

#[test]
fn julian_day_is_inverse_of_decoding() {
    for d in [date(1992, 1, 1), date(2000, 2, 29), date(2015, 12, 31)] {
        assert_eq!(decode_julian_day(Some(julian_day(d))), Some(d));
    }
}

#[test]
fn julian_decoding_rejects_unrepresentable_values() {
    assert_eq!(decode_julian_day(None), None);
    assert_eq!(decode_julian_day(Some(f64::NAN)), None);
    assert_eq!(decode_julian_day(Some(f64::INFINITY)), None);
    assert_eq!(decode_julian_day(Some(1e300)), None);
    assert_eq!(decode_julian_day(Some(-1e300)), None);
}

#[test]
fn gregorian_text_accepts_common_layouts() {
    assert_eq!(parse_gregorian_date("2012-07-01"), Some(date(2012, 7, 1)));
    assert_eq!(parse_gregorian_date("2012-12-30 14:00:00"), Some(date(2012, 12, 30)));
    assert_eq!(parse_gregorian_date("2012-12-30 14:00:00.250"), Some(date(2012, 12, 30)));
    assert_eq!(parse_gregorian_date("2012/07/04"), Some(date(2012, 7, 4)));
    assert_eq!(parse_gregorian_date("07/04/2012"), Some(date(2012, 7, 4)));
    assert_eq!(parse_gregorian_date(" "), None);
    assert_eq!(parse_gregorian_date("2012-13-01"), None);
}

#[test]
fn raw_dates_dispatch_on_encoding() {
    assert_eq!(
        decode_raw_date(Some(&RawDate::JulianDay(2_459_020.5))),
        Some(date(2020, 6, 20))
    );
    assert_eq!(
        decode_raw_date(Some(&RawDate::Text("2013-01-02".to_string()))),
        Some(date(2013, 1, 2))
    );
    assert_eq!(decode_raw_date(Some(&RawDate::Text("soon".to_string()))), None);
    assert_eq!(decode_raw_date(None), None);
}

#[test]
fn duration_is_signed_difference_in_days() {
    assert_eq!(duration_days(Some(date(2020, 6, 15)), Some(date(2020, 6, 20))), Some(5));
    assert_eq!(duration_days(Some(date(2020, 6, 15)), Some(date(2020, 6, 10))), Some(-5));
    assert_eq!(duration_days(None, Some(date(2020, 6, 10))), None);
    assert_eq!(duration_days(Some(date(2020, 6, 15)), None), None);
}

#[test]
fn sanitize_keeps_only_plausible_spans() {
    assert_eq!(sanitize_duration(Some(0)), Some(0));
    assert_eq!(sanitize_duration(Some(MAX_DURATION_DAYS)), Some(365));
    assert_eq!(sanitize_duration(Some(366)), None);
    assert_eq!(sanitize_duration(Some(-1)), None);
    assert_eq!(sanitize_duration(None), None);

    // a full leap year is one day too long
    let span = duration_days(Some(date(2020, 1, 1)), Some(date(2021, 1, 1)));
    assert_eq!(sanitize_duration(span), None);
}

#[test]
fn seasons_follow_meteorological_months() {
    let expected = [
        (1, Season::Winter),
        (2, Season::Winter),
        (3, Season::Spring),
        (5, Season::Spring),
        (6, Season::Summer),
        (8, Season::Summer),
        (9, Season::Fall),
        (11, Season::Fall),
        (12, Season::Winter),
    ];
    for (month, season) in expected {
        assert_eq!(Season::from_month(month), Some(season), "month {month}");
    }
    assert_eq!(Season::from_month(0), None);
    assert_eq!(Season::from_month(13), None);
    assert_eq!(season_for_month(None), None);
}

#[test]
fn season_labels_round_trip_through_text() {
    for season in Season::ALL {
        assert_eq!(season.to_string().parse::<Season>(), Ok(season));
    }
    assert_eq!("autumn".parse::<Season>(), Ok(Season::Fall));
    assert!("monsoon".parse::<Season>().is_err());
}

#[test]
fn acres_convert_to_metric_units() {
    let m2 = acres_to_square_meters(Some(100.0)).unwrap();
    assert!((m2 - 404_686.0).abs() < 1e-6);
    let ha = square_meters_to_hectares(Some(m2)).unwrap();
    assert!((ha - 40.4686).abs() < 1e-9);
    assert_eq!(acres_to_square_meters(None), None);
    assert_eq!(square_meters_to_hectares(None), None);
}

#[test]
fn area_unit_tiers_have_inclusive_lower_bounds() {
    assert_eq!(AreaUnit::for_square_meters(9_999.9), AreaUnit::SquareMeters);
    assert_eq!(AreaUnit::for_square_meters(10_000.0), AreaUnit::Hectares);
    assert_eq!(AreaUnit::for_square_meters(999_999.0), AreaUnit::Hectares);
    assert_eq!(AreaUnit::for_square_meters(1_000_000.0), AreaUnit::SquareKilometers);
}

#[test]
fn format_area_picks_unit_and_precision() {
    assert_eq!(format_area(Some(404_686.0)), "40.5 ha");
    assert_eq!(format_area(Some(10_000.0)), "1.0 ha");
    assert_eq!(format_area(Some(1_250_000.0)), "1.25 km²");
    assert_eq!(format_area(Some(8_093.72)), "8,094 m²");
    assert_eq!(format_area(Some(404.686)), "405 m²");
    assert_eq!(format_area(None), "N/A");
    assert_eq!(format_area(Some(f64::NAN)), "N/A");
}

#[test]
fn display_value_and_suffix_match_formatting() {
    assert_eq!(area_display_value(Some(404_686.0)), Some(40.5));
    assert_eq!(area_unit_suffix(Some(404_686.0)), Some("ha"));
    assert_eq!(area_display_value(Some(2_345_678.0)), Some(2.35));
    assert_eq!(area_unit_suffix(Some(2_345_678.0)), Some("km²"));
    assert_eq!(area_display_value(None), None);
    assert_eq!(area_unit_suffix(Some(f64::INFINITY)), None);
}

#[test]
fn display_value_rounds_ties_like_the_formatted_text() {
    for (area, expected) in [(2.5, 2.0), (12_500.0, 1.2), (3.5, 4.0)] {
        let shown = format_area(Some(area));
        let value = area_display_value(Some(area)).unwrap();
        assert_eq!(value, expected, "area {area}");
        let number = shown.split(' ').next().unwrap().replace(',', "");
        assert_eq!(number.parse::<f64>().unwrap(), value, "area {area} shown as {shown}");
    }
}

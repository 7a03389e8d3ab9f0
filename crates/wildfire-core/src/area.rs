//! Area conversion and the three-tier display formatting used in reports.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SQUARE_METERS_PER_ACRE: f64 = 4046.86;
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;
pub const SQUARE_METERS_PER_SQUARE_KILOMETER: f64 = 1_000_000.0;

/// Shown in place of an area that is missing.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn acres_to_square_meters(acres: Option<f64>) -> Option<f64> {
    acres.map(|value| value * SQUARE_METERS_PER_ACRE)
}

pub fn square_meters_to_hectares(square_meters: Option<f64>) -> Option<f64> {
    square_meters.map(|value| value / SQUARE_METERS_PER_HECTARE)
}

pub fn square_meters_to_square_kilometers(square_meters: Option<f64>) -> Option<f64> {
    square_meters.map(|value| value / SQUARE_METERS_PER_SQUARE_KILOMETER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeters,
    Hectares,
    SquareKilometers,
}

impl AreaUnit {
    /// Picks the display unit by magnitude. Lower bounds are inclusive.
    pub fn for_square_meters(value: f64) -> AreaUnit {
        if value >= SQUARE_METERS_PER_SQUARE_KILOMETER {
            AreaUnit::SquareKilometers
        } else if value >= SQUARE_METERS_PER_HECTARE {
            AreaUnit::Hectares
        } else {
            AreaUnit::SquareMeters
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m²",
            AreaUnit::Hectares => "ha",
            AreaUnit::SquareKilometers => "km²",
        }
    }

    pub fn decimals(&self) -> usize {
        match self {
            AreaUnit::SquareMeters => 0,
            AreaUnit::Hectares => 1,
            AreaUnit::SquareKilometers => 2,
        }
    }

    fn square_meters_per_unit(&self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::Hectares => SQUARE_METERS_PER_HECTARE,
            AreaUnit::SquareKilometers => SQUARE_METERS_PER_SQUARE_KILOMETER,
        }
    }

    pub fn from_square_meters(&self, square_meters: f64) -> f64 {
        square_meters / self.square_meters_per_unit()
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Formats an area given in m² with the unit its magnitude calls for, e.g.
/// `"40.5 ha"`, `"1.25 km²"` or `"8,094 m²"`.
pub fn format_area(square_meters: Option<f64>) -> String {
    let Some(value) = finite(square_meters) else {
        return NOT_AVAILABLE.to_string();
    };
    let unit = AreaUnit::for_square_meters(value);
    let scaled = unit.from_square_meters(value);
    let number = match unit {
        AreaUnit::SquareMeters => group_thousands(&format!("{scaled:.0}")),
        _ => format!("{scaled:.prec$}", prec = unit.decimals()),
    };
    format!("{number} {}", unit.suffix())
}

/// The number [`format_area`] would print, without the suffix.
pub fn area_display_value(square_meters: Option<f64>) -> Option<f64> {
    let value = finite(square_meters)?;
    let unit = AreaUnit::for_square_meters(value);
    let scaled = unit.from_square_meters(value);
    // same rounding as `format_area`
    format!("{scaled:.prec$}", prec = unit.decimals()).parse().ok()
}

pub fn area_unit_suffix(square_meters: Option<f64>) -> Option<&'static str> {
    finite(square_meters).map(|value| AreaUnit::for_square_meters(value).suffix())
}

fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if grouped == "0" {
        return grouped;
    }
    format!("{sign}{grouped}")
}

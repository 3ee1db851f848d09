//! Unit conversion utilities
//!
//! Converts user-facing lengths (millimetres, centimetres, inches) into the
//! millimetre values the marker engine works with. Inch input accepts
//! decimal and fractional notation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MM_PER_CM: f64 = 10.0;
const MM_PER_INCH: f64 = 25.4;

/// Length unit of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimetres
    #[serde(rename = "mm", alias = "millimeters")]
    Millimeters,
    /// Centimetres
    #[serde(rename = "cm", alias = "centimeters")]
    Centimeters,
    /// Inches
    #[serde(rename = "in", alias = "inches")]
    Inches,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Centimeters
    }
}

impl LengthUnit {
    /// Millimetres per one unit
    pub fn mm_factor(self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Centimeters => MM_PER_CM,
            Self::Inches => MM_PER_INCH,
        }
    }

    /// Convert a value in this unit to millimetres
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.mm_factor()
    }

    /// Convert a millimetre value to this unit
    pub fn from_mm(self, value_mm: f64) -> f64 {
        value_mm / self.mm_factor()
    }

    /// Short label ("mm", "cm", "in")
    pub fn label(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Inches => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "Millimeters"),
            Self::Centimeters => write!(f, "Centimeters"),
            Self::Inches => write!(f, "Inches"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Self::Millimeters)
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(Self::Centimeters)
            }
            "in" | "inch" | "inches" => Ok(Self::Inches),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Format a millimetre value in the given unit
pub fn format_length(value_mm: f64, unit: LengthUnit) -> String {
    format!("{:.2} {}", unit.from_mm(value_mm), unit.label())
}

/// Parse a length string to millimetres
///
/// * `input` - String to parse ("12.5", or for inches also "1 1/2")
/// * `unit` - Unit the input is expressed in
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    if unit == LengthUnit::Inches && input.contains('/') {
        let mut total_inches = 0.0;
        let negative = input.starts_with('-');
        for part in input.trim_start_matches('-').split_whitespace() {
            if part.contains('/') {
                let frac_parts: Vec<&str> = part.split('/').collect();
                if frac_parts.len() != 2 {
                    return Err("Invalid fraction format".to_string());
                }
                let num = frac_parts[0]
                    .parse::<f64>()
                    .map_err(|_| "Invalid numerator")?;
                let den = frac_parts[1]
                    .parse::<f64>()
                    .map_err(|_| "Invalid denominator")?;
                if den == 0.0 {
                    return Err("Division by zero".to_string());
                }
                total_inches += num / den;
            } else {
                total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
            }
        }
        let inches = if negative { -total_inches } else { total_inches };
        return Ok(unit.to_mm(inches));
    }

    let value = input.parse::<f64>().map_err(|e| e.to_string())?;
    if !value.is_finite() {
        return Err(format!("Length must be finite: {}", input));
    }
    Ok(unit.to_mm(value))
}

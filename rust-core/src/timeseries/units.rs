//! Physical quantity, units and sensor orientation of a record

use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical quantity carried by a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Acceleration,
    Velocity,
    Displacement,
}

impl DataType {
    /// Units that go with this quantity
    pub fn units(self) -> Units {
        match self {
            DataType::Acceleration => Units::CmPerSec2,
            DataType::Velocity => Units::CmPerSec,
            DataType::Displacement => Units::Cm,
        }
    }

    /// Quantity implied by a unit string
    pub fn from_units(units: Units) -> Self {
        match units {
            Units::CmPerSec2 => DataType::Acceleration,
            Units::CmPerSec => DataType::Velocity,
            Units::Cm => DataType::Displacement,
        }
    }

    /// Quantity after one integration, `None` past displacement
    pub fn integrated(self) -> Option<DataType> {
        match self {
            DataType::Acceleration => Some(DataType::Velocity),
            DataType::Velocity => Some(DataType::Displacement),
            DataType::Displacement => None,
        }
    }

    /// Quantity after one differentiation, `None` past acceleration
    pub fn differentiated(self) -> Option<DataType> {
        match self {
            DataType::Displacement => Some(DataType::Velocity),
            DataType::Velocity => Some(DataType::Acceleration),
            DataType::Acceleration => None,
        }
    }

    /// Three-letter tag used in history entries and file names
    pub fn short_name(self) -> &'static str {
        match self {
            DataType::Acceleration => "acc",
            DataType::Velocity => "vel",
            DataType::Displacement => "dis",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DataType {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "acc" | "acceleration" => Ok(DataType::Acceleration),
            "vel" | "velocity" => Ok(DataType::Velocity),
            "dis" | "displacement" => Ok(DataType::Displacement),
            other => Err(ProcessingError::InvalidArgument(format!(
                "unknown data type '{}'",
                other
            ))),
        }
    }
}

/// Amplitude units, one per [`DataType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "cm/s")]
    CmPerSec,
    #[serde(rename = "cm/s/s")]
    CmPerSec2,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Cm => "cm",
            Units::CmPerSec => "cm/s",
            Units::CmPerSec2 => "cm/s/s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cm" => Ok(Units::Cm),
            "cm/s" => Ok(Units::CmPerSec),
            "cm/s/s" => Ok(Units::CmPerSec2),
            other => Err(ProcessingError::InvalidArgument(format!(
                "unknown units '{}', expected cm, cm/s or cm/s/s",
                other
            ))),
        }
    }
}

/// Polarity of the vertical component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalSign {
    Up,
    Down,
}

impl fmt::Display for VerticalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerticalSign::Up => f.write_str("up"),
            VerticalSign::Down => f.write_str("down"),
        }
    }
}

impl FromStr for VerticalSign {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(VerticalSign::Up),
            "down" => Ok(VerticalSign::Down),
            other => Err(ProcessingError::InvalidArgument(format!(
                "vertical orientation must be up or down, got '{}'",
                other
            ))),
        }
    }
}

/// Slack (degrees) on the 90/270 separation of orthogonal horizontals,
/// absorbing rounding left by repeated rotations
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-6;

/// Sensor orientation: azimuths of the two horizontals (degrees) and the
/// polarity of the vertical
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub h1_azimuth: f64,
    pub h2_azimuth: f64,
    pub vertical: VerticalSign,
}

impl Orientation {
    pub fn new(h1_azimuth: f64, h2_azimuth: f64, vertical: VerticalSign) -> Self {
        Self {
            h1_azimuth,
            h2_azimuth,
            vertical,
        }
    }

    /// Horizontal components are 90 or 270 degrees apart, within
    /// [`ORTHOGONALITY_TOLERANCE`]
    pub fn is_orthogonal(&self) -> bool {
        let separation = (self.h1_azimuth - self.h2_azimuth).abs();
        (separation - 90.0).abs() <= ORTHOGONALITY_TOLERANCE
            || (separation - 270.0).abs() <= ORTHOGONALITY_TOLERANCE
    }
}

impl Default for Orientation {
    /// North, east, up
    fn default() -> Self {
        Self::new(0.0, 90.0, VerticalSign::Up)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {:?}, {}", self.h1_azimuth, self.h2_azimuth, self.vertical)
    }
}

/// Parses the `az1, az2, up|down` header form
///
/// Header orientations must describe orthogonal horizontals.
impl FromStr for Orientation {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(ProcessingError::InvalidArgument(format!(
                "orientation must contain three elements, got '{}'",
                s
            )));
        }

        let azimuth = |field: &str| {
            field.parse::<f64>().map_err(|_| {
                ProcessingError::InvalidArgument(format!("invalid azimuth '{}'", field))
            })
        };
        let orientation = Orientation::new(azimuth(fields[0])?, azimuth(fields[1])?, fields[2].parse()?);

        if !orientation.is_orthogonal() {
            return Err(ProcessingError::InvalidArgument(format!(
                "horizontal components {} and {} are not orthogonal",
                orientation.h1_azimuth, orientation.h2_azimuth
            )));
        }
        Ok(orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_data_type_correspondence() {
        for data_type in [DataType::Acceleration, DataType::Velocity, DataType::Displacement] {
            assert_eq!(DataType::from_units(data_type.units()), data_type);
        }
        assert_eq!("CM/S/S".parse::<Units>().unwrap(), Units::CmPerSec2);
        assert_eq!(" cm/s ".parse::<Units>().unwrap(), Units::CmPerSec);
        assert!(matches!("m/s".parse::<Units>(), Err(ProcessingError::InvalidArgument(_))));
    }

    #[test]
    fn test_integration_chain() {
        assert_eq!(DataType::Acceleration.integrated(), Some(DataType::Velocity));
        assert_eq!(DataType::Velocity.integrated(), Some(DataType::Displacement));
        assert_eq!(DataType::Displacement.integrated(), None);
        assert_eq!(DataType::Displacement.differentiated(), Some(DataType::Velocity));
        assert_eq!(DataType::Acceleration.differentiated(), None);
    }

    #[test]
    fn test_data_type_parse() {
        assert_eq!("acc".parse::<DataType>().unwrap(), DataType::Acceleration);
        assert_eq!("Velocity".parse::<DataType>().unwrap(), DataType::Velocity);
        assert!("jerk".parse::<DataType>().is_err());
        assert_eq!(DataType::Displacement.to_string(), "dis");
    }

    #[test]
    fn test_orientation_parse() {
        let orientation: Orientation = "0.0, 90.0, UP".parse().unwrap();
        assert_eq!(orientation, Orientation::default());

        let orientation: Orientation = "270,0,down".parse().unwrap();
        assert_eq!(orientation.h1_azimuth, 270.0);
        assert_eq!(orientation.vertical, VerticalSign::Down);

        assert!("0, 45, up".parse::<Orientation>().is_err());
        assert!("0, 90, sideways".parse::<Orientation>().is_err());
        assert!("0, 90".parse::<Orientation>().is_err());
        assert!("north, 90, up".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_orientation_display_round_trip() {
        let orientation = Orientation::new(30.0, 120.0, VerticalSign::Up);
        assert_eq!(orientation.to_string(), "30.0, 120.0, up");
        assert_eq!(orientation.to_string().parse::<Orientation>().unwrap(), orientation);
    }

    #[test]
    fn test_orthogonality() {
        assert!(Orientation::default().is_orthogonal());
        assert!(Orientation::new(0.0, 270.0, VerticalSign::Up).is_orthogonal());
        assert!(!Orientation::new(0.0, 45.0, VerticalSign::Up).is_orthogonal());
        assert!(!Orientation::new(0.0, 90.001, VerticalSign::Up).is_orthogonal());

        // Rounding residue from rotating north/east by 104.4 degrees
        let drifted = Orientation::new(0.0 - 104.4 + 360.0, 90.0 - 104.4 + 360.0, VerticalSign::Up);
        assert!(drifted.is_orthogonal());
        assert_eq!(drifted.to_string().parse::<Orientation>().unwrap(), drifted);
    }
}

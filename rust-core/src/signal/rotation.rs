//! Rotation of the two horizontal components

use crate::error::{ProcessingError, Result};
use crate::timeseries::units::ORTHOGONALITY_TOLERANCE;
use crate::timeseries::Orientation;
use ndarray::{array, stack, Array2, ArrayView1, Axis};

/// Rotated horizontals with their new orientation
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedPair {
    pub h1: Vec<f64>,
    pub h2: Vec<f64>,
    pub orientation: Orientation,
}

/// Check a requested rotation angle
///
/// Returns `None` when the rotation is a no-op (no angle, 0 or 360 degrees).
pub fn validate_angle(angle_deg: Option<f64>) -> Result<Option<f64>> {
    let Some(angle) = angle_deg else {
        return Ok(None);
    };
    if angle == 0.0 || angle == 360.0 {
        return Ok(None);
    }
    if !angle.is_finite() || !(0.0..=360.0).contains(&angle) {
        return Err(ProcessingError::InvalidArgument(format!(
            "invalid rotation angle: {}",
            angle
        )));
    }
    Ok(Some(angle))
}

/// Rotation matrix for horizontals separated by `c_angle` degrees
///
/// `c_angle` is `az1 - az2` after ordering, so it is -90 when h2 lies 90
/// degrees clockwise of h1 and -270 when it lies 90 degrees counterclockwise.
/// The two layouts need different sign patterns.
pub fn rotation_matrix(angle_deg: f64, c_angle: f64) -> Array2<f64> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    if (c_angle.abs() - 90.0).abs() <= ORTHOGONALITY_TOLERANCE {
        array![[cos, -sin], [sin, cos]]
    } else {
        array![[cos, sin], [-sin, cos]]
    }
}

/// Azimuth decimals kept after a rotation
const AZIMUTH_SCALE: f64 = 1e9;

/// Wrap into [0, 360) and drop rounding residue below 1e-9 degrees
fn wrap_azimuth(azimuth: f64) -> f64 {
    let snapped = (azimuth.rem_euclid(360.0) * AZIMUTH_SCALE).round() / AZIMUTH_SCALE;
    if snapped >= 360.0 {
        0.0
    } else {
        // Normalizes -0.0
        snapped + 0.0
    }
}

/// Rotate a pair of horizontals by `angle_deg` degrees
///
/// Components are ordered by azimuth to pick the matrix, then handed back in
/// the caller's order. Both azimuths decrease by the angle and are wrapped
/// into [0, 360).
pub fn rotate_horizontals(
    h1: &[f64],
    h2: &[f64],
    orientation: Orientation,
    angle_deg: f64,
) -> Result<RotatedPair> {
    let swapped = orientation.h1_azimuth > orientation.h2_azimuth;
    let (first, second, mut az1, mut az2) = if swapped {
        (h2, h1, orientation.h2_azimuth, orientation.h1_azimuth)
    } else {
        (h1, h2, orientation.h1_azimuth, orientation.h2_azimuth)
    };

    let c_angle = az1 - az2;
    if !orientation.is_orthogonal() {
        return Err(ProcessingError::InvalidState(format!(
            "need two orthogonal channels, azimuths are {} and {}",
            az1, az2
        )));
    }

    let stacked = stack(Axis(0), &[ArrayView1::from(first), ArrayView1::from(second)])
        .map_err(|e| ProcessingError::InvalidState(format!("horizontal lengths differ: {}", e)))?;
    let rotated = rotation_matrix(angle_deg, c_angle).dot(&stacked);

    az1 = wrap_azimuth(az1 - angle_deg);
    az2 = wrap_azimuth(az2 - angle_deg);

    let (row1, row2) = if swapped { (1, 0) } else { (0, 1) };
    if swapped {
        std::mem::swap(&mut az1, &mut az2);
    }
    Ok(RotatedPair {
        h1: rotated.row(row1).to_vec(),
        h2: rotated.row(row2).to_vec(),
        orientation: Orientation::new(az1, az2, orientation.vertical),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::VerticalSign;

    fn signals() -> (Vec<f64>, Vec<f64>) {
        let h1 = (0..64).map(|i| (i as f64 * 0.2).sin()).collect();
        let h2 = (0..64).map(|i| (i as f64 * 0.35).cos() * 2.0).collect();
        (h1, h2)
    }

    #[test]
    fn test_validate_angle() {
        assert_eq!(validate_angle(None).unwrap(), None);
        assert_eq!(validate_angle(Some(0.0)).unwrap(), None);
        assert_eq!(validate_angle(Some(360.0)).unwrap(), None);
        assert_eq!(validate_angle(Some(30.0)).unwrap(), Some(30.0));
        assert!(matches!(validate_angle(Some(-1.0)), Err(ProcessingError::InvalidArgument(_))));
        assert!(matches!(validate_angle(Some(361.0)), Err(ProcessingError::InvalidArgument(_))));
        assert!(validate_angle(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_rotate_by_90_projects_components() {
        // North/east pair rotated by 90: new h1 points west, new h2 north
        let north = vec![1.0, 2.0];
        let east = vec![10.0, 20.0];
        let rotated = rotate_horizontals(&north, &east, Orientation::default(), 90.0).unwrap();

        assert_eq!(rotated.orientation.h1_azimuth, 270.0);
        assert_eq!(rotated.orientation.h2_azimuth, 0.0);
        for i in 0..2 {
            assert!((rotated.h1[i] + east[i]).abs() < 1e-12);
            assert!((rotated.h2[i] - north[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_orientation_wraps() {
        let (h1, h2) = signals();
        let rotated = rotate_horizontals(&h1, &h2, Orientation::default(), 30.0).unwrap();
        assert_eq!(rotated.orientation.h1_azimuth, 330.0);
        assert_eq!(rotated.orientation.h2_azimuth, 60.0);
        assert_eq!(rotated.orientation.vertical, VerticalSign::Up);
    }

    #[test]
    fn test_component_order_is_kept() {
        let (h1, h2) = signals();
        let swapped = Orientation::new(90.0, 0.0, VerticalSign::Down);
        let a = rotate_horizontals(&h2, &h1, swapped, 45.0).unwrap();
        let b = rotate_horizontals(&h1, &h2, Orientation::default(), 45.0).unwrap();

        assert_eq!(a.orientation, Orientation::new(45.0, 315.0, VerticalSign::Down));
        assert_eq!(a.h1, b.h2);
        assert_eq!(a.h2, b.h1);
    }

    #[test]
    fn test_non_orthogonal_rejected() {
        let (h1, h2) = signals();
        let skewed = Orientation::new(0.0, 45.0, VerticalSign::Up);
        assert!(matches!(
            rotate_horizontals(&h1, &h2, skewed, 30.0),
            Err(ProcessingError::InvalidState(_))
        ));
    }

    #[test]
    fn test_counterclockwise_pair_round_trip() {
        // h2 lies 90 degrees counterclockwise of h1 (c_angle = -270)
        let (h1, h2) = signals();
        let orientation = Orientation::new(0.0, 270.0, VerticalSign::Up);

        let first = rotate_horizontals(&h1, &h2, orientation, 30.0).unwrap();
        assert_eq!(first.orientation.h1_azimuth, 330.0);
        assert_eq!(first.orientation.h2_azimuth, 240.0);

        let second = rotate_horizontals(&first.h1, &first.h2, first.orientation, 330.0).unwrap();
        assert_eq!(second.orientation.h1_azimuth, 0.0);
        assert_eq!(second.orientation.h2_azimuth, 270.0);
        for i in 0..h1.len() {
            assert!((second.h1[i] - h1[i]).abs() < 1e-9);
            assert!((second.h2[i] - h2[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wrap_azimuth() {
        assert_eq!(wrap_azimuth(-30.0), 330.0);
        assert_eq!(wrap_azimuth(90.0), 90.0);
        assert_eq!(wrap_azimuth(-1e-13), 0.0);
        assert!(wrap_azimuth(-1e-13).is_sign_positive());
        assert_eq!(wrap_azimuth(360.0 - 1e-12), 0.0);
        assert_eq!(wrap_azimuth(255.60000000000002), 255.6);
    }

    #[test]
    fn test_round_trip_over_fractional_angles() {
        let (h1, h2) = signals();
        for &start in &[Orientation::default(), Orientation::new(0.0, 270.0, VerticalSign::Up)] {
            for k in 1..3600 {
                let angle = k as f64 * 0.1;
                let back = (360.0 - angle) % 360.0;

                let first = rotate_horizontals(&h1, &h2, start, angle).unwrap();
                assert!(first.orientation.is_orthogonal(), "angle {}", angle);
                let second = rotate_horizontals(&first.h1, &first.h2, first.orientation, back)
                    .unwrap_or_else(|e| panic!("angle {} then {}: {}", angle, back, e));

                assert!((second.orientation.h1_azimuth - start.h1_azimuth).abs() < 1e-9, "angle {}", angle);
                assert!((second.orientation.h2_azimuth - start.h2_azimuth).abs() < 1e-9, "angle {}", angle);
                for i in 0..h1.len() {
                    assert!((second.h1[i] - h1[i]).abs() < 1e-9, "angle {} index {}", angle, i);
                    assert!((second.h2[i] - h2[i]).abs() < 1e-9, "angle {} index {}", angle, i);
                }
            }
        }
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        for &c_angle in &[-90.0, -270.0] {
            let m = rotation_matrix(37.0, c_angle);
            let product = m.dot(&m.t());
            assert!((product[[0, 0]] - 1.0).abs() < 1e-12);
            assert!((product[[1, 1]] - 1.0).abs() < 1e-12);
            assert!(product[[0, 1]].abs() < 1e-12);
        }
    }
}

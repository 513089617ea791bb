use serde::{Deserialize, Serialize};

use crate::DataError;

/// One curve digitized from a design chart.
///
/// Points are `[specific speed, value]` pairs in chart order. A single curve
/// may stand for several vane counts when the chart draws them as one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub points: Vec<[f64; 2]>,
    pub vanes: Vec<u32>,

    /// Marks a head-rise curve that droops toward shutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droop: Option<bool>,

    /// Blade discharge angle in degrees, kept for labeling only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_angle: Option<f64>,
}

impl CurveRecord {
    /// Creates a record with no droop flag or discharge angle.
    #[must_use]
    pub fn new(points: Vec<[f64; 2]>, vanes: Vec<u32>) -> Self {
        Self {
            points,
            vanes,
            droop: None,
            discharge_angle: None,
        }
    }

    #[must_use]
    pub fn with_droop(mut self, droop: bool) -> Self {
        self.droop = Some(droop);
        self
    }

    #[must_use]
    pub fn with_discharge_angle(mut self, degrees: f64) -> Self {
        self.discharge_angle = Some(degrees);
        self
    }

    /// Returns `true` only when the record is explicitly flagged as drooping.
    #[must_use]
    pub fn is_droop(&self) -> bool {
        self.droop.unwrap_or(false)
    }

    /// Smallest specific speed sampled on this curve.
    #[must_use]
    pub fn min_speed(&self) -> Option<f64> {
        self.points.iter().map(|p| p[0]).reduce(f64::min)
    }

    /// Largest specific speed sampled on this curve.
    #[must_use]
    pub fn max_speed(&self) -> Option<f64> {
        self.points.iter().map(|p| p[0]).reduce(f64::max)
    }

    /// Checks the record invariants.
    ///
    /// `curve` is the record's position in its chart and is only used to
    /// make error messages point at the offending curve.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if the record has no points or vanes, lists a
    /// zero vane count, contains a non-finite value, or has decreasing speeds.
    pub fn validate(&self, curve: usize) -> Result<(), DataError> {
        if self.points.is_empty() {
            return Err(DataError::EmptyPoints { curve });
        }
        if self.vanes.is_empty() {
            return Err(DataError::EmptyVanes { curve });
        }
        if self.vanes.contains(&0) {
            return Err(DataError::ZeroVanes { curve });
        }

        for (point, [x, y]) in self.points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(DataError::NonFinitePoint { curve, point });
            }
        }

        for (i, pair) in self.points.windows(2).enumerate() {
            if pair[1][0] < pair[0][0] {
                return Err(DataError::DecreasingSpeed {
                    curve,
                    point: i + 1,
                });
            }
        }

        Ok(())
    }
}

/// Validates every record of a chart.
///
/// # Errors
///
/// Returns [`DataError::NoCurves`] for an empty chart, or the first record
/// error encountered.
pub fn validate_records(records: &[CurveRecord]) -> Result<(), DataError> {
    if records.is_empty() {
        return Err(DataError::NoCurves);
    }
    records
        .iter()
        .enumerate()
        .try_for_each(|(curve, record)| record.validate(curve))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CurveRecord {
        CurveRecord::new(vec![[500.0, 0.1], [1000.0, 0.2], [1500.0, 0.25]], vec![5, 6])
    }

    #[test]
    fn speed_extents() {
        let record = sample();
        assert_eq!(record.min_speed(), Some(500.0));
        assert_eq!(record.max_speed(), Some(1500.0));
        assert!(!record.is_droop());
        assert!(record.clone().with_droop(true).is_droop());
    }

    #[test]
    fn rejects_malformed_records() {
        let mut empty_points = sample();
        empty_points.points.clear();
        assert_eq!(
            empty_points.validate(3),
            Err(DataError::EmptyPoints { curve: 3 })
        );

        let mut empty_vanes = sample();
        empty_vanes.vanes.clear();
        assert_eq!(empty_vanes.validate(0), Err(DataError::EmptyVanes { curve: 0 }));

        let mut zero_vanes = sample();
        zero_vanes.vanes.push(0);
        assert_eq!(zero_vanes.validate(0), Err(DataError::ZeroVanes { curve: 0 }));

        let mut nan = sample();
        nan.points[1][1] = f64::NAN;
        assert_eq!(
            nan.validate(1),
            Err(DataError::NonFinitePoint { curve: 1, point: 1 })
        );

        let mut backwards = sample();
        backwards.points[2][0] = 900.0;
        assert_eq!(
            backwards.validate(0),
            Err(DataError::DecreasingSpeed { curve: 0, point: 2 })
        );
    }

    #[test]
    fn empty_chart_is_rejected() {
        assert_eq!(validate_records(&[]), Err(DataError::NoCurves));
        assert_eq!(validate_records(&[sample()]), Ok(()));
    }

    #[test]
    fn deserializes_chart_json() {
        let json = r#"{"points": [[400, 0.6], [3400, 0.19]], "vanes": [7], "droop": true}"#;
        let record: CurveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.points, vec![[400.0, 0.6], [3400.0, 0.19]]);
        assert_eq!(record.vanes, vec![7]);
        assert!(record.is_droop());
        assert_eq!(record.discharge_angle, None);
    }
}

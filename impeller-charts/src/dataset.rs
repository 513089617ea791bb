//! Reference curve records for each chart.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use impeller_fit::CurveRecord;
use serde::{Deserialize, Serialize};

use crate::{ChartId, DatasetError};

const LOBANOFF_JSON: &str = include_str!("../data/lobanoff.json");

/// A read-only source of curve records.
///
/// Records are handed out as loaded. Malformed records are only reported
/// when a fit is first requested for their chart.
pub trait ReferenceData {
    /// The records of `chart`, or an empty slice if the source has none.
    fn curves(&self, chart: ChartId) -> &[CurveRecord];
}

/// Curve records keyed by chart, as stored in a JSON object such as
/// `{"volute_constant": [{"points": [[400, 0.6], ...], "vanes": [5, 6]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    charts: HashMap<ChartId, Vec<CurveRecord>>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The digitized Lobanoff charts bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the bundled JSON cannot be parsed.
    pub fn lobanoff() -> Result<Self, DatasetError> {
        Self::from_json_str(LOBANOFF_JSON)
    }

    /// # Errors
    ///
    /// Returns [`DatasetError::Json`] if `json` is not a valid dataset.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns a [`DatasetError`] if reading fails or the content is not a valid dataset.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the file cannot be opened or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Replaces the records of `chart`.
    #[must_use]
    pub fn with_chart(mut self, chart: ChartId, records: Vec<CurveRecord>) -> Self {
        self.insert(chart, records);
        self
    }

    /// Replaces the records of `chart`, returning the previous ones.
    pub fn insert(&mut self, chart: ChartId, records: Vec<CurveRecord>) -> Option<Vec<CurveRecord>> {
        self.charts.insert(chart, records)
    }

    /// Charts present in the dataset, in [`ChartId::ALL`] order.
    #[must_use]
    pub fn charts(&self) -> Vec<ChartId> {
        ChartId::ALL
            .into_iter()
            .filter(|chart| self.charts.contains_key(chart))
            .collect()
    }
}

impl ReferenceData for Dataset {
    fn curves(&self, chart: ChartId) -> &[CurveRecord] {
        self.charts.get(&chart).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Display label for a raw curve, e.g. `"6 vanes, 22.5 deg, droop"`.
#[must_use]
pub fn curve_label(record: &CurveRecord) -> String {
    let vanes = record
        .vanes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("/");

    let mut label = format!("{vanes} vanes");
    if let Some(angle) = record.discharge_angle {
        label.push_str(&format!(", {angle} deg"));
    }
    if record.is_droop() {
        label.push_str(", droop");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_has_every_chart() {
        let dataset = Dataset::lobanoff().unwrap();
        assert_eq!(dataset.charts(), ChartId::ALL.to_vec());
        for chart in ChartId::ALL {
            assert!(!dataset.curves(chart).is_empty(), "{chart} has no curves");
        }
    }

    #[test]
    fn missing_chart_is_empty() {
        let dataset = Dataset::from_json_str(
            r#"{"volute_constant": [{"points": [[400, 0.6], [3400, 0.19]], "vanes": [5]}]}"#,
        )
        .unwrap();
        assert_eq!(dataset.curves(ChartId::VoluteConstant).len(), 1);
        assert!(dataset.curves(ChartId::HeadRise).is_empty());
    }

    #[test]
    fn rejects_unknown_chart_keys() {
        let result = Dataset::from_json_str(r#"{"impeller_width": []}"#);
        assert!(matches!(result, Err(DatasetError::Json(_))));
    }

    #[test]
    fn from_reader_matches_from_str() {
        let json = r#"{"head_rise": [{"points": [[500, 8]], "vanes": [7], "droop": true}]}"#;
        let a = Dataset::from_json_str(json).unwrap();
        let b = Dataset::from_reader(json.as_bytes()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn labels() {
        let record = CurveRecord::new(vec![[500.0, 11.0]], vec![6])
            .with_discharge_angle(22.5)
            .with_droop(true);
        assert_eq!(curve_label(&record), "6 vanes, 22.5 deg, droop");

        let shared = CurveRecord::new(vec![[500.0, 0.04]], vec![5, 6]);
        assert_eq!(curve_label(&shared), "5/6 vanes");
    }
}

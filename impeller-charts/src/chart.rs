//! Chart identities and the metadata printed on each figure.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::Ratio,
    ratio::{percent, ratio},
};

use crate::ChartError;

/// The design charts this crate models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    /// Head constant Ku, a family of straight lines over vane count.
    HeadConstant,
    /// Capacity constant Km2, a surface over vane count and specific speed.
    CapacityConstant,
    /// Percent head rise from best efficiency to shutoff.
    HeadRise,
    /// Volute velocity constant K3, independent of vane count.
    VoluteConstant,
}

impl ChartId {
    pub const ALL: [ChartId; 4] = [
        ChartId::HeadConstant,
        ChartId::CapacityConstant,
        ChartId::HeadRise,
        ChartId::VoluteConstant,
    ];

    /// The key used for this chart in datasets and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeadConstant => "head_constant",
            Self::CapacityConstant => "capacity_constant",
            Self::HeadRise => "head_rise",
            Self::VoluteConstant => "volute_constant",
        }
    }

    /// Figure title, axis labels, and the input and output conventions.
    #[must_use]
    pub fn info(self) -> ChartInfo {
        const X_LABEL: &str = "Ns - Specific Speed";

        match self {
            Self::HeadConstant => ChartInfo {
                title: "Figure 3-3: Head Constant Ku [US]",
                x_label: X_LABEL,
                y_label: "Ku - Head Constant",
                input: InputKind::SpeedAndVanes,
                output: OutputUnit::Ratio,
            },
            Self::CapacityConstant => ChartInfo {
                title: "Figure 3-4: Capacity Constant Km2 [US]",
                x_label: X_LABEL,
                y_label: "Km2 - Capacity Constant",
                input: InputKind::SpeedAndVanes,
                output: OutputUnit::Ratio,
            },
            Self::HeadRise => ChartInfo {
                title: "Figure 3-2: Percent Head Rise at Shutoff",
                x_label: X_LABEL,
                y_label: "Percent Head Rise from B.E.P. to shutoff",
                input: InputKind::SpeedAndVanes,
                output: OutputUnit::Percent,
            },
            Self::VoluteConstant => ChartInfo {
                title: "Figure 3-8: K3 = C3 / sqrt(2gH) - Volute Velocity Constant",
                x_label: X_LABEL,
                y_label: "K3 - Volute Velocity Constant",
                input: InputKind::Speed,
                output: OutputUnit::Ratio,
            },
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartId {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|chart| chart.as_str() == s)
            .ok_or_else(|| ChartError::UnknownChart {
                name: s.to_string(),
            })
    }
}

/// Static description of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartInfo {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub input: InputKind,
    pub output: OutputUnit,
}

/// What a chart is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Specific speed alone.
    Speed,
    /// Specific speed and vane count.
    SpeedAndVanes,
}

/// The unit a chart value is printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputUnit {
    Ratio,
    Percent,
}

impl OutputUnit {
    /// Interprets `value`, given in this unit, as a dimensionless quantity.
    #[must_use]
    pub fn quantity(self, value: f64) -> Ratio {
        match self {
            Self::Ratio => Ratio::new::<ratio>(value),
            Self::Percent => Ratio::new::<percent>(value),
        }
    }
}

/// A chart reading tagged with the unit it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartValue {
    value: f64,
    unit: OutputUnit,
}

impl ChartValue {
    #[must_use]
    pub fn new(value: f64, unit: OutputUnit) -> Self {
        Self { value, unit }
    }

    /// The value in the chart's own unit.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn unit(&self) -> OutputUnit {
        self.unit
    }

    /// The value as a `uom` ratio, so percent and plain ratios compare directly.
    #[must_use]
    pub fn quantity(&self) -> Ratio {
        self.unit.quantity(self.value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn names_round_trip() {
        for chart in ChartId::ALL {
            assert_eq!(chart.as_str().parse::<ChartId>(), Ok(chart));
            assert_eq!(chart.to_string(), chart.as_str());
        }
        assert_eq!(
            "impeller_width".parse::<ChartId>(),
            Err(ChartError::UnknownChart {
                name: "impeller_width".to_string()
            })
        );
    }

    #[test]
    fn only_volute_ignores_vanes() {
        for chart in ChartId::ALL {
            let expected = if chart == ChartId::VoluteConstant {
                InputKind::Speed
            } else {
                InputKind::SpeedAndVanes
            };
            assert_eq!(chart.info().input, expected);
        }
        assert_eq!(ChartId::HeadRise.info().output, OutputUnit::Percent);
    }

    #[test]
    fn percent_values_convert_to_ratio() {
        let rise = ChartValue::new(25.0, OutputUnit::Percent);
        assert_relative_eq!(rise.quantity().get::<ratio>(), 0.25, epsilon = 1e-15);
        assert_eq!(rise.value(), 25.0);
    }

    #[test]
    fn serializes_as_dataset_key() {
        let json = serde_json::to_string(&ChartId::CapacityConstant).unwrap();
        assert_eq!(json, "\"capacity_constant\"");
    }
}

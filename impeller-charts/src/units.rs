//! Specific speed and its unit conventions.
//!
//! Specific speed `Ns = N·√Q / H^¾` has a fractional dimension, so it cannot
//! be a `uom` quantity. [`SpecificSpeed`] instead carries an explicit
//! [`SpecificSpeedUnit`] tag and converts between conventions on request.
//! The design charts are all read in the US customary convention.

use serde::{Deserialize, Serialize};
use uom::si::{
    acceleration::{meter_per_second_squared, standard_gravity},
    angular_velocity::{radian_per_second, revolution_per_minute},
    f64::{Acceleration, AngularVelocity, Length, VolumeRate},
    length::{foot, meter},
    volume_rate::{cubic_meter_per_second, gallon_per_minute},
};

/// Unit convention of a specific speed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecificSpeedUnit {
    /// rpm · gpm^½ / ft^¾ with US gallons, the convention of the charts.
    UsCustomary,
    /// rpm · (m³/s)^½ / m^¾.
    Metric,
    /// ω · Q^½ / (g·H)^¾ in coherent SI units (rad/s, m³/s, J/kg).
    Dimensionless,
}

impl SpecificSpeedUnit {
    /// Multiplier taking a value in this unit to the US customary convention.
    fn to_us_factor(self) -> f64 {
        match self {
            Self::UsCustomary => 1.0,
            Self::Metric => metric_to_us(),
            Self::Dimensionless => {
                let rpm_per_rad_s =
                    AngularVelocity::new::<radian_per_second>(1.0).get::<revolution_per_minute>();
                let g = Acceleration::new::<standard_gravity>(1.0).get::<meter_per_second_squared>();
                metric_to_us() * rpm_per_rad_s * g.powf(0.75)
            }
        }
    }
}

fn metric_to_us() -> f64 {
    let gpm = VolumeRate::new::<cubic_meter_per_second>(1.0).get::<gallon_per_minute>();
    let ft = Length::new::<meter>(1.0).get::<foot>();
    gpm.sqrt() / ft.powf(0.75)
}

/// A specific speed value tagged with its unit convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificSpeed {
    value: f64,
    unit: SpecificSpeedUnit,
}

impl SpecificSpeed {
    #[must_use]
    pub fn new(value: f64, unit: SpecificSpeedUnit) -> Self {
        Self { value, unit }
    }

    /// A specific speed in rpm · gpm^½ / ft^¾.
    #[must_use]
    pub fn us_customary(value: f64) -> Self {
        Self::new(value, SpecificSpeedUnit::UsCustomary)
    }

    /// Computes specific speed from a best-efficiency operating point.
    ///
    /// `head` is the head per stage. The result is expressed in the US
    /// customary convention regardless of the units the inputs were given in.
    #[must_use]
    pub fn from_operating_point(speed: AngularVelocity, flow: VolumeRate, head: Length) -> Self {
        let n = speed.get::<revolution_per_minute>();
        let q = flow.get::<gallon_per_minute>();
        let h = head.get::<foot>();
        Self::us_customary(n * q.sqrt() / h.powf(0.75))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn unit(&self) -> SpecificSpeedUnit {
        self.unit
    }

    /// Returns the value expressed in `unit`.
    #[must_use]
    pub fn get(&self, unit: SpecificSpeedUnit) -> f64 {
        if unit == self.unit {
            return self.value;
        }
        self.value * self.unit.to_us_factor() / unit.to_us_factor()
    }

    /// Returns the value in the chart convention, rpm · gpm^½ / ft^¾.
    #[must_use]
    pub fn to_us_customary(&self) -> f64 {
        self.get(SpecificSpeedUnit::UsCustomary)
    }
}
